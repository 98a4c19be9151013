mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use platefinder_common::logging::{self, LogDestination};
use platefinder_common::{Config, PlateFinderError};
use platefinder_core::{
    ConfiguredLocator, Coordinates, CuisineEntry, DetailView, FileStore, FixedLocator,
    SearchQuery, SearchService, SessionStore, SessionView, ZomatoClient,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::future::Future;
use std::{io, time::Duration};
use tui::app::{Action, App, Loading};
use tui::events::handle_key;
use tui::ui::render;

type Service = SearchService<ZomatoClient, ConfiguredLocator, FileStore>;
type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser)]
#[command(name = "platefinder", version, about = "Find restaurants near you from the terminal")]
struct Cli {
    /// Latitude to search around instead of locating by IP
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,
    /// Longitude to search around instead of locating by IP
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browser (default)
    Browse,
    /// Search by restaurant name or cuisine id and print page 1
    Search {
        #[arg(long, conflicts_with = "cuisine", required_unless_present = "cuisine")]
        name: Option<String>,
        #[arg(long)]
        cuisine: Option<u64>,
    },
    /// List cuisines available nearby (cached after the first call)
    Cuisines,
    /// Show one restaurant's details
    Show { id: u64 },
    /// Switch to another page of the last search
    Page { page: u32 },
    /// Print the current page of the last search
    List,
    /// Forget the stored session
    Reset,
    /// Write or locate the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print shell completions
    Completions { shell: clap_complete::Shell },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("{e}; using defaults");
        Config::default()
    });
    let command = cli.command.unwrap_or(Commands::Browse);
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        logging::parse_level(&config.logging.level)
    };
    match command {
        Commands::Browse => {
            let log_file = config.logging.resolved_file();
            logging::initialize(LogDestination::File(&log_file), level);
        }
        _ => {
            let level = if cli.verbose { level } else { log::LevelFilter::Warn };
            logging::initialize(LogDestination::Terminal, level);
        }
    }
    let at = cli.lat.zip(cli.lon).map(|(latitude, longitude)| Coordinates { latitude, longitude });
    let service = build_service(&config, at);

    match command {
        Commands::Browse => run_tui(config, service)?,
        Commands::Search { name, cuisine } => {
            let query = match (name, cuisine) {
                (Some(term), _) => SearchQuery::Name(term),
                (None, Some(id)) => SearchQuery::Cuisine(id),
                (None, None) => anyhow::bail!("pass --name or --cuisine"),
            };
            match service.search(query).await {
                Ok(state) => print_page(&SessionView::project(&state, &config.display)),
                Err(e) => report(e)?,
            }
        }
        Commands::Cuisines => match service.load_cuisines().await {
            Ok(cuisines) => print_cuisines(&cuisines),
            Err(e) => report(e)?,
        },
        Commands::Show { id } => match service.select_restaurant(id).await {
            Ok(_) => {
                let state = service.current()?;
                if let Some(detail) = SessionView::project(&state, &config.display).detail {
                    print_detail(&detail);
                }
            }
            Err(e) => report(e)?,
        },
        Commands::Page { page } => match service.change_page(page) {
            Ok(state) => print_page(&SessionView::project(&state, &config.display)),
            Err(e) => report(e)?,
        },
        Commands::List => match service.current() {
            Ok(state) => print_page(&SessionView::project(&state, &config.display)),
            Err(e) => report(e)?,
        },
        Commands::Reset => {
            service.sessions().clear()?;
            println!("Session cleared");
        }
        Commands::Config { action } => run_config(action)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "platefinder", &mut io::stdout());
        }
    }
    Ok(())
}

fn build_service(config: &Config, at: Option<Coordinates>) -> Service {
    let api = ZomatoClient::from_config(&config.api);
    let locator = match at {
        Some(at) => ConfiguredLocator::Fixed(FixedLocator(Some(at))),
        None => ConfiguredLocator::from_config(&config.location),
    };
    let store = FileStore::new(config.storage.resolved_dir());
    let sessions = SessionStore::new(store, config.storage.session_key.clone(), config.storage.on_corrupt);
    SearchService::new(api, locator, sessions, config.display.page_size)
}

/// Recoverable failures print a one-line message; the rest abort.
fn report(err: PlateFinderError) -> anyhow::Result<()> {
    if err.is_recoverable() {
        log::debug!("{err}");
        eprintln!("Error! {}", err.user_message());
        Ok(())
    } else {
        Err(err.into())
    }
}

fn print_page(view: &SessionView) {
    if view.rows.is_empty() {
        println!("No restaurants in this session yet");
        return;
    }
    for row in &view.rows {
        println!("{:>10}  {:<16}  Tel: {}", row.id, row.name, row.phone);
    }
    let mut footer = view.page_label.clone().unwrap_or_default();
    if let Some(prev) = view.nav.prev {
        footer.push_str(&format!("  « {prev}"));
    }
    if let Some(next) = view.nav.next {
        footer.push_str(&format!("  {next} »"));
    }
    println!("{footer}");
}

fn print_detail(d: &DetailView) {
    println!("{}", d.name);
    println!("{:<16}{}", "Cuisines:", d.cuisines);
    println!("{:<16}{}", "Ratings:", d.rating_label);
    println!("{:<16}{}", "Opening times:", d.timings);
    println!("{:<16}{}", "Address:", d.address);
    println!("{:<16}{}", "Tel:", d.phones);
    println!("{:<16}{}", "Photo:", d.thumb);
}

fn print_cuisines(cuisines: &[CuisineEntry]) {
    for c in cuisines {
        println!("{:>6}  {}", c.cuisine.cuisine_id, c.cuisine.cuisine_name);
    }
}

fn run_config(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Path => println!("{}", Config::config_path().display()),
        ConfigAction::Init { force } => {
            let path = Config::config_path();
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let written = Config::default().save()?;
            println!("Wrote {}", written.display());
        }
    }
    Ok(())
}

/// block_in_place wrapper to drive one async service call from the sync event loop
fn block<F: Future>(fut: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(fut))
}

fn run_tui(config: Config, service: Service) -> anyhow::Result<()> {
    let mut app = App::new(config);
    match service.current() {
        Ok(state) => app.refresh(&state),
        Err(e) => app.show_list_error(&e),
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, &mut app, &service);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome
}

fn event_loop(terminal: &mut Term, app: &mut App, service: &Service) -> anyhow::Result<()> {
    if app.view.cuisine_options.is_empty() {
        app.loading = Some(Loading::Cuisines);
        terminal.draw(|f| render(f, app))?;
        let loaded = block(service.load_cuisines()).and_then(|_| service.current());
        app.loading = None;
        match loaded {
            Ok(state) => app.refresh(&state),
            Err(e) => app.show_list_error(&e),
        }
    }

    let tick = Duration::from_millis(100);
    loop {
        terminal.draw(|f| render(f, app))?;
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = handle_key(app, key) {
                    perform(terminal, app, service, action)?;
                }
            }
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn perform(terminal: &mut Term, app: &mut App, service: &Service, action: Action) -> anyhow::Result<()> {
    match action {
        Action::Search(query) => {
            app.list_error = None;
            app.loading = Some(Loading::Results);
            terminal.draw(|f| render(f, app))?;
            let result = block(service.search(query));
            app.loading = None;
            match result {
                Ok(state) => {
                    app.list_selected = 0;
                    app.refresh(&state);
                    app.status_msg = format!("{} restaurant(s) found", state.restaurants.len());
                }
                Err(e) => app.show_list_error(&e),
            }
        }
        Action::Select(id) => {
            app.detail_error = None;
            app.loading = Some(Loading::Detail);
            terminal.draw(|f| render(f, app))?;
            let result = block(service.select_restaurant(id)).and_then(|_| service.current());
            app.loading = None;
            match result {
                Ok(state) => app.refresh(&state),
                Err(e) => app.show_detail_error(&e),
            }
        }
        Action::Page(page) => match service.change_page(page) {
            Ok(state) => {
                app.list_selected = 0;
                app.refresh(&state);
            }
            Err(e) => app.status_msg = e.user_message(),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_help_text() {
        let cmd = Cli::command();
        for sub in cmd.get_subcommands() {
            assert!(sub.get_about().is_some(), "{} has no help text", sub.get_name());
        }
    }
}
