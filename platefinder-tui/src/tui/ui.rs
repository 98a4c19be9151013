use crate::tui::app::{App, Focus, Loading, SearchMode};
use crate::tui::theme::Theme;
use platefinder_core::SessionPhase;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    render_topbar(frame, app, chunks[0], theme);
    render_search(frame, app, chunks[1], theme);
    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(0)])
        .split(chunks[2]);
    render_results(frame, app, mid[0], theme);
    render_detail(frame, app, mid[1], theme);
    render_bottombar(frame, app, chunks[3], theme);
    if app.show_help {
        render_help(frame, area);
    }
}

fn render_topbar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let mode = match app.mode {
        SearchMode::Name => "[BY NAME]",
        SearchMode::Cuisine => "[BY CUISINE]",
    };
    let count = match app.view.phase {
        SessionPhase::Empty => String::from(" no search yet"),
        _ => format!(" {} restaurant(s) on this page", app.view.rows.len()),
    };
    let line = Line::from(vec![
        Span::styled(" platefinder ", Style::default().fg(theme.focus).add_modifier(Modifier::BOLD)),
        Span::styled(mode, Style::default().fg(theme.detail)),
        Span::raw(count),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bar_bg).fg(theme.bar_fg)), area);
}

fn focused_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused { Style::default().fg(theme.focus) } else { Style::default() })
}

fn render_search(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus == Focus::Search;
    let text = match app.mode {
        SearchMode::Name => {
            let cursor = if focused { "_" } else { "" };
            Line::from(format!("{}{cursor}", app.input))
        }
        SearchMode::Cuisine => match app.selected_cuisine_name() {
            Some(name) => Line::from(vec![
                Span::raw("‹ "),
                Span::styled(name.to_owned(), Style::default().fg(theme.detail)),
                Span::raw(format!(" ›  ({}/{})", app.cuisine_selected + 1, app.view.cuisine_options.len())),
            ]),
            None => Line::styled("no cuisines loaded", Style::default().fg(theme.hint)),
        },
    };
    let title = match app.mode {
        SearchMode::Name => "Restaurant name (Enter to search)",
        SearchMode::Cuisine => "Cuisine (j/k to choose, Enter to search)",
    };
    frame.render_widget(Paragraph::new(text).block(focused_block(title, focused, theme)), area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let block = focused_block("Restaurants", app.focus == Focus::Results, theme);
    if matches!(app.loading, Some(Loading::Results) | Some(Loading::Cuisines)) {
        frame.render_widget(loading(block), area);
        return;
    }
    if let Some(msg) = &app.list_error {
        frame.render_widget(error_msg(msg, block, theme), area);
        return;
    }
    if app.view.rows.is_empty() {
        let hint = Paragraph::new("Search by name, or press m to pick a cuisine.")
            .style(Style::default().fg(theme.hint))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(hint, area);
        return;
    }
    let items: Vec<ListItem> = app
        .view
        .rows
        .iter()
        .map(|row| {
            ListItem::new(vec![
                Line::from(Span::styled(row.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(format!("  Tel: {}", row.phone), Style::default().fg(theme.detail))),
            ])
        })
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.list_selected.min(items.len().saturating_sub(1))));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    if app.loading == Some(Loading::Detail) {
        frame.render_widget(loading(block), area);
        return;
    }
    if let Some(msg) = &app.detail_error {
        frame.render_widget(error_msg(msg, block, theme), area);
        return;
    }
    let Some(d) = &app.view.detail else {
        frame.render_widget(
            Paragraph::new("Select a restaurant and press Enter.")
                .style(Style::default().fg(theme.hint))
                .block(block),
            area,
        );
        return;
    };
    let label = Style::default().add_modifier(Modifier::BOLD);
    let rows = vec![
        Row::new(vec![Span::styled("Cuisines", label), Span::raw(d.cuisines.clone())]),
        Row::new(vec![
            Span::styled("Ratings", label),
            Span::styled(d.rating_label.clone(), Style::default().fg(theme.rating)),
        ]),
        Row::new(vec![Span::styled("Opening times", label), Span::raw(d.timings.clone())]),
        Row::new(vec![Span::styled("Address", label), Span::raw(d.address.clone())]),
        Row::new(vec![
            Span::styled("Tel", label),
            Span::styled(d.phones.clone(), Style::default().fg(theme.detail)),
        ]),
        Row::new(vec![Span::styled("Photo", label), Span::styled(d.thumb.clone(), Style::default().fg(theme.hint))]),
    ];
    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(0)])
        .block(Block::default().borders(Borders::ALL).title(format!("Details: {}", d.name)));
    frame.render_widget(table, area);
}

fn render_bottombar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let mut spans = Vec::new();
    if let Some(label) = &app.view.page_label {
        spans.push(Span::styled(format!(" {label} "), Style::default().fg(theme.focus)));
    }
    if let Some(prev) = app.view.nav.prev {
        spans.push(Span::raw(format!("« {prev} (h) ")));
    }
    if let Some(next) = app.view.nav.next {
        spans.push(Span::raw(format!("(l) {next} » ")));
    }
    spans.push(Span::styled(format!("| {}", app.status_msg), Style::default().fg(theme.hint)));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bar_bg).fg(theme.bar_fg)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let keys = [
        ("Tab", "switch between search box and results"),
        ("m", "toggle search by name / by cuisine"),
        ("Enter", "search, or open the highlighted restaurant"),
        ("j / k", "move down / up"),
        ("h / l", "previous / next page"),
        ("/", "jump to the search box"),
        ("?", "close this help"),
        ("q", "quit"),
    ];
    let rows: Vec<Row> = keys.iter().map(|(k, d)| Row::new(vec![*k, *d])).collect();
    let popup = centered(area, 60, 12);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Table::new(rows, [Constraint::Length(8), Constraint::Min(0)])
            .block(Block::default().borders(Borders::ALL).title("Keys")),
        popup,
    );
}

fn loading(block: Block<'_>) -> Paragraph<'_> {
    Paragraph::new("Loading...").block(block)
}

fn error_msg<'a>(msg: &str, block: Block<'a>, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(format!("Error! {msg}"))
        .style(Style::default().fg(theme.error))
        .wrap(Wrap { trim: true })
        .block(block)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platefinder_common::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn empty_app_shows_hint() {
        let app = App::new(Config::default());
        assert!(draw(&app).contains("Search by name"));
    }

    #[test]
    fn list_error_replaces_results() {
        let mut app = App::new(Config::default());
        app.list_error = Some("No restaurants found".into());
        assert!(draw(&app).contains("Error! No restaurants found"));
    }

    #[test]
    fn page_change_redraws_list_over_error() {
        use platefinder_core::model::RestaurantRef;
        use platefinder_core::{RestaurantEntry, RestaurantSummary, SessionState};

        let mut state = SessionState {
            restaurants: (1..=10)
                .map(|id| RestaurantEntry {
                    restaurant: RestaurantSummary {
                        r: RestaurantRef { res_id: id },
                        name: format!("Diner {id}"),
                        phone_numbers: String::new(),
                        thumb: None,
                    },
                })
                .collect(),
            ..SessionState::default()
        };
        let mut app = App::new(Config::default());
        app.refresh(&state);
        app.list_error = Some("Your location is disabled".into());
        assert!(!draw(&app).contains("Diner 1"));

        state.page = 2;
        app.refresh(&state);
        let screen = draw(&app);
        assert!(!screen.contains("Error!"));
        assert!(screen.contains("Diner 8"));
        assert!(screen.contains("2/2 page(s)"));
    }

    #[test]
    fn loading_is_shown() {
        let mut app = App::new(Config::default());
        app.loading = Some(Loading::Detail);
        assert!(draw(&app).contains("Loading..."));
    }
}
