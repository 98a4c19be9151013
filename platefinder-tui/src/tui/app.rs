use crate::tui::theme::Theme;
use platefinder_common::{Config, PlateFinderError};
use platefinder_core::{SearchQuery, SessionState, SessionView};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    Name,
    Cuisine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Search,
    Results,
}

/// What is currently waiting on the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loading {
    Results,
    Detail,
    Cuisines,
}

/// Work the event loop has to run against the search service.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(SearchQuery),
    Select(u64),
    Page(u32),
}

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub view: SessionView,
    pub mode: SearchMode,
    pub focus: Focus,
    pub input: String,
    pub cuisine_selected: usize,
    pub list_selected: usize,
    pub loading: Option<Loading>,
    pub list_error: Option<String>,   // shown in place of the result list
    pub detail_error: Option<String>, // replaces the detail panel
    pub status_msg: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let view = SessionView::project(&SessionState::default(), &config.display);
        Self {
            theme: Theme::from_name(&config.display.theme),
            config,
            view,
            mode: SearchMode::Name,
            focus: Focus::Search,
            input: String::new(),
            cuisine_selected: 0,
            list_selected: 0,
            loading: None,
            list_error: None,
            detail_error: None,
            status_msg: String::from("Ready. ?:help q:quit"),
            show_help: false,
            should_quit: false,
        }
    }

    /// Re-projects the stored session and clamps the cursors to it. A list
    /// with rows replaces any error shown in its place.
    pub fn refresh(&mut self, state: &SessionState) {
        self.view = SessionView::project(state, &self.config.display);
        if !self.view.rows.is_empty() {
            self.list_error = None;
        }
        self.list_selected = self
            .list_selected
            .min(self.view.rows.len().saturating_sub(1));
        self.cuisine_selected = self
            .cuisine_selected
            .min(self.view.cuisine_options.len().saturating_sub(1));
        if !self.view.rows.is_empty() && self.focus == Focus::Search && self.input.is_empty() {
            self.focus = Focus::Results;
        }
    }

    pub fn show_list_error(&mut self, err: &PlateFinderError) {
        log::warn!("{err}");
        self.list_error = Some(err.user_message());
    }

    pub fn show_detail_error(&mut self, err: &PlateFinderError) {
        log::warn!("{err}");
        self.detail_error = Some(err.user_message());
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            SearchMode::Name => SearchMode::Cuisine,
            SearchMode::Cuisine => SearchMode::Name,
        };
        self.focus = Focus::Search;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Search => Focus::Results,
            Focus::Results => Focus::Search,
        };
    }

    pub fn list_down(&mut self) {
        if self.list_selected + 1 < self.view.rows.len() {
            self.list_selected += 1;
        }
    }

    pub fn list_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn cuisine_down(&mut self) {
        if self.cuisine_selected + 1 < self.view.cuisine_options.len() {
            self.cuisine_selected += 1;
        }
    }

    pub fn cuisine_up(&mut self) {
        self.cuisine_selected = self.cuisine_selected.saturating_sub(1);
    }

    pub fn selected_restaurant(&self) -> Option<u64> {
        self.view.rows.get(self.list_selected).map(|r| r.id)
    }

    /// Builds the query for the current mode. A name search consumes the input.
    pub fn take_query(&mut self) -> Option<SearchQuery> {
        match self.mode {
            SearchMode::Name => {
                let term = self.input.trim().to_owned();
                if term.is_empty() {
                    return None;
                }
                self.input.clear();
                Some(SearchQuery::Name(term))
            }
            SearchMode::Cuisine => self
                .view
                .cuisine_options
                .get(self.cuisine_selected)
                .map(|(id, _)| SearchQuery::Cuisine(*id)),
        }
    }

    pub fn selected_cuisine_name(&self) -> Option<&str> {
        self.view
            .cuisine_options
            .get(self.cuisine_selected)
            .map(|(_, name)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platefinder_core::model::RestaurantRef;
    use platefinder_core::{Cuisine, CuisineEntry, RestaurantEntry, RestaurantSummary};

    fn state_with(n: u64) -> SessionState {
        SessionState {
            restaurants: (1..=n)
                .map(|id| RestaurantEntry {
                    restaurant: RestaurantSummary {
                        r: RestaurantRef { res_id: id },
                        name: format!("R{id}"),
                        phone_numbers: "1".into(),
                        thumb: None,
                    },
                })
                .collect(),
            cuisines: vec![
                CuisineEntry { cuisine: Cuisine { cuisine_id: 1, cuisine_name: "American".into() } },
                CuisineEntry { cuisine: Cuisine { cuisine_id: 55, cuisine_name: "Italian".into() } },
            ],
            ..SessionState::default()
        }
    }

    #[test]
    fn refresh_clamps_cursor() {
        let mut app = App::new(Config::default());
        app.refresh(&state_with(10));
        app.list_selected = 6;
        let mut st = state_with(10);
        st.page = 2;
        app.refresh(&st);
        assert_eq!(app.list_selected, 2);
        assert_eq!(app.selected_restaurant(), Some(10));
    }

    #[test]
    fn name_query_consumes_input() {
        let mut app = App::new(Config::default());
        app.input = "  sushi ".into();
        assert_eq!(app.take_query(), Some(SearchQuery::Name("sushi".into())));
        assert!(app.input.is_empty());
        assert_eq!(app.take_query(), None);
    }

    #[test]
    fn cuisine_query_uses_selected_option() {
        let mut app = App::new(Config::default());
        app.refresh(&state_with(0));
        app.toggle_mode();
        app.cuisine_down();
        app.cuisine_down();
        assert_eq!(app.selected_cuisine_name(), Some("Italian"));
        assert_eq!(app.take_query(), Some(SearchQuery::Cuisine(55)));
    }
}
