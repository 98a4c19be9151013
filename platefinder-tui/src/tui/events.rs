use crate::tui::app::{Action, App, Focus, SearchMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies a key to the app. Returns the service call the key asks for, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return None;
    }
    if key.code == KeyCode::Tab {
        app.cycle_focus();
        return None;
    }
    match app.focus {
        Focus::Search => handle_search(app, key),
        Focus::Results => handle_results(app, key),
    }
}

fn handle_search(app: &mut App, key: KeyEvent) -> Option<Action> {
    match (app.mode, key.code) {
        (_, KeyCode::Esc) => {
            app.focus = Focus::Results;
            None
        }
        (_, KeyCode::Enter) => {
            let query = app.take_query();
            if query.is_none() {
                app.status_msg = match app.mode {
                    SearchMode::Name => "Type a restaurant name first".into(),
                    SearchMode::Cuisine => "No cuisines loaded".into(),
                };
            }
            query.map(Action::Search)
        }
        (SearchMode::Name, KeyCode::Backspace) => {
            app.input.pop();
            None
        }
        (SearchMode::Name, KeyCode::Char(c)) => {
            app.input.push(c);
            None
        }
        (SearchMode::Cuisine, KeyCode::Char('j') | KeyCode::Down) => {
            app.cuisine_down();
            None
        }
        (SearchMode::Cuisine, KeyCode::Char('k') | KeyCode::Up) => {
            app.cuisine_up();
            None
        }
        (SearchMode::Cuisine, KeyCode::Char('m')) => {
            app.toggle_mode();
            None
        }
        (SearchMode::Cuisine, KeyCode::Char('q')) => {
            app.should_quit = true;
            None
        }
        _ => None,
    }
}

fn handle_results(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            None
        }
        KeyCode::Char('m') => {
            app.toggle_mode();
            None
        }
        KeyCode::Char('/') => {
            app.focus = Focus::Search;
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.list_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.list_up();
            None
        }
        KeyCode::Enter => app.selected_restaurant().map(Action::Select),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => app.view.nav.prev.map(Action::Page),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
            app.view.nav.next.map(Action::Page)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platefinder_common::Config;
    use platefinder_core::model::RestaurantRef;
    use platefinder_core::{RestaurantEntry, RestaurantSummary, SearchQuery, SessionState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn listed_app(n: u64, page: u32) -> App {
        let mut app = App::new(Config::default());
        let state = SessionState {
            restaurants: (1..=n)
                .map(|id| RestaurantEntry {
                    restaurant: RestaurantSummary {
                        r: RestaurantRef { res_id: id },
                        name: format!("R{id}"),
                        phone_numbers: String::new(),
                        thumb: None,
                    },
                })
                .collect(),
            page,
            ..SessionState::default()
        };
        app.refresh(&state);
        app
    }

    #[test]
    fn typing_then_enter_submits_name_search() {
        let mut app = App::new(Config::default());
        for c in "ramen".chars() {
            assert_eq!(handle_key(&mut app, key(KeyCode::Char(c))), None);
        }
        let action = handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(action, Some(Action::Search(SearchQuery::Name("ramen".into()))));
    }

    #[test]
    fn q_is_text_while_typing_a_name() {
        let mut app = App::new(Config::default());
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.input, "q");
    }

    #[test]
    fn enter_on_results_selects_row() {
        let mut app = listed_app(3, 1);
        assert_eq!(app.focus, Focus::Results);
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Some(Action::Select(2)));
    }

    #[test]
    fn page_keys_follow_nav() {
        let mut app = listed_app(10, 1);
        assert_eq!(handle_key(&mut app, key(KeyCode::Left)), None);
        assert_eq!(handle_key(&mut app, key(KeyCode::Right)), Some(Action::Page(2)));
        let mut app = listed_app(10, 2);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('h'))), Some(Action::Page(1)));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('l'))), None);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = listed_app(3, 1);
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = App::new(Config::default());
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
