use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::form::edit_text;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.finish_search(false),
        KeyCode::Enter => {
            app.finish_search(true);
            app.clamp_selection(0);
        }
        _ => {
            if edit_text(&mut app.search_input, key) {
                app.refresh_filter_re();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UiConfig;
    use crate::ops::ShoppingListController;
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_with(names: &[&str]) -> App {
        let mut list = ShoppingListController::new();
        for name in names {
            list.add_item(name, "1").unwrap();
        }
        App::new(list, &UiConfig::default())
    }

    #[test]
    fn test_search_applies_filter_and_moves_selection() {
        let mut app = app_with(&["Apples", "Bread", "Brie"]);
        assert_eq!(app.selected, Some(1));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        for c in "^br".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // Live filtering while typing
        assert_eq!(app.row_ids(), vec![2, 3]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.filter(), Some("^br"));
        assert_eq!(app.selected, Some(2));
    }

    #[test]
    fn test_search_escape_keeps_previous_filter() {
        let mut app = app_with(&["Apples", "Bread"]);
        app.set_filter(Some("apple".into()));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.search_input.as_str(), "apple");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.row_ids(), vec![1]);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.filter(), Some("apple"));
        assert_eq!(app.row_ids(), vec![1]);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn test_empty_search_clears_filter() {
        let mut app = app_with(&["Apples"]);
        app.set_filter(Some("x".into()));
        press(&mut app, KeyCode::Char('/'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.filter(), None);
    }

    #[test]
    fn test_search_ignores_modified_keys() {
        let mut app = app_with(&["Apples"]);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('a'));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        assert_eq!(app.search_input.as_str(), "a");
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.search_input.as_str(), "");
    }

    #[test]
    fn test_search_backspace_removes_grapheme() {
        let mut app = app_with(&["Caf\u{e9}"]);
        press(&mut app, KeyCode::Char('/'));
        // "e" followed by a combining acute accent
        for c in "cafe\u{301}".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_input.as_str(), "caf");
        assert_eq!(app.mode, Mode::Search);
    }
}
