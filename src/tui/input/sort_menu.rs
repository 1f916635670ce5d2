use crossterm::event::{KeyCode, KeyEvent};

use crate::model::SortMode;
use crate::tui::app::{App, Mode};

pub(super) fn handle_sort_menu(app: &mut App, key: KeyEvent) {
    let last = SortMode::ALL.len() - 1;
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.mode = Mode::Navigate,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            app.sort_cursor = (app.sort_cursor + 1).min(last);
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            app.sort_cursor = app.sort_cursor.saturating_sub(1);
        }
        KeyCode::Char('n') => choose(app, SortMode::Name),
        KeyCode::Char('u') => choose(app, SortMode::Quantity),
        KeyCode::Enter => {
            let mode = SortMode::ALL[app.sort_cursor.min(last)];
            choose(app, mode);
        }
        _ => {}
    }
}

fn choose(app: &mut App, mode: SortMode) {
    app.list.set_sort_mode(mode);
    app.mode = Mode::Navigate;
}
