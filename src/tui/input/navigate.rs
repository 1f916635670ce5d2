use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::SortMode;
use crate::tui::app::{App, ItemForm, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Cursor movement
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => move_cursor(app, 1),
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => move_cursor(app, -1),
        (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => jump_to(app, false),
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => jump_to(app, true),

        // List operations
        (KeyModifiers::NONE, KeyCode::Char('a')) => open_add_dialog(app),
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('e')) => start_edit(app),
        (_, KeyCode::Delete) | (KeyModifiers::NONE, KeyCode::Char('d')) => delete_selected(app),
        (KeyModifiers::NONE, KeyCode::Char('s')) => open_sort_menu(app),

        // Filter
        (KeyModifiers::NONE, KeyCode::Char('/')) => app.start_search(),
        (_, KeyCode::Esc) => {
            if app.filter().is_some() {
                app.set_filter(None);
                app.clamp_selection(0);
            }
        }

        (_, KeyCode::Char('?')) => app.show_help = true,
        _ => {}
    }
}

pub(super) fn move_cursor(app: &mut App, delta: isize) {
    let ids = app.row_ids();
    if ids.is_empty() {
        return;
    }
    let next = match app.cursor_index() {
        Some(current) => current.saturating_add_signed(delta).min(ids.len() - 1),
        None => 0,
    };
    app.selected = Some(ids[next]);
}

fn jump_to(app: &mut App, bottom: bool) {
    let ids = app.row_ids();
    let target = if bottom { ids.last() } else { ids.first() };
    if let Some(&id) = target {
        app.selected = Some(id);
    }
}

fn open_add_dialog(app: &mut App) {
    app.add_form.reset();
    app.mode = Mode::Add;
}

fn start_edit(app: &mut App) {
    let (Some(id), Some(_)) = (app.selected, app.cursor_index()) else {
        return;
    };
    app.list.begin_edit(id);
    if app.list.editing_id() != Some(id) {
        return;
    }
    if let Some(item) = app.list.find(id) {
        app.edit_form = ItemForm::for_item(item);
        app.mode = Mode::Edit;
    }
}

fn delete_selected(app: &mut App) {
    let (Some(id), Some(index)) = (app.selected, app.cursor_index()) else {
        return;
    };
    app.list.delete_item(id);
    app.clamp_selection(index);
}

fn open_sort_menu(app: &mut App) {
    let current = app.list.sort_mode();
    app.sort_cursor = SortMode::ALL
        .iter()
        .position(|m| *m == current)
        .unwrap_or(0);
    app.mode = Mode::SortMenu;
}
