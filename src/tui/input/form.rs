use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::ValidationError;
use crate::tui::app::{App, FormField, ItemForm, Mode, TextInput};

/// Keys shared by every single-line text field. Returns true if handled.
pub(super) fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => input.move_home(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => input.move_end(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => input.clear(),
        (_, KeyCode::Left) => input.move_left(),
        (_, KeyCode::Right) => input.move_right(),
        (_, KeyCode::Backspace) => input.backspace(),
        (_, KeyCode::Delete) => input.delete(),
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.insert_char(c)
        }
        _ => return false,
    }
    true
}

/// Keys shared by the add dialog and the inline editor
fn edit_form(form: &mut ItemForm, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
        _ => {
            edit_text(form.focused_mut(), key);
        }
    }
}

// ---------------------------------------------------------------------------
// Add dialog
// ---------------------------------------------------------------------------

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.add_form.reset();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit_add(app),
        _ => edit_form(&mut app.add_form, key),
    }
}

fn submit_add(app: &mut App) {
    let result = app
        .list
        .add_item(app.add_form.name.as_str(), app.add_form.quantity.as_str());
    match result {
        Ok(_) => {
            app.add_form.reset();
            app.mode = Mode::Navigate;
        }
        Err(e) => {
            tracing::warn!(error = %e, "add rejected");
            app.add_form.focus = field_for(e);
            app.add_form.error = Some(e);
        }
    }
}

fn field_for(error: ValidationError) -> FormField {
    match error {
        ValidationError::InvalidName | ValidationError::ListFull => FormField::Name,
        ValidationError::InvalidQuantity => FormField::Quantity,
    }
}

// ---------------------------------------------------------------------------
// Inline editor
// ---------------------------------------------------------------------------

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.list.cancel_edit();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit_edit(app),
        _ => edit_form(&mut app.edit_form, key),
    }
}

fn submit_edit(app: &mut App) {
    app.mode = Mode::Navigate;
    let Some(id) = app.list.editing_id() else {
        return;
    };
    let result = app.list.complete_edit(
        id,
        app.edit_form.name.as_str(),
        app.edit_form.quantity.as_str(),
    );
    if let Err(e) = result {
        tracing::warn!(id, error = %e, "edit rejected");
        app.status = Some(e.user_message().to_string());
    }
}
