use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};

use super::centered_rect;
use super::list_view::push_field;

const DIALOG_W: u16 = 44;
const DIALOG_H: u16 = 9;

/// Render the "Add Shopping Item" dialog over the list
pub fn render_add_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let dialog_area = centered_rect(DIALOG_W, DIALOG_H, area);
    frame.render_widget(Clear, dialog_area);

    let bg = app.theme.background;
    let form = &app.add_form;
    let label = |text: &'static str, focused: bool| {
        let style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        Line::from(Span::styled(text, style))
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(label("Item Name", form.focus == FormField::Name));
    let mut spans = Vec::new();
    push_field(&mut spans, app, &form.name, form.focus == FormField::Name);
    lines.push(Line::from(spans));

    lines.push(label("Quantity", form.focus == FormField::Quantity));
    let mut spans = Vec::new();
    push_field(&mut spans, app, &form.quantity, form.focus == FormField::Quantity);
    lines.push(Line::from(spans));

    lines.push(match form.error {
        Some(e) => Line::from(Span::styled(
            e.user_message(),
            Style::default().fg(app.theme.red).bg(bg),
        )),
        None => Line::from(""),
    });

    lines.push(Line::from(Span::styled(
        "Enter add \u{00B7} Tab switch \u{00B7} Esc cancel",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Shopping Item ")
        .border_style(Style::default().fg(app.theme.cyan).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, dialog_area);
}
