use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use regex::Regex;

use crate::model::ItemView;
use crate::tui::app::{App, FormField, TextInput};
use crate::util::unicode::{self, display_width};

use super::push_highlighted_spans;

/// Room kept for the marker, gaps and the "Qty: N" column
const RESERVED_COLS: usize = 14;

/// Render the shopping list, one row per visible item
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let rows = app.rows();

    if rows.is_empty() {
        let msg = if app.list.is_empty() {
            " No items yet. Press a to add one."
        } else {
            " No items match the filter."
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let name_w = rows
        .iter()
        .map(|v| display_width(v.name()))
        .max()
        .unwrap_or(0)
        .max(4)
        .min(width.saturating_sub(RESERVED_COLS));
    let cursor = app.cursor_index();
    let filter_re = app.filter_re();

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(area.height as usize)
        .map(|(i, view)| {
            if view.is_editing {
                editor_line(app, width)
            } else {
                item_line(app, view, cursor == Some(i), name_w, width, filter_re)
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn item_line<'a>(
    app: &App,
    view: &ItemView,
    is_cursor: bool,
    name_w: usize,
    width: usize,
    filter_re: Option<&Regex>,
) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let mut spans: Vec<Span> = Vec::new();

    let marker = if is_cursor { "\u{25B8}" } else { " " };
    spans.push(Span::styled(
        format!("{} ", marker),
        Style::default().fg(app.theme.highlight).bg(bg),
    ));

    let name_style = if is_cursor {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let name = unicode::fit_to_width(view.name(), name_w);
    push_highlighted_spans(&mut spans, &name, name_style, match_style, filter_re);

    spans.push(Span::styled(
        format!("  Qty: {}", view.quantity()),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    if is_cursor {
        pad_line(&mut spans, width, bg);
    }
    Line::from(spans)
}

/// The row of the item being edited: two text fields and a hint
fn editor_line<'a>(app: &App, width: usize) -> Line<'a> {
    let bg = app.theme.selection_bg;
    let form = &app.edit_form;
    let mut spans: Vec<Span> = vec![Span::styled(
        "\u{25B8} ",
        Style::default().fg(app.theme.highlight).bg(bg),
    )];

    push_field(&mut spans, app, &form.name, form.focus == FormField::Name);
    spans.push(Span::styled(
        "  Qty: ",
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    push_field(&mut spans, app, &form.quantity, form.focus == FormField::Quantity);
    spans.push(Span::styled(
        "  Enter save \u{00B7} Esc cancel",
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    pad_line(&mut spans, width, bg);
    Line::from(spans)
}

/// `[text]`, with the cursor cell shown reversed when focused
pub(super) fn push_field<'a>(spans: &mut Vec<Span<'a>>, app: &App, input: &TextInput, focused: bool) {
    let bracket = Style::default().fg(app.theme.dim).bg(app.theme.input_bg);
    let text = Style::default().fg(app.theme.text_bright).bg(app.theme.input_bg);

    spans.push(Span::styled("[", bracket));
    if focused {
        let (before, rest) = input.text.split_at(input.cursor);
        let cursor_end = unicode::next_grapheme_boundary(&input.text, input.cursor)
            .map_or(0, |next| next - input.cursor);
        let (at, after) = rest.split_at(cursor_end);
        spans.push(Span::styled(before.to_string(), text));
        spans.push(Span::styled(
            if at.is_empty() { " ".to_string() } else { at.to_string() },
            text.add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(after.to_string(), text));
    } else {
        spans.push(Span::styled(input.text.clone(), text));
    }
    spans.push(Span::styled("]", bracket));
}

fn pad_line(spans: &mut Vec<Span>, width: usize, bg: ratatui::style::Color) {
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if content_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width),
            Style::default().bg(bg),
        ));
    }
}
