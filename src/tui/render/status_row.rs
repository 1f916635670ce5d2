use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Navigate => {
            if let Some(msg) = &app.status {
                spans.push(Span::styled(
                    format!(" {}", msg),
                    Style::default().fg(app.theme.green).bg(bg),
                ));
            } else if let Some(pattern) = app.filter() {
                spans.push(Span::styled(
                    format!(" /{}", pattern),
                    Style::default().fg(app.theme.dim).bg(bg),
                ));
            }
            if app.filter().is_some() {
                "Esc clear filter"
            } else if app.show_key_hints {
                "a add  e edit  d delete  s sort  / filter  ? help"
            } else {
                ""
            }
        }
        Mode::Search => {
            let input = &app.search_input;
            let (before, after) = input.text.split_at(input.cursor);
            let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
            spans.push(Span::styled(format!(" /{}", before), text_style));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            if !after.is_empty() {
                spans.push(Span::styled(after.to_string(), text_style));
            }
            "Enter apply  Esc cancel"
        }
        Mode::Add | Mode::Edit => "Enter save  Tab switch field  Esc cancel",
        Mode::SortMenu => "Enter select  Esc close",
    };

    push_right_aligned(&mut spans, hint, width, app.theme.dim, bg);
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Append `hint` flush right if it fits after the existing spans
fn push_right_aligned(spans: &mut Vec<Span>, hint: &'static str, width: usize, fg: Color, bg: Color) {
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint) + 1;
    if hint.is_empty() || content_width + hint_width > width {
        return;
    }
    spans.push(Span::styled(
        " ".repeat(width - content_width - hint_width),
        Style::default().bg(bg),
    ));
    spans.push(Span::styled(hint, Style::default().fg(fg).bg(bg)));
    spans.push(Span::styled(" ", Style::default().bg(bg)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::TextInput;
    use crate::tui::render::test_helpers::*;

    fn status_line(app: &App, width: u16) -> String {
        render_to_string(width, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn status_shows_key_hints() {
        let app = app_with_items(&[]);
        let line = status_line(&app, 60);
        assert!(line.ends_with("a add  e edit  d delete  s sort  / filter  ? help"));
    }

    #[test]
    fn status_hides_hints_when_disabled() {
        let mut app = app_with_items(&[]);
        app.show_key_hints = false;
        assert_eq!(status_line(&app, 60), "");
    }

    #[test]
    fn status_message_and_filter() {
        let mut app = app_with_items(&[]);
        app.status = Some("Saved".into());
        assert!(status_line(&app, 60).starts_with(" Saved"));

        app.status = None;
        app.set_filter(Some("milk".into()));
        let line = status_line(&app, 60);
        assert!(line.starts_with(" /milk"));
        assert!(line.ends_with("Esc clear filter"));
    }

    #[test]
    fn status_search_prompt() {
        let mut app = app_with_items(&[]);
        app.mode = Mode::Search;
        app.search_input = TextInput::new("br");
        let line = status_line(&app, 60);
        assert!(line.starts_with(" /br\u{258C}"));
        assert!(line.ends_with("Enter apply  Esc cancel"));

        app.search_input.move_left();
        assert!(status_line(&app, 60).starts_with(" /b\u{258C}r"));
    }

    #[test]
    fn status_hint_dropped_when_narrow() {
        let app = app_with_items(&[]);
        assert_eq!(status_line(&app, 20), "");
    }
}
