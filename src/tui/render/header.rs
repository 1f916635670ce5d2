use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the title row and the separator line below it
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_title(frame, app, chunks[0]);

    let sep = Paragraph::new("\u{2500}".repeat(area.width as usize)).style(
        Style::default()
            .fg(app.theme.dim)
            .bg(app.theme.background),
    );
    frame.render_widget(sep, chunks[1]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = app.list.len();
    let noun = if count == 1 { "item" } else { "items" };
    let mut spans = vec![
        Span::styled(
            "Shopping List",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} {}", count, noun),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    // Right-aligned sort indicator
    let sort = format!("Sort by {}", app.list.sort_mode().label());
    let left: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right = display_width(&sort);
    if left + right + 1 <= width {
        spans.push(Span::styled(
            " ".repeat(width - left - right),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(sort, Style::default().fg(app.theme.cyan).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortMode;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn header_empty_list() {
        let app = app_with_items(&[]);
        let output = render_to_string(40, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert_snapshot!(output, @r"
        Shopping List  0 items      Sort by Name
        ────────────────────────────────────────
        ");
    }

    #[test]
    fn header_shows_count_and_sort_mode() {
        let mut app = app_with_items(&[("Milk", "2")]);
        app.list.set_sort_mode(SortMode::Quantity);
        let output = render_to_string(40, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.starts_with("Shopping List  1 item"));
        assert!(output.lines().next().unwrap().ends_with("Sort by Quantity"));
    }

    #[test]
    fn header_drops_sort_label_when_narrow() {
        let app = app_with_items(&[]);
        let output = render_to_string(24, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(!output.contains("Sort by"));
    }
}
