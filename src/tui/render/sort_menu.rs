use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::SortMode;
use crate::tui::app::App;

const MENU_W: u16 = 16;

/// Render the sort dropdown under the header's "Sort by" label
pub fn render_sort_menu(frame: &mut Frame, app: &App, area: Rect) {
    let height = SortMode::ALL.len() as u16 + 2;
    let width = MENU_W.min(area.width);
    let menu_area = Rect {
        x: area.x + area.width - width,
        y: area.y + 1,
        width,
        height: height.min(area.height.saturating_sub(1)),
    };
    frame.render_widget(Clear, menu_area);

    let bg = app.theme.background;
    let current = app.list.sort_mode();
    let lines: Vec<Line> = SortMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let is_cursor = i == app.sort_cursor;
            let check = if *mode == current { "\u{2713}" } else { " " };
            let style = if is_cursor {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            Line::from(vec![
                Span::styled(format!("{} ", check), Style::default().fg(app.theme.green).bg(bg)),
                Span::styled(mode.label(), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sort by ")
        .border_style(Style::default().fg(app.theme.cyan).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), menu_area);
}
