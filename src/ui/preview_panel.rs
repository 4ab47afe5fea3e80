//! Rendering of the review-step summary

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the projected preview sections
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    if app.state.preview.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nenhum dado preenchido.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for section in &app.state.preview {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for row in &section.rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<24}", row.label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(row.value.clone(), Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::default());
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Confira os dados antes de enviar ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(panel, area);
}
