//! Terminal confirmation screen shown after a successful submission

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the success screen; its only action is a full reset
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(12),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(64),
            Constraint::Min(1),
        ])
        .split(vertical[1]);
    let card: Rect = horizontal[1];

    let id = app.state.confirmation_id.as_deref().unwrap_or("");
    let lines = vec![
        Line::from(Span::styled(
            "✓  Solicitação Enviada!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::default(),
        Line::from("Seus dados foram encaminhados para o setor societário da").centered(),
        Line::from(Span::styled(
            "Mendonça Galvão Contadores Associados",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from("Em breve nossa equipe entrará em contato.").centered(),
        Line::default(),
        Line::from(Span::styled(
            format!("ID: {id}"),
            Style::default().fg(Color::Yellow),
        ))
        .centered(),
        Line::default(),
        Line::from(Span::styled(
            "[ n: Nova Solicitação ]",
            Style::default().fg(Color::Cyan),
        ))
        .centered(),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Núcleo Digital ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(panel, card);
}
