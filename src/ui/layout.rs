//! Progress header and status bar

use crate::app::App;
use crate::state::StepMarker;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draw the wizard header: progress gauge, step dots and position label
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Abertura de Empresa ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Dots + label
            Constraint::Min(0),
        ])
        .split(inner);

    let wizard = &app.state.wizard;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Black))
        .ratio(wizard.progress())
        .label(wizard.label());
    frame.render_widget(gauge, rows[0]);

    let mut spans: Vec<Span> = Vec::new();
    for marker in wizard.markers() {
        let (symbol, style) = match marker {
            StepMarker::Done => ("● ", Style::default().fg(Color::Green)),
            StepMarker::Active => (
                "◉ ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            StepMarker::Upcoming => ("○ ", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(symbol, style));
    }
    spans.push(Span::styled(
        format!(" {}", wizard.active_step().title),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

/// Draw the status bar with context hints
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.state.on_buttons_row() {
        " ←→:botão  Enter:ativar  Tab:campos "
    } else if !app.state.cnae_suggestions.is_empty() {
        " ↑↓:sugestões  Enter:selecionar  Esc:limpar "
    } else {
        " Tab/↑↓:campos  Enter:confirmar  ←→:opções "
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if !app.state.step_is_valid {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            "Preencha os campos obrigatórios (*)",
            Style::default().fg(Color::Red),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:sair ";
    let hint_width = quit_hint.len() as u16;
    if area.width > hint_width {
        let hint_area = Rect {
            x: area.x + area.width - hint_width,
            width: hint_width,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                quit_hint,
                Style::default().fg(Color::DarkGray),
            )),
            hint_area,
        );
    }
}
