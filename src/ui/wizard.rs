//! Rendering of the active wizard step

use super::{field_renderer, preview_panel, widgets};
use crate::app::App;
use crate::state::NavButton;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// What occupies one vertical slot of the step body.
enum Slot {
    Field(&'static str, usize),
    CnaeSelection,
    CnaeSuggestions,
    Buttons,
}

/// Draw the active step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.state.wizard.is_last() {
        draw_review(frame, inner, app);
    } else {
        draw_fields(frame, inner, app);
    }
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let mut slots = Vec::new();
    let mut constraints = Vec::new();

    for (index, name) in state.focusable_fields().into_iter().enumerate() {
        let Some(field) = state.form.get(name) else {
            continue;
        };
        let height = if field.is_multiline { 5 } else { 3 };
        slots.push(Slot::Field(name, index));
        constraints.push(Constraint::Length(height));

        if name == "cnae_search" {
            if !state.form.is_empty("cnae_codigo") {
                slots.push(Slot::CnaeSelection);
                constraints.push(Constraint::Length(1));
            }
            if !state.cnae_suggestions.is_empty() {
                let visible = state.cnae_suggestions.len().min(5) as u16;
                slots.push(Slot::CnaeSuggestions);
                constraints.push(Constraint::Length(visible + 2));
            }
        }
    }
    slots.push(Slot::Buttons);
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, chunk) in slots.iter().zip(chunks.iter()) {
        match slot {
            Slot::Field(name, index) => {
                if let Some(field) = state.form.get(name) {
                    let is_active = !state.on_buttons_row() && state.active_field == *index;
                    field_renderer::draw_field(frame, *chunk, field, is_active);
                }
            }
            Slot::CnaeSelection => draw_cnae_selection(frame, *chunk, app),
            Slot::CnaeSuggestions => draw_cnae_suggestions(frame, *chunk, app),
            Slot::Buttons => draw_buttons(frame, *chunk, app),
        }
    }
}

fn draw_review(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    preview_panel::draw(frame, chunks[0], app);
    draw_buttons(frame, chunks[1], app);
}

fn draw_cnae_selection(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("Selecionado: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(
                "{} — {}",
                app.state.form.stored("cnae_codigo"),
                app.state.form.stored("cnae_descricao")
            ),
            Style::default().fg(Color::Green),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_cnae_suggestions(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .state
        .cnae_suggestions
        .iter()
        .map(|s| ListItem::new(s.label()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(" Sugestões ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    widgets::render_scrollable_list(frame, area, list, app.state.cnae_selected);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Length(26),
            Constraint::Min(0),
        ])
        .split(area);

    let on_row = state.on_buttons_row();

    let prev_enabled = !state.wizard.is_first();
    let prev_style = button_style(prev_enabled, on_row && state.nav_button == NavButton::Prev);
    frame.render_widget(
        Paragraph::new("← Voltar")
            .centered()
            .block(Block::default().borders(Borders::ALL).border_style(prev_style))
            .style(prev_style),
        chunks[0],
    );

    let next_enabled = state.step_is_valid && !state.submitting;
    let next_style = button_style(next_enabled, on_row && state.nav_button == NavButton::Next);
    frame.render_widget(
        Paragraph::new(state.advance_label())
            .centered()
            .block(Block::default().borders(Borders::ALL).border_style(next_style))
            .style(next_style),
        chunks[1],
    );
}

fn button_style(enabled: bool, selected: bool) -> Style {
    match (enabled, selected) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::White),
    }
}
