//! Reusable UI widget helpers

use crate::app::App;
use crate::state::ToastKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{List, ListState, Paragraph},
    Frame,
};

/// Render a scrollable list that automatically keeps the selected item visible.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Draw the newest toast as a floating line near the bottom of the screen
pub fn draw_toasts(frame: &mut Frame, app: &App) {
    let Some(toast) = app.state.toasts.last() else {
        return;
    };
    let area = frame.area();
    if area.height < 4 {
        return;
    }

    let message = format!(" {} ", toast.message);
    let width = (message.chars().count() as u16).min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height - 3,
        width,
        height: 1,
    };

    let bg = match toast.kind {
        ToastKind::Error => Color::Red,
        ToastKind::Info => Color::Yellow,
    };
    frame.render_widget(
        Paragraph::new(message).style(Style::default().fg(Color::White).bg(bg)),
        toast_area,
    );
}
