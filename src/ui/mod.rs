//! UI module for rendering the TUI

mod field_renderer;
mod layout;
mod preview_panel;
mod submitted;
mod widgets;
mod wizard;

use crate::app::App;
use crate::state::View;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.state.view {
        View::Wizard => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5), // Progress header
                    Constraint::Min(0),    // Active step
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            layout::draw_header(frame, chunks[0], app);
            wizard::draw(frame, chunks[1], app);
            layout::draw_status_bar(frame, chunks[2], app);
        }
        View::Submitted => submitted::draw(frame, area, app),
    }

    // Toasts float above everything else.
    widgets::draw_toasts(frame, app);
}
