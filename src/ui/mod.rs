pub mod header;
pub mod process_table;
pub mod statusbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

/// Header block: two borders plus four lines of system information.
pub const HEADER_HEIGHT: u16 = 6;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], &app.snapshot);

    app.set_page_size(process_table::visible_rows(chunks[1]));
    process_table::render(
        frame,
        chunks[1],
        app.visible_processes(),
        app.scroll,
        app.snapshot.processes.len(),
    );

    statusbar::render(frame, chunks[2], app.scroll, app.snapshot.processes.len());
}

#[cfg(test)]
mod tests;
