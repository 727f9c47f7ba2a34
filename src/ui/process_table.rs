use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::{format_elapsed, format_mb, format_percent, truncate_unicode};
use crate::system::process::ProcessSample;

const COLUMNS: [&str; 6] = ["PID", "USER", "CPU%", "RAM MB", "TIME+", "COMMAND"];

const WIDTHS: [Constraint; 6] = [
    Constraint::Length(7),
    Constraint::Length(10),
    Constraint::Length(6),
    Constraint::Length(9),
    Constraint::Length(10),
    Constraint::Min(10),
];

/// Fixed-width columns plus the spacing ratatui puts between them.
const FIXED_WIDTH: u16 = 7 + 10 + 6 + 9 + 10 + 5;

/// Process rows that fit in `area` once borders and the header row are taken.
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessSample],
    scroll: usize,
    total: usize,
) {
    let command_width = area.width.saturating_sub(FIXED_WIDTH + 2).max(1) as usize;

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows = processes.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.pid.to_string()),
            Cell::from(truncate_unicode(&p.user, 10)),
            Cell::from(format_percent(p.cpu_utilization)).style(cpu_style(p.cpu_utilization)),
            Cell::from(format_mb(p.memory_kb)),
            Cell::from(format_elapsed(p.age_seconds)),
            Cell::from(truncate_unicode(&p.display_command(), command_width)),
        ])
    });

    let title = if total == 0 {
        " Processes ".to_string()
    } else {
        let last = (scroll + processes.len()).min(total);
        format!(" Processes {}-{} of {} ", scroll + 1, last, total)
    };

    let table = Table::new(rows, WIDTHS).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(title, Style::default().fg(Color::Gray))),
    );

    frame.render_widget(table, area);
}

fn cpu_style(fraction: f64) -> Style {
    let color = if fraction >= 0.5 {
        Color::Red
    } else if fraction >= 0.1 {
        Color::Yellow
    } else {
        Color::Reset
    };
    Style::default().fg(color)
}
