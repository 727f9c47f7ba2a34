use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{format_elapsed, format_mb};
use crate::system::snapshot::SystemSnapshot;

const LABEL: Style = Style::new().fg(Color::Gray);
const VALUE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " proctop ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let os = Line::from(vec![
        Span::styled("OS: ", LABEL),
        Span::styled(display_or_unknown(&snapshot.os_name), VALUE),
        Span::raw("   "),
        Span::styled("Kernel: ", LABEL),
        Span::styled(display_or_unknown(&snapshot.kernel), VALUE),
    ]);
    frame.render_widget(Paragraph::new(os), rows[0]);

    render_gauge(
        frame,
        rows[1],
        "CPU",
        snapshot.cpu_utilization,
        format!("{:.1}%", snapshot.cpu_utilization * 100.0),
        Color::Green,
    );

    let used_kb = snapshot.memory.non_cached_used_kb().max(0) as u64;
    render_gauge(
        frame,
        rows[2],
        "Mem",
        snapshot.memory_utilization,
        format!(
            "{:.1}%  {}/{} MB",
            snapshot.memory_utilization * 100.0,
            format_mb(used_kb),
            format_mb(snapshot.memory.total_kb)
        ),
        Color::Yellow,
    );

    let counts = Line::from(vec![
        Span::styled("Total Processes: ", LABEL),
        Span::styled(snapshot.total_processes.to_string(), VALUE),
        Span::raw("   "),
        Span::styled("Running: ", LABEL),
        Span::styled(snapshot.running_processes.to_string(), VALUE),
        Span::raw("   "),
        Span::styled("Up Time: ", LABEL),
        Span::styled(format_elapsed(snapshot.uptime_seconds), VALUE),
    ]);
    frame.render_widget(Paragraph::new(counts), rows[3]);
}

fn render_gauge(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    ratio: f64,
    label: String,
    color: Color,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    frame.render_widget(Paragraph::new(Span::styled(title.to_string(), LABEL)), cols[0]);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, cols[1]);
}

fn display_or_unknown(value: &str) -> &str {
    if value.is_empty() { "unknown" } else { value }
}
