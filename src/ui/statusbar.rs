use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, scroll: usize, total: usize) {
    let bg_style = Style::default().bg(Color::Black);

    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit", Color::Cyan));
    spans.extend(pill_spans("\u{2191}\u{2193}", "Scroll", Color::Cyan));
    spans.extend(pill_spans("PgUp/PgDn", "Page", Color::Cyan));
    spans.extend(pill_spans("r", "Refresh", Color::Cyan));
    spans.push(Span::styled(
        format!("  {}/{}", if total == 0 { 0 } else { scroll + 1 }, total),
        Style::default().fg(Color::Gray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, accent: Color) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(Color::Gray)),
    ]
}
