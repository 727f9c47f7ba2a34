use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::system::memory::MemInfo;
use crate::system::process::ProcessSample;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::{header, process_table, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_process(pid: u32, name: &str, user: &str, cpu: f64, memory_kb: u64) -> ProcessSample {
    ProcessSample {
        pid,
        name: name.to_string(),
        command: format!("/usr/bin/{name} --flag"),
        user: user.to_string(),
        memory_kb,
        active_jiffies: 0,
        start_time_ticks: 0,
        cpu_utilization: cpu,
        age_seconds: 100.0,
    }
}

fn make_snapshot() -> SystemSnapshot {
    SystemSnapshot {
        cpu_utilization: 0.125,
        memory_utilization: 0.22,
        memory: MemInfo {
            total_kb: 1_048_576,
            free_kb: 400_000,
            ..Default::default()
        },
        uptime_seconds: 3661.0,
        total_processes: 812,
        running_processes: 3,
        os_name: "Ubuntu 24.04.1 LTS".to_string(),
        kernel: "6.8.0-45-generic".to_string(),
        processes: vec![
            make_process(1, "alpha", "root", 0.3, 2048),
            make_process(42, "beta", "alice", 0.01, 512),
        ],
        ..Default::default()
    }
}

#[test]
fn header_shows_system_summary() {
    let snapshot = make_snapshot();
    let out = render_to_string(90, 6, |frame| {
        header::render(frame, Rect::new(0, 0, 90, 6), &snapshot)
    });
    assert!(out.contains("proctop"));
    assert!(out.contains("OS: Ubuntu 24.04.1 LTS"));
    assert!(out.contains("Kernel: 6.8.0-45-generic"));
    assert!(out.contains("12.5%"));
    assert!(out.contains("22.0%"));
    assert!(out.contains("Total Processes: 812"));
    assert!(out.contains("Running: 3"));
    assert!(out.contains("Up Time: 01:01:01"));
}

#[test]
fn header_marks_missing_identity_unknown() {
    let snapshot = SystemSnapshot::default();
    let out = render_to_string(80, 6, |frame| {
        header::render(frame, Rect::new(0, 0, 80, 6), &snapshot)
    });
    assert!(out.contains("OS: unknown"));
    assert!(out.contains("Kernel: unknown"));
}

#[test]
fn table_lists_process_rows() {
    let snapshot = make_snapshot();
    let out = render_to_string(90, 8, |frame| {
        process_table::render(
            frame,
            Rect::new(0, 0, 90, 8),
            &snapshot.processes,
            0,
            snapshot.processes.len(),
        )
    });
    for column in ["PID", "USER", "CPU%", "RAM MB", "TIME+", "COMMAND"] {
        assert!(out.contains(column), "missing column {column}");
    }
    assert!(out.contains("Processes 1-2 of 2"));
    assert!(out.contains("root"));
    assert!(out.contains("30.0"));
    assert!(out.contains("2.0"));
    assert!(out.contains("00:01:40"));
    assert!(out.contains("/usr/bin/alpha --flag"));
    assert!(out.contains("alice"));
}

#[test]
fn table_shows_kernel_thread_name() {
    let mut process = make_process(2, "kthreadd", "root", 0.0, 0);
    process.command.clear();
    let out = render_to_string(90, 5, |frame| {
        process_table::render(frame, Rect::new(0, 0, 90, 5), &[process], 0, 1)
    });
    assert!(out.contains("[kthreadd]"));
}

#[test]
fn visible_rows_excludes_chrome() {
    assert_eq!(process_table::visible_rows(Rect::new(0, 0, 80, 10)), 7);
    assert_eq!(process_table::visible_rows(Rect::new(0, 0, 80, 2)), 0);
}

#[test]
fn statusbar_shows_position() {
    let out = render_to_string(80, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 80, 1), 4, 120)
    });
    assert!(out.contains("Quit"));
    assert!(out.contains("5/120"));
}
