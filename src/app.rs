use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::action::Action;
use crate::config::Config;
use crate::system::collector::Collector;
use crate::system::process::ProcessSample;
use crate::system::snapshot::SystemSnapshot;

pub struct App {
    pub running: bool,
    pub snapshot: SystemSnapshot,
    /// Index of the first process row on screen.
    pub scroll: usize,
    /// Process rows that fit in the table; updated on every draw.
    pub page_size: usize,
    collector: Collector,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_collector(Collector::from_config(config))
    }

    pub fn with_collector(mut collector: Collector) -> Self {
        let snapshot = collector.refresh();
        App {
            running: true,
            snapshot,
            scroll: 0,
            page_size: 1,
            collector,
        }
    }

    pub fn refresh_data(&mut self) {
        self.snapshot = self.collector.refresh();
        self.clamp_scroll();
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
            KeyCode::Home | KeyCode::Char('g') => Action::ScrollTop,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page_size.max(1)),
            Action::PageDown => self.scroll = self.scroll.saturating_add(self.page_size.max(1)),
            Action::ScrollTop => self.scroll = 0,
            Action::Refresh => {
                debug!("manual refresh");
                self.refresh_data();
            }
            Action::None => {}
        }
        self.clamp_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.snapshot
            .processes
            .len()
            .saturating_sub(self.page_size.max(1))
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
        self.clamp_scroll();
    }

    pub fn visible_processes(&self) -> &[ProcessSample] {
        let processes = &self.snapshot.processes;
        let start = self.scroll.min(processes.len());
        let end = (start + self.page_size).min(processes.len());
        &processes[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::procfs::ProcFs;
    use crate::system::rate::RateCalculator;
    use std::time::Duration;

    fn app_with(count: u32) -> App {
        let source = ProcFs::with_root("/nonexistent/proc/root")
            .passwd_path("/nonexistent/passwd")
            .os_release_path("/nonexistent/os-release");
        let mut app =
            App::with_collector(Collector::new(source, RateCalculator::new(100, Duration::ZERO)));
        app.snapshot.processes = (1..=count)
            .map(|pid| ProcessSample {
                pid,
                ..Default::default()
            })
            .collect();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn key_mapping() {
        let app = app_with(0);
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            app.map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(app.map_key(key(KeyCode::Down)), Action::ScrollDown);
        assert_eq!(app.map_key(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn quit_stops_app() {
        let mut app = app_with(0);
        app.dispatch(Action::Quit);
        assert!(!app.running);
    }

    #[test]
    fn scroll_is_clamped_to_last_page() {
        let mut app = app_with(10);
        app.set_page_size(4);
        app.dispatch(Action::PageDown);
        assert_eq!(app.scroll, 4);
        app.dispatch(Action::PageDown);
        assert_eq!(app.scroll, 6);
        app.dispatch(Action::ScrollDown);
        assert_eq!(app.scroll, 6);
        let pids: Vec<u32> = app.visible_processes().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![7, 8, 9, 10]);
        app.dispatch(Action::ScrollTop);
        assert_eq!(app.scroll, 0);
        app.dispatch(Action::ScrollUp);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn refresh_replaces_snapshot() {
        let mut app = app_with(3);
        app.scroll = 2;
        app.dispatch(Action::Refresh);
        assert!(app.snapshot.processes.is_empty());
        assert_eq!(app.scroll, 0);
    }
}
