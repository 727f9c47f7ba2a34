use std::cmp::Ordering;
use std::time::Duration;

use tracing::debug;

use super::platform;
use super::process::ProcessSample;
use super::procfs::ProcFs;
use super::rate::RateCalculator;
use super::snapshot::SystemSnapshot;
use super::users::{UNKNOWN_USER, UserDirectory};
use crate::config::Config;

pub struct Collector {
    source: ProcFs,
    rate: RateCalculator,
}

impl Default for Collector {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Collector {
    pub fn new(source: ProcFs, rate: RateCalculator) -> Self {
        Collector { source, rate }
    }

    pub fn from_config(config: &Config) -> Self {
        let source = ProcFs::with_root(&config.paths.proc_root)
            .os_release_path(&config.paths.os_release)
            .passwd_path(&config.paths.passwd)
            .memory_key(config.sampling.memory_key);
        let clock_ticks = config
            .sampling
            .clock_ticks
            .unwrap_or_else(platform::clock_ticks_per_second);
        let interval = Duration::from_millis(config.sampling.cpu_interval_ms);
        debug!(clock_ticks, ?interval, root = %source.proc_root().display(), "collector configured");
        Collector::new(source, RateCalculator::new(clock_ticks, interval))
    }

    pub fn source(&self) -> &ProcFs {
        &self.source
    }

    pub fn rate(&self) -> &RateCalculator {
        &self.rate
    }

    /// Take a complete snapshot. Blocks for the CPU sampling interval.
    pub fn refresh(&mut self) -> SystemSnapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let cpu_utilization = self.rate.system_cpu_utilization(&self.source);
        let cpu_sample = self
            .rate
            .previous()
            .map(|observation| observation.sample)
            .unwrap_or_default();

        let memory = self.source.read_memory();
        let uptime_seconds = self.source.read_uptime_seconds();
        let (total_processes, running_processes) = self.source.read_process_counts();
        let users = self.source.read_users();

        let mut processes: Vec<ProcessSample> = self
            .source
            .list_pids()
            .into_iter()
            .map(|pid| self.sample_process(pid, uptime_seconds, &users))
            .collect();
        sort_processes(&mut processes);

        debug!(
            processes = processes.len(),
            cpu = cpu_utilization,
            "refresh complete"
        );

        SystemSnapshot {
            cpu_utilization,
            cpu_sample,
            memory_utilization: self.rate.memory_utilization(&memory),
            memory,
            uptime_seconds,
            total_processes,
            running_processes,
            os_name: self.source.read_os_pretty_name(),
            kernel: self.source.read_kernel(),
            processes,
        }
    }

    /// Read one pid. Every field degrades independently if the process is gone.
    pub fn sample_process(
        &self,
        pid: u32,
        uptime_seconds: f64,
        users: &UserDirectory,
    ) -> ProcessSample {
        let stat = self.source.read_process_stat(pid);
        let status = self.source.read_process_status(pid);
        let user = status
            .uid
            .and_then(|uid| users.name_of(uid))
            .unwrap_or(UNKNOWN_USER)
            .to_string();

        ProcessSample {
            pid,
            command: self.source.read_command(pid),
            user,
            memory_kb: status.memory_kb,
            active_jiffies: stat.active_jiffies(),
            start_time_ticks: stat.start_time_ticks,
            cpu_utilization: self.rate.process_cpu_utilization(&stat, uptime_seconds),
            age_seconds: self
                .rate
                .process_age_seconds(&stat, uptime_seconds)
                .max(0.0),
            name: stat.name,
        }
    }
}

/// Busiest first. Processes pinned at full utilization are ordered by their
/// unclamped load; pid breaks remaining ties so the order is stable between
/// refreshes.
pub fn sort_processes(processes: &mut [ProcessSample]) {
    processes.sort_by(|a, b| {
        b.cpu_utilization
            .partial_cmp(&a.cpu_utilization)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.lifetime_load()
                    .partial_cmp(&a.lifetime_load())
                    .unwrap_or(Ordering::Equal)
            })
            .then(a.pid.cmp(&b.pid))
    });
}
