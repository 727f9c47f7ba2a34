use serde::Serialize;

/// Number of counters on the aggregate `cpu` line that we consume.
pub const CPU_STATES: usize = 10;

/// System-wide CPU time breakdown from the `cpu` line of `/proc/stat`.
///
/// Every counter is in clock ticks since boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregateCpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl AggregateCpuSample {
    pub fn from_counters(counters: [u64; CPU_STATES]) -> Self {
        let [
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        ] = counters;
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        }
    }

    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
            .saturating_add(self.iowait)
            .saturating_add(self.irq)
            .saturating_add(self.softirq)
            .saturating_add(self.steal)
            .saturating_add(self.guest)
            .saturating_add(self.guest_nice)
    }

    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    pub fn active(&self) -> u64 {
        self.total().saturating_sub(self.idle_total())
    }

    /// Parse the aggregate `cpu` line out of the full contents of `/proc/stat`.
    ///
    /// Absent or short lines leave the missing counters at zero.
    pub fn parse_stat(contents: &str) -> Self {
        contents
            .lines()
            .find(|line| line.split_whitespace().next() == Some("cpu"))
            .map(Self::parse_line)
            .unwrap_or_default()
    }

    /// Parse a single `cpu  u n s i ...` line.
    pub fn parse_line(line: &str) -> Self {
        let mut counters = [0u64; CPU_STATES];
        let values = line.split_whitespace().skip(1).take(CPU_STATES);
        for (slot, value) in counters.iter_mut().zip(values) {
            *slot = value.parse().unwrap_or(0);
        }
        Self::from_counters(counters)
    }
}

/// Fraction of non-idle time between two aggregate samples.
///
/// Counters that went backwards are treated as no progress. A zero tick window
/// yields 0.
pub fn utilization_between(before: &AggregateCpuSample, after: &AggregateCpuSample) -> f64 {
    let total_delta = after.total().saturating_sub(before.total());
    if total_delta == 0 {
        return 0.0;
    }
    let active_delta = after.active().saturating_sub(before.active());
    (active_delta as f64 / total_delta as f64).clamp(0.0, 1.0)
}
