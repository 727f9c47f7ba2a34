use std::time::{Duration, Instant};

use super::cpu::{AggregateCpuSample, utilization_between};
use super::memory::MemInfo;
use super::process::ProcessStat;

/// Anything that can take a point-in-time reading of the aggregate CPU
/// counters.
pub trait CpuSampler {
    fn sample_cpu(&self) -> AggregateCpuSample;
}

#[derive(Clone, Copy, Debug)]
pub struct CpuObservation {
    pub sample: AggregateCpuSample,
    pub observed_at: Instant,
}

/// Turns raw counters into utilization fractions.
///
/// Holds the last aggregate CPU sample it observed; nothing else carries over
/// between calls.
#[derive(Debug)]
pub struct RateCalculator {
    clock_ticks_per_second: u64,
    sample_interval: Duration,
    previous: Option<CpuObservation>,
}

impl RateCalculator {
    pub fn new(clock_ticks_per_second: u64, sample_interval: Duration) -> Self {
        Self {
            clock_ticks_per_second: clock_ticks_per_second.max(1),
            sample_interval,
            previous: None,
        }
    }

    pub fn clock_ticks_per_second(&self) -> u64 {
        self.clock_ticks_per_second
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    pub fn previous(&self) -> Option<&CpuObservation> {
        self.previous.as_ref()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Sample, sleep for the sampling interval, sample again and return the
    /// non-idle fraction of the ticks that elapsed in between.
    ///
    /// Blocks the calling thread for `sample_interval`.
    pub fn system_cpu_utilization<S>(&mut self, sampler: &S) -> f64
    where
        S: CpuSampler + ?Sized,
    {
        let before = sampler.sample_cpu();
        if !self.sample_interval.is_zero() {
            std::thread::sleep(self.sample_interval);
        }
        let after = sampler.sample_cpu();
        self.previous = Some(CpuObservation {
            sample: after,
            observed_at: Instant::now(),
        });
        utilization_between(&before, &after)
    }

    /// Lifetime average: CPU seconds consumed over wall-clock seconds alive.
    ///
    /// Returns 0 when the process age is not positive (just started, or the
    /// uptime read raced the stat read).
    pub fn process_cpu_utilization(&self, stat: &ProcessStat, uptime_seconds: f64) -> f64 {
        let age = self.process_age_seconds(stat, uptime_seconds);
        if age <= 0.0 {
            return 0.0;
        }
        let active_seconds = stat.active_jiffies() as f64 / self.clock_ticks_per_second as f64;
        (active_seconds / age).clamp(0.0, 1.0)
    }

    /// Seconds since the process started; may be negative on a stale read.
    pub fn process_age_seconds(&self, stat: &ProcessStat, uptime_seconds: f64) -> f64 {
        uptime_seconds - stat.start_time_ticks as f64 / self.clock_ticks_per_second as f64
    }

    pub fn memory_utilization(&self, mem: &MemInfo) -> f64 {
        memory_utilization(mem)
    }
}

/// `(Total - Free - Buffers - (Cached + SReclaimable - Shmem)) / Total`.
pub fn memory_utilization(mem: &MemInfo) -> f64 {
    if mem.total_kb == 0 {
        return 0.0;
    }
    (mem.non_cached_used_kb() as f64 / mem.total_kb as f64).clamp(0.0, 1.0)
}
