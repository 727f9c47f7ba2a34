use serde::Serialize;

use super::cpu::AggregateCpuSample;
use super::memory::MemInfo;
use super::process::ProcessSample;

#[derive(Clone, Debug, Default, Serialize)]
pub struct SystemSnapshot {
    pub cpu_utilization: f64,
    pub cpu_sample: AggregateCpuSample,
    pub memory_utilization: f64,
    pub memory: MemInfo,
    pub uptime_seconds: f64,
    pub total_processes: u64,
    pub running_processes: u64,
    pub os_name: String,
    pub kernel: String,
    pub processes: Vec<ProcessSample>,
}
