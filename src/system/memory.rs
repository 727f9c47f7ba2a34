use serde::Serialize;

/// The subset of `/proc/meminfo` needed for the utilization formula, in kB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemInfo {
    pub total_kb: u64,
    pub free_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
    pub s_reclaimable_kb: u64,
    pub shmem_kb: u64,
}

impl MemInfo {
    /// Parse `Key:   value kB` lines. Unknown keys are ignored and missing
    /// keys stay zero.
    pub fn parse(contents: &str) -> Self {
        let mut info = MemInfo::default();
        for line in contents.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let slot = match key.trim() {
                "MemTotal" => &mut info.total_kb,
                "MemFree" => &mut info.free_kb,
                "Buffers" => &mut info.buffers_kb,
                "Cached" => &mut info.cached_kb,
                "SReclaimable" => &mut info.s_reclaimable_kb,
                "Shmem" => &mut info.shmem_kb,
                _ => continue,
            };
            *slot = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
        }
        info
    }

    /// Page cache that could be dropped, excluding shared memory.
    pub fn cache_kb(&self) -> i64 {
        self.cached_kb as i64 + self.s_reclaimable_kb as i64 - self.shmem_kb as i64
    }

    /// Memory in use that is neither free, buffers nor reclaimable cache.
    pub fn non_cached_used_kb(&self) -> i64 {
        let used = self.total_kb as i64 - self.free_kb as i64;
        used - (self.buffers_kb as i64 + self.cache_kb())
    }
}
