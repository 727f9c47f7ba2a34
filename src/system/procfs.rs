//! Best-effort readers for the plaintext counters under `/proc`.
//!
//! Nothing here returns an error. A file that cannot be read (the process
//! exited, the kernel lacks the counter) degrades to zero or an empty value so
//! a single racy pid never aborts a refresh.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::cpu::AggregateCpuSample;
use super::memory::MemInfo;
use super::process::{MemoryKey, ProcessStat, ProcessStatus, normalize_cmdline};
use super::rate::CpuSampler;
use super::users::{UserDirectory, find_user_name};

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";
pub const DEFAULT_PASSWD: &str = "/etc/passwd";

#[derive(Clone, Debug)]
pub struct ProcFs {
    proc_root: PathBuf,
    os_release: PathBuf,
    passwd: PathBuf,
    memory_key: MemoryKey,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcFs {
    pub fn new() -> Self {
        ProcFs {
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            os_release: PathBuf::from(DEFAULT_OS_RELEASE),
            passwd: PathBuf::from(DEFAULT_PASSWD),
            memory_key: MemoryKey::default(),
        }
    }

    /// Read process information from `root` instead of `/proc`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        ProcFs {
            proc_root: root.into(),
            ..Self::new()
        }
    }

    pub fn os_release_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn passwd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd = path.into();
        self
    }

    pub fn memory_key(mut self, key: MemoryKey) -> Self {
        self.memory_key = key;
        self
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    fn read(&self, path: &Path) -> Option<String> {
        match fs::read(path) {
            Ok(raw) => Some(String::from_utf8_lossy(&raw).into_owned()),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "counter file unreadable");
                None
            }
        }
    }

    fn read_proc(&self, name: &str) -> String {
        self.read(&self.proc_root.join(name)).unwrap_or_default()
    }

    fn read_pid_bytes(&self, pid: u32, name: &str) -> Option<Vec<u8>> {
        let path = self.proc_root.join(pid.to_string()).join(name);
        match fs::read(&path) {
            Ok(raw) => Some(raw),
            Err(err) => {
                // Routine: the process exited between enumeration and this read.
                trace!(pid, file = name, error = %err, "pid file unreadable");
                None
            }
        }
    }

    /// `comm` is written raw by the kernel and need not be UTF-8.
    fn read_pid(&self, pid: u32, name: &str) -> Option<String> {
        self.read_pid_bytes(pid, name)
            .map(|raw| String::from_utf8_lossy(&raw).into_owned())
    }

    /// Live pids: every entry of the proc root whose name is all digits.
    pub fn list_pids(&self) -> HashSet<u32> {
        let entries = match fs::read_dir(&self.proc_root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(root = %self.proc_root.display(), error = %err, "cannot enumerate processes");
                return HashSet::new();
            }
        };
        entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                name.parse().ok()
            })
            .collect()
    }

    pub fn read_aggregate_cpu(&self) -> AggregateCpuSample {
        AggregateCpuSample::parse_stat(&self.read_proc("stat"))
    }

    pub fn read_memory(&self) -> MemInfo {
        MemInfo::parse(&self.read_proc("meminfo"))
    }

    pub fn read_uptime_seconds(&self) -> f64 {
        parse_uptime(&self.read_proc("uptime"))
    }

    /// `(processes, procs_running)` from `/proc/stat`.
    pub fn read_process_counts(&self) -> (u64, u64) {
        parse_process_counts(&self.read_proc("stat"))
    }

    pub fn read_process_stat(&self, pid: u32) -> ProcessStat {
        self.read_pid(pid, "stat")
            .map(|line| ProcessStat::parse(&line))
            .unwrap_or_default()
    }

    /// Owner and memory figure from a single read of `/proc/<pid>/status`.
    pub fn read_process_status(&self, pid: u32) -> ProcessStatus {
        self.read_pid(pid, "status")
            .map(|status| ProcessStatus::parse(&status, self.memory_key))
            .unwrap_or_default()
    }

    pub fn read_process_memory_kb(&self, pid: u32) -> u64 {
        self.read_process_status(pid).memory_kb
    }

    pub fn read_process_uid(&self, pid: u32) -> Option<u32> {
        self.read_process_status(pid).uid
    }

    /// Scan the passwd file for `uid`.
    pub fn resolve_user_name(&self, uid: u32) -> Option<String> {
        find_user_name(&self.read(&self.passwd)?, uid)
    }

    /// The whole passwd table, for resolving many pids in one pass.
    pub fn read_users(&self) -> UserDirectory {
        self.read(&self.passwd)
            .map(|contents| UserDirectory::parse(&contents))
            .unwrap_or_default()
    }

    pub fn read_command(&self, pid: u32) -> String {
        self.read_pid_bytes(pid, "cmdline")
            .map(|raw| normalize_cmdline(&raw))
            .unwrap_or_default()
    }

    pub fn read_kernel(&self) -> String {
        parse_kernel_version(&self.read_proc("version"))
    }

    pub fn read_os_pretty_name(&self) -> String {
        self.read(&self.os_release)
            .and_then(|contents| parse_pretty_name(&contents))
            .unwrap_or_default()
    }
}

impl CpuSampler for ProcFs {
    fn sample_cpu(&self) -> AggregateCpuSample {
        self.read_aggregate_cpu()
    }
}

pub fn parse_uptime(contents: &str) -> f64 {
    contents
        .split_whitespace()
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_process_counts(stat: &str) -> (u64, u64) {
    let mut total = 0;
    let mut running = 0;
    for line in stat.lines() {
        let mut parts = line.split_whitespace();
        let slot = match parts.next() {
            Some("processes") => &mut total,
            Some("procs_running") => &mut running,
            _ => continue,
        };
        *slot = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    }
    (total, running)
}

/// Third token of `/proc/version` (`Linux version <release> ...`).
pub fn parse_kernel_version(contents: &str) -> String {
    contents
        .split_whitespace()
        .nth(2)
        .map(str::to_string)
        .unwrap_or_default()
}

/// `PRETTY_NAME` out of an os-release file, with surrounding quotes removed.
pub fn parse_pretty_name(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let value = line.trim().strip_prefix("PRETTY_NAME=")?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        Some(value.replace('_', " "))
    })
}
