use serde::{Deserialize, Serialize};

/// Counters pulled out of `/proc/<pid>/stat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStat {
    pub name: String,
    pub state: Option<char>,
    pub utime: u64,
    pub stime: u64,
    pub cutime: u64,
    pub cstime: u64,
    pub start_time_ticks: u64,
}

// Offsets into the fields that follow the closing paren of `comm`. The first
// of those is field 3 (state) in the 1-indexed layout of proc(5).
const STATE: usize = 0;
const UTIME: usize = 14 - 3;
const STIME: usize = 15 - 3;
const CUTIME: usize = 16 - 3;
const CSTIME: usize = 17 - 3;
const STARTTIME: usize = 22 - 3;

impl ProcessStat {
    /// Parse a single `/proc/<pid>/stat` line.
    ///
    /// `comm` may contain spaces and parentheses, so everything up to the last
    /// `)` is treated as one token. Missing fields are zero.
    pub fn parse(line: &str) -> Self {
        let (name, rest) = match (line.find('('), line.rfind(')')) {
            (Some(open), Some(close)) if open < close => {
                (line[open + 1..close].to_string(), &line[close + 1..])
            }
            _ => return Self::default(),
        };
        let fields: Vec<&str> = rest.split_whitespace().collect();
        let field = |idx: usize| -> u64 {
            fields
                .get(idx)
                .and_then(|v| v.parse::<i64>().ok())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0)
        };

        ProcessStat {
            name,
            state: fields.get(STATE).and_then(|s| s.chars().next()),
            utime: field(UTIME),
            stime: field(STIME),
            cutime: field(CUTIME),
            cstime: field(CSTIME),
            start_time_ticks: field(STARTTIME),
        }
    }

    /// utime + stime + cutime + cstime.
    pub fn active_jiffies(&self) -> u64 {
        self.utime
            .saturating_add(self.stime)
            .saturating_add(self.cutime)
            .saturating_add(self.cstime)
    }
}

/// Which `/proc/<pid>/status` key stands in for "RAM used".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryKey {
    #[default]
    #[serde(rename = "VmRSS")]
    VmRss,
    #[serde(rename = "VmData")]
    VmData,
    #[serde(rename = "VmSize")]
    VmSize,
}

impl MemoryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MemoryKey::VmRss => "VmRSS",
            MemoryKey::VmData => "VmData",
            MemoryKey::VmSize => "VmSize",
        }
    }
}

fn status_value<'a>(status: &'a str, key: &str) -> Option<&'a str> {
    status.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then_some(v)
    })
}

/// Memory figure in kB for `key` out of `/proc/<pid>/status`.
pub fn parse_status_memory_kb(status: &str, key: MemoryKey) -> u64 {
    status_value(status, key.as_str())
        .and_then(|v| v.split_whitespace().next())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Real uid (first column of the `Uid:` line).
pub fn parse_status_uid(status: &str) -> Option<u32> {
    status_value(status, "Uid")?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// The parts of `/proc/<pid>/status` a process row needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessStatus {
    pub uid: Option<u32>,
    pub memory_kb: u64,
}

impl ProcessStatus {
    pub fn parse(status: &str, key: MemoryKey) -> Self {
        ProcessStatus {
            uid: parse_status_uid(status),
            memory_kb: parse_status_memory_kb(status, key),
        }
    }
}

/// Collapse the NUL-separated argv of `/proc/<pid>/cmdline` into one line.
pub fn normalize_cmdline(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .split('\0')
        .filter(|arg| !arg.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One row of the process table, rebuilt from scratch every refresh.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub command: String,
    pub user: String,
    pub memory_kb: u64,
    pub active_jiffies: u64,
    pub start_time_ticks: u64,
    pub cpu_utilization: f64,
    pub age_seconds: f64,
}

impl ProcessSample {
    pub fn memory_mb(&self) -> f64 {
        self.memory_kb as f64 / 1024.0
    }

    /// Clock ticks consumed per second alive, before any clamping. Tells
    /// multi-threaded processes apart once their utilization saturates at 1.
    pub fn lifetime_load(&self) -> f64 {
        if self.age_seconds <= 0.0 {
            return 0.0;
        }
        self.active_jiffies as f64 / self.age_seconds
    }

    /// Command line, or `[comm]` for processes without one (kernel threads).
    pub fn display_command(&self) -> String {
        if self.command.is_empty() && !self.name.is_empty() {
            format!("[{}]", self.name)
        } else {
            self.command.clone()
        }
    }
}
