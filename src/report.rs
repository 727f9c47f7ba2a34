//! Non-interactive output for `--once`.

use std::fmt::{self, Write};

use crate::format::{format_elapsed, format_mb, format_percent};
use crate::system::snapshot::SystemSnapshot;

pub fn plain_table(snapshot: &SystemSnapshot) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_table(&mut out, snapshot)?;
    Ok(out)
}

fn write_table(out: &mut impl fmt::Write, snapshot: &SystemSnapshot) -> fmt::Result {
    writeln!(out, "OS: {}", snapshot.os_name)?;
    writeln!(out, "Kernel: {}", snapshot.kernel)?;
    writeln!(out, "CPU: {}%", format_percent(snapshot.cpu_utilization))?;
    writeln!(
        out,
        "Memory: {}%",
        format_percent(snapshot.memory_utilization)
    )?;
    writeln!(out, "Total Processes: {}", snapshot.total_processes)?;
    writeln!(out, "Running Processes: {}", snapshot.running_processes)?;
    writeln!(out, "Up Time: {}", format_elapsed(snapshot.uptime_seconds))?;
    writeln!(out)?;
    writeln!(
        out,
        "{:>7} {:<10} {:>6} {:>9} {:>10} COMMAND",
        "PID", "USER", "CPU%", "RAM MB", "TIME+"
    )?;
    for p in &snapshot.processes {
        writeln!(
            out,
            "{:>7} {:<10} {:>6} {:>9} {:>10} {}",
            p.pid,
            p.user,
            format_percent(p.cpu_utilization),
            format_mb(p.memory_kb),
            format_elapsed(p.age_seconds),
            p.display_command()
        )?;
    }
    Ok(())
}

pub fn json(snapshot: &SystemSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}
