use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use proctop::system::cpu::AggregateCpuSample;
use proctop::system::memory::MemInfo;
use proctop::system::process::{MemoryKey, ProcessStat, parse_status_memory_kb};
use proctop::system::users::UserDirectory;

const STAT: &str = "cpu  2255 34 2290 22625563 6290 127 456 0 0 0\n\
cpu0 1132 34 1441 11311718 3675 127 438 0 0 0\n\
cpu1 1123 0 849 11313845 2614 0 18 0 0 0\n\
intr 114930548 113199788 3 0 5 263 0 4\n\
ctxt 1990473\nbtime 1062191376\nprocesses 2915\nprocs_running 1\nprocs_blocked 0\n";

const PID_STAT: &str = "1234 (Web Content) S 1 1234 1234 0 -1 4194560 2315 0 0 0 \
100 50 7 3 20 0 1 0 4242 12345678 456 18446744073709551615 1 1 0 0 0 0 0 0 0 0 0 0 17 2 0 0 0 0 0";

const STATUS: &str = "Name:\tbash\nUmask:\t0022\nState:\tS (sleeping)\nTgid:\t1234\n\
Uid:\t1000\t1000\t1000\t1000\nGid:\t1000\t1000\t1000\t1000\nVmPeak:\t   10432 kB\n\
VmSize:\t   10304 kB\nVmRSS:\t    5120 kB\nVmData:\t    2048 kB\nThreads:\t1\n";

const MEMINFO: &str = "MemTotal:       16318412 kB\nMemFree:         8842144 kB\n\
MemAvailable:   12123620 kB\nBuffers:          261664 kB\nCached:          3228312 kB\n\
SwapCached:            0 kB\nActive:          4312460 kB\nShmem:            402004 kB\n\
SReclaimable:     187212 kB\nSUnreclaim:        98212 kB\n";

fn make_passwd(n: usize) -> String {
    (0..n)
        .map(|i| format!("user{i}:x:{}:{}::/home/user{i}:/bin/sh\n", 1000 + i, 1000 + i))
        .collect()
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("procfs_parsers");
    group.bench_function("aggregate_cpu", |b| {
        b.iter(|| AggregateCpuSample::parse_stat(black_box(STAT)))
    });
    group.bench_function("pid_stat", |b| {
        b.iter(|| ProcessStat::parse(black_box(PID_STAT)))
    });
    group.bench_function("status_memory", |b| {
        b.iter(|| parse_status_memory_kb(black_box(STATUS), MemoryKey::VmRss))
    });
    group.bench_function("meminfo", |b| b.iter(|| MemInfo::parse(black_box(MEMINFO))));
    group.finish();
}

fn bench_user_directory(c: &mut Criterion) {
    let passwd = make_passwd(500);
    c.bench_function("user_directory_500", |b| {
        b.iter(|| UserDirectory::parse(black_box(&passwd)))
    });
}

criterion_group!(benches, bench_parsers, bench_user_directory);
criterion_main!(benches);
