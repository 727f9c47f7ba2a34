pub mod collector;
pub mod cpu;
pub mod memory;
pub mod platform;
pub mod process;
pub mod procfs;
pub mod rate;
pub mod snapshot;
pub mod users;
