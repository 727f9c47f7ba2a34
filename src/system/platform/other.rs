use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn clock_ticks_per_second() -> Option<u64> {
        None
    }
}
