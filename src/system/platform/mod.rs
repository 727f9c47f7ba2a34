/// Clock frequency assumed when the platform cannot report one (USER_HZ on
/// every mainstream Linux build).
pub const FALLBACK_CLOCK_TICKS: u64 = 100;

pub trait PlatformExtensions {
    /// Kernel clock ticks per second, as used by `/proc` jiffy counters.
    fn clock_ticks_per_second() -> Option<u64>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use other as platform_impl;

pub fn clock_ticks_per_second() -> u64 {
    platform_impl::Platform::clock_ticks_per_second().unwrap_or(FALLBACK_CLOCK_TICKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ticks_are_positive() {
        assert!(clock_ticks_per_second() > 0);
    }
}
