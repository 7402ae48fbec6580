use crate::core::bus::{BusPort, BusTiming};
use crate::error::IctResult;

/// Millisecond time base of the tester.
pub trait Clock {
    /// Free-running millisecond counter; wraps at `u32::MAX`.
    fn millis(&self) -> u32;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Milliseconds from `since` to `now` on a wrapping counter.
pub fn elapsed_ms(since: u32, now: u32) -> u32 {
    now.wrapping_sub(since)
}

/// The tester hardware a board is constructed against.
pub trait Probe {
    /// Open the CPU-socket port with the given cycle timing.
    fn open_bus(&mut self, timing: BusTiming) -> IctResult<Box<dyn BusPort>>;

    fn clock(&mut self) -> Box<dyn Clock>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_survives_wraparound() {
        assert_eq!(elapsed_ms(100, 133), 33);
        assert_eq!(elapsed_ms(u32::MAX - 10, 22), 33);
    }
}
