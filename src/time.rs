//! Settle-delay abstraction for platform-agnostic timing.

use core::future::Future;

/// Millisecond duration used by [`ButtonConfig`](crate::ButtonConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Zero duration constant.
    pub const ZERO: Self = Millis(0);

    /// Returns `true` for a zero-length duration.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Trait for suspending the processing task for a fixed time.
///
/// Implement this on top of your platform timer (e.g. `embassy_time::Timer`).
/// The future must not busy-wait; other tasks and interrupts keep running
/// while it is pending.
pub trait SettleDelay {
    /// Completes after `duration` has elapsed.
    fn delay(&mut self, duration: Millis) -> impl Future<Output = ()>;
}

/// A delay that completes immediately.
///
/// Useful when the settle time is configured to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl SettleDelay for NoDelay {
    async fn delay(&mut self, _duration: Millis) {}
}

impl<T: SettleDelay + ?Sized> SettleDelay for &mut T {
    fn delay(&mut self, duration: Millis) -> impl Future<Output = ()> {
        T::delay(self, duration)
    }
}
