//! GPIO backend abstraction for the monitored button lines.

use crate::types::LineId;

/// Trait for abstracting the button GPIO hardware.
///
/// Implement this for your board's input pins and interrupt controller to
/// allow the processing task to sample them. All methods run in task
/// context only and none of them may fail. Handle any hardware errors
/// internally.
pub trait ButtonLines {
    /// Returns `true` if `line` is currently asserted (button held).
    ///
    /// Must not block. Electrical polarity (active-low pins etc.) is resolved
    /// here, so callers only ever see "held" as `true`.
    fn read_line(&mut self, line: LineId) -> bool;

    /// Enables edge interrupts for every monitored line.
    ///
    /// Idempotent.
    fn enable_interrupts(&mut self);

    /// Disables edge interrupts for every monitored line.
    ///
    /// Idempotent.
    fn disable_interrupts(&mut self);
}

impl<T: ButtonLines + ?Sized> ButtonLines for &mut T {
    fn read_line(&mut self, line: LineId) -> bool {
        T::read_line(self, line)
    }

    fn enable_interrupts(&mut self) {
        T::enable_interrupts(self)
    }

    fn disable_interrupts(&mut self) {
        T::disable_interrupts(self)
    }
}
