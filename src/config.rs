//! Tunables for the button subsystem.

use crate::interrupt::Priority;
use crate::time::Millis;

/// Default settle time between the first edge and the snapshot.
pub const DEFAULT_SETTLE: Millis = Millis(20);

/// Default priority of the processing task. Kept below the maximum.
pub const DEFAULT_TASK_PRIORITY: Priority = Priority(1);

/// Configuration for [`ButtonTask`](crate::ButtonTask) and its
/// [`InterruptHandler`](crate::InterruptHandler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Wait after a wake before sampling. Zero samples immediately.
    pub settle: Millis,

    /// Scheduling priority of the processing task.
    pub task_priority: Priority,
}

impl ButtonConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            task_priority: DEFAULT_TASK_PRIORITY,
        }
    }

    /// Sets the settle time in milliseconds.
    pub const fn with_settle_ms(mut self, millis: u32) -> Self {
        self.settle = Millis(millis);
        self
    }

    /// Sets the processing task priority.
    pub const fn with_task_priority(mut self, priority: Priority) -> Self {
        self.task_priority = priority;
        self
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new()
    }
}
