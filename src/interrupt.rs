//! Edge interrupt handler for the monitored lines.
//!
//! [`InterruptHandler`] is the only piece of this crate meant to run in
//! interrupt context. It can reach nothing but a [`Notifier`] and a
//! [`Preemption`] hook, both of which are non-blocking and allocation-free.

use crate::notify::Notifier;
use crate::types::LineId;

/// Scheduling priority. Larger values preempt smaller ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Priority(pub u8);

/// Trait for the interrupt-context side of the scheduler.
///
/// Implementations are called from interrupt handlers. They must not block,
/// must not allocate and must run in bounded time.
pub trait Preemption {
    /// Priority of the task that was running when the interrupt fired.
    fn current_priority(&self) -> Priority;

    /// Asks the scheduler to switch tasks when the interrupt returns.
    ///
    /// On an embassy interrupt executor this is pending the executor's
    /// software interrupt.
    fn request_context_switch(&self);
}

impl<T: Preemption + ?Sized> Preemption for &T {
    fn current_priority(&self) -> Priority {
        T::current_priority(self)
    }

    fn request_context_switch(&self) {
        T::request_context_switch(self)
    }
}

/// Handles an edge on any monitored line.
///
/// Built once at initialization from the processing task's notifier and
/// priority, then invoked by the platform's interrupt glue on every edge.
///
/// # Type Parameters
/// * `'a` - Lifetime of the notification and scheduler hook
/// * `P` - Scheduler hook implementation type
pub struct InterruptHandler<'a, P: Preemption> {
    notifier: Notifier<'a>,
    task_priority: Priority,
    preemption: &'a P,
}

impl<P: Preemption> Clone for InterruptHandler<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Preemption> Copy for InterruptHandler<'_, P> {}

impl<'a, P: Preemption> InterruptHandler<'a, P> {
    /// Creates a handler that wakes the task behind `notifier`.
    pub const fn new(notifier: Notifier<'a>, task_priority: Priority, preemption: &'a P) -> Self {
        Self {
            notifier,
            task_priority,
            preemption,
        }
    }

    /// Priority the woken task is compared against.
    #[inline]
    pub const fn task_priority(&self) -> Priority {
        self.task_priority
    }

    /// Reacts to an edge on `line`.
    ///
    /// Posts the wake and, if the processing task just became runnable and
    /// outranks whatever was interrupted, requests a context switch. An edge
    /// arriving while a wake is still pending is folded into that wake. The
    /// line is only used for tracing: the task samples every line anyway.
    pub fn on_edge(&self, line: LineId) {
        trace!("edge on line {}", line.0);

        if self.notifier.signal() && self.task_priority > self.preemption.current_priority() {
            self.preemption.request_context_switch();
        }
    }
}
