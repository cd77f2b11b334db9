//! Button processing task.
//!
//! Provides [`ButtonTask`], which waits for the edge notification, snapshots
//! every monitored line with interrupts masked and reports what is held.
//! Also defines [`Shutdown`] for ending the task.

use core::fmt::Write;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::config::ButtonConfig;
use crate::interrupt::{InterruptHandler, Preemption};
use crate::lines::ButtonLines;
use crate::notify::Waiter;
use crate::report::write_report;
use crate::time::SettleDelay;
use crate::types::{LineId, LineStates, Press};

/// The current state of a button task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskState {
    /// Waiting for an edge notification or a shutdown request.
    Idle,
    /// Woken, waiting out the settle time before sampling.
    Settling,
    /// Interrupts masked, lines being read.
    Sampling,
    /// Shut down. Terminal.
    Stopped,
}

/// What ended a wait in [`ButtonTask::next_wake`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wake {
    /// At least one edge occurred since the last drain.
    Notified,
    /// Shutdown was requested.
    Shutdown,
}

/// Returned by [`ButtonTask::run`] once the task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskExit {
    /// Number of sampling passes performed over the task's lifetime.
    pub passes: u32,
}

/// One-shot request to end a [`ButtonTask`].
pub struct Shutdown {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Shutdown {
    /// Creates an unrequested shutdown.
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Requests the task to stop at its next wait.
    pub fn request(&self) {
        self.signal.signal(());
    }

    async fn wait(&self) {
        self.signal.wait().await
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples and reports the monitored button lines.
///
/// The task owns the GPIO backend, the settle delay, the report sink and the
/// notification's one [`Waiter`]. Run it with [`run`](ButtonTask::run) from
/// an executor task; the future completes only after a [`Shutdown`] request.
///
/// # Type Parameters
/// * `'a` - Lifetime of the notification and shutdown request
/// * `B` - GPIO backend implementation type
/// * `D` - Settle delay implementation type
/// * `W` - Report sink type
/// * `N` - Number of monitored lines
pub struct ButtonTask<'a, B: ButtonLines, D: SettleDelay, W: Write, const N: usize> {
    lines: B,
    delay: D,
    sink: W,
    waiter: Waiter<'a>,
    shutdown: &'a Shutdown,
    config: ButtonConfig,
    state: TaskState,
    passes: u32,
}

impl<'a, B: ButtonLines, D: SettleDelay, W: Write, const N: usize> ButtonTask<'a, B, D, W, N> {
    /// Creates an idle task. Interrupts stay untouched until [`run`](Self::run).
    pub fn new(
        lines: B,
        delay: D,
        sink: W,
        waiter: Waiter<'a>,
        shutdown: &'a Shutdown,
        config: ButtonConfig,
    ) -> Self {
        Self {
            lines,
            delay,
            sink,
            waiter,
            shutdown,
            config,
            state: TaskState::Idle,
            passes: 0,
        }
    }

    /// Builds the interrupt handler that wakes this task.
    ///
    /// Register the returned handler with the platform's edge interrupt.
    pub fn interrupt_handler<P: Preemption>(
        &self,
        preemption: &'a P,
    ) -> InterruptHandler<'a, P> {
        InterruptHandler::new(
            self.waiter.notification().notifier(),
            self.config.task_priority,
            preemption,
        )
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Number of sampling passes so far.
    #[inline]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Returns a reference to the GPIO backend.
    #[inline]
    pub fn lines(&self) -> &B {
        &self.lines
    }

    /// Returns a reference to the report sink.
    #[inline]
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Runs the processing loop until shutdown is requested.
    ///
    /// Enables line interrupts on entry. Each wake is followed by the
    /// configured settle time, one snapshot and one report. On shutdown the
    /// interrupts are masked again and the task enters `Stopped`; calling
    /// `run` on a stopped task returns immediately.
    pub async fn run(&mut self) -> TaskExit {
        if self.state == TaskState::Stopped {
            return TaskExit { passes: self.passes };
        }

        info!("button task started, {} lines", N);
        self.lines.enable_interrupts();

        loop {
            match self.next_wake().await {
                Wake::Shutdown => break,
                Wake::Notified => {
                    self.settle().await;
                    self.process();
                }
            }
        }

        self.lines.disable_interrupts();
        self.state = TaskState::Stopped;
        info!("button task stopped after {} passes", self.passes);

        TaskExit { passes: self.passes }
    }

    /// Waits in `Idle` for the next notification or shutdown request.
    ///
    /// A pending shutdown wins over a pending notification.
    pub async fn next_wake(&mut self) -> Wake {
        self.state = TaskState::Idle;

        match select(self.shutdown.wait(), self.waiter.wait()).await {
            Either::First(()) => Wake::Shutdown,
            Either::Second(()) => Wake::Notified,
        }
    }

    /// Waits out the configured settle time in `Settling`.
    ///
    /// Edges raised while settling are part of the same press: the snapshot
    /// that follows sees their levels, so their notification is dropped
    /// here. Does nothing, and leaves the state untouched, when the settle
    /// time is zero.
    pub async fn settle(&mut self) {
        if self.config.settle.is_zero() {
            return;
        }

        self.state = TaskState::Settling;
        self.delay.delay(self.config.settle).await;

        if self.waiter.try_take() {
            trace!("bounce folded into pending snapshot");
        }
    }

    /// Snapshots every line with interrupts masked.
    ///
    /// Lines are read in index order between one `disable_interrupts` and
    /// one `enable_interrupts` call.
    pub fn sample(&mut self) -> LineStates<N> {
        self.state = TaskState::Sampling;

        self.lines.disable_interrupts();
        let lines = &mut self.lines;
        let levels: [bool; N] = core::array::from_fn(|idx| lines.read_line(LineId(idx)));
        self.lines.enable_interrupts();

        self.passes = self.passes.wrapping_add(1);
        LineStates::from_array(levels)
    }

    /// Takes one snapshot, logs its classification and reports it to the
    /// sink. Returns the snapshot and leaves the task `Idle`.
    pub fn process(&mut self) -> LineStates<N> {
        let states = self.sample();

        match states.classify() {
            Press::Released => trace!("nothing held"),
            Press::Single(line) => debug!("single press on line {}", line.0),
            Press::Chord(lines) => debug!("chord of {} lines", lines.len()),
        }

        if write_report(&states, &mut self.sink).is_err() {
            warn!("report sink rejected write");
        }

        self.state = TaskState::Idle;
        states
    }
}
