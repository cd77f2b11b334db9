//! Shared test infrastructure for button-sampler integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use button_sampler::{
    ButtonLines, InterruptHandler, LineId, Millis, Preemption, Priority, SettleDelay, Shutdown,
};

// ============================================================================
// Event Log
// ============================================================================

/// Something the hardware mocks observed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Disable,
    Read(usize),
    Enable,
    Settle(u32),
}

/// Shared, ordered record of hardware activity
pub struct EventLog {
    events: RefCell<heapless::Vec<Event, 64>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(heapless::Vec::new()),
        }
    }

    pub fn push(&self, event: Event) {
        let _ = self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> heapless::Vec<Event, 64> {
        self.events.borrow().clone()
    }

    pub fn reads(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Read(_)))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

// ============================================================================
// Mock Scheduler Hook
// ============================================================================

/// Scheduler hook with a settable running priority that counts switch requests
pub struct MockPreemption {
    current: Cell<Priority>,
    switch_requests: Cell<u32>,
}

impl MockPreemption {
    pub fn new(current: Priority) -> Self {
        Self {
            current: Cell::new(current),
            switch_requests: Cell::new(0),
        }
    }

    pub fn set_current(&self, priority: Priority) {
        self.current.set(priority);
    }

    pub fn switch_requests(&self) -> u32 {
        self.switch_requests.get()
    }
}

impl Preemption for MockPreemption {
    fn current_priority(&self) -> Priority {
        self.current.get()
    }

    fn request_context_switch(&self) {
        self.switch_requests.set(self.switch_requests.get() + 1);
    }
}

// ============================================================================
// Mock GPIO Lines
// ============================================================================

/// A scripted level change applied right after a sampling pass completes.
#[derive(Debug, Clone, Copy)]
struct ScriptedEdge {
    after_pass: u32,
    line: usize,
    level: bool,
}

/// Mock four-line GPIO backend.
///
/// Level changes raise an edge through the attached interrupt handler, but
/// only while interrupts are enabled; edges while masked are counted and
/// dropped.
pub struct MockLines<'a> {
    log: &'a EventLog,
    levels: [bool; 4],
    irq_enabled: bool,
    handler: Option<InterruptHandler<'a, MockPreemption>>,
    masked_edges: u32,
    completed_passes: u32,
    change_on_read: Option<(usize, usize, bool)>,
    script: heapless::Vec<ScriptedEdge, 8>,
    shutdown: Option<(&'a Shutdown, u32)>,
}

impl<'a> MockLines<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self {
            log,
            levels: [false; 4],
            irq_enabled: false,
            handler: None,
            masked_edges: 0,
            completed_passes: 0,
            change_on_read: None,
            script: heapless::Vec::new(),
            shutdown: None,
        }
    }

    pub fn with_levels(mut self, levels: [bool; 4]) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_handler(mut self, handler: InterruptHandler<'a, MockPreemption>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// While reading `read_line`, change `line` to `level`.
    pub fn change_during_read(mut self, read_line: usize, line: usize, level: bool) -> Self {
        self.change_on_read = Some((read_line, line, level));
        self
    }

    /// After `pass` sampling passes have completed, change `line` to `level`.
    pub fn change_after_pass(mut self, pass: u32, line: usize, level: bool) -> Self {
        let _ = self.script.push(ScriptedEdge {
            after_pass: pass,
            line,
            level,
        });
        self
    }

    /// After `passes` sampling passes have completed, request shutdown.
    pub fn shutdown_after(mut self, shutdown: &'a Shutdown, passes: u32) -> Self {
        self.shutdown = Some((shutdown, passes));
        self
    }

    /// Physically change a line, raising an edge if interrupts are enabled.
    pub fn set_level(&mut self, line: usize, level: bool) {
        if self.levels[line] == level {
            return;
        }
        self.levels[line] = level;

        if !self.irq_enabled {
            self.masked_edges += 1;
            return;
        }
        if let Some(handler) = &self.handler {
            handler.on_edge(LineId(line));
        }
    }

    pub fn masked_edges(&self) -> u32 {
        self.masked_edges
    }

    pub fn completed_passes(&self) -> u32 {
        self.completed_passes
    }

    pub fn irq_enabled(&self) -> bool {
        self.irq_enabled
    }
}

impl ButtonLines for MockLines<'_> {
    fn read_line(&mut self, line: LineId) -> bool {
        self.log.push(Event::Read(line.0));

        if let Some((read_line, changed, level)) = self.change_on_read {
            if read_line == line.0 {
                self.change_on_read = None;
                self.set_level(changed, level);
            }
        }

        self.levels[line.0]
    }

    fn enable_interrupts(&mut self) {
        let finished_pass = matches!(self.log.events().last(), Some(Event::Read(_)));
        self.log.push(Event::Enable);
        self.irq_enabled = true;

        if !finished_pass {
            return;
        }
        self.completed_passes += 1;

        let passes = self.completed_passes;
        let due: heapless::Vec<ScriptedEdge, 8> = self
            .script
            .iter()
            .copied()
            .filter(|e| e.after_pass == passes)
            .collect();
        for edge in due {
            self.set_level(edge.line, edge.level);
        }

        if let Some((shutdown, after)) = self.shutdown {
            if passes >= after {
                shutdown.request();
            }
        }
    }

    fn disable_interrupts(&mut self) {
        self.log.push(Event::Disable);
        self.irq_enabled = false;
    }
}

// ============================================================================
// Mock Settle Delay
// ============================================================================

/// Delay that completes immediately and records the requested duration
pub struct MockDelay<'a> {
    log: &'a EventLog,
}

impl<'a> MockDelay<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl SettleDelay for MockDelay<'_> {
    async fn delay(&mut self, duration: Millis) {
        self.log.push(Event::Settle(duration.0));
    }
}

/// Delay that raises one contact-bounce edge on `line` while it runs
pub struct BouncingDelay<'a> {
    log: &'a EventLog,
    handler: InterruptHandler<'a, MockPreemption>,
    line: LineId,
    bounces: u32,
}

impl<'a> BouncingDelay<'a> {
    pub fn new(
        log: &'a EventLog,
        handler: InterruptHandler<'a, MockPreemption>,
        line: LineId,
    ) -> Self {
        Self {
            log,
            handler,
            line,
            bounces: 1,
        }
    }
}

impl SettleDelay for BouncingDelay<'_> {
    async fn delay(&mut self, duration: Millis) {
        self.log.push(Event::Settle(duration.0));
        if self.bounces > 0 {
            self.bounces -= 1;
            self.handler.on_edge(self.line);
        }
    }
}

// ============================================================================
// Test Sinks
// ============================================================================

/// Sink that rejects every write
pub struct FailingSink;

impl core::fmt::Write for FailingSink {
    fn write_str(&mut self, _s: &str) -> core::fmt::Result {
        Err(core::fmt::Error)
    }
}

pub type TextSink = heapless::String<256>;

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Poll a future exactly once with a no-op waker
pub fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}
