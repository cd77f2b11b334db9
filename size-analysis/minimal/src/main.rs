#![no_std]
#![no_main]

use core::fmt::Write;

use button_sampler::{
    Button, ButtonConfig, ButtonLines, ButtonTask, LineId, NoDelay, Notification, Preemption,
    Priority, Shutdown,
};
use cortex_m_rt::entry;
use panic_halt as _;

// ============================================================================
// Minimal Hardware
// ============================================================================

/// Zero-size GPIO backend for measuring library overhead
pub struct MinimalLines;

impl ButtonLines for MinimalLines {
    fn read_line(&mut self, line: LineId) -> bool {
        core::hint::black_box(line.0) == 0
    }

    fn enable_interrupts(&mut self) {
        core::hint::black_box(());
    }

    fn disable_interrupts(&mut self) {
        core::hint::black_box(());
    }
}

/// Scheduler hook that never preempts
pub struct MinimalPreemption;

impl Preemption for MinimalPreemption {
    fn current_priority(&self) -> Priority {
        Priority(0)
    }

    fn request_context_switch(&self) {
        cortex_m::peripheral::SCB::set_pendsv();
    }
}

/// Sink that discards the report
pub struct NullSink;

impl Write for NullSink {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        core::hint::black_box(s);
        Ok(())
    }
}

// ============================================================================
// Wiring
// ============================================================================

static BUTTON_WAKE: Notification = Notification::new();
static BUTTON_STOP: Shutdown = Shutdown::new();
static PREEMPTION: MinimalPreemption = MinimalPreemption;

#[entry]
fn main() -> ! {
    let Ok(waiter) = BUTTON_WAKE.take_waiter() else {
        loop {
            cortex_m::asm::nop();
        }
    };

    let mut task = ButtonTask::<_, _, _, { Button::COUNT }>::new(
        MinimalLines,
        NoDelay,
        NullSink,
        waiter,
        &BUTTON_STOP,
        ButtonConfig::new().with_settle_ms(0),
    );

    // Stand-in for the GPIO interrupt so the handler is linked.
    let handler = task.interrupt_handler(&PREEMPTION);
    handler.on_edge(Button::Ok.line());

    embassy_futures::block_on(task.run());

    loop {
        cortex_m::asm::wfi();
    }
}
