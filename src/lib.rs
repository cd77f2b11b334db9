#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LineId`**: Zero-based index of one monitored button line
//! - **`LineStates`**: Snapshot of every monitored line, index-aligned with `LineId`
//! - **`Press`**: Classification of a snapshot (`Released`, `Single`, `Chord`)
//! - **`Notification`**: Coalescing wake flag from interrupt context to one task
//! - **`InterruptHandler`**: Interrupt-context edge handler that posts the wake
//! - **`ButtonTask`**: Waits for wakes, snapshots the lines and reports what is held
//! - **`ButtonLines`**: Trait to implement for your GPIO hardware
//! - **`Preemption`**: Trait to implement for your scheduler's interrupt-side hook
//! - **`SettleDelay`**: Trait to implement for your timing system
//! - **`Report`**: Text report of the held lines
//!
//! Edges are never queued. However many arrive before the task drains the
//! notification, the task wakes once and reads the lines as they are at
//! that moment.

// Must come first so the logging macros are visible in every module.
mod fmt;

pub mod config;
pub mod interrupt;
pub mod lines;
pub mod notify;
pub mod report;
pub mod task;
pub mod time;
pub mod types;

pub use config::{ButtonConfig, DEFAULT_SETTLE, DEFAULT_TASK_PRIORITY};
pub use interrupt::{InterruptHandler, Preemption, Priority};
pub use lines::ButtonLines;
pub use notify::{Notification, NotificationError, Notifier, Wait, Waiter};
pub use report::{REPORT_PREFIX, Report, write_report};
pub use task::{ButtonTask, Shutdown, TaskExit, TaskState, Wake};
pub use time::{Millis, NoDelay, SettleDelay};
pub use types::{Button, LineError, LineId, LineSet, LineStates, Press};

/// Line-state vector for the four-button panel.
pub type PanelStates = LineStates<{ Button::COUNT }>;
