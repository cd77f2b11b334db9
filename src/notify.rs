//! Coalescing wake signal from interrupt context to the processing task.
//!
//! A [`Notification`] is a single pending flag. The interrupt side holds a
//! [`Notifier`] and can only set the flag; the one consumer task holds the
//! [`Waiter`] and can only wait for and clear it. Any number of signals
//! raised before the waiter drains the flag collapse into a single wake.
//! No count and no line identity is kept.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};

use embassy_sync::waitqueue::AtomicWaker;

/// Errors that can occur when obtaining notification handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotificationError {
    /// The waiter for this notification has already been handed out.
    WaiterTaken,
}

impl core::fmt::Display for NotificationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NotificationError::WaiterTaken => {
                write!(f, "notification already has a waiter")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NotificationError {}

/// Single-slot wake signal shared between an interrupt handler and one task.
///
/// Usually placed in a `static`:
///
/// ```
/// use button_sampler::Notification;
///
/// static BUTTON_WAKE: Notification = Notification::new();
///
/// let notifier = BUTTON_WAKE.notifier();
/// let mut waiter = BUTTON_WAKE.take_waiter().unwrap();
///
/// notifier.signal();
/// notifier.signal();
/// assert!(waiter.try_take());
/// assert!(!waiter.try_take());
/// ```
pub struct Notification {
    pending: AtomicBool,
    parked: AtomicBool,
    waiter_taken: AtomicBool,
    waker: AtomicWaker,
}

impl Notification {
    /// Creates a notification with no token pending.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            parked: AtomicBool::new(false),
            waiter_taken: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    /// Returns the interrupt-side handle.
    ///
    /// Notifiers are `Copy`; every interrupt source may hold one.
    #[inline]
    pub const fn notifier(&self) -> Notifier<'_> {
        Notifier { notification: self }
    }

    /// Hands out the one consumer handle.
    ///
    /// # Errors
    /// * `WaiterTaken` - a waiter was already taken from this notification
    pub fn take_waiter(&self) -> Result<Waiter<'_>, NotificationError> {
        if self.waiter_taken.swap(true, Ordering::AcqRel) {
            return Err(NotificationError::WaiterTaken);
        }
        Ok(Waiter { notification: self })
    }

    /// Returns `true` if a token is pending and not yet drained.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    fn signal(&self) -> bool {
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Already pending; this edge folds into the outstanding wake.
            return false;
        }

        let parked = self.parked.load(Ordering::Acquire);
        self.waker.wake();
        parked
    }

    #[inline]
    fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-side handle of a [`Notification`].
///
/// The only operation is [`signal`](Notifier::signal). It is bounded-time
/// and allocation-free, so it is safe to call from an interrupt handler.
/// The pending flag itself is lock-free; handing over the waker takes a
/// short critical section.
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    notification: &'a Notification,
}

impl Notifier<'_> {
    /// Marks the notification pending.
    ///
    /// Returns `true` only if this call set the token *and* the consumer
    /// task is parked in [`Waiter::wait`], i.e. the consumer just became
    /// runnable. Returns `false` when a token was already pending (the
    /// signal is coalesced) or when the consumer is busy.
    #[inline]
    pub fn signal(&self) -> bool {
        self.notification.signal()
    }
}

/// Task-side handle of a [`Notification`].
///
/// Exactly one waiter exists per notification.
pub struct Waiter<'a> {
    notification: &'a Notification,
}

impl<'a> Waiter<'a> {
    /// Waits until a token is pending, then clears it.
    ///
    /// Waits forever if no signal arrives.
    pub fn wait(&mut self) -> Wait<'_, 'a> {
        Wait { waiter: self }
    }

    /// Clears a pending token without waiting.
    ///
    /// Returns `true` if a token was pending.
    #[inline]
    pub fn try_take(&mut self) -> bool {
        self.notification.take()
    }

    /// The notification this waiter drains.
    #[inline]
    pub fn notification(&self) -> &'a Notification {
        self.notification
    }
}

/// Future returned by [`Waiter::wait`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Wait<'w, 'a> {
    waiter: &'w mut Waiter<'a>,
}

impl Future for Wait<'_, '_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let notification = self.waiter.notification;

        if notification.take() {
            notification.parked.store(false, Ordering::Release);
            return Poll::Ready(());
        }

        notification.waker.register(cx.waker());
        notification.parked.store(true, Ordering::Release);

        // A signal may have landed between the first check and parking.
        if notification.take() {
            notification.parked.store(false, Ordering::Release);
            return Poll::Ready(());
        }

        Poll::Pending
    }
}

impl Drop for Wait<'_, '_> {
    fn drop(&mut self) {
        self.waiter.notification.parked.store(false, Ordering::Release);
    }
}
