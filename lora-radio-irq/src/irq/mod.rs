//! Interrupt-safe collection of pending DIO lines.
//!
//! [`DioEvents`] is the hand-off between the six DIO interrupt handlers and
//! the dispatch task. Handlers [`post`](DioEvents::post) from interrupt
//! context; the dispatch task suspends in
//! [`wait_and_take`](DioEvents::wait_and_take) until something is pending
//! and then takes the whole set in one atomic read-and-clear.
//!
//! The set only records presence. A line posted twice before it is taken
//! shows up once; the radio driver re-reads the chip's IRQ flags anyway.

pub mod handlers;

use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;

use crate::op::{DioLine, DioSet};

pub use handlers::*;

/// Pending DIO lines plus the waker of the single consumer.
pub struct DioEvents {
    pending: PendingBits,
    waker: AtomicWaker,
}

impl DioEvents {
    /// Creates an aggregator with nothing pending.
    pub const fn new() -> Self {
        Self {
            pending: PendingBits::new(),
            waker: AtomicWaker::new(),
        }
    }

    /// Marks `line` as pending and wakes the consumer.
    ///
    /// Safe to call from interrupt context, including nested interrupts and
    /// while the consumer is taking. Never blocks.
    pub fn post(&self, line: DioLine) {
        self.pending.set(line.bit());
        self.waker.wake();
    }

    /// Suspends until any line is pending, then takes and clears all of them.
    ///
    /// Only the dispatch task may call this; a second concurrent waiter would
    /// replace the first one's waker.
    pub async fn wait_and_take(&self) -> DioSet {
        self.wait_and_take_masked(DioSet::all()).await
    }

    /// Like [`wait_and_take`](Self::wait_and_take), restricted to `mask`.
    ///
    /// Lines outside `mask` neither wake the caller nor get cleared.
    pub async fn wait_and_take_masked(&self, mask: DioSet) -> DioSet {
        poll_fn(|cx| {
            // Register first so a post racing with the take below still wakes us.
            self.waker.register(cx.waker());
            let taken = self.try_take(mask);
            if taken.is_empty() {
                Poll::Pending
            } else {
                Poll::Ready(taken)
            }
        })
        .await
    }

    /// Takes and clears the lines of `mask` that are pending, without waiting.
    pub fn try_take(&self, mask: DioSet) -> DioSet {
        DioSet::from(self.pending.take(mask.into()))
    }

    /// A snapshot of the pending lines. Stale as soon as it is returned.
    pub fn pending(&self) -> DioSet {
        DioSet::from(self.pending.get())
    }
}

impl Default for DioEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for DioEvents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DioEvents")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(target_has_atomic = "8")]
struct PendingBits(core::sync::atomic::AtomicU8);

#[cfg(target_has_atomic = "8")]
impl PendingBits {
    const fn new() -> Self {
        Self(core::sync::atomic::AtomicU8::new(0))
    }

    fn set(&self, bits: u8) {
        self.0.fetch_or(bits, core::sync::atomic::Ordering::AcqRel);
    }

    fn take(&self, mask: u8) -> u8 {
        self.0.fetch_and(!mask, core::sync::atomic::Ordering::AcqRel) & mask
    }

    fn get(&self) -> u8 {
        self.0.load(core::sync::atomic::Ordering::Acquire)
    }
}

// No atomic read-modify-write on this target (e.g. thumbv6m): the same
// operations inside a critical section.
#[cfg(not(target_has_atomic = "8"))]
struct PendingBits(critical_section::Mutex<core::cell::Cell<u8>>);

#[cfg(not(target_has_atomic = "8"))]
impl PendingBits {
    const fn new() -> Self {
        Self(critical_section::Mutex::new(core::cell::Cell::new(0)))
    }

    fn set(&self, bits: u8) {
        critical_section::with(|cs| {
            let cell = self.0.borrow(cs);
            cell.set(cell.get() | bits);
        });
    }

    fn take(&self, mask: u8) -> u8 {
        critical_section::with(|cs| {
            let cell = self.0.borrow(cs);
            let bits = cell.get();
            cell.set(bits & !mask);
            bits & mask
        })
    }

    fn get(&self) -> u8 {
        critical_section::with(|cs| self.0.borrow(cs).get())
    }
}
