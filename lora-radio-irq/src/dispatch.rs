//! The dispatch task: the only consumer of [`DioEvents`].
//!
//! ```text
//! WAITING --(lines pending)--> PROCESSING --(snapshot drained)--> WAITING
//! ```
//!
//! The wait in [`DioEvents::wait_and_take_masked`] is the only suspension
//! point besides the radio processing itself. Every line of a snapshot is
//! handed to [`RadioIrqProcess::irq_process`] one at a time, each call running
//! to completion before the next starts and before the next wait.

use crate::conf::Config;
use crate::irq::DioEvents;
use crate::op::{DioSet, DispatchOrder};
use crate::radio::RadioIrqProcess;

/// Serializes DIO events into radio processing calls.
pub struct Dispatcher<'a, P> {
    events: &'a DioEvents,
    radio: P,
    lines: DioSet,
    order: DispatchOrder,
}

impl<'a, P: RadioIrqProcess> Dispatcher<'a, P> {
    /// Creates a dispatcher consuming `events` and driving `radio`.
    pub fn new(events: &'a DioEvents, radio: P, config: &Config) -> Self {
        Self {
            events,
            radio,
            lines: config.enabled_lines,
            order: config.order,
        }
    }

    /// Runs the dispatch loop forever.
    ///
    /// If the task running this is dropped the radio stops reacting to its
    /// interrupt lines; nothing restarts it.
    pub async fn run(&mut self) -> ! {
        log::debug!(
            "lora::dispatch started. lines: {:?}, order: {:?}",
            self.lines,
            self.order
        );
        loop {
            self.step().await;
        }
    }

    /// Waits for pending lines, processes all of them, and returns the
    /// snapshot that was drained.
    pub async fn step(&mut self) -> DioSet {
        let pending = self.events.wait_and_take_masked(self.lines).await;
        log::trace!("lora::dispatch pending: {pending:?}");
        self.drain(pending).await;
        pending
    }

    /// Processes every line of `pending` in the configured order.
    pub async fn drain(&mut self, pending: DioSet) {
        for line in pending.iter_in(self.order) {
            log::trace!("lora::dispatch processing {line:?}");
            self.radio.irq_process(line).await;
        }
    }

    /// The aggregator this dispatcher consumes.
    pub fn events(&self) -> &'a DioEvents {
        self.events
    }

    /// The radio processing target.
    pub fn radio(&self) -> &P {
        &self.radio
    }
}
