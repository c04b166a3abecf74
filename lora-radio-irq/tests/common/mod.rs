#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lora_radio_irq::op::DioLine;
use lora_radio_irq::radio::{RadioDriver, RadioEvents, RadioIrqProcess};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What the fake driver was asked to do, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    IoInit,
    Init,
    Process(DioLine),
}

/// A driver stand-in that records its calls and flags overlapping
/// `irq_process` calls.
#[derive(Clone, Default)]
pub struct RecordingRadio {
    pub steps: Arc<Mutex<Vec<Step>>>,
    pub busy: Arc<AtomicBool>,
    pub overlaps: Arc<AtomicUsize>,
    pub processed: Arc<AtomicUsize>,
    /// `yield_now` calls inside each `irq_process`, to widen race windows.
    pub yields: usize,
    pub fail_io: bool,
    pub fail_init: bool,
}

impl RecordingRadio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<Step> {
        self.steps.lock().unwrap().clone()
    }

    pub fn processed_lines(&self) -> Vec<DioLine> {
        self.steps()
            .into_iter()
            .filter_map(|step| match step {
                Step::Process(line) => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl RadioIrqProcess for RecordingRadio {
    async fn irq_process(&mut self, line: DioLine) {
        if self.busy.swap(true, Ordering::AcqRel) {
            self.overlaps.fetch_add(1, Ordering::Relaxed);
        }
        self.steps.lock().unwrap().push(Step::Process(line));
        for _ in 0..self.yields {
            embassy_futures::yield_now().await;
        }
        self.busy.store(false, Ordering::Release);
        self.processed.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FakeError {
    Bus,
    Chip,
}

impl RadioDriver for RecordingRadio {
    type Error = FakeError;

    async fn io_init(&mut self) -> Result<(), FakeError> {
        self.steps.lock().unwrap().push(Step::IoInit);
        if self.fail_io {
            return Err(FakeError::Bus);
        }
        Ok(())
    }

    async fn init<E: RadioEvents + 'static>(&mut self, _events: E) -> Result<(), FakeError> {
        self.steps.lock().unwrap().push(Step::Init);
        if self.fail_init {
            return Err(FakeError::Chip);
        }
        Ok(())
    }
}

pub fn lines(ids: &[u8]) -> Vec<DioLine> {
    ids.iter()
        .map(|&id| DioLine::try_from(id).unwrap())
        .collect()
}
