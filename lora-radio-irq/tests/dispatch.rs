mod common;

use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use common::{RecordingRadio, Step};
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use lora_radio_irq::conf::Config;
use lora_radio_irq::irq::DioEvents;
use lora_radio_irq::op::{DioLine, DioSet, DispatchOrder};
use lora_radio_irq::radio::SharedRadio;
use lora_radio_irq::Dispatcher;

#[test]
fn snapshot_is_drained_lowest_line_first() {
    common::init_logger();
    let events = DioEvents::new();
    let radio = RecordingRadio::new();
    let mut dispatcher = Dispatcher::new(&events, radio.clone(), &Config::default());

    events.post(DioLine::Dio4);
    events.post(DioLine::Dio2);

    let drained = block_on(dispatcher.step());
    assert_eq!(drained.iter().collect::<Vec<_>>(), common::lines(&[2, 4]));
    assert_eq!(radio.processed_lines(), common::lines(&[2, 4]));
    assert!(events.pending().is_empty());
}

#[test]
fn coalesced_posts_are_processed_once() {
    let events = DioEvents::new();
    let radio = RecordingRadio::new();
    let mut dispatcher = Dispatcher::new(&events, radio.clone(), &Config::default());

    for id in [3, 1, 3] {
        events.post(DioLine::try_from(id).unwrap());
    }
    block_on(dispatcher.step());

    assert_eq!(radio.processed_lines(), common::lines(&[1, 3]));
}

#[test]
fn interleaved_posts_and_drains() {
    let events = DioEvents::new();
    let radio = RecordingRadio::new();
    let mut dispatcher = Dispatcher::new(&events, radio.clone(), &Config::default());

    events.post(DioLine::Dio0);
    assert_eq!(block_on(dispatcher.step()), DioSet::from(DioLine::Dio0));

    events.post(DioLine::Dio5);
    events.post(DioLine::Dio0);
    assert_eq!(
        block_on(dispatcher.step()).iter().collect::<Vec<_>>(),
        common::lines(&[0, 5])
    );

    assert_eq!(radio.processed_lines(), common::lines(&[0, 0, 5]));
}

#[test]
fn highest_first_order_reverses_processing() {
    let events = DioEvents::new();
    let radio = RecordingRadio::new();
    let config = Config {
        order: DispatchOrder::HighestFirst,
        ..Config::default()
    };
    let mut dispatcher = Dispatcher::new(&events, radio.clone(), &config);

    events.post(DioLine::Dio0);
    events.post(DioLine::Dio1);
    events.post(DioLine::Dio5);
    block_on(dispatcher.step());

    assert_eq!(radio.processed_lines(), common::lines(&[5, 1, 0]));
}

#[test]
fn disabled_lines_stay_pending() {
    let events = DioEvents::new();
    let radio = RecordingRadio::new();
    let config = Config {
        enabled_lines: [DioLine::Dio0, DioLine::Dio1].into_iter().collect(),
        ..Config::default()
    };
    let mut dispatcher = Dispatcher::new(&events, radio.clone(), &config);

    events.post(DioLine::Dio3);
    events.post(DioLine::Dio1);

    assert_eq!(block_on(dispatcher.step()), DioSet::from(DioLine::Dio1));
    assert_eq!(radio.processed_lines(), common::lines(&[1]));
    assert_eq!(events.pending(), DioSet::from(DioLine::Dio3));
}

#[test]
fn shared_radio_is_locked_per_line() {
    let events = DioEvents::new();
    let radio = RecordingRadio::new();
    let shared: SharedRadio<CriticalSectionRawMutex, _> = SharedRadio::new(radio.clone());
    let mut dispatcher = Dispatcher::new(&events, &shared, &Config::default());

    events.post(DioLine::Dio2);
    events.post(DioLine::Dio0);
    block_on(dispatcher.step());

    assert_eq!(radio.processed_lines(), common::lines(&[0, 2]));
    // The lock is free again once the snapshot is drained.
    assert!(shared.try_lock().is_ok());
}

/// The dispatch loop runs on its own thread while other threads post like
/// nested interrupts. Processing must never overlap and every line posted
/// while the loop is idle must be processed.
#[test]
fn run_loop_never_overlaps_processing() {
    common::init_logger();
    let events: &'static DioEvents = Box::leak(Box::new(DioEvents::new()));
    let radio = RecordingRadio {
        yields: 8,
        ..RecordingRadio::new()
    };

    {
        let mut dispatcher = Dispatcher::new(events, radio.clone(), &Config::default());
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            runtime.block_on(dispatcher.run())
        });
    }

    let posters: Vec<_> = DioLine::ALL
        .into_iter()
        .map(|line| {
            thread::spawn(move || {
                for _ in 0..500 {
                    events.post(line);
                    thread::yield_now();
                }
            })
        })
        .collect();
    for poster in posters {
        poster.join().unwrap();
    }

    // Once the loop is idle, a single marker post must be the last line seen.
    let before = radio.processed.load(Ordering::Acquire);
    let deadline = Instant::now() + Duration::from_secs(10);
    while !events.pending().is_empty() || radio.busy.load(Ordering::Acquire) {
        assert!(Instant::now() < deadline, "dispatch loop stalled");
        thread::sleep(Duration::from_millis(1));
    }
    let marker = DioLine::Dio3;
    events.post(marker);
    while radio.processed.load(Ordering::Acquire) <= before
        || radio.processed_lines().last() != Some(&marker)
    {
        assert!(Instant::now() < deadline, "final post was not processed");
        thread::sleep(Duration::from_millis(1));
    }

    assert_eq!(radio.overlaps.load(Ordering::Acquire), 0);
    assert!(radio
        .steps()
        .iter()
        .all(|step| matches!(step, Step::Process(_))));
}
