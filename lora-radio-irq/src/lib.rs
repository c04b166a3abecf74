//! Interrupt capture and serialized dispatch for SX127x LoRa modems.
//!
//! The modem signals events (RxDone, TxDone, timeouts, CAD) on up to six DIO
//! lines. Their GPIO interrupts fire in interrupt context, where the SPI
//! transactions needed to read the chip's IRQ flags are not allowed. This
//! crate moves the work out of interrupt context:
//!
//! ```text
//! DIO edge -> on_dioN_irq -> DioEvents::post
//!          -> Dispatcher (wait_and_take) -> RadioIrqProcess::irq_process
//! ```
//!
//! The register-level driver is not part of this crate. It plugs in through
//! [`radio::RadioDriver`] and [`radio::RadioIrqProcess`]; applications talk to
//! it through the [`radio::Radio`] capability trait.
//!
//! # Usage
//!
//! ```ignore
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use lora_radio_irq::{conf::Config, init, irq::DioEvents, radio::SharedRadio};
//!
//! static EVENTS: DioEvents = DioEvents::new();
//! static RADIO: SharedRadio<CriticalSectionRawMutex, Sx1276> = SharedRadio::new(Sx1276::new());
//!
//! #[embassy_executor::task]
//! async fn lora_phy(mut dispatcher: Dispatcher<'static, &'static SharedRadio<CriticalSectionRawMutex, Sx1276>>) {
//!     dispatcher.run().await
//! }
//!
//! let irqs = init(&RADIO, &EVENTS, MacEvents::new(), &Config::default(), |dispatcher| {
//!     spawner.spawn(lora_phy(dispatcher))
//! })
//! .await?;
//! irqs.arm(&mut dio_pins)?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod conf;
pub mod dispatch;
pub mod err;
pub mod irq;
pub mod op;
pub mod radio;

#[cfg(feature = "esp32s3")]
pub mod esp;

pub use dispatch::Dispatcher;
pub use err::InitError;

use conf::Config;
use irq::{DioEvents, DioIrqs};
use radio::{RadioDriver, RadioEvents};

/// Brings the radio up and starts dispatching its DIO interrupts.
///
/// In order: chip I/O bring-up, driver initialization with the user's
/// `radio_events`, creation of the [`Dispatcher`] and its hand-off to `spawn`.
/// Only after `spawn` accepted the dispatcher are the interrupt handlers
/// returned, so no line can be armed before its consumer runs.
///
/// `events` must be fresh: lines still pending from an earlier use would be
/// dispatched right away.
pub async fn init<'a, D, E, S, SE>(
    mut radio: D,
    events: &'a DioEvents,
    radio_events: E,
    config: &Config,
    spawn: S,
) -> Result<DioIrqs<'a>, InitError<D::Error, SE>>
where
    D: RadioDriver,
    E: RadioEvents + 'static,
    S: FnOnce(Dispatcher<'a, D>) -> Result<(), SE>,
{
    log::trace!("lora::init start");
    radio.io_init().await.map_err(InitError::Io)?;
    log::trace!("lora::init io ready");

    radio.init(radio_events).await.map_err(InitError::Driver)?;
    log::trace!("lora::init driver ready");

    let dispatcher = Dispatcher::new(events, radio, config);
    spawn(dispatcher).map_err(InitError::Spawn)?;
    log::debug!(
        "lora::init dispatch task started. lines: {:?}",
        config.enabled_lines
    );

    Ok(DioIrqs::new(events, config.enabled_lines))
}
