//! Contracts with the external radio driver.
//!
//! The chip driver owns everything register-level. This crate only needs to
//! bring it up ([`RadioDriver`]) and hand it one DIO line at a time
//! ([`RadioIrqProcess`]). [`Radio`] is the capability set applications talk
//! to once the radio is running; each chip family provides one implementation.

#![allow(async_fn_in_trait)]

pub(crate) mod err;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::op::*;

pub use err::RadioError;

/// A radio driver shared between the dispatch task and the application.
///
/// The dispatcher takes the lock for one [`RadioIrqProcess::irq_process`]
/// call at a time.
pub type SharedRadio<M, D> = Mutex<M, D>;

/// Callbacks the driver fires from inside [`RadioIrqProcess::irq_process`].
///
/// All methods default to doing nothing.
pub trait RadioEvents {
    /// Transmission finished.
    fn tx_done(&mut self) {}

    /// Transmission did not finish in time.
    fn tx_timeout(&mut self) {}

    /// A packet was received.
    fn rx_done(&mut self, payload: &[u8], rssi: i16, snr: i8) {
        let _ = (payload, rssi, snr);
    }

    /// No packet arrived in time.
    fn rx_timeout(&mut self) {}

    /// A packet was received with a CRC error.
    fn rx_error(&mut self) {}

    /// Frequency hopping needs the next channel.
    fn fhss_change_channel(&mut self, current_channel: u8) {
        let _ = current_channel;
    }

    /// Channel activity detection finished.
    fn cad_done(&mut self, channel_activity_detected: bool) {
        let _ = channel_activity_detected;
    }
}

/// Callbacks that ignore every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoEvents;

impl RadioEvents for NoEvents {}

/// The protocol step run for one pending DIO line.
///
/// Reads the chip's IRQ flags, advances the radio state machine and fires the
/// user's [`RadioEvents`]. Failures are reported through those callbacks, not
/// to the caller. Never called concurrently with itself.
pub trait RadioIrqProcess {
    /// Handles `line` to completion.
    async fn irq_process(&mut self, line: DioLine);
}

impl<T: RadioIrqProcess + ?Sized> RadioIrqProcess for &mut T {
    async fn irq_process(&mut self, line: DioLine) {
        (**self).irq_process(line).await
    }
}

impl<M: RawMutex, D: RadioIrqProcess> RadioIrqProcess for &SharedRadio<M, D> {
    async fn irq_process(&mut self, line: DioLine) {
        self.lock().await.irq_process(line).await
    }
}

/// Bring-up entry points of a chip driver.
pub trait RadioDriver: RadioIrqProcess {
    /// Driver error type.
    type Error;

    /// Claims and configures the buses and pins used to talk to the chip.
    async fn io_init(&mut self) -> Result<(), Self::Error>;

    /// Resets the chip into a known state and stores the user's callbacks.
    async fn init<E: RadioEvents + 'static>(&mut self, events: E) -> Result<(), Self::Error>;
}

impl<M: RawMutex, D: RadioDriver> RadioDriver for &SharedRadio<M, D> {
    type Error = D::Error;

    async fn io_init(&mut self) -> Result<(), Self::Error> {
        self.lock().await.io_init().await
    }

    async fn init<E: RadioEvents + 'static>(&mut self, events: E) -> Result<(), Self::Error> {
        self.lock().await.init(events).await
    }
}

/// The operations a LoRa transceiver exposes to the MAC layer.
///
/// IRQ processing is not part of this interface: it runs on the dispatch
/// task. Operations only some chip families have are provided methods that
/// return [`RadioError::Unsupported`].
pub trait Radio {
    /// Driver error type.
    type Error;

    /// Current radio state.
    async fn status(&mut self) -> Result<RadioState, RadioError<Self::Error>>;

    /// Selects the FSK or LoRa modem.
    async fn set_modem(&mut self, modem: RadioModem) -> Result<(), RadioError<Self::Error>>;

    /// Tunes to `freq` Hz.
    async fn set_channel(&mut self, freq: u32) -> Result<(), RadioError<Self::Error>>;

    /// Listens on `freq` for up to `max_carrier_sense_ms` and returns `true`
    /// if the RSSI stayed below `rssi_threshold`.
    async fn is_channel_free(
        &mut self,
        modem: RadioModem,
        freq: u32,
        rssi_threshold: i16,
        max_carrier_sense_ms: u32,
    ) -> Result<bool, RadioError<Self::Error>>;

    /// A 32-bit random value from wideband RSSI noise.
    async fn random(&mut self) -> Result<u32, RadioError<Self::Error>>;

    /// Applies reception parameters.
    async fn set_rx_config(&mut self, config: &RxConfig) -> Result<(), RadioError<Self::Error>>;

    /// Applies transmission parameters.
    async fn set_tx_config(&mut self, config: &TxConfig) -> Result<(), RadioError<Self::Error>>;

    /// Returns `true` if the hardware supports `freq` Hz.
    fn check_rf_frequency(&self, freq: u32) -> bool;

    /// Air time in ms of a `pkt_len` byte packet with the current settings.
    fn time_on_air(&self, modem: RadioModem, pkt_len: u8) -> u32;

    /// Starts sending `payload`. Completion is reported through
    /// [`RadioEvents::tx_done`].
    async fn send(&mut self, payload: &[u8]) -> Result<(), RadioError<Self::Error>>;

    /// Puts the chip to sleep.
    async fn sleep(&mut self) -> Result<(), RadioError<Self::Error>>;

    /// Puts the chip in standby.
    async fn standby(&mut self) -> Result<(), RadioError<Self::Error>>;

    /// Starts reception. `timeout_ms == 0` means continuous.
    async fn rx(&mut self, timeout_ms: u32) -> Result<(), RadioError<Self::Error>>;

    /// Starts channel activity detection.
    async fn start_cad(&mut self) -> Result<(), RadioError<Self::Error>>;

    /// Emits an unmodulated carrier for `time_s` seconds.
    async fn set_tx_continuous_wave(
        &mut self,
        freq: u32,
        power: i8,
        time_s: u16,
    ) -> Result<(), RadioError<Self::Error>>;

    /// Current RSSI in dBm.
    async fn rssi(&mut self, modem: RadioModem) -> Result<i16, RadioError<Self::Error>>;

    /// Writes one register.
    async fn write(&mut self, addr: u16, data: u8) -> Result<(), RadioError<Self::Error>>;

    /// Reads one register.
    async fn read(&mut self, addr: u16) -> Result<u8, RadioError<Self::Error>>;

    /// Maximum accepted payload length.
    async fn set_max_payload_length(
        &mut self,
        modem: RadioModem,
        max: u8,
    ) -> Result<(), RadioError<Self::Error>>;

    /// Switches between the public and private LoRa sync words.
    async fn set_public_network(&mut self, enable: bool) -> Result<(), RadioError<Self::Error>>;

    /// Time in ms the chip needs to wake up.
    fn wakeup_time(&self) -> u32;

    /// Returns `true` if a chip of the expected family answers on the bus.
    async fn check(&mut self) -> Result<bool, RadioError<Self::Error>>;

    /// Reception with boosted LNA gain.
    async fn rx_boosted(&mut self, timeout_ms: u32) -> Result<(), RadioError<Self::Error>> {
        let _ = timeout_ms;
        Err(RadioError::Unsupported)
    }

    /// Alternates between reception and sleep in hardware.
    async fn set_rx_duty_cycle(
        &mut self,
        rx_time: u32,
        sleep_time: u32,
    ) -> Result<(), RadioError<Self::Error>> {
        let _ = (rx_time, sleep_time);
        Err(RadioError::Unsupported)
    }
}
