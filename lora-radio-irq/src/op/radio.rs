//! Parameter and state types of the radio capability interface.

/// Modem selected in the transceiver.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RadioModem {
    /// (G)FSK modem.
    Fsk = 0,
    /// LoRa modem.
    #[default]
    LoRa = 1,
}

/// What the transceiver is currently doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RadioState {
    /// Sleep or standby.
    Idle,
    /// Receiving.
    RxRunning,
    /// Transmitting.
    TxRunning,
    /// Channel activity detection in progress.
    Cad,
}

/// Reception parameters.
///
/// Field meaning depends on `modem`; FSK-only fields are ignored in LoRa mode
/// and vice versa.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RxConfig {
    /// Modem to configure.
    pub modem: RadioModem,
    /// FSK: bandwidth in Hz. LoRa: 0 = 125 kHz, 1 = 250 kHz, 2 = 500 kHz.
    pub bandwidth: u32,
    /// FSK: bit rate in bit/s. LoRa: spreading factor 6..=12.
    pub datarate: u32,
    /// LoRa coding rate, 1 = 4/5 .. 4 = 4/8.
    pub coderate: u8,
    /// FSK AFC bandwidth in Hz.
    pub bandwidth_afc: u32,
    /// Preamble length in symbols (LoRa) or bytes (FSK).
    pub preamble_len: u16,
    /// Single-reception timeout in symbols.
    pub symb_timeout: u16,
    /// Fixed length packets.
    pub fix_len: bool,
    /// Payload length when `fix_len` is set.
    pub payload_len: u8,
    /// CRC enabled.
    pub crc_on: bool,
    /// Intra-packet frequency hopping.
    pub freq_hop_on: bool,
    /// Symbols between hops.
    pub hop_period: u8,
    /// Inverted IQ.
    pub iq_inverted: bool,
    /// Continuous reception.
    pub rx_continuous: bool,
}

impl Default for RxConfig {
    fn default() -> Self {
        Self {
            modem: RadioModem::LoRa,
            bandwidth: 0,
            datarate: 7,
            coderate: 1,
            bandwidth_afc: 0,
            preamble_len: 8,
            symb_timeout: 5,
            fix_len: false,
            payload_len: 0,
            crc_on: true,
            freq_hop_on: false,
            hop_period: 0,
            iq_inverted: false,
            rx_continuous: true,
        }
    }
}

/// Transmission parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxConfig {
    /// Modem to configure.
    pub modem: RadioModem,
    /// Output power in dBm.
    pub power: i8,
    /// FSK frequency deviation in Hz.
    pub fdev: u32,
    /// FSK: bandwidth in Hz. LoRa: 0 = 125 kHz, 1 = 250 kHz, 2 = 500 kHz.
    pub bandwidth: u32,
    /// FSK: bit rate in bit/s. LoRa: spreading factor 6..=12.
    pub datarate: u32,
    /// LoRa coding rate, 1 = 4/5 .. 4 = 4/8.
    pub coderate: u8,
    /// Preamble length.
    pub preamble_len: u16,
    /// Fixed length packets.
    pub fix_len: bool,
    /// CRC enabled.
    pub crc_on: bool,
    /// Intra-packet frequency hopping.
    pub freq_hop_on: bool,
    /// Symbols between hops.
    pub hop_period: u8,
    /// Inverted IQ.
    pub iq_inverted: bool,
    /// Transmission timeout in ms.
    pub timeout_ms: u32,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            modem: RadioModem::LoRa,
            power: 14,
            fdev: 0,
            bandwidth: 0,
            datarate: 7,
            coderate: 1,
            preamble_len: 8,
            fix_len: false,
            crc_on: true,
            freq_hop_on: false,
            hop_period: 0,
            iq_inverted: false,
            timeout_ms: 3000,
        }
    }
}
