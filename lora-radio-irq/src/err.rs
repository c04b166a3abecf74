//! Error type of the initialization sequence.

use core::fmt::{self, Debug};

/// Why [`init`](crate::init) stopped. No interrupt handler was handed out.
pub enum InitError<TDRVERR, TSPAWNERR> {
    /// Bringing up the chip's buses and pins failed.
    Io(TDRVERR),
    /// Chip driver initialization failed.
    Driver(TDRVERR),
    /// The dispatch task could not be started.
    Spawn(TSPAWNERR),
}

impl<TDRVERR: Debug, TSPAWNERR: Debug> Debug for InitError<TDRVERR, TSPAWNERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Io({err:?})"),
            Self::Driver(err) => write!(f, "Driver({err:?})"),
            Self::Spawn(err) => write!(f, "Spawn({err:?})"),
        }
    }
}

impl<TDRVERR: PartialEq, TSPAWNERR: PartialEq> PartialEq for InitError<TDRVERR, TSPAWNERR> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Io(a), Self::Io(b)) => a == b,
            (Self::Driver(a), Self::Driver(b)) => a == b,
            (Self::Spawn(a), Self::Spawn(b)) => a == b,
            _ => false,
        }
    }
}
