//! Error type of the radio capability interface.

use core::fmt::{self, Debug};

/// An error returned by a [`Radio`](super::Radio) operation.
pub enum RadioError<TDRVERR> {
    /// The chip driver failed.
    Driver(TDRVERR),
    /// The chip family does not implement this operation.
    Unsupported,
}

impl<TDRVERR: Debug> Debug for RadioError<TDRVERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(err) => write!(f, "Driver({err:?})"),
            Self::Unsupported => write!(f, "Unsupported"),
        }
    }
}

impl<TDRVERR: PartialEq> PartialEq for RadioError<TDRVERR> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Driver(a), Self::Driver(b)) => a == b,
            (Self::Unsupported, Self::Unsupported) => true,
            _ => false,
        }
    }
}

impl<TDRVERR> From<TDRVERR> for RadioError<TDRVERR> {
    fn from(err: TDRVERR) -> Self {
        RadioError::Driver(err)
    }
}
