//! Plain data types shared by the dispatch core and the radio interface.

pub mod dio;
pub mod radio;

pub use dio::*;
pub use radio::*;
