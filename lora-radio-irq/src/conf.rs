//! Configuration of the DIO dispatch core.

use super::op::*;

/// Configuration used by [`init`](crate::init).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// DIO lines wired to the MCU. Only these get handlers, and only these
    /// wake the dispatch task. Boards commonly route DIO0..DIO2 only.
    pub enabled_lines: DioSet,
    /// Order in which lines pending together are processed.
    pub order: DispatchOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled_lines: DioSet::all(),
            order: DispatchOrder::LowestFirst,
        }
    }
}
