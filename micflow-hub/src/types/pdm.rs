//! PDM sampler types.

use micflow::*;

use crate::constants::pdm::*;

/// Parallel PDM data input, one bit per data line.
pub type Sample = Bits<SAMPLE_WIDTH>;

/// Word emitted by the sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Signal)]
pub struct PdmWord {
    /// Packet identifier in a header word, a 32-bit slice of a latched sample otherwise.
    pub data: u32,

    /// First word of a group.
    pub first: bool,

    /// Last word of a group.
    pub last: bool,
}
