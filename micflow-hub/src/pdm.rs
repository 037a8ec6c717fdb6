//! PDM microphone sampler.
//!
//! A free-running 16-tick counter generates the PDM clock from its top bit. Every group of 16 ticks
//! emits seven words: a header with the packet identifier, then the three 32-bit slices of the
//! sample latched after the previous rising edge, then the three slices of the sample latched
//! after the falling edge. The last slice is marked last-of-group.
//!
//! The word stream is registered, so the word computed from counter value `c` appears one tick
//! later. The PDM clock is driven combinationally.
//!
//! The sampler cannot be stalled: its egress ignores `ready`, and words that are not accepted are
//! lost downstream.

use micflow::*;
use micflow_std::*;

use crate::constants::pdm::*;
use crate::types::*;

/// Position of the counter within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Emits the packet identifier.
    Header,

    /// Emits the given slice of the capture register.
    Slice(usize),

    /// Emits nothing.
    Quiet,
}

impl Phase {
    /// Phase of counter value `count`.
    pub fn of(count: usize) -> Self {
        let half = count % HALF_PERIOD;
        if count % PERIOD == HEADER_PHASE {
            Phase::Header
        } else if (FIRST_SLICE_PHASE..FIRST_SLICE_PHASE + SLICES).contains(&half) {
            Phase::Slice(half - FIRST_SLICE_PHASE)
        } else {
            Phase::Quiet
        }
    }
}

/// PDM clock level for counter value `count`.
pub fn pdm_clk(count: usize) -> bool { count >= HALF_PERIOD }

/// Whether the data input is latched at counter value `count`.
pub fn latches(count: usize) -> bool { count % HALF_PERIOD == LATCH_PHASE }

/// PDM clock frequency for the given system clock frequency.
pub fn pdm_clock_hz(sys_clk_hz: u64) -> u64 { sys_clk_hz / PERIOD as u64 }

/// Sampler registers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Signal)]
pub struct State {
    /// Group counter.
    pub count: Counter<PERIOD>,

    /// Identifier of the current group. Wraps around.
    pub packet_id: u32,

    /// Last latched sample.
    pub capture: Sample,

    /// Registered egress word.
    pub source: Valid<PdmWord>,
}

/// Sampler logic.
pub type Logic = fn(Sample, ((), Ready), State) -> ((bool, Valid<PdmWord>), (), State);

/// PDM sampler. The egress carries the PDM clock and the word stream.
pub type Pdm = Fsm<UniChannel<Sample>, (UniChannel<bool>, VrChannel<PdmWord>), State, Logic>;

fn logic(data: Sample, _: ((), Ready), state: State) -> ((bool, Valid<PdmWord>), (), State) {
    let count = state.count.value();
    let egress_fwd = (pdm_clk(count), state.source.clone());

    let source = match Phase::of(count) {
        Phase::Header => Valid::valid(PdmWord { data: state.packet_id, first: true, last: false }),
        Phase::Slice(i) => Valid::valid(PdmWord {
            data: state.capture.word(i * WORD_WIDTH),
            first: false,
            last: count == LAST_PHASE,
        }),
        // The data bits keep their last value.
        Phase::Quiet => Valid::new(false, PdmWord { first: false, last: false, ..state.source.inner }),
    };

    let state_next = State {
        count: state.count.next(),
        packet_id: if count == ID_PHASE { state.packet_id.wrapping_add(1) } else { state.packet_id },
        capture: if latches(count) { data } else { state.capture },
        source,
    };

    (egress_fwd, (), state_next)
}

/// Creates a sampler starting from the given registers.
pub fn m_with(init: State) -> Pdm { Fsm::new("pdm", logic as Logic, init) }

/// Creates a sampler out of reset.
pub fn m() -> Pdm { m_with(State::default()) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_of_a_group() {
        let phases = (0..PERIOD).map(Phase::of).collect::<Vec<_>>();
        assert_eq!(phases[0], Phase::Header);
        assert_eq!(&phases[1..4], &[Phase::Slice(0), Phase::Slice(1), Phase::Slice(2)]);
        assert_eq!(phases[8], Phase::Quiet);
        assert_eq!(&phases[9..12], &[Phase::Slice(0), Phase::Slice(1), Phase::Slice(2)]);
        let words = phases.iter().filter(|phase| **phase != Phase::Quiet).count();
        assert_eq!(words, WORDS_PER_GROUP);
    }

    #[test]
    fn latches_a_few_ticks_after_each_edge() {
        let latched = (0..PERIOD).filter(|count| latches(*count)).collect::<Vec<_>>();
        assert_eq!(latched, vec![5, 13]);
        assert_eq!(pdm_clock_hz(50_000_000), 3_125_000);
    }
}
