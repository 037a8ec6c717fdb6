use micflow::*;
use micflow_hub::constants::pdm::*;
use micflow_hub::pdm::{self, State};
use micflow_hub::*;
use micflow_std::*;
use proptest::prelude::*;

const INPUT: u128 = 0x0102_0304_0506_0708_090a_0b0c;
const SLICES_OF_INPUT: [u32; 3] = [0x090a_0b0c, 0x0506_0708, 0x0102_0304];

/// Runs a sampler and returns its egress at every tick.
fn run(
    sampler: pdm::Pdm, ticks: u64, input: impl Fn(u64) -> u128, ready: impl Fn(u64) -> bool,
) -> Vec<(bool, Valid<PdmWord>)> {
    let mut sim = Sim::new(sampler);
    sim.run(ticks, |t| (Sample::from_u128(input(t)), ((), Ready::new(ready(t)))))
        .into_iter()
        .map(|cycle| cycle.egress_fwd)
        .collect()
}

/// Word expected at tick `t` under a static input, or `None` if no word is valid.
fn expected(t: u64) -> Option<PdmWord> {
    if t == 0 {
        return None;
    }
    let (group, phase) = ((t - 1) / 16, ((t - 1) % 16) as usize);
    match phase {
        0 => Some(PdmWord { data: group as u32, first: true, last: false }),
        1..=3 => {
            // Nothing is latched before the first rising edge.
            let data = if group == 0 { 0 } else { SLICES_OF_INPUT[phase - 1] };
            Some(PdmWord { data, first: false, last: false })
        }
        9..=11 => Some(PdmWord { data: SLICES_OF_INPUT[phase - 9], first: false, last: phase == 11 }),
        _ => None,
    }
}

#[test]
fn static_input_for_200_ticks() {
    let egress = run(pdm::m(), 200, |_| INPUT, |_| true);
    for (t, (_, word)) in egress.into_iter().enumerate() {
        match expected(t as u64) {
            Some(expected) => assert_eq!(word, Valid::valid(expected), "tick {}", t),
            None => {
                assert!(!word.valid, "tick {}", t);
                assert!(!word.inner.first && !word.inner.last, "tick {}", t);
            }
        }
    }
}

#[test]
fn seven_words_per_group_and_one_last_marker() {
    let egress = run(pdm::m(), 1 + 16 * 20, |_| INPUT, |_| true);
    for group in egress[1..].chunks(PERIOD) {
        let words = group.iter().filter(|(_, word)| word.valid).collect::<Vec<_>>();
        assert_eq!(words.len(), WORDS_PER_GROUP);
        assert!(words[0].1.inner.first);
        assert_eq!(words.iter().filter(|(_, word)| word.inner.first).count(), 1);
        assert_eq!(words.iter().filter(|(_, word)| word.inner.last).count(), 1);
        assert!(words[WORDS_PER_GROUP - 1].1.inner.last);
    }
}

#[test]
fn pdm_clock_is_the_counter_top_bit() {
    let egress = run(pdm::m(), 64, |_| INPUT, |_| true);
    for (t, (clk, _)) in egress.into_iter().enumerate() {
        assert_eq!(clk, t % 16 >= 8, "tick {}", t);
    }
}

#[test]
fn latches_five_ticks_after_each_clock_edge() {
    // Slice `i` of the input at tick `t` is `t + i`.
    let input = |t: u64| (u128::from(t + 2) << 64) | (u128::from(t + 1) << 32) | u128::from(t);
    let egress = run(pdm::m(), 16 * 8, input, |_| true);

    for group in 0..6u64 {
        let falling = 16 * group + 5;
        for i in 0..3 {
            assert_eq!(egress[(16 * group + 10 + i) as usize].1.inner.data, (falling + i) as u32);
        }
        let rising = 16 * group + 13;
        for i in 0..3 {
            assert_eq!(egress[(16 * (group + 1) + 2 + i) as usize].1.inner.data, (rising + i) as u32);
        }
    }
}

#[test]
fn packet_id_wraps_around() {
    let sampler = pdm::m_with(State { packet_id: u32::MAX, ..State::default() });
    let egress = run(sampler, 40, |_| INPUT, |_| true);
    assert_eq!(egress[1].1, Valid::valid(PdmWord { data: u32::MAX, first: true, last: false }));
    assert_eq!(egress[17].1, Valid::valid(PdmWord { data: 0, first: true, last: false }));
    assert_eq!(egress[33].1.inner.data, 1);
}

proptest! {
    #[test]
    fn backpressure_neither_stalls_nor_alters_the_stream(ready in prop::collection::vec(any::<bool>(), 1..64)) {
        let ticks = 16 * 12;
        let stalled = run(pdm::m(), ticks, |_| INPUT, |t| ready[t as usize % ready.len()]);
        let free = run(pdm::m(), ticks, |_| INPUT, |_| true);
        prop_assert_eq!(&stalled, &free);

        let headers = stalled
            .iter()
            .enumerate()
            .filter(|(_, (_, word))| word.valid && word.inner.first)
            .map(|(t, (_, word))| (t, word.inner.data))
            .collect::<Vec<_>>();
        for (group, (t, id)) in headers.into_iter().enumerate() {
            prop_assert_eq!(t, 16 * group + 1);
            prop_assert_eq!(id, group as u32);
        }
    }
}
