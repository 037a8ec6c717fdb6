use itertools::Itertools;
use micflow::*;
use micflow_hub::constants::mic_hub::TEST_PATTERN;
use micflow_hub::constants::pdm::WORDS_PER_GROUP;
use micflow_hub::constants::stream2udp::{HIGH_WATER_MARK, MAX_PACKET};
use micflow_hub::stream2udp::Status;
use micflow_hub::*;
use micflow_std::*;

const SLICES_OF_INPUT: [u32; 3] = [0x090a_0b0c, 0x0506_0708, 0x0102_0304];

fn hub(config: &StreamerConfig) -> Sim<MicHub> { Sim::new(MicHub::new(config).expect("valid configuration")) }

/// Steps once with the test pattern and returns the word transferred on the UDP egress, if any.
fn step(sim: &mut Sim<MicHub>, ready: bool) -> Option<UdpUser> {
    let cycle = sim.step(Sample::from_u128(TEST_PATTERN), ((), Ready::new(ready)));
    let (_, udp) = cycle.egress_fwd;
    if udp.fire(&cycle.egress_bwd.1) {
        Some(udp.inner)
    } else {
        None
    }
}

/// Checks that `words` is a run of whole groups with consecutive packet identifiers from `first_id`.
fn assert_groups(words: &[UdpUser], first_id: u32) {
    assert_eq!(words.len() % WORDS_PER_GROUP, 0);
    for (i, group) in words.chunks(WORDS_PER_GROUP).enumerate() {
        let id = first_id + i as u32;
        assert_eq!(group[0].data, id);
        let rising = if id == 0 { [0; 3] } else { SLICES_OF_INPUT };
        assert_eq!(group[1..4].iter().map(|word| word.data).collect::<Vec<_>>(), rising);
        assert_eq!(group[4..7].iter().map(|word| word.data).collect::<Vec<_>>(), SLICES_OF_INPUT);
    }
}

#[test]
fn streams_consecutive_groups_in_full_datagrams() {
    let mut sim = hub(&StreamerConfig::default());
    let mut sent = vec![];
    for t in 0..6000 {
        let cycle = sim.step(Sample::from_u128(TEST_PATTERN), ((), Ready::new(true)));
        assert_eq!(cycle.egress_fwd.0, t % 16 >= 8);
        let (_, udp) = cycle.egress_fwd;
        sent.extend(udp.into_option());
    }

    let datagrams = sent
        .split_inclusive(|word| word.last)
        .filter(|datagram| datagram.last().map_or(false, |word| word.last))
        .collect_vec();
    assert!(datagrams.len() >= 4);
    for (k, datagram) in datagrams.iter().enumerate() {
        assert_eq!(datagram.len(), MAX_PACKET * WORDS_PER_GROUP);
        assert!(datagram[0].first);
        assert_groups(datagram, (k * MAX_PACKET) as u32);
        assert!(datagram.iter().all(|word| word.length == 1344 && word.dst_port == 5678));
    }
    assert_eq!(sim.module().stream2udp().dropped(), 0);
    assert_eq!(sim.module().stream2udp().datagrams(), datagrams.len() as u64);
}

#[test]
fn backpressure_during_a_datagram_loses_nothing() {
    let mut sim = hub(&StreamerConfig::default());
    let mut sent = vec![];
    while sim.module().stream2udp().status() != Status::Send {
        sent.extend(step(&mut sim, true));
    }
    assert!(sent.is_empty());
    assert!(sim.module().stream2udp().level() > HIGH_WATER_MARK);

    let mut level = sim.module().stream2udp().level();
    for _ in 0..100 {
        assert_eq!(step(&mut sim, false), None);
        assert!(sim.module().stream2udp().level() >= level);
        level = sim.module().stream2udp().level();
    }

    for _ in 0..3000 {
        sent.extend(step(&mut sim, true));
    }
    let whole = sent.iter().rposition(|word| word.last).expect("a datagram is sent");
    assert_groups(&sent[..=whole], 0);
    assert_eq!(sim.module().stream2udp().dropped(), 0);
}

#[test]
fn overflow_loses_samples_without_stalling_the_sampler() {
    let config = StreamerConfig::default().with_fifo_depth(HIGH_WATER_MARK);
    let mut sim = hub(&config);
    for _ in 0..3000 {
        assert_eq!(step(&mut sim, false), None);
    }

    let produced = (1..3000u64).filter(|t| matches!((t - 1) % 16, 0..=3 | 9..=11)).count() as u64;
    let stream2udp = sim.module().stream2udp();
    assert_eq!(stream2udp.level(), stream2udp.capacity());
    assert_eq!(stream2udp.dropped(), produced - stream2udp.capacity() as u64);
    assert_eq!(sim.module().pdm().state().packet_id, 3000 / 16);
}

#[test]
fn reset_replays_the_same_stream() {
    let config = StreamerConfig::default().with_fifo_depth(HIGH_WATER_MARK);
    let mut sim = hub(&config);
    let stimulus = |t: u64| (Sample::from_u128(TEST_PATTERN), ((), Ready::new(t % 3 != 0)));
    let outputs = |cycles: Vec<Cycle<UniChannel<Sample>, (UniChannel<bool>, VrChannel<UdpUser>)>>| {
        cycles.into_iter().map(|cycle| cycle.egress_fwd).collect_vec()
    };

    let before = outputs(sim.run(2000, stimulus));
    assert!(sim.module().stream2udp().datagrams() > 0);

    sim.reset();
    assert_eq!(sim.cycle(), 0);
    assert_eq!(sim.module().pdm().state().packet_id, 0);
    assert_eq!(sim.module().stream2udp().level(), 0);
    assert_eq!(sim.module().stream2udp().dropped(), 0);
    assert_eq!(sim.module().stream2udp().datagrams(), 0);

    let after = outputs(sim.run(2000, stimulus));
    assert_eq!(before, after);
}
