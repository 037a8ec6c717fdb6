//! Constants for mic hub modules.

/// Constants for `pdm`.
pub mod pdm {
    use static_assertions::*;

    /// Width of the parallel PDM data input: one bit per data line.
    pub const SAMPLE_WIDTH: usize = 96;
    /// Width of an emitted word.
    pub const WORD_WIDTH: usize = 32;
    /// Words per latched sample.
    pub const SLICES: usize = SAMPLE_WIDTH / WORD_WIDTH;

    /// Ticks per group. The group counter is `clog2(PERIOD)` bits wide.
    pub const PERIOD: usize = 16;
    /// Ticks per PDM clock level. The PDM clock is the counter's top bit.
    pub const HALF_PERIOD: usize = PERIOD / 2;

    /// Group phase at which the packet identifier is emitted.
    pub const HEADER_PHASE: usize = 0;
    /// Half-period phase at which the first slice is emitted.
    pub const FIRST_SLICE_PHASE: usize = 1;
    /// Half-period phase at which the data input is latched, a few ticks after each PDM clock edge.
    pub const LATCH_PHASE: usize = 5;
    /// Group phase whose word is marked last-of-group.
    pub const LAST_PHASE: usize = HALF_PERIOD + FIRST_SLICE_PHASE + SLICES - 1;
    /// Group phase after which the packet identifier increments.
    pub const ID_PHASE: usize = PERIOD - 1;

    /// Valid words per group: the header and one sample per PDM clock edge.
    pub const WORDS_PER_GROUP: usize = 1 + 2 * SLICES;

    const_assert_eq!(SAMPLE_WIDTH % WORD_WIDTH, 0);
    const_assert_eq!(LAST_PHASE, 11);
    // All slices leave before the capture register is overwritten.
    const_assert!(FIRST_SLICE_PHASE + SLICES <= LATCH_PHASE);
    const_assert!(LATCH_PHASE < HALF_PERIOD);
}

/// Constants for `stream2udp`.
pub mod stream2udp {
    use static_assertions::*;

    /// Data path width. Only 32-bit words come out of the sampler.
    pub const DATA_WIDTH: usize = super::pdm::WORD_WIDTH;
    /// Entries of the elastic buffer's memory.
    pub const FIFO_DEPTH: usize = 8192;
    /// Fill level the buffer must exceed before a datagram is started.
    pub const HIGH_WATER_MARK: usize = 512;
    /// Groups per datagram.
    pub const MAX_PACKET: usize = 48;
    /// Declared UDP payload length in bytes.
    pub const PAYLOAD_LENGTH: u16 = (super::pdm::WORDS_PER_GROUP * (DATA_WIDTH / 8) * MAX_PACKET) as u16;

    const_assert_eq!(PAYLOAD_LENGTH, 1344);
    const_assert!(HIGH_WATER_MARK < FIFO_DEPTH);
}

/// Constants for `mic_hub`.
pub mod mic_hub {
    use std::net::Ipv4Addr;

    /// Host receiving the datagrams.
    pub const HOST_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);
    /// UDP source and destination port.
    pub const UDP_PORT: u16 = 5678;
    /// System clock frequency in Hz.
    pub const SYS_CLK_FREQ: u64 = 50_000_000;

    /// Cycles simulated by the testbench.
    pub const SIM_CYCLES: u64 = 20_000;
    /// One system clock period.
    pub const VCD_TIMESCALE: &str = "20ns";
    /// Waveform written by the testbench.
    pub const VCD_PATH: &str = "./build/mic_hub.vcd";
    /// Static input of the testbench: bytes 0x01..=0x0c, most significant first.
    pub const TEST_PATTERN: u128 = 0x0102_0304_0506_0708_090a_0b0c;
}
