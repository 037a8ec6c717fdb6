//! Stream-to-UDP adapter.
//!
//! Incoming words are buffered in a FIFO. Once the fill level exceeds the high-water mark, the
//! adapter forwards buffered words to the UDP user interface until [`MAX_PACKET`] groups have
//! been sent, then waits for the level to exceed the mark again. A datagram therefore always
//! ends on the last word of a group.
//!
//! The upstream cannot be stalled by this adapter's state: words are accepted whenever the FIFO
//! has room, and words arriving at a full FIFO are dropped.

use micflow::*;
use micflow_std::fifo::SyncFifoBuffered;
use micflow_std::*;
use tracing::{debug, warn};

use crate::config::last_be;
use crate::constants::stream2udp::*;
use crate::types::*;
use crate::{ConfigError, StreamerConfig};

/// Adapter status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Signal)]
pub enum Status {
    /// Waiting for the FIFO to fill.
    #[default]
    Idle,

    /// Forwarding a datagram.
    Send,
}

/// Adapter registers.
#[derive(Debug, Default, Clone, PartialEq, Eq, Signal)]
pub struct State {
    /// Adapter status.
    pub status: Status,

    /// Groups completed in the current datagram.
    pub packet_counter: Counter<MAX_PACKET>,

    /// A word of the current datagram has been sent.
    pub in_datagram: bool,
}

/// Datagram metadata, constant for the adapter's lifetime.
#[derive(Debug, Clone, Copy)]
struct Header {
    ip_address: u32,
    udp_port: u16,
    last_be: Bits<4>,
}

type Logic = Box<dyn Fn((Valid<PdmWord>, usize), Ready, State) -> (Valid<UdpUser>, (Ready, ()), State)>;

type Sender = Fsm<(VrChannel<PdmWord>, UniChannel<usize>), VrChannel<UdpUser>, State, Logic>;

fn logic(header: Header) -> Logic {
    Box::new(move |(word, level): (Valid<PdmWord>, usize), egress_bwd: Ready, state: State| match state.status {
        Status::Idle => {
            let status = if level > HIGH_WATER_MARK { Status::Send } else { Status::Idle };
            (Valid::invalid(), (Ready::new(false), ()), State { status, ..state })
        }
        Status::Send => {
            let closes = state.packet_counter.is_max() && word.inner.last;
            let egress_fwd = Valid::new(word.valid, UdpUser {
                data: word.inner.data,
                first: !state.in_datagram,
                last: closes,
                last_be: header.last_be,
                length: PAYLOAD_LENGTH,
                src_port: header.udp_port,
                dst_port: header.udp_port,
                ip_address: header.ip_address,
            });

            let state_next = if !egress_fwd.fire(&egress_bwd) {
                state
            } else if closes {
                State::default()
            } else {
                State { packet_counter: state.packet_counter.count(word.inner.last), in_datagram: true, ..state }
            };

            (egress_fwd, (Ready::new(egress_bwd.ready), ()), state_next)
        }
    })
}

/// Stream-to-UDP adapter.
pub struct Stream2Udp {
    inner: Chain<SyncFifoBuffered<PdmWord>, Sender>,
    dropped: u64,
    overflowing: bool,
    datagrams: u64,
}

impl std::fmt::Debug for Stream2Udp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream2Udp")
            .field("state", self.state())
            .field("level", &self.level())
            .field("dropped", &self.dropped)
            .field("datagrams", &self.datagrams)
            .finish()
    }
}

impl Stream2Udp {
    /// Creates an adapter.
    pub fn new(config: &StreamerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let header = Header {
            ip_address: config.ip_address_bits(),
            udp_port: config.udp_port,
            last_be: last_be(config.data_width)?,
        };
        let fifo = SyncFifoBuffered::new("fifo", config.fifo_depth);
        let sender: Sender = Fsm::new("sender", logic(header), State::default());

        Ok(Self { inner: fifo.chain("stream2udp", sender), dropped: 0, overflowing: false, datagrams: 0 })
    }

    /// Adapter registers.
    pub fn state(&self) -> &State { self.inner.second().state() }

    /// Adapter status.
    pub fn status(&self) -> Status { self.state().status }

    /// FIFO fill level, including its output register.
    pub fn level(&self) -> usize { self.inner.first().level() }

    /// Words the FIFO can hold.
    pub fn capacity(&self) -> usize { self.inner.first().capacity() }

    /// Words dropped at a full FIFO so far.
    pub fn dropped(&self) -> u64 { self.dropped }

    /// Datagrams completed so far.
    pub fn datagrams(&self) -> u64 { self.datagrams }
}

impl Module for Stream2Udp {
    type I = VrChannel<PdmWord>;
    type O = VrChannel<UdpUser>;

    fn name(&self) -> &str { self.inner.name() }

    fn comb(&self, ingress_fwd: Valid<PdmWord>, egress_bwd: Ready) -> (Valid<UdpUser>, Ready) {
        self.inner.comb(ingress_fwd, egress_bwd)
    }

    fn tick(&mut self, ingress_fwd: Valid<PdmWord>, egress_bwd: Ready) {
        let (egress_fwd, ingress_bwd) = self.inner.comb(ingress_fwd.clone(), egress_bwd);
        let status = self.status();

        if ingress_fwd.valid && !ingress_bwd.ready {
            self.dropped += 1;
            if !self.overflowing {
                warn!(level = self.level(), dropped = self.dropped, "FIFO full, dropping incoming words");
                self.overflowing = true;
            }
        } else if ingress_fwd.valid && self.overflowing {
            debug!(dropped = self.dropped, "FIFO accepting words again");
            self.overflowing = false;
        }

        self.inner.tick(ingress_fwd, egress_bwd);

        if egress_fwd.fire(&egress_bwd) && egress_fwd.inner.last {
            self.datagrams += 1;
            debug!(datagrams = self.datagrams, level = self.level(), "datagram sent");
        }
        if status != self.status() {
            debug!(from = ?status, to = ?self.status(), level = self.level(), "status changed");
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.dropped = 0;
        self.overflowing = false;
        self.datagrams = 0;
    }
}
