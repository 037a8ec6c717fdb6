//! Top level: the PDM sampler feeding the stream-to-UDP adapter.

use micflow::*;
use micflow_std::*;

use crate::pdm::{self, Pdm};
use crate::types::*;
use crate::{ConfigError, Stream2Udp, StreamerConfig};

/// Microphone hub.
///
/// The ingress is the PDM data input. The egress carries the PDM clock output and the UDP user
/// stream.
#[derive(Debug)]
pub struct MicHub {
    pdm: Pdm,
    stream2udp: Stream2Udp,
}

impl MicHub {
    /// Creates a hub sending to the configured host.
    pub fn new(config: &StreamerConfig) -> Result<Self, ConfigError> {
        Ok(Self { pdm: pdm::m(), stream2udp: Stream2Udp::new(config)? })
    }

    /// The sampler.
    pub fn pdm(&self) -> &Pdm { &self.pdm }

    /// The stream-to-UDP adapter.
    pub fn stream2udp(&self) -> &Stream2Udp { &self.stream2udp }
}

impl Module for MicHub {
    type I = UniChannel<Sample>;
    type O = (UniChannel<bool>, VrChannel<UdpUser>);

    fn name(&self) -> &str { "mic_hub" }

    fn comb(&self, ingress_fwd: Sample, egress_bwd: ((), Ready)) -> ((bool, Valid<UdpUser>), ()) {
        let ((), udp_ready) = egress_bwd;
        let ((pdm_clk, word), ()) = self.pdm.comb(ingress_fwd, ((), Ready::default()));
        let (udp, _) = self.stream2udp.comb(word, udp_ready);
        ((pdm_clk, udp), ())
    }

    fn tick(&mut self, ingress_fwd: Sample, egress_bwd: ((), Ready)) {
        let ((), udp_ready) = egress_bwd;
        let ((_, word), ()) = self.pdm.comb(ingress_fwd, ((), Ready::default()));
        let (_, word_ready) = self.stream2udp.comb(word.clone(), udp_ready);
        self.pdm.tick(ingress_fwd, ((), word_ready));
        self.stream2udp.tick(word, udp_ready);
    }

    fn reset(&mut self) {
        self.pdm.reset();
        self.stream2udp.reset();
    }
}
