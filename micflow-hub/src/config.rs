//! Streamer configuration.

use std::net::Ipv4Addr;

use micflow::Bits;
use thiserror::Error;

use crate::constants::{mic_hub, stream2udp::*};

/// Configuration errors.
#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported data width {width}: only 8 and 32 are defined")]
    UnknownDataWidth { width: usize },
    #[error("data width {width} does not match the {expected}-bit words of the sampler")]
    DataWidth { width: usize, expected: usize },
    #[error("FIFO depth {depth} cannot exceed the high-water mark {high_water_mark}")]
    FifoTooShallow { depth: usize, high_water_mark: usize },
    #[error("UDP port 0 is reserved")]
    ReservedPort,
}

/// Byte enable of the last word of a datagram, for the given data width.
pub fn last_be(data_width: usize) -> Result<Bits<4>, ConfigError> {
    match data_width {
        32 => Ok(Bits::from_u128(0b1000)),
        8 => Ok(Bits::from_u128(0b0001)),
        width => Err(ConfigError::UnknownDataWidth { width }),
    }
}

/// Where and how the stream-to-UDP adapter sends its datagrams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamerConfig {
    /// Destination IPv4 address.
    pub ip_address: Ipv4Addr,

    /// UDP source and destination port.
    pub udp_port: u16,

    /// Data path width in bits.
    pub data_width: usize,

    /// Entries of the elastic buffer's memory, excluding its output register.
    pub fifo_depth: usize,
}

impl Default for StreamerConfig {
    fn default() -> Self { Self::new(mic_hub::HOST_IP, mic_hub::UDP_PORT) }
}

impl StreamerConfig {
    /// Creates a configuration with the default data width and FIFO depth.
    pub fn new(ip_address: Ipv4Addr, udp_port: u16) -> Self {
        Self { ip_address, udp_port, data_width: DATA_WIDTH, fifo_depth: FIFO_DEPTH }
    }

    /// Sets the FIFO depth.
    #[must_use]
    pub fn with_fifo_depth(self, fifo_depth: usize) -> Self { Self { fifo_depth, ..self } }

    /// Sets the data width.
    #[must_use]
    pub fn with_data_width(self, data_width: usize) -> Self { Self { data_width, ..self } }

    /// Destination address as carried on the UDP user interface.
    pub fn ip_address_bits(&self) -> u32 { u32::from(self.ip_address) }

    /// Checks that the adapter can be built from this configuration.
    ///
    /// The buffer must be able to exceed the high-water mark, otherwise no datagram is ever sent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        last_be(self.data_width)?;
        if self.data_width != DATA_WIDTH {
            return Err(ConfigError::DataWidth { width: self.data_width, expected: DATA_WIDTH });
        }
        if self.fifo_depth < HIGH_WATER_MARK {
            return Err(ConfigError::FifoTooShallow { depth: self.fifo_depth, high_water_mark: HIGH_WATER_MARK });
        }
        if self.udp_port == 0 {
            return Err(ConfigError::ReservedPort);
        }
        Ok(())
    }
}
