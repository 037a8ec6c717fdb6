//! UDP user interface types.

use micflow::*;

/// Payload word handed to the UDP/IP encapsulation core, with the datagram's metadata.
///
/// The metadata fields are sampled by the core on the first word of a datagram and must be held
/// constant until its last word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Signal)]
pub struct UdpUser {
    /// Payload data.
    pub data: u32,

    /// First word of a datagram.
    pub first: bool,

    /// Last word of a datagram.
    pub last: bool,

    /// Byte enable of the last word.
    pub last_be: Bits<4>,

    /// Payload length in bytes.
    pub length: u16,

    /// Source UDP port.
    pub src_port: u16,

    /// Destination UDP port.
    pub dst_port: u16,

    /// Destination IPv4 address, most significant octet first.
    pub ip_address: u32,
}
