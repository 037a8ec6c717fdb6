//! Types for the mic hub.

mod pdm;
mod udp;

pub use pdm::*;
pub use udp::*;
