//! Errors of the mic hub testbench.

use std::io;

use micflow::vcd::VcdError;
use thiserror::Error;

use crate::ConfigError;

/// Testbench errors.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum HubError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("waveform error: {0}")]
    Vcd(#[from] VcdError),
    #[error("file system error: {error:?}")]
    Fs { error: io::Error },
}
