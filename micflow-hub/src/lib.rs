//! Microphone hub: streams a PDM microphone array as UDP payloads.
//!
//! The [`pdm`] sampler clocks the microphones and frames every latched sample into a word stream
//! tagged with a packet identifier. The [`stream2udp`] adapter buffers that stream and sends it
//! out in fixed-size datagrams. [`MicHub`] connects the two.

// # Tries to deny all lints (`rustc -W help`).
#![deny(anonymous_parameters)]
#![deny(explicit_outlives_requirements)]
#![deny(keyword_idents)]
#![deny(macro_use_extern_crate)]
#![deny(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unused_extern_crates)]
#![deny(unused_import_braces)]
//
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::invalid_rust_codeblocks)]
#![deny(rustdoc::bare_urls)]
//
#![allow(clippy::type_complexity)]
#![allow(elided_lifetimes_in_paths)]

mod config;
pub mod constants;
mod error;
pub mod mic_hub;
pub mod pdm;
pub mod stream2udp;
pub mod types;

pub use config::{ConfigError, StreamerConfig};
pub use error::HubError;
pub use mic_hub::MicHub;
pub use stream2udp::Stream2Udp;
pub use types::*;
