//! micflow: cycle-accurate modelling of synchronous hardware with latency-insensitive interfaces.
//!
//! A design is a tree of [`Module`]s. Every module exposes a forward and a backward signal on its
//! ingress and egress [`Interface`]s. Each clock cycle is evaluated in two phases: [`Module::comb`]
//! computes the combinational outputs from the current inputs and registers, and
//! [`Module::tick`] commits the registers at the clock edge. [`Sim`] drives the cycles and
//! [`vcd::Trace`] dumps them as a waveform.

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
#![allow(type_alias_bounds)]

mod fsm;
mod interface;
mod module;
mod signal;
mod sim;
pub mod utils;
pub mod vcd;

pub use fsm::Fsm;
pub use interface::*;
pub use micflow_macro::Signal;
pub use module::*;
pub use signal::*;
pub use sim::*;
pub use utils::*;
