//! Implementation of proc macros on signal types.
//!
//! # Note
//!
//! To use `#[derive(Signal)]` on struct, every field must itself implement `micflow::Signal`. The
//! bits of the struct are the concatenation of its fields' bits in declaration order, and its
//! `port_decls()` is the struct of its fields.
//!
//! For example, the derived implementation for the valid/ready forward signal is as follows.
//!
//! ```ignore
//! #[derive(Debug, Clone, Signal)]
//! pub struct Valid<V: Signal> {
//!     #[member(name = "")]
//!     pub inner: V,
//!     pub valid: bool,
//! }
//!
//! impl<V: Signal> Signal for Valid<V> {
//!     const WIDTH: usize = 0 + <V>::WIDTH + <bool>::WIDTH;
//!     ...
//!     fn port_decls() -> PortDecls {
//!         PortDecls::Struct(vec![
//!             (None, <V>::port_decls()),
//!             (Some("valid".to_string()), <bool>::port_decls()),
//!         ])
//!     }
//! }
//! ```
//!
//! Unit-only enums are encoded as their variant index in `clog2(#variants)` bits, unless
//! overridden with `#[width(N)]` on the enum or `#[encode(N)]` on a variant.

mod signal;
mod utils;

use proc_macro::{self, TokenStream};

#[proc_macro_derive(Signal, attributes(member, width, encode))]
pub fn signal(input: TokenStream) -> TokenStream { signal::derive(input) }
