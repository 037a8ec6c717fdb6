//! FIFOs.

mod buffered;
mod sync;
pub mod tracker;

pub use buffered::SyncFifoBuffered;
pub use sync::SyncFifo;
