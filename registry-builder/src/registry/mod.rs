//! The output side of the pipeline: reconciliation and serialization.

mod entry;
mod merge;
mod writer;

pub use entry::StationEntry;
pub use merge::{Registry, reconcile};
pub use writer::{DEFAULT_OUTPUT_PATH, WriteError, write_registry};
