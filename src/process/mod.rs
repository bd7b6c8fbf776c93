//! Batch processing across a project tree.
//!
//! [`Batch`] ties together the formatter invocation ([`crate::exec`]), the
//! directory walk ([`crate::walk`]) and the per-extension profiles
//! ([`crate::format`]). Work is strictly sequential: one file, one child
//! process at a time, and the first failure ends the batch.

pub mod batch;

pub use batch::{parse_extensions, Batch, BatchSummary, Mode};
