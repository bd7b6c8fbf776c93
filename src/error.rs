//! Error types and result aliases for clang-format-batch.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//!
//! Failures from the external formatter and from file-system access are
//! wrapped with context (program, path) and propagated to `main` unchanged.

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
