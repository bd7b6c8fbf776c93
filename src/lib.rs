//! clang-format-batch - Batch formatter for Protocol Buffers and C/C++ sources
//!
//! Wraps the `clang-format` executable: builds the `-style` payload, runs the
//! tool on single files (preview or in place) and walks project trees to
//! format every file with a given extension.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod format;
pub mod logging;
pub mod process;
pub mod style;
pub mod walk;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use exec::ExecConfig;
pub use format::Profile;
pub use process::{parse_extensions, Batch, BatchSummary, Mode};
pub use style::Style;
pub use walk::{walk_files_with_ext, FileWalker};
