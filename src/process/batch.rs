//! Batch orchestration
//!
//! Runs each requested extension through its profile, one extension at a
//! time, stopping at the first error.

use std::io::Write;

use crate::exec::ExecConfig;
use crate::format::{clang, proto, Profile};
use crate::style::Style;
use crate::walk::FileWalker;
use crate::Result;

/// Whether files are rewritten or only previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    InPlace,
    DryRun,
}

/// Everything needed to format a project tree
#[derive(Debug, Clone)]
pub struct Batch {
    pub exec: ExecConfig,
    pub walker: FileWalker,
    pub proto_style: Style,
    pub cpp_style: Style,
    pub mode: Mode,
}

/// Outcome of a successful batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files processed per extension, in processing order
    pub formatted: Vec<(String, usize)>,
    /// Extensions that no profile handles
    pub unsupported: Vec<String>,
}

impl BatchSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.formatted.iter().map(|(_, n)| n).sum()
    }

    /// Closing line printed after a successful run
    #[must_use]
    pub fn message(&self, mode: Mode) -> String {
        let verb = match mode {
            Mode::InPlace => "Formatted",
            Mode::DryRun => "Previewed",
        };
        let total = self.total();
        let noun = if total == 1 { "file" } else { "files" };
        format!("{verb} {total} {noun} successfully.")
    }
}

/// Split a comma-separated extension list
///
/// Items are trimmed, empty items dropped, a leading `.` added when missing
/// and duplicates removed (first occurrence wins).
#[must_use]
pub fn parse_extensions(list: &str) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    for item in list.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let extension = if item.starts_with('.') {
            item.to_string()
        } else {
            format!(".{item}")
        };
        if !extensions.contains(&extension) {
            extensions.push(extension);
        }
    }
    extensions
}

impl Batch {
    /// Process `extensions` in order
    ///
    /// Dry-run output goes to `out`. Unsupported extensions are reported with
    /// a warning and skipped.
    pub fn run<W: Write>(&self, extensions: &[String], out: &mut W) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for extension in extensions {
            let Some(profile) = Profile::for_extension(extension) else {
                tracing::warn!("unsupported extension '{extension}', skipping");
                summary.unsupported.push(extension.clone());
                continue;
            };

            tracing::debug!(%extension, %profile, mode = ?self.mode, "processing extension");
            let count = match (profile, self.mode) {
                (Profile::Proto, Mode::InPlace) => {
                    proto::format_project(&self.exec, &self.walker, &self.proto_style)?
                }
                (Profile::Proto, Mode::DryRun) => {
                    proto::preview_project(&self.exec, &self.walker, &self.proto_style, out)?
                }
                (Profile::Cpp, Mode::InPlace) => {
                    clang::format_project(&self.exec, &self.walker, extension, &self.cpp_style)?
                }
                (Profile::Cpp, Mode::DryRun) => clang::preview_project(
                    &self.exec,
                    &self.walker,
                    extension,
                    &self.cpp_style,
                    out,
                )?,
            };
            summary.formatted.push((extension.clone(), count));
        }

        Ok(summary)
    }
}
