//! C/C++ formatting through clang-format
//!
//! Every call shells out once per file:
//! - preview: `clang-format <path> -style <payload>` (formatted text on stdout)
//! - in place: `clang-format -i <path> -style <payload>`

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::exec::ExecConfig;
use crate::style::Style;
use crate::walk::FileWalker;
use crate::Result;

/// Extensions handled by the C/C++ profile
pub const CPP_EXTENSIONS: &[&str] = &[".c", ".cpp", ".cxx", ".cc", ".h", ".hpp", ".hxx"];

/// Check whether `extension` (with leading dot) belongs to the C/C++ profile
#[must_use]
pub fn is_cpp_extension(extension: &str) -> bool {
    CPP_EXTENSIONS.contains(&extension)
}

/// Format `path` without touching it, returning the formatted content
pub fn dry_run(config: &ExecConfig, path: &Path, style: &Style) -> Result<Vec<u8>> {
    run(config, build_args(path, style, false)?)
        .with_context(|| format!("failed to format {}", path.display()))
}

/// Format `path` in place
///
/// The returned output is whatever the tool printed, normally nothing.
pub fn format(config: &ExecConfig, path: &Path, style: &Style) -> Result<Vec<u8>> {
    run(config, build_args(path, style, true)?)
        .with_context(|| format!("failed to format {}", path.display()))
}

/// Format every file under the walker root with `extension` in place
///
/// Returns the number of files formatted. Stops at the first failure.
pub fn format_project(
    config: &ExecConfig,
    walker: &FileWalker,
    extension: &str,
    style: &Style,
) -> Result<usize> {
    let mut count = 0;
    walker
        .for_each_with_ext(extension, |path| {
            tracing::info!(path = %path.display(), "formatting");
            let output = format(config, path, style)?;
            if !output.is_empty() {
                tracing::debug!(
                    path = %path.display(),
                    output = %String::from_utf8_lossy(&output),
                    "clang-format output"
                );
            }
            count += 1;
            Ok(())
        })
        .with_context(|| {
            format!(
                "failed to format {extension} files under {}",
                walker.root().display()
            )
        })?;
    Ok(count)
}

/// Dry-run every file under the walker root with `extension`
///
/// Each file's formatted content is written to `out` after a `=== path ===`
/// header. Returns the number of files previewed.
pub fn preview_project<W: Write>(
    config: &ExecConfig,
    walker: &FileWalker,
    extension: &str,
    style: &Style,
    out: &mut W,
) -> Result<usize> {
    let mut count = 0;
    walker
        .for_each_with_ext(extension, |path| {
            tracing::info!(path = %path.display(), "previewing");
            let output = dry_run(config, path, style)?;
            writeln!(out, "=== {} ===", path.display())?;
            out.write_all(&output)?;
            if !output.is_empty() && !output.ends_with(b"\n") {
                writeln!(out)?;
            }
            count += 1;
            Ok(())
        })
        .with_context(|| {
            format!(
                "failed to preview {extension} files under {}",
                walker.root().display()
            )
        })?;
    Ok(count)
}

fn build_args(path: &Path, style: &Style, in_place: bool) -> Result<Vec<OsString>> {
    let mut args = Vec::with_capacity(4);
    if in_place {
        args.push(OsString::from("-i"));
    }
    args.push(path.as_os_str().to_os_string());
    args.push(OsString::from("-style"));
    args.push(OsString::from(style.to_style_arg()?));
    Ok(args)
}

/// Requires clang-format (or the configured replacement) to be installed;
/// check with `clang-format --version`.
fn run(config: &ExecConfig, args: Vec<OsString>) -> Result<Vec<u8>> {
    config.exec(args)
}
