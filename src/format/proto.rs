//! Protocol Buffers formatting
//!
//! clang-format picks its proto language mode from the `.proto` extension, so
//! this profile only fixes the extension and the default style; invocation is
//! delegated to [`crate::format::clang`].

use std::io::Write;
use std::path::Path;

use crate::exec::ExecConfig;
use crate::format::clang;
use crate::style::Style;
use crate::walk::FileWalker;
use crate::Result;

/// Extension handled by the proto profile
pub const PROTO_EXTENSION: &str = ".proto";

/// Default style for `.proto` files
#[must_use]
pub fn new_style() -> Style {
    Style {
        based_on_style: "Google".to_string(),
        indent_width: 2,
        column_limit: 0,
        align_consecutive_assignments: false,
    }
}

/// Preview formatting of a single `.proto` file
pub fn dry_run(config: &ExecConfig, proto_path: &Path, style: &Style) -> Result<Vec<u8>> {
    clang::dry_run(config, proto_path, style)
}

/// Format a single `.proto` file in place
pub fn format(config: &ExecConfig, proto_path: &Path, style: &Style) -> Result<Vec<u8>> {
    clang::format(config, proto_path, style)
}

/// Format every `.proto` file under the walker root in place
pub fn format_project(config: &ExecConfig, walker: &FileWalker, style: &Style) -> Result<usize> {
    clang::format_project(config, walker, PROTO_EXTENSION, style)
}

/// Preview every `.proto` file under the walker root
pub fn preview_project<W: Write>(
    config: &ExecConfig,
    walker: &FileWalker,
    style: &Style,
    out: &mut W,
) -> Result<usize> {
    clang::preview_project(config, walker, PROTO_EXTENSION, style, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_style() {
        let style = new_style();
        assert_eq!(style.based_on_style, "Google");
        assert_eq!(style.indent_width, 2);
        assert_eq!(style.column_limit, 0);
        assert!(!style.align_consecutive_assignments);
        assert!(style.validate().is_none());
    }

    #[test]
    fn test_project_on_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        // No .proto files: the formatter is never spawned
        let config = ExecConfig::new().with_program("clang-format-batch-no-such-binary");
        let count = format_project(&config, &FileWalker::new(dir.path()), &new_style()).unwrap();
        assert_eq!(count, 0);
    }
}
