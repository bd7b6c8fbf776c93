//! Style payload handed to clang-format through `-style`.
//!
//! Field names are serialized with clang-format's own option names, so the
//! rendered payload looks like:
//!
//! ```text
//! {"BasedOnStyle":"Google","IndentWidth":2,"ColumnLimit":0,"AlignConsecutiveAssignments":false}
//! ```
//!
//! clang-format reads the value as a YAML flow mapping, and JSON is valid YAML.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Predefined base styles understood by clang-format
pub const PREDEFINED_STYLES: &[&str] = &[
    "LLVM",
    "Google",
    "Chromium",
    "Mozilla",
    "WebKit",
    "Microsoft",
    "GNU",
    "InheritParentConfig",
];

/// Formatting options passed to clang-format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Style {
    /// Base style template (Google, LLVM, ...)
    pub based_on_style: String,

    /// Spaces per indentation level
    pub indent_width: u32,

    /// Maximum line length, 0 disables the limit
    pub column_limit: u32,

    /// Align `=` of consecutive assignments
    pub align_consecutive_assignments: bool,
}

/// Partial style for config files
///
/// Every field is optional so a config file can override a single option
/// without restating the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PartialStyle {
    pub based_on_style: Option<String>,
    pub indent_width: Option<u32>,
    pub column_limit: Option<u32>,
    pub align_consecutive_assignments: Option<bool>,
}

impl Default for Style {
    fn default() -> Self {
        Self::google()
    }
}

impl Style {
    /// Largest indent width accepted by [`Style::validate`]
    const MAX_INDENT_WIDTH: u32 = 20;

    /// Google-based style with 2-space indentation and no column limit
    #[must_use]
    pub fn google() -> Self {
        Style {
            based_on_style: "Google".to_string(),
            indent_width: 2,
            column_limit: 0,
            align_consecutive_assignments: false,
        }
    }

    /// Render the value passed after `-style`
    pub fn to_style_arg(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Override fields that are set in `partial`
    pub fn apply_partial(&mut self, partial: &PartialStyle) {
        if let Some(v) = &partial.based_on_style {
            self.based_on_style.clone_from(v);
        }
        if let Some(v) = partial.indent_width {
            self.indent_width = v;
        }
        if let Some(v) = partial.column_limit {
            self.column_limit = v;
        }
        if let Some(v) = partial.align_consecutive_assignments {
            self.align_consecutive_assignments = v;
        }
    }

    /// Check the style against what clang-format accepts
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if !PREDEFINED_STYLES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.based_on_style))
        {
            return Some(format!(
                "BasedOnStyle '{}' is not one of {}",
                self.based_on_style,
                PREDEFINED_STYLES.join(", ")
            ));
        }
        if self.indent_width > Self::MAX_INDENT_WIDTH {
            return Some(format!(
                "IndentWidth {} exceeds maximum of {}",
                self.indent_width,
                Self::MAX_INDENT_WIDTH
            ));
        }
        None
    }
}
