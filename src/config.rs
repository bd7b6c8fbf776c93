//! Configuration management for clang-format-batch.
//!
//! This module provides the [`Config`] struct which controls how a batch runs.
//! Configuration can be loaded from:
//! - TOML files (`clang-format-batch.toml`)
//! - the `CLANG_FORMAT` environment variable (formatter program only)
//! - CLI arguments (which override everything else)
//!
//! Config files are auto-discovered in the user's home directory and in every
//! ancestor of the project root. Nearer files override farther ones.
//!
//! ```toml
//! clang_format = "clang-format-18"
//! extra_args = ["--fallback-style=none"]
//! exclude = ["build", "third_party"]
//!
//! [proto]
//! IndentWidth = 4
//!
//! [cpp]
//! BasedOnStyle = "LLVM"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::exec::DEFAULT_PROGRAM;
use crate::format::proto;
use crate::style::{PartialStyle, Style};
use crate::Result;

/// Config file names to search for (in order of priority, later overrides earlier)
pub const CONFIG_FILE_NAMES: &[&str] = &["clang-format-batch.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Main configuration struct for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Formatter program (default: `clang-format`)
    pub clang_format: String,

    /// Arguments passed to the formatter before the per-file arguments
    pub extra_args: Vec<String>,

    /// Style for `.proto` files
    pub proto_style: Style,

    /// Style for C/C++ files
    pub cpp_style: Style,

    /// Glob patterns excluded from the walk
    pub exclude: Vec<String>,
}

/// Settings from the environment and command line, applied over config files
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Value of the `CLANG_FORMAT` environment variable
    pub env_program: Option<String>,

    /// `--clang-format` argument
    pub cli_program: Option<String>,

    /// `--exclude` patterns
    pub exclude: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All scalar fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub clang_format: Option<String>,
    pub extra_args: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub proto: PartialStyle,
    #[serde(default)]
    pub cpp: PartialStyle,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clang_format: DEFAULT_PROGRAM.to_string(),
            extra_args: Vec::new(),
            proto_style: proto::new_style(),
            cpp_style: Style::google(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Validate both styles
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.clang_format.trim().is_empty() {
            return Some("clang_format must not be empty".to_string());
        }
        if let Some(error) = self.proto_style.validate() {
            return Some(format!("[proto] {error}"));
        }
        if let Some(error) = self.cpp_style.validate() {
            return Some(format!("[cpp] {error}"));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let partial: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = &partial.clang_format {
            self.clang_format.clone_from(v);
        }
        if let Some(v) = &partial.extra_args {
            self.extra_args.clone_from(v);
        }
        self.proto_style.apply_partial(&partial.proto);
        self.cpp_style.apply_partial(&partial.cpp);
        // Exclusions accumulate across files
        for pattern in &partial.exclude {
            if !self.exclude.contains(pattern) {
                self.exclude.push(pattern.clone());
            }
        }
    }

    /// Apply environment and CLI overrides
    ///
    /// Program precedence: `--clang-format`, then `CLANG_FORMAT`, then what the
    /// config files set. A blank environment value is ignored. CLI exclusions
    /// are appended to the configured ones.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(program) = &overrides.env_program {
            if !program.trim().is_empty() {
                self.clang_format.clone_from(program);
            }
        }
        if let Some(program) = &overrides.cli_program {
            self.clang_format.clone_from(program);
        }
        for pattern in &overrides.exclude {
            if !self.exclude.contains(pattern) {
                self.exclude.push(pattern.clone());
            }
        }
    }

    /// Discover config files for a project root
    ///
    /// Returns the home directory config first, then configs from the
    /// filesystem root down to `start_path` (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            None
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Files that fail to load are reported and skipped.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_path) {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        config.apply_partial(&partial);
                    }
                    Err(e) => tracing::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => tracing::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

/// Resolve the project root against `cwd`
///
/// The formatter runs with the root as its working directory, so walked paths
/// must not be relative to the caller's directory.
pub fn project_root(cwd: &Path, path: Option<&Path>) -> Result<PathBuf> {
    let root = match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd.to_path_buf(),
    };
    if !root.is_dir() {
        anyhow::bail!("project path {} is not a directory", root.display());
    }
    Ok(root)
}
