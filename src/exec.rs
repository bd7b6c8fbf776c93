//! External process invocation.
//!
//! [`ExecConfig`] captures how the formatter binary is launched: which program,
//! from which working directory, and whether to log each command line. Calls
//! are synchronous; the child runs to completion before [`ExecConfig::exec`]
//! returns.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context};

use crate::Result;

/// Program run when nothing else is configured
pub const DEFAULT_PROGRAM: &str = "clang-format";

/// Environment variable that overrides the formatter program
pub const PROGRAM_ENV: &str = "CLANG_FORMAT";

/// How to run the external formatter
#[derive(Debug, Clone)]
pub struct ExecConfig {
    program: OsString,
    leading_args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    debug: bool,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecConfig {
    #[must_use]
    pub fn new() -> Self {
        ExecConfig {
            program: OsString::from(DEFAULT_PROGRAM),
            leading_args: Vec::new(),
            current_dir: None,
            debug: false,
        }
    }

    /// Use a different formatter binary (name on `PATH` or explicit path)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments placed before the per-call arguments on every invocation
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Run the child process from `dir`
    #[must_use]
    pub fn with_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Log every command line and its output
    #[must_use]
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Run the program with `args` and return its stdout
    ///
    /// Fails if the program cannot be spawned or exits unsuccessfully; in the
    /// latter case the error carries the exit status and stderr.
    pub fn exec<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = self.program.to_string_lossy();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args).args(args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        if self.debug {
            tracing::debug!(command = ?cmd, "exec");
        }

        let output = cmd.output().with_context(|| {
            format!("failed to run {program} (is it installed and on PATH?)")
        })?;

        if self.debug && !output.stderr.is_empty() {
            tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr), "exec stderr");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("{program} exited with {}", output.status);
            }
            bail!("{program} exited with {}: {stderr}", output.status);
        }

        Ok(output.stdout)
    }
}
