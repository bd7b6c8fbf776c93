//! Command-line interface for clang-format-batch.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Comma-separated extension list as given
    pub extensions: String,

    /// Project root (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Formatter program override
    pub clang_format: Option<String>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Print formatted output instead of modifying files
    pub dry_run: bool,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no progress or summary)
    pub silent: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("clang-format-batch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Batch file formatter using clang-format")
        .long_about(
            "clang-format-batch formats every file with the given extensions under a \
             project tree using clang-format. .proto files use the proto style, \
             .c/.cpp/.cxx/.cc/.h/.hpp/.hxx files use the C/C++ style.",
        )
        .arg(
            Arg::new("extensions")
                .short('e')
                .long("extensions")
                .help("Comma-separated file extensions (e.g., .proto,.c,.cpp,.h)")
                .value_name("LIST"),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Project root to format [default: current directory]")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("clang-format")
                .long("clang-format")
                .help("clang-format binary to run (overrides CLANG_FORMAT and config)")
                .value_name("BIN"),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Print formatted output to stdout instead of modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and every clang-format command)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no progress or summary output)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        extensions: matches
            .get_one::<String>("extensions")
            .cloned()
            .unwrap_or_default(),
        path: matches.get_one::<PathBuf>("path").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        clang_format: matches.get_one::<String>("clang-format").cloned(),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        dry_run: matches.get_flag("dry-run"),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "clang-format-batch");
        cmd.debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse_args_from(vec!["clang-format-batch"]);
        assert_eq!(args.extensions, "");
        assert!(args.path.is_none());
        assert!(args.config.is_none());
        assert!(args.clang_format.is_none());
        assert!(args.exclude.is_empty());
        assert!(!args.dry_run);
        assert!(!args.debug);
        assert!(!args.silent);
    }

    #[test]
    fn test_extensions_short_flag() {
        let args = parse_args_from(vec!["clang-format-batch", "-e", ".proto,.cpp"]);
        assert_eq!(args.extensions, ".proto,.cpp");
    }

    #[test]
    fn test_extensions_long_flag() {
        let args = parse_args_from(vec!["clang-format-batch", "--extensions=proto, h"]);
        assert_eq!(args.extensions, "proto, h");
    }

    #[test]
    fn test_path_and_config() {
        let args = parse_args_from(vec![
            "clang-format-batch",
            "-p",
            "src",
            "--config",
            "ci/format.toml",
        ]);
        assert_eq!(args.path, Some(PathBuf::from("src")));
        assert_eq!(args.config, Some(PathBuf::from("ci/format.toml")));
    }

    #[test]
    fn test_clang_format_override() {
        let args = parse_args_from(vec![
            "clang-format-batch",
            "--clang-format",
            "/opt/llvm/bin/clang-format",
        ]);
        assert_eq!(
            args.clang_format.as_deref(),
            Some("/opt/llvm/bin/clang-format")
        );
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "clang-format-batch",
            "-x",
            "build",
            "--exclude",
            "third_party",
            "-x",
            "*.pb.h",
        ]);
        assert_eq!(args.exclude, vec!["build", "third_party", "*.pb.h"]);
    }

    #[test]
    fn test_flags() {
        let args = parse_args_from(vec!["clang-format-batch", "-n", "-D", "-S"]);
        assert!(args.dry_run);
        assert!(args.debug);
        assert!(args.silent);
    }
}
