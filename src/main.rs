//! clang-format-batch - Batch formatter for Protocol Buffers and C/C++ sources

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io;
use std::path::Path;

use anyhow::{bail, Context};
use clang_format_batch::config::{project_root, Overrides};
use clang_format_batch::exec::PROGRAM_ENV;
use clang_format_batch::walk::compile_patterns;
use clang_format_batch::{
    logging, parse_args, parse_extensions, Batch, CliArgs, Config, ExecConfig, FileWalker, Mode,
    Result,
};

fn main() -> Result<()> {
    let args = parse_args();
    logging::init(args.debug, args.silent);

    let extensions = parse_extensions(&args.extensions);
    if extensions.is_empty() {
        bail!("no valid extensions provided. Use --extensions to set file extensions.");
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let root = project_root(&cwd, args.path.as_deref())?;
    let config = build_config(&args, &root)?;

    let exclude = compile_patterns(&config.exclude)?;
    let mut exec = ExecConfig::new()
        .with_program(&config.clang_format)
        .with_args(&config.extra_args)
        .with_path(&root);
    if args.debug {
        exec = exec.with_debug();
    }

    let mode = if args.dry_run {
        Mode::DryRun
    } else {
        Mode::InPlace
    };

    let batch = Batch {
        exec,
        walker: FileWalker::new(&root).with_exclude(exclude),
        proto_style: config.proto_style,
        cpp_style: config.cpp_style,
        mode,
    };

    let summary = batch.run(&extensions, &mut io::stdout().lock())?;

    if !args.silent {
        eprintln!("{}", summary.message(mode));
    }

    Ok(())
}

/// Build configuration from config files, environment and CLI args
fn build_config(args: &CliArgs, root: &Path) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path)?
    } else {
        let discovered = Config::discover_config_files(root);
        if discovered.is_empty() {
            tracing::debug!(root = %root.display(), "no config files discovered");
        } else {
            for f in &discovered {
                tracing::debug!(path = %f.display(), "discovered config file");
            }
        }
        Config::from_discovered_files(root)
    };

    config.apply_overrides(&Overrides {
        env_program: std::env::var(PROGRAM_ENV).ok(),
        cli_program: args.clang_format.clone(),
        exclude: args.exclude.clone(),
    });

    tracing::debug!(?config, "configuration");

    if let Some(error) = config.validate() {
        bail!("Invalid configuration: {error}");
    }

    Ok(config)
}
