// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `compilerun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "compilerun",
    version,
    about = "Run a compiler command, streaming its output and reporting failures.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// If omitted, `Compilerun.toml` in the current directory is used when it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Stream the compiler's output live instead of repeating stderr on failure.
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra environment variable for the compiler. May be repeated.
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Write the compiler's output to this file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COMPILERUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the invocation, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    /// Command to run, followed by its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
