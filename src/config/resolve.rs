// src/config/resolve.rs

//! Merge config-file values with command-line values.
//!
//! Rules:
//! - a command given on the command line replaces the file's command and args;
//! - `--env` entries are appended after the file's `env`, so they win;
//! - `--verbose` turns verbose on, it can't turn a verbose file off;
//! - `--output` replaces the file's `output`.

use crate::cli::CliArgs;
use crate::config::model::CompilerSection;
use crate::config::validate::validate_env;
use crate::errors::{CompilerunError, Result};
use crate::types::SinkTarget;

/// Everything needed to build a runner for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSettings {
    pub command: String,
    pub args: Vec<String>,
    pub env: Vec<String>,
    pub verbose: bool,
    pub target: SinkTarget,
}

pub fn resolve_invocation(
    file: Option<&CompilerSection>,
    cli: &CliArgs,
) -> Result<InvocationSettings> {
    let section = file.cloned().unwrap_or_default();
    validate_env(&cli.env, "--env")?;

    let (command, args) = match cli.command.split_first() {
        Some((cmd, rest)) => (cmd.clone(), rest.to_vec()),
        None => match section.command {
            Some(cmd) => (cmd, section.args),
            None => {
                return Err(CompilerunError::ConfigError(
                    "no command to run: pass one after `--` or set [compiler].command"
                        .to_string(),
                ));
            }
        },
    };

    let mut env = section.env;
    env.extend(cli.env.iter().cloned());

    let verbose = section.verbose || cli.verbose;
    let output = cli.output.clone().or(section.output);
    let target = SinkTarget::resolve(output.as_deref(), verbose);

    Ok(InvocationSettings {
        command,
        args,
        env,
        verbose,
        target,
    })
}
