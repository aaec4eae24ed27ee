// src/config/validate.rs

use crate::config::model::{CompilerSection, ConfigFile, RawConfigFile};
use crate::errors::{CompilerunError, Result};
use crate::exec::env::split_override;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CompilerunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_compiler_section(&raw.compiler)?;
        Ok(ConfigFile::new_unchecked(raw.compiler))
    }
}

fn validate_compiler_section(section: &CompilerSection) -> Result<()> {
    validate_command(section)?;
    validate_env(&section.env, "[compiler].env")?;
    validate_output(section)?;
    Ok(())
}

fn validate_command(section: &CompilerSection) -> Result<()> {
    match section.command.as_deref() {
        Some(cmd) if cmd.trim().is_empty() => Err(CompilerunError::ConfigError(
            "[compiler].command must not be empty".to_string(),
        )),
        None if !section.args.is_empty() => Err(CompilerunError::ConfigError(
            "[compiler].args given without [compiler].command".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Check that every override has the `KEY=VALUE` shape the runner accepts.
///
/// `origin` names where the entries came from in the error message.
pub fn validate_env(entries: &[String], origin: &str) -> Result<()> {
    for entry in entries {
        split_override(entry)
            .map_err(|e| CompilerunError::ConfigError(format!("{origin}: {e}")))?;
    }
    Ok(())
}

fn validate_output(section: &CompilerSection) -> Result<()> {
    if let Some(path) = section.output.as_deref() {
        if path.trim().is_empty() {
            return Err(CompilerunError::ConfigError(
                "[compiler].output must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
