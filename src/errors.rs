// src/errors.rs

//! Crate-wide error types.
//!
//! [`ExecError`] is the terminal failure of a single compiler run.
//! [`CompilerunError`] is the crate-wide error; it covers configuration and
//! wraps run failures.

use std::borrow::Cow;
use std::io;

use thiserror::Error;

use crate::types::StreamKind;

/// Message used whenever a failed run does not repeat the child's stderr.
pub const GENERIC_COMPILATION_FAILURE: &str = "compilation failed";

#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be launched at all.
    #[error("failed to start compilation process: {source}")]
    Start {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Relaying bytes from the child to the sink broke on our side.
    #[error("error streaming {stream} output from child process: {source}")]
    Stream {
        stream: StreamKind,
        #[source]
        source: io::Error,
    },

    /// The child ran but exited unsuccessfully.
    ///
    /// `stderr` holds the trimmed stderr capture only when it should be
    /// repeated to the user (quiet run with non-empty stderr).
    #[error("{}", compilation_display(.stderr))]
    Compilation { stderr: Option<String> },

    /// The child started but one of its output pipes was not connected.
    #[error("no {stream} pipe connected to child process")]
    PipeUnavailable { stream: StreamKind },
}

impl ExecError {
    /// Human-readable detail of the failure.
    ///
    /// For compilation failures this is exactly the trimmed stderr capture,
    /// or [`GENERIC_COMPILATION_FAILURE`] when nothing is repeated.
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            ExecError::Compilation { stderr: Some(s) } => Cow::Borrowed(s.as_str()),
            ExecError::Compilation { stderr: None } => Cow::Borrowed(GENERIC_COMPILATION_FAILURE),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// The stream involved, for stream and pipe failures.
    pub fn stream(&self) -> Option<StreamKind> {
        match self {
            ExecError::Stream { stream, .. } | ExecError::PipeUnavailable { stream } => {
                Some(*stream)
            }
            _ => None,
        }
    }
}

fn compilation_display(stderr: &Option<String>) -> String {
    match stderr {
        Some(s) => format!("{GENERIC_COMPILATION_FAILURE}:\n{s}"),
        None => GENERIC_COMPILATION_FAILURE.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum CompilerunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CompilerunError>;
