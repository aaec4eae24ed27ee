// src/exec/compiler.rs

//! The compiler runner.

use std::fmt;
use std::io;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::ExecError;
use crate::exec::drain::{settle, spawn_drain};
use crate::exec::env::AmbientEnv;
use crate::exec::sink::SharedSink;
use crate::types::StreamKind;

/// One external compiler command, ready to run.
///
/// Immutable once built. [`Compiler::exec`] borrows it, so the same value can
/// be run any number of times; runs do not share state beyond the sink.
#[derive(Clone)]
pub struct Compiler {
    program: String,
    args: Vec<String>,
    env: Vec<String>,
    verbose: bool,
    output: SharedSink,
}

impl Compiler {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        env: Vec<String>,
        verbose: bool,
        output: SharedSink,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            env,
            verbose,
            output,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &[String] {
        &self.env
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Run the command against the current process environment.
    pub async fn exec(&self) -> Result<(), ExecError> {
        self.exec_with_env(&AmbientEnv::capture()).await
    }

    /// Run the command to completion.
    ///
    /// stdout and stderr are drained concurrently into the sink. The call
    /// returns only after both drains have finished and the child has been
    /// waited on, unless the process never started or a drain failed.
    pub async fn exec_with_env(&self, ambient: &AmbientEnv) -> Result<(), ExecError> {
        let env = ambient
            .merge(&self.env)
            .map_err(|source| self.start_error(source))?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        info!(
            program = %self.program,
            args = ?self.args,
            verbose = self.verbose,
            "starting compilation process"
        );

        let mut child = cmd.spawn().map_err(|source| self.start_error(source))?;

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            (None, _) => {
                return Err(ExecError::PipeUnavailable {
                    stream: StreamKind::Stdout,
                });
            }
            (_, None) => {
                return Err(ExecError::PipeUnavailable {
                    stream: StreamKind::Stderr,
                });
            }
        };

        let stdout_task = spawn_drain(StreamKind::Stdout, stdout, Arc::clone(&self.output));
        let stderr_task = spawn_drain(StreamKind::Stderr, stderr, Arc::clone(&self.output));

        // Both drains settle before either result is looked at.
        let (stdout_joined, stderr_joined) = tokio::join!(stdout_task, stderr_task);
        let stdout_res = settle(StreamKind::Stdout, stdout_joined);
        let stderr_res = settle(StreamKind::Stderr, stderr_joined);

        let stdout_captured = stdout_res?;
        let stderr_captured = stderr_res?;
        debug!(
            stdout_bytes = stdout_captured.len(),
            stderr_bytes = stderr_captured.len(),
            "both streams drained; waiting for process exit"
        );

        match child.wait().await {
            Ok(status) if status.success() => {
                info!(program = %self.program, "compilation process exited");
                Ok(())
            }
            Ok(status) => {
                info!(
                    program = %self.program,
                    exit_code = status.code().unwrap_or(-1),
                    "compilation process failed"
                );
                Err(self.compilation_failure(&stderr_captured))
            }
            Err(e) => {
                warn!(
                    program = %self.program,
                    error = %e,
                    "waiting for compilation process failed"
                );
                Err(self.compilation_failure(&stderr_captured))
            }
        }
    }

    fn start_error(&self, source: io::Error) -> ExecError {
        ExecError::Start {
            program: self.program.clone(),
            source,
        }
    }

    /// Quiet runs repeat the captured stderr, since nobody saw it live.
    fn compilation_failure(&self, stderr: &[u8]) -> ExecError {
        let stderr = (!self.verbose && !stderr.is_empty())
            .then(|| String::from_utf8_lossy(stderr).trim().to_string());
        ExecError::Compilation { stderr }
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env", &self.env)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
