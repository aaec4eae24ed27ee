// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs one external compiler command with `tokio::process::Command` and
//! streams its output to a caller-supplied sink.
//!
//! - [`compiler`] owns the runner ([`Compiler`]) and its success/failure rules.
//! - [`drain`] contains the per-stream drain task.
//! - [`sink`] provides the [`OutputSink`] trait and stock sinks.
//! - [`env`] merges the ambient environment snapshot with overrides.

pub mod compiler;
pub mod drain;
pub mod env;
pub mod sink;

pub use compiler::Compiler;
pub use env::AmbientEnv;
pub use sink::{DiscardSink, MemorySink, OutputSink, SharedSink, WriterSink};
