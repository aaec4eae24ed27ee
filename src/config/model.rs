// src/config/model.rs

use serde::Deserialize;

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [compiler]
/// command = "cargo"
/// args = ["build", "--release"]
/// env = ["RUSTFLAGS=-Dwarnings"]
/// verbose = false
/// output = "build.log"
/// ```
///
/// Every key is optional; the command may also come from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub compiler: CompilerSection,
}

/// `[compiler]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompilerSection {
    /// Executable to run. Looked up on `PATH` when not a path.
    #[serde(default)]
    pub command: Option<String>,

    /// Arguments, passed as-is (no shell).
    #[serde(default)]
    pub args: Vec<String>,

    /// `KEY=VALUE` overrides applied on top of the ambient environment.
    #[serde(default)]
    pub env: Vec<String>,

    /// Stream output live instead of repeating stderr in the error.
    #[serde(default)]
    pub verbose: bool,

    /// Write the child's output to this file.
    #[serde(default)]
    pub output: Option<String>,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub compiler: CompilerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(compiler: CompilerSection) -> Self {
        Self { compiler }
    }
}
