// src/config/mod.rs

//! Configuration loading and validation for compilerun.
//!
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate the values (`validate.rs`).
//! - Combine file and command-line values into one invocation (`resolve.rs`).

pub mod loader;
pub mod model;
pub mod resolve;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CompilerSection, ConfigFile, RawConfigFile};
pub use resolve::{InvocationSettings, resolve_invocation};
