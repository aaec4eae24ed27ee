// tests/config_loading.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use compilerun::cli::CliArgs;
use compilerun::config::{ConfigFile, load_and_validate, load_from_path, resolve_invocation};
use compilerun::errors::CompilerunError;
use compilerun::types::SinkTarget;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn cli(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("compilerun").chain(args.iter().copied())).unwrap()
}

#[test]
fn full_compiler_section_is_parsed() -> TestResult {
    init_tracing();

    let file = write_config(
        r#"
[compiler]
command = "cargo"
args = ["build", "--bin", "app", "--release", "--target", "wasm32-wasi"]
env = ["RUSTFLAGS=-C opt-level=3", "CARGO_TERM_COLOR=never"]
verbose = true
output = "build.log"
"#,
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.compiler.command.as_deref(), Some("cargo"));
    assert_eq!(cfg.compiler.args.len(), 6);
    assert_eq!(cfg.compiler.args[5], "wasm32-wasi");
    assert_eq!(
        cfg.compiler.env,
        vec![
            "RUSTFLAGS=-C opt-level=3".to_string(),
            "CARGO_TERM_COLOR=never".to_string()
        ]
    );
    assert!(cfg.compiler.verbose);
    assert_eq!(cfg.compiler.output.as_deref(), Some("build.log"));
    Ok(())
}

#[test]
fn empty_file_uses_defaults() -> TestResult {
    let file = write_config("");

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.compiler.command, None);
    assert!(cfg.compiler.args.is_empty());
    assert!(cfg.compiler.env.is_empty());
    assert!(!cfg.compiler.verbose);
    assert_eq!(cfg.compiler.output, None);
    Ok(())
}

#[test]
fn malformed_env_entry_returns_config_error() {
    let file = write_config(
        r#"
[compiler]
command = "tinygo"
env = ["GOFLAGS"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(CompilerunError::ConfigError(msg)) => {
            assert!(msg.contains("[compiler].env"));
            assert!(msg.contains("GOFLAGS"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn blank_command_returns_config_error() {
    let raw = ConfigFileBuilder::new().command("   ").build_raw();

    match ConfigFile::try_from(raw) {
        Err(CompilerunError::ConfigError(msg)) => assert!(msg.contains("command")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn args_without_command_returns_config_error() {
    let raw = ConfigFileBuilder::new().arg("build").build_raw();

    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CompilerunError::ConfigError(_))
    ));
}

#[test]
fn blank_output_returns_config_error() {
    let raw = ConfigFileBuilder::new().command("cargo").output("").build_raw();

    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CompilerunError::ConfigError(_))
    ));
}

#[test]
fn invalid_toml_returns_toml_error() {
    let file = write_config("[compiler\ncommand = ");

    assert!(matches!(
        load_from_path(file.path()),
        Err(CompilerunError::TomlError(_))
    ));
}

#[test]
fn wrong_value_type_returns_toml_error() {
    let file = write_config("[compiler]\nverbose = \"yes\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(CompilerunError::TomlError(_))
    ));
}

#[test]
fn missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        load_from_path(dir.path().join("absent.toml")),
        Err(CompilerunError::IoError(_))
    ));
}

#[test]
fn cli_command_replaces_file_command() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .command("cargo")
        .arg("build")
        .env("A=file")
        .build();
    let args = cli(&["--env", "A=cli", "--", "rustc", "--edition", "2021", "main.rs"]);

    let settings = resolve_invocation(Some(&cfg.compiler), &args)?;

    assert_eq!(settings.command, "rustc");
    assert_eq!(settings.args, vec!["--edition", "2021", "main.rs"]);
    // CLI overrides come last so they shadow the file's.
    assert_eq!(settings.env, vec!["A=file", "A=cli"]);
    assert!(!settings.verbose);
    assert_eq!(settings.target, SinkTarget::Discard);
    Ok(())
}

#[test]
fn file_command_used_when_cli_has_none() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .command("tinygo")
        .arg("build")
        .verbose(true)
        .build();
    let args = cli(&["--output", "out.log"]);

    let settings = resolve_invocation(Some(&cfg.compiler), &args)?;

    assert_eq!(settings.command, "tinygo");
    assert_eq!(settings.args, vec!["build"]);
    assert!(settings.verbose);
    assert_eq!(settings.target, SinkTarget::File("out.log".to_string()));
    Ok(())
}

#[test]
fn verbose_without_output_streams_to_stdout() -> TestResult {
    let args = cli(&["-v", "--", "make"]);

    let settings = resolve_invocation(None, &args)?;

    assert!(settings.verbose);
    assert_eq!(settings.target, SinkTarget::Stdout);
    Ok(())
}

#[test]
fn no_command_anywhere_is_a_config_error() {
    let args = cli(&["--verbose"]);

    assert!(matches!(
        resolve_invocation(None, &args),
        Err(CompilerunError::ConfigError(_))
    ));
}

#[test]
fn malformed_cli_env_is_a_config_error() {
    let args = cli(&["--env", "BROKEN", "--", "make"]);

    assert!(matches!(
        resolve_invocation(None, &args),
        Err(CompilerunError::ConfigError(_))
    ));
}

#[test]
fn cli_env_errors_name_the_flag() {
    let args = cli(&["--env", "NOPE", "--", "make"]);

    match resolve_invocation(None, &args) {
        Err(CompilerunError::ConfigError(msg)) => {
            assert!(msg.starts_with("--env:"), "got {msg}");
            assert!(!msg.contains("[compiler]"), "got {msg}");
            assert!(msg.contains("NOPE"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}
