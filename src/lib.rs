// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, default_config_path, load_and_validate, resolve_invocation};
use crate::exec::{Compiler, DiscardSink, SharedSink, WriterSink};
use crate::types::SinkTarget;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - merging config and CLI values
/// - sink construction
/// - the compiler run itself
pub async fn run(args: CliArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = resolve_invocation(config.as_ref().map(|c| &c.compiler), &args)?;

    let sink: SharedSink = if args.dry_run {
        Arc::new(DiscardSink)
    } else {
        build_sink(&settings.target).await?
    };
    let compiler = Compiler::new(
        settings.command,
        settings.args,
        settings.env,
        settings.verbose,
        sink,
    );

    if args.dry_run {
        print_dry_run(&compiler, &settings.target);
        return Ok(());
    }

    compiler.exec().await?;
    info!("compilation finished");
    Ok(())
}

/// Load the explicit config file, or the default one if it exists.
fn load_config(explicit: Option<&str>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => {
            let cfg = load_and_validate(path)
                .with_context(|| format!("loading config file {path:?}"))?;
            Ok(Some(cfg))
        }
        None => {
            let path = default_config_path();
            if !path.is_file() {
                debug!(?path, "no default config file; using command-line values only");
                return Ok(None);
            }
            let cfg = load_and_validate(&path)
                .with_context(|| format!("loading config file {path:?}"))?;
            Ok(Some(cfg))
        }
    }
}

/// Build the sink the child's output is relayed to.
pub async fn build_sink(target: &SinkTarget) -> Result<SharedSink> {
    let sink: SharedSink = match target {
        SinkTarget::File(path) => {
            let sink = WriterSink::create_file(Path::new(path))
                .await
                .with_context(|| format!("creating output file {path:?}"))?;
            Arc::new(sink)
        }
        SinkTarget::Stdout => Arc::new(WriterSink::stdout()),
        SinkTarget::Discard => Arc::new(DiscardSink),
    };
    Ok(sink)
}

fn print_dry_run(compiler: &Compiler, target: &SinkTarget) {
    println!("compilerun dry-run");
    println!("  command: {}", compiler.program());
    if !compiler.args().is_empty() {
        println!("  args: {:?}", compiler.args());
    }
    if !compiler.env().is_empty() {
        println!("  env: {:?}", compiler.env());
    }
    println!("  verbose: {}", compiler.verbose());
    match target {
        SinkTarget::File(path) => println!("  output: {path}"),
        SinkTarget::Stdout => println!("  output: <stdout>"),
        SinkTarget::Discard => println!("  output: <discarded>"),
    }

    debug!("dry-run complete (no execution)");
}
