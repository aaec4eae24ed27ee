#![allow(dead_code)]

use std::sync::Arc;

use compilerun::config::{CompilerSection, ConfigFile, RawConfigFile};
use compilerun::exec::{Compiler, DiscardSink, SharedSink};

/// Builder for `Compiler` to simplify test setup.
pub struct CompilerBuilder {
    program: String,
    args: Vec<String>,
    env: Vec<String>,
    verbose: bool,
    sink: SharedSink,
}

impl CompilerBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            env: Vec::new(),
            verbose: false,
            sink: Arc::new(DiscardSink),
        }
    }

    /// `sh -c <script>`.
    pub fn shell(script: &str) -> Self {
        Self::new("sh").args(crate::sh_args(script))
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn env(mut self, entry: &str) -> Self {
        self.env.push(entry.to_string());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler::new(self.program, self.args, self.env, self.verbose, self.sink)
    }
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                compiler: CompilerSection::default(),
            },
        }
    }

    pub fn command(mut self, cmd: &str) -> Self {
        self.config.compiler.command = Some(cmd.to_string());
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.config.compiler.args.push(arg.to_string());
        self
    }

    pub fn env(mut self, entry: &str) -> Self {
        self.config.compiler.env.push(entry.to_string());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.compiler.verbose = verbose;
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.config.compiler.output = Some(path.to_string());
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
