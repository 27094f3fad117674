//! CLI command definitions using clap

use crate::config::{ColorChoice, ServerConfig, ServerConfigBuilder};
use crate::error::CliResult;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Abacus: arithmetic and scientific calculator
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive numbered menu
    Menu,

    /// Serve the calculator page, the /calculate endpoint and the dashboard
    Serve(ServeArgs),

    /// Evaluate a single operation and print the trace
    Eval(EvalArgs),

    /// List the available operations
    Ops,
}

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "ABACUS_HOST")]
    pub host: Option<String>,

    /// HTTP port to listen on
    #[arg(short, long, env = "ABACUS_PORT")]
    pub port: Option<u16>,

    /// Reject unparsable operands instead of treating them as 0
    #[arg(long)]
    pub strict_operands: bool,

    /// Maximum number of live dashboard sessions
    #[arg(long)]
    pub max_sessions: Option<usize>,
}

impl ServeArgs {
    /// Resolves the server configuration: file first, then flags and env
    pub fn resolve(&self) -> CliResult<ServerConfig> {
        let base = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        let mut builder = ServerConfigBuilder::from_config(base.clone());
        if let Some(host) = &self.host {
            builder = builder.host(host.clone());
        }
        if let Some(port) = self.port {
            builder = builder.port(port);
        }
        if let Some(max) = self.max_sessions {
            builder = builder.max_sessions(max);
        }
        builder
            .strict_operands(self.strict_operands || base.strict_operands)
            .build()
    }
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Operation name (add, subtract, multiply, divide, power, sqrt, modulo,
    /// factorial, sin, cos, tan, log, ln, abs)
    pub operation: String,

    /// First operand
    #[arg(allow_negative_numbers = true)]
    pub a: f64,

    /// Second operand (logarithm base, defaults to 10)
    #[arg(allow_negative_numbers = true)]
    pub b: Option<f64>,

    /// Print the history entry as JSON
    #[arg(long)]
    pub json: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
