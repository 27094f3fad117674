//! CLI and server configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Global CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// HTTP server configuration, loadable from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Reject unparsable operands with 400 instead of coercing them to 0
    pub strict_operands: bool,
    /// Maximum number of live dashboard sessions
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            strict_operands: false,
            max_sessions: 1024,
        }
    }
}

impl ServerConfig {
    /// Create a builder
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.port == 0 {
            return Err(CliError::config("port must be between 1 and 65535"));
        }
        if self.max_sessions == 0 {
            return Err(CliError::config("max_sessions must be at least 1"));
        }
        self.socket_addr().map(|_| ())
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> CliResult<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| CliError::config(format!("invalid host '{}': {e}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Builder for `ServerConfig`
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Set host address
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set HTTP port
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Reject unparsable operands instead of coercing them
    #[must_use]
    pub fn strict_operands(mut self, enabled: bool) -> Self {
        self.config.strict_operands = enabled;
        self
    }

    /// Set the dashboard session cap
    #[must_use]
    pub fn max_sessions(mut self, max: usize) -> Self {
        self.config.max_sessions = max;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> CliResult<ServerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
