//! Abacus CLI library
//!
//! Front ends for the [`abacus`] calculator core: the interactive console
//! menu, one-shot evaluation and the HTTP server with its session dashboard.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
pub mod dashboard;
mod error;
pub mod handlers;
pub mod logging;
pub mod menu;
pub mod server;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, ServeArgs};
pub use config::{CliConfig, ColorChoice, ServerConfig, ServerConfigBuilder, Verbosity};
pub use dashboard::{SessionStore, SharedSessions};
pub use error::{ApiError, CliError, CliResult};
pub use menu::Menu;
pub use server::{build_router, AppState, CalculateResponse, Server};
