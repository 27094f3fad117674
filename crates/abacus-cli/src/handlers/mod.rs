//! Command handlers, kept out of main.rs for testability

pub mod eval;
pub mod ops;
pub mod serve;

pub use eval::{execute_eval, resolve_operands};
pub use ops::list_operations;
pub use serve::{execute_serve, format_server_url};
