//! Serve command handler

use crate::commands::ServeArgs;
use crate::config::{CliConfig, ServerConfig};
use crate::error::{CliError, CliResult};
use crate::server::Server;
use std::net::SocketAddr;

/// Format a server URL from the bound address
#[must_use]
pub fn format_server_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

/// Startup banner lines
#[must_use]
pub fn banner(config: &ServerConfig, addr: SocketAddr) -> Vec<String> {
    let url = format_server_url(addr);
    vec![
        "╔══════════════════════════════════════════════════════════════╗".to_string(),
        "║                   Abacus Calculator Server                   ║".to_string(),
        "╠══════════════════════════════════════════════════════════════╣".to_string(),
        format!("║  Calculator: {url:<48}║"),
        format!("║  Dashboard:  {:<48}║", format!("{url}/dashboard")),
        format!(
            "║  Operands:   {:<48}║",
            if config.strict_operands {
                "strict (unparsable input rejected)"
            } else {
                "lenient (unparsable input treated as 0)"
            }
        ),
        format!("║  Sessions:   {:<48}║", format!("up to {}", config.max_sessions)),
        "╠══════════════════════════════════════════════════════════════╣".to_string(),
        "║  Press Ctrl+C to stop                                        ║".to_string(),
        "╚══════════════════════════════════════════════════════════════╝".to_string(),
    ]
}

/// Execute the serve command (blocking)
pub fn execute_serve(config: &CliConfig, args: &ServeArgs) -> CliResult<()> {
    let server_config = args.resolve()?;
    let addr = server_config.socket_addr()?;

    if !config.verbosity.is_quiet() {
        for line in banner(&server_config, addr) {
            println!("{line}");
        }
    }

    let server = Server::new(server_config);
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server(format!("Failed to create runtime: {e}")))?;
    rt.block_on(server.run())
}
