//! HTTP server: the calculator page, the `/calculate` form endpoint and the
//! dashboard API.

use crate::config::ServerConfig;
use crate::dashboard::{self, SessionStore, SharedSessions};
use crate::error::{CliError, CliResult};
use abacus::core::number::parse_operand;
use abacus::core::{Calculator, Operation};
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Result text for an operation name the server does not know
pub const INVALID_OPERATION: &str = "Invalid operation";

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Dashboard sessions
    pub sessions: SharedSessions,
}

impl AppState {
    /// Create state with an empty session table sized from the config
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let sessions = Arc::new(Mutex::new(SessionStore::new(config.max_sessions)));
        Self {
            config: Arc::new(config),
            sessions,
        }
    }
}

/// Form fields accepted by `POST /calculate`
#[derive(Debug, Default, Deserialize)]
pub struct CalculateForm {
    /// Operation name
    #[serde(default)]
    pub operation: String,
    /// First operand, as typed
    pub num1: Option<String>,
    /// Second operand, as typed
    pub num2: Option<String>,
}

/// Body returned by `POST /calculate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Rendered result or error message
    pub result: String,
}

impl CalculateResponse {
    fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/calculate", post(calculate))
        .merge(dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Resolves one form operand.
///
/// Missing or blank fields are 0. Unparsable text is coerced to 0 unless
/// `strict`, in which case the offending text comes back as the error.
fn form_operand(field: &str, raw: Option<&str>, strict: bool) -> Result<f64, String> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(0.0);
    };
    match parse_operand(text) {
        Some(value) => Ok(value),
        None if strict => Err(text.to_string()),
        None => {
            tracing::warn!(field, value = text, "unparsable operand treated as 0");
            Ok(0.0)
        }
    }
}

async fn calculate(
    State(state): State<AppState>,
    form: Result<Form<CalculateForm>, FormRejection>,
) -> (StatusCode, Json<CalculateResponse>) {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected calculate request");
            return (
                rejection.status(),
                Json(CalculateResponse::new(format!(
                    "Error: Invalid request: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let strict = state.config.strict_operands;
    let operands = form_operand("num1", form.num1.as_deref(), strict)
        .and_then(|a| form_operand("num2", form.num2.as_deref(), strict).map(|b| (a, b)));
    let (a, b) = match operands {
        Ok(pair) => pair,
        Err(text) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CalculateResponse::new(format!(
                    "Error: Invalid number: '{text}'"
                ))),
            );
        }
    };

    let Ok(op) = form.operation.parse::<Operation>() else {
        tracing::debug!(operation = %form.operation, "unknown operation");
        return (StatusCode::OK, Json(CalculateResponse::new(INVALID_OPERATION)));
    };

    // The form's factorial takes the integer part of its operand
    let a = if op == Operation::Factorial { a.trunc() } else { a };

    let mut calculator = Calculator::new();
    let result = match calculator.apply(op, a, b) {
        Ok(value) => value.to_string(),
        Err(e) => e.display_result(),
    };
    tracing::debug!(operation = %op, a, b, %result, "calculated");
    (StatusCode::OK, Json(CalculateResponse::new(result)))
}

/// The HTTP server
#[derive(Debug, Clone)]
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Create a server for a validated configuration
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> CliResult<SocketAddr> {
        self.config.socket_addr()
    }

    /// Router with fresh state
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.config.clone()))
    }

    /// Bind the configured address and serve until Ctrl+C
    pub async fn run(&self) -> CliResult<()> {
        let addr = self.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::server(format!("failed to bind {addr}: {e}")))?;
        self.run_with_listener(listener).await
    }

    /// Serve on an already bound listener until Ctrl+C
    pub async fn run_with_listener(&self, listener: TcpListener) -> CliResult<()> {
        let local = listener.local_addr()?;
        tracing::info!(
            addr = %local,
            strict_operands = self.config.strict_operands,
            max_sessions = self.config.max_sessions,
            "server listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CliError::server(e.to_string()))?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
