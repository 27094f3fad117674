//! Session-scoped calculator dashboard
//!
//! Every session owns its own [`Calculator`] plus a [`CalculationLog`] of
//! every attempt, rejected ones included; the history, CSV and stats views
//! read the log. Nothing is shared between sessions. The table is capped and
//! evicts the least recently used session when a new one would exceed the
//! cap.

use crate::error::ApiError;
use crate::server::AppState;
use abacus::core::history::{CalculationLog, HistoryStats, LoggedCalculation};
use abacus::core::number::{degrees_to_radians, radians_to_degrees};
use abacus::core::{Calculator, Operation};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

/// Number of records in the stats "recent" list
pub const RECENT_LIMIT: usize = 5;

/// File name offered for the CSV download
pub const EXPORT_FILE_NAME: &str = "calculator_history.csv";

/// One dashboard user's calculator and attempt log
#[derive(Debug, Default)]
pub struct Session {
    calculator: Calculator,
    log: CalculationLog,
}

impl Session {
    /// Runs a calculation and logs it whether or not it succeeded
    pub fn calculate(&mut self, op: Operation, a: f64, b: f64) -> LoggedCalculation {
        let outcome = self.calculator.apply(op, a, b);
        self.log.record(op, op.expression(a, b), &outcome).clone()
    }

    /// Every attempt in call order
    #[must_use]
    pub const fn log(&self) -> &CalculationLog {
        &self.log
    }

    /// Empties the log and the calculator history; returns the records removed
    pub fn clear(&mut self) -> usize {
        self.calculator.clear_history();
        self.log.clear()
    }
}

#[derive(Debug)]
struct Slot {
    session: Session,
    last_used: u64,
}

/// Live dashboard sessions keyed by id
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Slot>,
    max_sessions: usize,
    clock: u64,
}

/// Session table shared across handlers
pub type SharedSessions = Arc<Mutex<SessionStore>>;

impl SessionStore {
    /// Create an empty table holding at most `max_sessions` sessions
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions: max_sessions.max(1),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Start a session, evicting the least recently used one when full
    pub fn create(&mut self) -> Uuid {
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|(_, s)| s.last_used)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                    tracing::info!(session = %id, "evicted least recently used session");
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let last_used = self.tick();
        self.sessions.insert(
            id,
            Slot {
                session: Session::default(),
                last_used,
            },
        );
        id
    }

    /// Run `f` against a session, marking it as used
    pub fn with_session<T>(&mut self, id: &Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let now = self.tick();
        let slot = self.sessions.get_mut(id)?;
        slot.last_used = now;
        Some(f(&mut slot.session))
    }

    /// End a session; false when it did not exist
    pub fn remove(&mut self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Whether a session exists
    #[must_use]
    pub fn contains(&self, id: &Uuid) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of live sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no session is live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// Critical sections never panic, but a poisoned lock still holds valid data.
fn lock(sessions: &SharedSessions) -> MutexGuard<'_, SessionStore> {
    sessions.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Dashboard routes, merged into the main router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(page))
        .route("/dashboard/convert", get(convert))
        .route("/dashboard/sessions", post(create_session))
        .route("/dashboard/sessions/{id}", axum::routing::delete(end_session))
        .route("/dashboard/sessions/{id}/calculate", post(calculate))
        .route(
            "/dashboard/sessions/{id}/history",
            get(history).delete(clear_history),
        )
        .route("/dashboard/sessions/{id}/history.csv", get(export_csv))
        .route("/dashboard/sessions/{id}/stats", get(stats))
}

async fn page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Response to session creation
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    /// New session id
    pub session_id: Uuid,
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session_id = lock(&state.sessions).create();
    tracing::info!(session = %session_id, "session created");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if lock(&state.sessions).remove(&id) {
        tracing::info!(session = %id, "session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound)
    }
}

/// Body of a dashboard calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    /// Operation name
    pub operation: String,
    /// First operand
    pub a: f64,
    /// Second operand; the logarithm base defaults to 10
    pub b: Option<f64>,
}

/// Outcome of a dashboard calculation
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculationOutcome {
    /// Operation label
    pub operation: String,
    /// Rendered expression
    pub input: String,
    /// Result, or `Error: ...`
    pub result: String,
    /// Whether the calculation succeeded
    pub ok: bool,
}

fn second_operand(op: Operation, b: Option<f64>) -> Result<f64, ApiError> {
    match (op.arity(), b) {
        (_, Some(b)) => Ok(b),
        (2, None) if op == Operation::Logarithm => Ok(Calculator::DEFAULT_LOG_BASE),
        (2, None) => Err(ApiError::MissingParameter("b")),
        (_, None) => Ok(0.0),
    }
}

async fn calculate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationOutcome>, ApiError> {
    let Json(request) = request?;
    let op: Operation = request.operation.parse()?;
    let a = request.a;
    let b = second_operand(op, request.b)?;

    let record = lock(&state.sessions)
        .with_session(&id, |session| session.calculate(op, a, b))
        .ok_or(ApiError::SessionNotFound)?;
    tracing::debug!(session = %id, operation = %op, ok = record.ok, "dashboard calculation");

    Ok(Json(CalculationOutcome {
        operation: op.label().to_string(),
        input: record.expression,
        result: record.result,
        ok: record.ok,
    }))
}

/// One logged calculation as the dashboard shows it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Operation label
    pub operation: String,
    /// Rendered expression
    pub input: String,
    /// Rendered result, or `Error: ...`
    pub result: String,
    /// Whether the calculation succeeded
    pub ok: bool,
    /// RFC 3339 timestamp, UTC
    pub timestamp: String,
}

impl From<&LoggedCalculation> for HistoryRecord {
    fn from(record: &LoggedCalculation) -> Self {
        Self {
            operation: record.operation.label().to_string(),
            input: record.expression.clone(),
            result: record.result.clone(),
            ok: record.ok,
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    lock(&state.sessions)
        .with_session(&id, |session| {
            session
                .log()
                .iter()
                .map(HistoryRecord::from)
                .collect::<Vec<_>>()
        })
        .map(Json)
        .ok_or(ApiError::SessionNotFound)
}

/// Response to clearing a history
#[derive(Debug, Serialize, Deserialize)]
pub struct Cleared {
    /// Records removed
    pub removed: usize,
}

async fn clear_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Cleared>, ApiError> {
    let removed = lock(&state.sessions)
        .with_session(&id, Session::clear)
        .ok_or(ApiError::SessionNotFound)?;
    tracing::debug!(session = %id, removed, "history cleared");
    Ok(Json(Cleared { removed }))
}

async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = lock(&state.sessions)
        .with_session(&id, |session| session.log().to_csv())
        .ok_or(ApiError::SessionNotFound)??;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}

/// Aggregate statistics for one session
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Totals and per-operation counts
    #[serde(flatten)]
    pub stats: HistoryStats,
    /// Most recent records, newest first
    pub recent: Vec<HistoryRecord>,
}

async fn stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    lock(&state.sessions)
        .with_session(&id, |session| {
            let log = session.log();
            StatsResponse {
                stats: log.stats(),
                recent: log
                    .last_n(RECENT_LIMIT)
                    .into_iter()
                    .map(HistoryRecord::from)
                    .collect(),
            }
        })
        .map(Json)
        .ok_or(ApiError::SessionNotFound)
}

/// Angle to convert; exactly one unit is read, degrees first
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    /// Angle in degrees
    pub degrees: Option<f64>,
    /// Angle in radians
    pub radians: Option<f64>,
}

/// The same angle in both units
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Conversion {
    /// Degrees
    pub degrees: f64,
    /// Radians
    pub radians: f64,
}

async fn convert(
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<Conversion>, ApiError> {
    let Query(query) = query?;
    let conversion = match (query.degrees, query.radians) {
        (Some(degrees), _) => Conversion {
            degrees,
            radians: degrees_to_radians(degrees),
        },
        (None, Some(radians)) => Conversion {
            degrees: radians_to_degrees(radians),
            radians,
        },
        (None, None) => return Err(ApiError::MissingParameter("degrees or radians")),
    };
    Ok(Json(conversion))
}
