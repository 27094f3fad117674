//! Calculation history
//!
//! [`History`] is the ordered trace of successful calculations behind the
//! console listing. [`CalculationLog`] keeps every attempt, rejected ones
//! included, and backs the dashboard's JSON view, CSV export and statistics.

use crate::core::{CalcResult, Operation, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A single entry in the calculation history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Operation that produced the entry
    pub operation: Operation,
    /// Rendered expression, e.g. `2.0 + 3.0`
    pub expression: String,
    /// Result of the calculation
    pub result: Value,
    /// When the calculation was performed
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time
    #[must_use]
    pub fn new(operation: Operation, expression: String, result: Value) -> Self {
        Self::with_timestamp(operation, expression, result, Utc::now())
    }

    /// Creates an entry with a specific timestamp (for testing)
    #[must_use]
    pub fn with_timestamp(
        operation: Operation,
        expression: String,
        result: Value,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation,
            expression,
            result,
            timestamp,
        }
    }

    /// Returns the `<expr> = <result>` trace line
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// One attempted calculation, kept whether or not it succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedCalculation {
    /// Operation that was requested
    pub operation: Operation,
    /// Rendered expression
    pub expression: String,
    /// Rendered result, or `Error: ...` when the call was rejected
    pub result: String,
    /// Whether the calculation succeeded
    pub ok: bool,
    /// When the calculation was attempted
    pub timestamp: DateTime<Utc>,
}

impl LoggedCalculation {
    /// Renders an outcome into a log record
    #[must_use]
    pub fn new(
        operation: Operation,
        expression: String,
        outcome: &CalcResult<Value>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let (result, ok) = match outcome {
            Ok(value) => (value.to_string(), true),
            Err(e) => (e.display_result(), false),
        };
        Self {
            operation,
            expression,
            result,
            ok,
            timestamp,
        }
    }
}

/// Row layout of the CSV export
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Operation")]
    operation: &'static str,
    #[serde(rename = "Input")]
    input: &'a str,
    #[serde(rename = "Result")]
    result: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

/// How often one operation appears in a log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationCount {
    /// The operation
    pub operation: Operation,
    /// Its display label
    pub label: &'static str,
    /// Number of records
    pub count: usize,
}

/// Aggregate view of a calculation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    /// Number of records
    pub total: usize,
    /// Label of the most frequent operation; ties go to the one used first
    pub most_used: Option<&'static str>,
    /// Per-operation counts in order of first use
    pub counts: Vec<OperationCount>,
}

/// Calculator history: successful calculations in call order
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Listing shown when there is nothing to list
    pub const EMPTY_NOTICE: &'static str = "No calculations in history.";

    /// Heading of the numbered listing
    pub const REPORT_HEADER: &'static str = "--- Calculation History ---";

    /// Creates an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a calculation stamped with the current time
    pub fn record(&mut self, operation: Operation, expression: &str, result: Value) {
        self.entries
            .push(HistoryEntry::new(operation, expression.to_string(), result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all entries and returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Trace lines in call order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(HistoryEntry::display)
    }

    /// Numbered listing under [`History::REPORT_HEADER`], or
    /// [`History::EMPTY_NOTICE`] when empty
    #[must_use]
    pub fn report(&self) -> String {
        if self.is_empty() {
            return Self::EMPTY_NOTICE.to_string();
        }
        let mut out = String::from(Self::REPORT_HEADER);
        for (i, line) in self.lines().enumerate() {
            out.push('\n');
            out.push_str(&format!("{}. {line}", i + 1));
        }
        out
    }
}

/// Log of every attempted calculation, failures included
///
/// Kept beside a [`Calculator`](crate::core::Calculator) by front ends that
/// show rejected calls too; the calculator's own [`History`] stays limited to
/// successes.
#[derive(Debug, Clone, Default)]
pub struct CalculationLog {
    records: Vec<LoggedCalculation>,
}

impl CalculationLog {
    /// Creates an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs an outcome stamped with the current time
    pub fn record(
        &mut self,
        operation: Operation,
        expression: String,
        outcome: &CalcResult<Value>,
    ) -> &LoggedCalculation {
        self.push(LoggedCalculation::new(
            operation,
            expression,
            outcome,
            Utc::now(),
        ))
    }

    /// Appends a record
    pub fn push(&mut self, record: LoggedCalculation) -> &LoggedCalculation {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Returns the number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was logged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears the log and returns how many records were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    /// Records oldest first
    pub fn iter(&self) -> impl Iterator<Item = &LoggedCalculation> {
        self.records.iter()
    }

    /// The last `n` records, newest first
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&LoggedCalculation> {
        self.records.iter().rev().take(n).collect()
    }

    /// Exports the log as CSV with an `Operation,Input,Result,Timestamp` header
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if self.is_empty() {
            writer.write_record(["Operation", "Input", "Result", "Timestamp"])?;
        }
        for record in &self.records {
            writer.serialize(CsvRow {
                operation: record.operation.label(),
                input: &record.expression,
                result: &record.result,
                timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Counts records per operation
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        let mut counts: Vec<OperationCount> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|c| c.operation == record.operation) {
                Some(count) => count.count += 1,
                None => counts.push(OperationCount {
                    operation: record.operation,
                    label: record.operation.label(),
                    count: 1,
                }),
            }
        }

        let mut most_used: Option<&OperationCount> = None;
        for count in &counts {
            if most_used.map_or(true, |best| count.count > best.count) {
                most_used = Some(count);
            }
        }

        HistoryStats {
            total: self.records.len(),
            most_used: most_used.map(|c| c.label),
            counts,
        }
    }
}
