//! Abacus - arithmetic and scientific calculator core
//!
//! A [`Calculator`](core::Calculator) performs one operation per call,
//! validates its preconditions, and records a human-readable trace of every
//! successful calculation in its [`History`](core::history::History).
//! Failures come back as a typed [`CalcError`](core::CalcError) and are never
//! recorded.
//!
//! # Example
//!
//! ```rust
//! use abacus::prelude::*;
//!
//! let mut calc = Calculator::new();
//! assert_eq!(calc.add(2.0, 3.0).unwrap().to_string(), "5.0");
//! assert_eq!(calc.factorial(5.0).unwrap().to_string(), "120");
//! assert_eq!(calc.divide(1.0, 0.0), Err(CalcError::DivisionByZero));
//!
//! // Only the two successful calls were recorded
//! assert_eq!(calc.history().len(), 2);
//! assert_eq!(calc.show_history(), "--- Calculation History ---\n1. 2.0 + 3.0 = 5.0\n2. 5! = 120");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{
        CalculationLog, History, HistoryEntry, HistoryStats, LoggedCalculation, OperationCount,
    };
    pub use crate::core::number::{format_real, parse_operand};
    pub use crate::core::{
        CalcError, CalcResult, Calculator, Operation, ParseOperationError, Value,
    };
}
