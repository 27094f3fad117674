//! Eval command handler

use crate::commands::EvalArgs;
use crate::error::{CliError, CliResult};
use abacus::core::history::HistoryEntry;
use abacus::core::{Calculator, Operation};
use std::io::Write;

/// Checks operand count against the operation's arity.
///
/// A missing logarithm base falls back to 10; unary operations reject a
/// second operand.
pub fn resolve_operands(op: Operation, a: f64, b: Option<f64>) -> CliResult<(f64, f64)> {
    match (op.arity(), b) {
        (2, Some(b)) => Ok((a, b)),
        (2, None) if op == Operation::Logarithm => Ok((a, Calculator::DEFAULT_LOG_BASE)),
        (2, None) => Err(CliError::invalid_argument(format!(
            "'{op}' needs two operands"
        ))),
        (_, Some(_)) => Err(CliError::invalid_argument(format!(
            "'{op}' takes a single operand"
        ))),
        (_, None) => Ok((a, 0.0)),
    }
}

/// Evaluate one operation and print its trace line (or JSON record)
pub fn execute_eval<W: Write>(args: &EvalArgs, out: &mut W) -> CliResult<()> {
    let op: Operation = args
        .operation
        .parse()
        .map_err(|e: abacus::core::ParseOperationError| CliError::invalid_argument(e.to_string()))?;
    let (a, b) = resolve_operands(op, args.a, args.b)?;

    let value = op.evaluate(a, b)?;
    let entry = HistoryEntry::new(op, op.expression(a, b), value);
    tracing::debug!(operation = %op, result = %entry.result, "evaluated");

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entry)?)?;
    } else {
        writeln!(out, "{}", entry.display())?;
    }
    Ok(())
}
