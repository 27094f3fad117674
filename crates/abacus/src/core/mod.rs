//! Core calculator module
//!
//! Operations return a tagged [`CalcResult`] instead of overloading the
//! result channel with error strings: a failed precondition is always a
//! [`CalcError`], and only successful calls reach the history.

pub mod history;
pub mod number;
mod operations;

pub use operations::{Calculator, Operation, ParseOperationError};

use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Domain precondition failures, one variant per distinct message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a zero divisor
    #[error("Division by zero!")]
    DivisionByZero,
    /// Modulo with a zero divisor
    #[error("Modulo by zero!")]
    ModuloByZero,
    /// Square root of a negative operand
    #[error("Cannot calculate square root of negative number!")]
    NegativeSquareRoot,
    /// Factorial of a negative operand
    #[error("Factorial of negative number!")]
    NegativeFactorial,
    /// Factorial of a non-integral operand
    #[error("Factorial only for integers!")]
    NonIntegerFactorial,
    /// Factorial operand above [`Calculator::MAX_FACTORIAL`]
    #[error("Number too large for factorial!")]
    FactorialTooLarge,
    /// Logarithm of zero or a negative value
    #[error("Logarithm of non-positive number!")]
    NonPositiveLogarithm,
    /// Logarithm base that is non-positive or exactly one
    #[error("Invalid logarithm base!")]
    InvalidLogarithmBase,
    /// Natural logarithm of zero or a negative value
    #[error("Natural logarithm of non-positive number!")]
    NonPositiveNaturalLog,
    /// Power result too large to represent
    #[error("Numerical result out of range")]
    Overflow,
    /// Negative base raised to a fractional exponent
    #[error("Result is a complex number")]
    ComplexResult,
    /// Function undefined for the operand, e.g. the sine of infinity
    #[error("math domain error")]
    MathDomain,
}

impl CalcError {
    /// Renders the error the way string-typed front-ends display it
    #[must_use]
    pub fn display_result(&self) -> String {
        format!("Error: {self}")
    }
}

/// A successful calculation result
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Real-valued result
    Real(f64),
    /// Exact integer result (factorial)
    Integer(BigUint),
}

impl Value {
    /// Returns the real value, if this is one
    #[must_use]
    pub const fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            Self::Integer(_) => None,
        }
    }

    /// Returns the integer value, if this is one
    #[must_use]
    pub const fn as_integer(&self) -> Option<&BigUint> {
        match self {
            Self::Real(_) => None,
            Self::Integer(n) => Some(n),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(v) => f.write_str(&number::format_real(*v)),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<BigUint> for Value {
    fn from(n: BigUint) -> Self {
        Self::Integer(n)
    }
}

/// Serialized as its display string so exact integers survive JSON
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
