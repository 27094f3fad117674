//! Calculator operations and the shared dispatch table
//!
//! [`Operation::evaluate`] is the pure computation; [`Calculator`] wraps it
//! with the history side effect.

use crate::core::history::History;
use crate::core::number::format_real;
use crate::core::{CalcError, CalcResult, Value};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Operation name that matches no known operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid operation: {0}")]
pub struct ParseOperationError(pub String);

/// Every operation a calculator can perform, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Addition (a + b)
    Add,
    /// Subtraction (a - b)
    Subtract,
    /// Multiplication (a * b)
    Multiply,
    /// Division (a / b)
    Divide,
    /// Power (a ** b)
    Power,
    /// Square root (√a)
    SquareRoot,
    /// Floored modulo (a % b)
    Modulo,
    /// Exact factorial (n!)
    Factorial,
    /// Sine of an angle in radians
    Sine,
    /// Cosine of an angle in radians
    Cosine,
    /// Tangent of an angle in radians
    Tangent,
    /// Logarithm in an arbitrary base
    Logarithm,
    /// Natural logarithm
    NaturalLog,
    /// Absolute value
    Absolute,
}

impl Operation {
    /// All operations ordered by menu code
    pub const ALL: [Self; 14] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::SquareRoot,
        Self::Modulo,
        Self::Factorial,
        Self::Sine,
        Self::Cosine,
        Self::Tangent,
        Self::Logarithm,
        Self::NaturalLog,
        Self::Absolute,
    ];

    /// Menu code (1-14)
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Add => 1,
            Self::Subtract => 2,
            Self::Multiply => 3,
            Self::Divide => 4,
            Self::Power => 5,
            Self::SquareRoot => 6,
            Self::Modulo => 7,
            Self::Factorial => 8,
            Self::Sine => 9,
            Self::Cosine => 10,
            Self::Tangent => 11,
            Self::Logarithm => 12,
            Self::NaturalLog => 13,
            Self::Absolute => 14,
        }
    }

    /// Looks up an operation by menu code
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    /// Short wire name used by the HTTP form
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::SquareRoot => "sqrt",
            Self::Modulo => "modulo",
            Self::Factorial => "factorial",
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
            Self::Logarithm => "log",
            Self::NaturalLog => "ln",
            Self::Absolute => "abs",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Addition",
            Self::Subtract => "Subtraction",
            Self::Multiply => "Multiplication",
            Self::Divide => "Division",
            Self::Power => "Power",
            Self::SquareRoot => "Square Root",
            Self::Modulo => "Modulo",
            Self::Factorial => "Factorial",
            Self::Sine => "Sine",
            Self::Cosine => "Cosine",
            Self::Tangent => "Tangent",
            Self::Logarithm => "Logarithm",
            Self::NaturalLog => "Natural Log",
            Self::Absolute => "Absolute Value",
        }
    }

    /// Operator symbol or function name for display
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "**",
            Self::SquareRoot => "√",
            Self::Modulo => "%",
            Self::Factorial => "!",
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
            Self::Logarithm => "log",
            Self::NaturalLog => "ln",
            Self::Absolute => "|x|",
        }
    }

    /// Number of operands the operation reads
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Power
            | Self::Modulo
            | Self::Logarithm => 2,
            _ => 1,
        }
    }

    /// Renders the trace expression for operands `a` and `b`.
    ///
    /// Unary operations ignore `b`; for [`Operation::Logarithm`] `b` is the base.
    #[must_use]
    pub fn expression(self, a: f64, b: f64) -> String {
        let x = format_real(a);
        match self {
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Power
            | Self::Modulo => format!("{x} {} {}", self.symbol(), format_real(b)),
            Self::SquareRoot => format!("√{x}"),
            Self::Factorial => format!("{}!", a.trunc() as i64),
            Self::Sine | Self::Cosine | Self::Tangent | Self::NaturalLog => {
                format!("{}({x})", self.symbol())
            }
            Self::Logarithm => format!("log_{}({x})", format_real(b)),
            Self::Absolute => format!("|{x}|"),
        }
    }

    /// Computes the operation without touching any history
    pub fn evaluate(self, a: f64, b: f64) -> CalcResult<Value> {
        let value = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
            Self::Power => power(a, b)?,
            Self::SquareRoot => {
                if a < 0.0 {
                    return Err(CalcError::NegativeSquareRoot);
                }
                a.sqrt()
            }
            Self::Modulo => {
                if b == 0.0 {
                    return Err(CalcError::ModuloByZero);
                }
                floored_modulo(a, b)
            }
            Self::Factorial => return factorial(a).map(Value::Integer),
            Self::Sine => finite_angle(a)?.sin(),
            Self::Cosine => finite_angle(a)?.cos(),
            Self::Tangent => finite_angle(a)?.tan(),
            Self::Logarithm => {
                if a <= 0.0 {
                    return Err(CalcError::NonPositiveLogarithm);
                }
                if b <= 0.0 || b == 1.0 {
                    return Err(CalcError::InvalidLogarithmBase);
                }
                a.log(b)
            }
            Self::NaturalLog => {
                if a <= 0.0 {
                    return Err(CalcError::NonPositiveNaturalLog);
                }
                a.ln()
            }
            Self::Absolute => a.abs(),
        };
        Ok(Value::Real(value))
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let op = match normalized.as_str() {
            "add" | "+" => Self::Add,
            "subtract" | "sub" | "-" => Self::Subtract,
            "multiply" | "mul" | "*" => Self::Multiply,
            "divide" | "div" | "/" => Self::Divide,
            "power" | "pow" | "**" | "^" => Self::Power,
            "sqrt" | "square_root" => Self::SquareRoot,
            "modulo" | "mod" | "%" => Self::Modulo,
            "factorial" | "!" => Self::Factorial,
            "sin" | "sine" => Self::Sine,
            "cos" | "cosine" => Self::Cosine,
            "tan" | "tangent" => Self::Tangent,
            "log" | "logarithm" => Self::Logarithm,
            "ln" | "natural_log" => Self::NaturalLog,
            "abs" | "absolute" => Self::Absolute,
            _ => return Err(ParseOperationError(s.to_string())),
        };
        Ok(op)
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Power where overflow and complex results are errors rather than inf/NaN
fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    let result = base.powf(exponent);
    if result.is_nan() && !base.is_nan() && !exponent.is_nan() {
        return Err(CalcError::ComplexResult);
    }
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(CalcError::Overflow);
    }
    Ok(result)
}

/// Remainder carrying the sign of the divisor, zero included
fn floored_modulo(a: f64, b: f64) -> f64 {
    let remainder = a % b;
    if remainder == 0.0 {
        0.0_f64.copysign(b)
    } else if (remainder < 0.0) != (b < 0.0) {
        remainder + b
    } else {
        remainder
    }
}

/// Trigonometric functions are undefined at infinity
fn finite_angle(a: f64) -> CalcResult<f64> {
    if a.is_infinite() {
        return Err(CalcError::MathDomain);
    }
    Ok(a)
}

fn factorial(n: f64) -> CalcResult<BigUint> {
    if n < 0.0 {
        return Err(CalcError::NegativeFactorial);
    }
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(CalcError::NonIntegerFactorial);
    }
    if n > f64::from(Calculator::MAX_FACTORIAL) {
        return Err(CalcError::FactorialTooLarge);
    }
    let n = n.to_u32().ok_or(CalcError::FactorialTooLarge)?;
    Ok((1..=n).map(BigUint::from).product())
}

/// Calculator holding an append-only trace of successful calculations
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    history: History,
}

impl Calculator {
    /// Largest operand accepted by [`Calculator::factorial`]
    pub const MAX_FACTORIAL: u32 = 170;

    /// Base used by [`Calculator::logarithm`] when none is given
    pub const DEFAULT_LOG_BASE: f64 = 10.0;

    /// Creates a calculator with an empty, unbounded history
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: History::new(),
        }
    }

    /// Dispatches `op` on the operands, recording the trace on success
    pub fn apply(&mut self, op: Operation, a: f64, b: f64) -> CalcResult<Value> {
        let value = op.evaluate(a, b)?;
        self.history.record(op, &op.expression(a, b), value.clone());
        Ok(value)
    }

    /// Addition: a + b
    pub fn add(&mut self, a: f64, b: f64) -> CalcResult<Value> {
        self.apply(Operation::Add, a, b)
    }

    /// Subtraction: a - b
    pub fn subtract(&mut self, a: f64, b: f64) -> CalcResult<Value> {
        self.apply(Operation::Subtract, a, b)
    }

    /// Multiplication: a * b
    pub fn multiply(&mut self, a: f64, b: f64) -> CalcResult<Value> {
        self.apply(Operation::Multiply, a, b)
    }

    /// Division: a / b
    pub fn divide(&mut self, a: f64, b: f64) -> CalcResult<Value> {
        self.apply(Operation::Divide, a, b)
    }

    /// Power: base ** exponent
    pub fn power(&mut self, base: f64, exponent: f64) -> CalcResult<Value> {
        self.apply(Operation::Power, base, exponent)
    }

    /// Square root: √a
    pub fn square_root(&mut self, a: f64) -> CalcResult<Value> {
        self.apply(Operation::SquareRoot, a, 0.0)
    }

    /// Modulo: a % b, result takes the divisor's sign
    pub fn modulo(&mut self, a: f64, b: f64) -> CalcResult<Value> {
        self.apply(Operation::Modulo, a, b)
    }

    /// Factorial: n!, exact for 0 through [`Calculator::MAX_FACTORIAL`]
    pub fn factorial(&mut self, n: f64) -> CalcResult<Value> {
        self.apply(Operation::Factorial, n, 0.0)
    }

    /// Sine of an angle in radians
    pub fn sine(&mut self, a: f64) -> CalcResult<Value> {
        self.apply(Operation::Sine, a, 0.0)
    }

    /// Cosine of an angle in radians
    pub fn cosine(&mut self, a: f64) -> CalcResult<Value> {
        self.apply(Operation::Cosine, a, 0.0)
    }

    /// Tangent of an angle in radians
    pub fn tangent(&mut self, a: f64) -> CalcResult<Value> {
        self.apply(Operation::Tangent, a, 0.0)
    }

    /// Logarithm of `a` in `base`
    pub fn logarithm(&mut self, a: f64, base: f64) -> CalcResult<Value> {
        self.apply(Operation::Logarithm, a, base)
    }

    /// Base-10 logarithm
    pub fn log10(&mut self, a: f64) -> CalcResult<Value> {
        self.logarithm(a, Self::DEFAULT_LOG_BASE)
    }

    /// Natural logarithm
    pub fn natural_log(&mut self, a: f64) -> CalcResult<Value> {
        self.apply(Operation::NaturalLog, a, 0.0)
    }

    /// Absolute value
    pub fn absolute(&mut self, a: f64) -> CalcResult<Value> {
        self.apply(Operation::Absolute, a, 0.0)
    }

    /// Recorded calculations, oldest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Numbered history listing, or a notice when nothing was recorded
    #[must_use]
    pub fn show_history(&self) -> String {
        self.history.report()
    }

    /// Empties the history and returns how many entries were dropped
    pub fn clear_history(&mut self) -> usize {
        self.history.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn real(result: CalcResult<Value>) -> f64 {
        result.unwrap().as_real().unwrap()
    }

    // ===== Operation catalogue tests =====

    #[test]
    fn test_operation_codes_follow_menu_order() {
        for (index, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(usize::from(op.code()), index + 1);
            assert_eq!(Operation::from_code(op.code()), Some(*op));
        }
        assert_eq!(Operation::from_code(0), None);
        assert_eq!(Operation::from_code(15), None);
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn test_operation_aliases() {
        assert_eq!("square_root".parse(), Ok(Operation::SquareRoot));
        assert_eq!(" LN ".parse(), Ok(Operation::NaturalLog));
        assert_eq!("^".parse(), Ok(Operation::Power));
        assert_eq!("mod".parse(), Ok(Operation::Modulo));
    }

    #[test]
    fn test_operation_unknown_name() {
        let err = "cbrt".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid operation: cbrt");
    }

    #[test]
    fn test_operation_arity() {
        assert_eq!(Operation::Add.arity(), 2);
        assert_eq!(Operation::Logarithm.arity(), 2);
        assert_eq!(Operation::Factorial.arity(), 1);
        assert_eq!(Operation::Absolute.arity(), 1);
    }

    #[test]
    fn test_operation_expressions() {
        assert_eq!(Operation::Add.expression(2.0, 3.0), "2.0 + 3.0");
        assert_eq!(Operation::Power.expression(2.0, 8.0), "2.0 ** 8.0");
        assert_eq!(Operation::SquareRoot.expression(16.0, 0.0), "√16.0");
        assert_eq!(Operation::Factorial.expression(5.0, 0.0), "5!");
        assert_eq!(Operation::Sine.expression(0.5, 0.0), "sin(0.5)");
        assert_eq!(Operation::Logarithm.expression(100.0, 10.0), "log_10.0(100.0)");
        assert_eq!(Operation::NaturalLog.expression(1.0, 0.0), "ln(1.0)");
        assert_eq!(Operation::Absolute.expression(-5.0, 0.0), "|-5.0|");
    }

    #[test]
    fn test_operation_serde_uses_names() {
        let json = serde_json::to_string(&Operation::SquareRoot).unwrap();
        assert_eq!(json, "\"sqrt\"");
        let op: Operation = serde_json::from_str("\"natural_log\"").unwrap();
        assert_eq!(op, Operation::NaturalLog);
        assert!(serde_json::from_str::<Operation>("\"nope\"").is_err());
    }

    // ===== Arithmetic tests =====

    #[test]
    fn test_add_subtract_multiply() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.add(2.0, 3.0)), 5.0);
        assert_eq!(real(calc.subtract(5.0, 8.0)), -3.0);
        assert_eq!(real(calc.multiply(-4.0, 2.5)), -10.0);
    }

    #[test]
    fn test_divide() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.divide(6.0, 4.0)), 1.5);
        assert_eq!(calc.divide(1.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(calc.divide(0.0, -0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_power() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.power(2.0, 10.0)), 1024.0);
        assert_eq!(real(calc.power(2.0, -1.0)), 0.5);
        assert_eq!(real(calc.power(-2.0, 3.0)), -8.0);
        assert_eq!(real(calc.power(5.0, 0.0)), 1.0);
    }

    #[test]
    fn test_power_overflow() {
        let mut calc = Calculator::new();
        assert_eq!(calc.power(10.0, 1000.0), Err(CalcError::Overflow));
    }

    #[test]
    fn test_power_complex_result() {
        let mut calc = Calculator::new();
        assert_eq!(calc.power(-8.0, 0.5), Err(CalcError::ComplexResult));
    }

    #[test]
    fn test_power_zero_to_negative() {
        let mut calc = Calculator::new();
        assert_eq!(calc.power(0.0, -1.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_square_root() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.square_root(16.0)), 4.0);
        assert_eq!(real(calc.square_root(0.0)), 0.0);
        assert_eq!(calc.square_root(-1.0), Err(CalcError::NegativeSquareRoot));
    }

    #[test]
    fn test_modulo_takes_divisor_sign() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.modulo(7.0, 3.0)), 1.0);
        assert_eq!(real(calc.modulo(-7.0, 3.0)), 2.0);
        assert_eq!(real(calc.modulo(7.0, -3.0)), -2.0);
        assert_eq!(real(calc.modulo(6.0, 3.0)), 0.0);
        assert_eq!(calc.modulo(1.0, 0.0), Err(CalcError::ModuloByZero));
    }

    #[test]
    fn test_modulo_zero_remainder_takes_divisor_sign() {
        let mut calc = Calculator::new();
        let r = real(calc.modulo(-6.0, 3.0));
        assert!(r.is_sign_positive());
        assert_eq!(calc.modulo(-6.0, 3.0).unwrap().to_string(), "0.0");
        assert!(real(calc.modulo(6.0, -3.0)).is_sign_negative());

        let lines: Vec<String> = calc.history().lines().collect();
        assert_eq!(lines[0], "-6.0 % 3.0 = 0.0");
    }

    #[test]
    fn test_factorial() {
        let mut calc = Calculator::new();
        assert_eq!(
            calc.factorial(5.0).unwrap().as_integer(),
            Some(&BigUint::from(120u32))
        );
        assert_eq!(calc.factorial(0.0).unwrap().to_string(), "1");
    }

    #[test]
    fn test_factorial_errors() {
        let mut calc = Calculator::new();
        assert_eq!(calc.factorial(-1.0), Err(CalcError::NegativeFactorial));
        assert_eq!(calc.factorial(3.5), Err(CalcError::NonIntegerFactorial));
        assert_eq!(calc.factorial(171.0), Err(CalcError::FactorialTooLarge));
        assert_eq!(calc.factorial(f64::NAN), Err(CalcError::NonIntegerFactorial));
        assert_eq!(
            calc.factorial(f64::INFINITY),
            Err(CalcError::NonIntegerFactorial)
        );
    }

    #[test]
    fn test_factorial_checks_sign_before_integrality() {
        let mut calc = Calculator::new();
        assert_eq!(calc.factorial(-1.5), Err(CalcError::NegativeFactorial));
    }

    #[test]
    fn test_factorial_170_is_exact() {
        let mut calc = Calculator::new();
        let value = calc.factorial(170.0).unwrap();
        let digits = value.to_string();
        assert_eq!(digits.len(), 307);
        assert!(digits.starts_with("7257415615307998967"));
        assert!(digits.ends_with(&"0".repeat(41)));
    }

    #[test]
    fn test_trigonometry() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.sine(0.0)), 0.0);
        assert_eq!(real(calc.cosine(0.0)), 1.0);
        assert!((real(calc.sine(std::f64::consts::FRAC_PI_2)) - 1.0).abs() < 1e-12);
        assert!((real(calc.tangent(std::f64::consts::FRAC_PI_4)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trigonometry_rejects_infinity() {
        let mut calc = Calculator::new();
        assert_eq!(calc.sine(f64::INFINITY), Err(CalcError::MathDomain));
        assert_eq!(calc.cosine(f64::NEG_INFINITY), Err(CalcError::MathDomain));
        assert_eq!(calc.tangent(f64::INFINITY), Err(CalcError::MathDomain));
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_logarithm() {
        let mut calc = Calculator::new();
        assert!((real(calc.logarithm(100.0, 10.0)) - 2.0).abs() < 1e-12);
        assert!((real(calc.logarithm(8.0, 2.0)) - 3.0).abs() < 1e-12);
        assert!((real(calc.log10(1000.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_logarithm_errors() {
        let mut calc = Calculator::new();
        assert_eq!(calc.logarithm(5.0, 1.0), Err(CalcError::InvalidLogarithmBase));
        assert_eq!(calc.logarithm(5.0, 0.0), Err(CalcError::InvalidLogarithmBase));
        assert_eq!(calc.logarithm(5.0, -2.0), Err(CalcError::InvalidLogarithmBase));
        assert_eq!(calc.logarithm(-1.0, 10.0), Err(CalcError::NonPositiveLogarithm));
        assert_eq!(calc.logarithm(0.0, 1.0), Err(CalcError::NonPositiveLogarithm));
    }

    #[test]
    fn test_natural_log() {
        let mut calc = Calculator::new();
        assert!((real(calc.natural_log(std::f64::consts::E)) - 1.0).abs() < 1e-12);
        assert_eq!(calc.natural_log(0.0), Err(CalcError::NonPositiveNaturalLog));
    }

    #[test]
    fn test_absolute() {
        let mut calc = Calculator::new();
        assert_eq!(real(calc.absolute(-5.0)), 5.0);
        assert_eq!(real(calc.absolute(3.0)), 3.0);
    }

    // ===== History side-effect tests =====

    #[test]
    fn test_successes_append_in_call_order() {
        let mut calc = Calculator::new();
        calc.add(2.0, 3.0).unwrap();
        calc.square_root(16.0).unwrap();
        calc.factorial(5.0).unwrap();
        calc.logarithm(100.0, 10.0).unwrap();

        let lines: Vec<String> = calc.history().lines().collect();
        assert_eq!(
            lines,
            vec!["2.0 + 3.0 = 5.0", "√16.0 = 4.0", "5! = 120", "log_10.0(100.0) = 2.0"]
        );
    }

    #[test]
    fn test_failures_do_not_append() {
        let mut calc = Calculator::new();
        calc.add(1.0, 1.0).unwrap();
        assert!(calc.divide(1.0, 0.0).is_err());
        assert!(calc.square_root(-4.0).is_err());
        assert!(calc.factorial(171.0).is_err());
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_clear_then_show_history() {
        let mut calc = Calculator::new();
        calc.add(1.0, 2.0).unwrap();
        calc.multiply(3.0, 4.0).unwrap();
        assert_eq!(calc.clear_history(), 2);
        assert!(calc.history().is_empty());
        assert_eq!(calc.show_history(), History::EMPTY_NOTICE);
    }

    #[test]
    fn test_apply_matches_named_methods() {
        let mut by_apply = Calculator::new();
        let mut by_name = Calculator::new();
        assert_eq!(
            by_apply.apply(Operation::Modulo, -7.0, 3.0),
            by_name.modulo(-7.0, 3.0)
        );
        assert_eq!(
            by_apply.apply(Operation::Absolute, -2.0, 99.0),
            by_name.absolute(-2.0)
        );
        assert_eq!(by_apply.history().len(), by_name.history().len());
    }

    proptest! {
        #[test]
        fn prop_history_len_counts_successes(
            calls in prop::collection::vec((0usize..14, -50.0f64..50.0, -5.0f64..5.0), 0..40)
        ) {
            let mut calc = Calculator::new();
            let mut successes = 0;
            for (index, a, b) in calls {
                if calc.apply(Operation::ALL[index], a, b).is_ok() {
                    successes += 1;
                }
            }
            prop_assert_eq!(calc.history().len(), successes);
        }
    }
}
