//! Property-based tests for calculator operations

use abacus::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Any of the fourteen operations
fn operation_strategy() -> impl Strategy<Value = Operation> {
    (0usize..Operation::ALL.len()).prop_map(|i| Operation::ALL[i])
}

/// Finite reals of moderate magnitude
fn real_strategy() -> impl Strategy<Value = f64> {
    -1e6f64..1e6f64
}

fn real_of(result: CalcResult<Value>) -> f64 {
    result.unwrap().as_real().unwrap()
}

// ===== Arithmetic identities =====

proptest! {
    #[test]
    fn prop_add_matches_host(a in real_strategy(), b in real_strategy()) {
        let mut calc = Calculator::new();
        prop_assert_eq!(real_of(calc.add(a, b)), a + b);
    }

    #[test]
    fn prop_subtract_matches_host(a in real_strategy(), b in real_strategy()) {
        let mut calc = Calculator::new();
        prop_assert_eq!(real_of(calc.subtract(a, b)), a - b);
    }

    #[test]
    fn prop_multiply_matches_host(a in real_strategy(), b in real_strategy()) {
        let mut calc = Calculator::new();
        prop_assert_eq!(real_of(calc.multiply(a, b)), a * b);
    }

    #[test]
    fn prop_divide_by_zero_always_fails(a in real_strategy()) {
        let mut calc = Calculator::new();
        prop_assert_eq!(calc.divide(a, 0.0), Err(CalcError::DivisionByZero));
        prop_assert!(calc.history().is_empty());
    }

    #[test]
    fn prop_divide_matches_host(a in real_strategy(), b in real_strategy()) {
        prop_assume!(b != 0.0);
        let mut calc = Calculator::new();
        prop_assert_eq!(real_of(calc.divide(a, b)), a / b);
    }

    #[test]
    fn prop_modulo_has_divisor_sign(a in real_strategy(), b in real_strategy()) {
        prop_assume!(b != 0.0);
        let mut calc = Calculator::new();
        let r = real_of(calc.modulo(a, b));
        prop_assert_eq!(r.is_sign_negative(), b < 0.0, "{} % {} = {}", a, b, r);
        prop_assert!(r.abs() <= b.abs());
    }

    #[test]
    fn prop_exact_multiples_leave_unsigned_zero(k in -1000i32..1000, b in 1u32..50) {
        let mut calc = Calculator::new();
        let b = f64::from(b);
        let r = calc.modulo(f64::from(k) * b, b).unwrap();
        prop_assert_eq!(r.to_string(), "0.0");
    }

    #[test]
    fn prop_absolute_is_non_negative(a in real_strategy()) {
        let mut calc = Calculator::new();
        prop_assert!(real_of(calc.absolute(a)) >= 0.0);
    }

    #[test]
    fn prop_sqrt_negative_fails(a in -1e6f64..-1e-9f64) {
        let mut calc = Calculator::new();
        prop_assert_eq!(calc.square_root(a), Err(CalcError::NegativeSquareRoot));
    }

    #[test]
    fn prop_factorial_recurrence(n in 1u32..=170) {
        let mut calc = Calculator::new();
        let current = calc.factorial(f64::from(n)).unwrap();
        let previous = calc.factorial(f64::from(n - 1)).unwrap();
        let expected = previous.as_integer().unwrap().clone() * n;
        prop_assert_eq!(current.as_integer().unwrap(), &expected);
    }

    #[test]
    fn prop_factorial_above_limit_fails(n in 171u32..100_000) {
        let mut calc = Calculator::new();
        prop_assert_eq!(calc.factorial(f64::from(n)), Err(CalcError::FactorialTooLarge));
    }
}

// ===== History invariants =====

proptest! {
    #[test]
    fn prop_success_appends_exactly_one(op in operation_strategy(), a in real_strategy(), b in real_strategy()) {
        let mut calc = Calculator::new();
        let before = calc.history().len();
        let outcome = calc.apply(op, a, b);
        let after = calc.history().len();
        if outcome.is_ok() {
            prop_assert_eq!(after, before + 1);
            let last = calc.history().last().unwrap();
            prop_assert_eq!(last.operation, op);
            prop_assert_eq!(&last.result, outcome.as_ref().unwrap());
        } else {
            prop_assert_eq!(after, before);
        }
    }

    #[test]
    fn prop_evaluate_is_pure(op in operation_strategy(), a in real_strategy(), b in real_strategy()) {
        let mut calc = Calculator::new();
        prop_assert_eq!(op.evaluate(a, b), calc.apply(op, a, b));
    }

    #[test]
    fn prop_clear_always_empties(ops in prop::collection::vec(operation_strategy(), 0..20)) {
        let mut calc = Calculator::new();
        for op in &ops {
            let _ = calc.apply(*op, 3.0, 2.0);
        }
        let recorded = calc.history().len();
        prop_assert_eq!(calc.clear_history(), recorded);
        prop_assert_eq!(calc.show_history(), History::EMPTY_NOTICE);
    }

    #[test]
    fn prop_operation_name_round_trip(op in operation_strategy()) {
        prop_assert_eq!(op.name().parse::<Operation>(), Ok(op));
        prop_assert_eq!(Operation::from_code(op.code()), Some(op));
    }

    #[test]
    fn prop_format_parses_back(a in real_strategy()) {
        prop_assert_eq!(parse_operand(&format_real(a)), Some(a));
    }
}
