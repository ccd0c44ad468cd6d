use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::errors::EvalErrorKind;

fn q(n: i64, d: i64) -> Number {
    Number::new_rational(n, d).unwrap()
}

#[test]
fn kind_normalization() {
    let five = q(10, 2);
    assert_eq!(five.kind(), NumberKind::Natural);
    assert_eq!(five.to_string(), "5");

    let minus_five = q(-10, 2);
    assert_eq!(minus_five.kind(), NumberKind::Integer);
    assert_eq!(minus_five.to_string(), "-5");

    let five_halves = q(10, 4);
    assert_eq!(five_halves.kind(), NumberKind::Rational);
    assert_eq!(five_halves.to_string(), "5/2");
}

#[test]
fn rational_with_zero_denominator_fails() {
    assert_eq!(
        Number::new_rational(1, 0).unwrap_err().kind,
        EvalErrorKind::DivisionByZero
    );
}

#[test]
fn parses_exact_literals() {
    assert_eq!(Number::parse_literal("42").unwrap().to_string(), "42");
    assert_eq!(Number::parse_literal("-7").unwrap().kind(), NumberKind::Integer);
    assert_eq!(Number::parse_literal("2.5").unwrap().to_string(), "5/2");
    assert_eq!(Number::parse_literal("1/3").unwrap().kind(), NumberKind::Rational);
    assert_eq!(Number::parse_literal("4.0").unwrap().kind(), NumberKind::Natural);
    assert!(Number::parse_literal("1.x").is_err());
    assert!(Number::parse_literal("seven").is_err());
}

#[test]
fn equality_crosses_kinds() {
    assert_eq!(Number::int(5), Number::real(5.0));
    assert_eq!(q(1, 2), Number::real(0.5));
    assert!(Number::int(2) < Number::real(2.5));
    assert!(q(1, 3) < q(1, 2));
    assert_eq!(Number::real(5.0).canonical_text(), Number::int(5).canonical_text());
}

#[test]
fn exact_arithmetic_stays_exact() {
    let sum = q(1, 2).add(&q(1, 3));
    assert_eq!(sum.to_string(), "5/6");
    assert_eq!(q(1, 2).add(&q(1, 2)).kind(), NumberKind::Natural);
    assert_eq!(Number::int(3).sub(&Number::int(5)).kind(), NumberKind::Integer);
    assert_eq!(Number::int(7).div(&Number::int(2)).unwrap().to_string(), "7/2");
}

#[test]
fn division_by_zero_fails() {
    for op in [Number::div, Number::modulo, Number::int_div] {
        assert_eq!(
            op(&Number::int(1), &Number::int(0)).unwrap_err().kind,
            EvalErrorKind::DivisionByZero
        );
    }
    assert_eq!(
        Number::int(1).div(&Number::real(0.0)).unwrap_err().kind,
        EvalErrorKind::DivisionByZero
    );
}

#[test]
fn modulo_and_int_div_floor() {
    assert_eq!(Number::int(7).modulo(&Number::int(3)).unwrap(), Number::int(1));
    assert_eq!(Number::int(-7).modulo(&Number::int(3)).unwrap(), Number::int(2));
    assert_eq!(Number::int(-7).int_div(&Number::int(2)).unwrap(), Number::int(-4));
    let real = Number::real(7.0).modulo(&Number::int(4)).unwrap();
    assert_eq!(real.kind(), NumberKind::Real);
    assert_eq!(real, Number::int(3));
}

#[test]
fn modulo_rejects_non_integers() {
    let err = q(5, 2).modulo(&Number::int(2)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    assert!(Number::int(5).int_div(&Number::real(1.5)).is_err());
}

#[test]
fn negate_and_abs() {
    assert_eq!(Number::int(4).neg().kind(), NumberKind::Integer);
    assert_eq!(Number::int(-4).abs().kind(), NumberKind::Natural);
    assert_eq!(q(-1, 2).abs().to_string(), "1/2");
    assert_eq!(Number::real(-1.5).abs().kind(), NumberKind::Real);
}

#[test]
fn power_with_integer_exponents() {
    assert_eq!(Number::int(2).pow(&Number::int(10)).unwrap(), Number::int(1024));
    assert_eq!(Number::int(2).pow(&Number::int(-2)).unwrap().to_string(), "1/4");
    assert_eq!(q(2, 3).pow(&Number::int(2)).unwrap().to_string(), "4/9");
    assert_eq!(Number::int(0).pow(&Number::int(3)).unwrap(), Number::int(0));
}

#[test]
fn power_extracts_exact_roots() {
    let root = Number::int(4).pow(&q(1, 2)).unwrap();
    assert_eq!(root.kind(), NumberKind::Natural);
    assert_eq!(root.to_string(), "2");

    let cube = q(8, 27).pow(&q(2, 3)).unwrap();
    assert_eq!(cube.to_string(), "4/9");

    let odd = Number::int(-8).pow(&q(1, 3)).unwrap();
    assert_eq!(odd, Number::int(-2));
}

#[test]
fn power_falls_back_to_real_without_exact_root() {
    let root = Number::int(2).pow(&q(1, 2)).unwrap();
    assert_eq!(root.kind(), NumberKind::Real);
    assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);
}

#[test]
fn power_edge_cases() {
    assert!(matches!(
        Number::int(0).pow(&Number::int(0)).unwrap_err().kind,
        EvalErrorKind::Undefined { .. }
    ));
    assert_eq!(
        Number::int(0).pow(&Number::int(-1)).unwrap_err().kind,
        EvalErrorKind::DivisionByZero
    );
    assert!(matches!(
        Number::int(-4).pow(&q(1, 2)).unwrap_err().kind,
        EvalErrorKind::Undefined { .. }
    ));
}

fn exact_number() -> impl Strategy<Value = Number> {
    (-1000i64..1000, 1i64..50).prop_map(|(n, d)| q(n, d))
}

fn real_number() -> impl Strategy<Value = Number> {
    (-1.0e6f64..1.0e6).prop_map(Number::real)
}

proptest! {
    #[test]
    fn real_contaminates_every_binary_operation(r in real_number(), e in exact_number()) {
        prop_assert_eq!(r.add(&e).kind(), NumberKind::Real);
        prop_assert_eq!(e.add(&r).kind(), NumberKind::Real);
        prop_assert_eq!(r.sub(&e).kind(), NumberKind::Real);
        prop_assert_eq!(r.mul(&e).kind(), NumberKind::Real);
        if !e.is_zero() {
            prop_assert_eq!(r.div(&e).unwrap().kind(), NumberKind::Real);
        }
    }

    #[test]
    fn kind_is_derived_from_value(n in -1000i64..1000, d in 1i64..50) {
        let value = q(n, d);
        let expected = if n % d != 0 {
            NumberKind::Rational
        } else if n < 0 {
            NumberKind::Integer
        } else {
            NumberKind::Natural
        };
        prop_assert_eq!(value.kind(), expected);
    }

    #[test]
    fn subtraction_inverts_addition(a in exact_number(), b in exact_number()) {
        prop_assert_eq!(a.add(&b).sub(&b), a);
    }
}
