//! The six concrete limit scenarios from the specification's testable
//! properties table, each asserting the exact returned expression.

use crate::core::rational::Rational;
use crate::core::symbol::symb;
use crate::{limit, Expr, Point};

#[test]
fn scenario_1_x_at_infinity_is_infinity() {
    let x = symb("q_scenario_1_x");
    let got = limit(&x.to_expr(), &x, &Point::Infinity).expect("limit should succeed");
    assert_eq!(got, Expr::infinity(true));
}

#[test]
fn scenario_2_one_over_x_at_infinity_is_zero() {
    let x = symb("q_scenario_2_x");
    let e = Expr::pow(x.to_expr(), Rational::from_integer(-1));
    let got = limit(&e, &x, &Point::Infinity).expect("limit should succeed");
    assert_eq!(got, Expr::number(0, 1));
}

#[test]
fn scenario_3_exp_plus_x_at_infinity_is_infinity() {
    let x = symb("q_scenario_3_x");
    let e = Expr::add(vec![Expr::exp(x.to_expr()), x.to_expr()]);
    let got = limit(&e, &x, &Point::Infinity).expect("limit should succeed");
    assert_eq!(got, Expr::infinity(true));
}

#[test]
fn scenario_4_exp_minus_one_over_x_at_zero_is_one() {
    let x = symb("q_scenario_4_x");
    let numerator = Expr::add(vec![Expr::exp(x.to_expr()), Expr::number(-1, 1)]);
    let e = Expr::mul(vec![numerator, Expr::pow(x.to_expr(), Rational::from_integer(-1))]);
    let z0 = Point::Finite(Expr::number(0, 1));
    let got = limit(&e, &x, &z0).expect("limit should succeed");
    assert_eq!(got, Expr::number(1, 1));
}

#[test]
fn scenario_5_ln_x_over_x_at_infinity_is_zero() {
    let x = symb("q_scenario_5_x");
    let e = Expr::mul(vec![Expr::ln(x.to_expr()), Expr::pow(x.to_expr(), Rational::from_integer(-1))]);
    let got = limit(&e, &x, &Point::Infinity).expect("limit should succeed");
    assert_eq!(got, Expr::number(0, 1));
}

#[test]
fn scenario_6_exp_ln_over_exp_shifted_at_infinity_is_zero() {
    let x = symb("q_scenario_6_x");
    // exp(x) * ln(x) / exp(x + 1)
    let numerator = Expr::mul(vec![Expr::exp(x.to_expr()), Expr::ln(x.to_expr())]);
    let denom = Expr::exp(Expr::add(vec![x.to_expr(), Expr::number(1, 1)]));
    let e = Expr::mul(vec![numerator, Expr::pow(denom, Rational::from_integer(-1))]);
    let got = limit(&e, &x, &Point::Infinity).expect("limit should succeed");
    assert_eq!(got, Expr::number(0, 1));
}
