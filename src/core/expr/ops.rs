//! Operator overloading for [`Expr`], so worked examples (and doctests)
//! read as ordinary arithmetic instead of constructor calls.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Expr;
use crate::core::rational::Rational;
use crate::core::symbol::Symbol;

impl Add for Expr {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::add(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::add(vec![self, Self::mul(vec![Self::number(-1, 1), rhs])])
    }
}

impl Mul for Expr {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::mul(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::mul(vec![self, Self::pow(rhs, Rational::from_integer(-1))])
    }
}

impl Neg for Expr {
    type Output = Self;
    fn neg(self) -> Self {
        Self::mul(vec![Self::number(-1, 1), self])
    }
}

macro_rules! impl_scalar_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl Add<$t> for Expr {
                type Output = Expr;
                fn add(self, rhs: $t) -> Expr {
                    Expr::add(vec![self, Expr::number(i64::from(rhs), 1)])
                }
            }
            impl Sub<$t> for Expr {
                type Output = Expr;
                fn sub(self, rhs: $t) -> Expr {
                    Expr::add(vec![self, Expr::number(-i64::from(rhs), 1)])
                }
            }
            impl Mul<$t> for Expr {
                type Output = Expr;
                fn mul(self, rhs: $t) -> Expr {
                    Expr::mul(vec![self, Expr::number(i64::from(rhs), 1)])
                }
            }
            impl Div<$t> for Expr {
                type Output = Expr;
                fn div(self, rhs: $t) -> Expr {
                    Expr::mul(vec![self, Expr::pow(Expr::number(i64::from(rhs), 1), Rational::from_integer(-1))])
                }
            }
        )*
    };
}

impl_scalar_ops!(i32, i64);

impl Add<Symbol> for Expr {
    type Output = Self;
    fn add(self, rhs: Symbol) -> Self {
        Self::add(vec![self, rhs.to_expr()])
    }
}
impl Sub<Symbol> for Expr {
    type Output = Self;
    fn sub(self, rhs: Symbol) -> Self {
        Self::add(vec![self, Self::mul(vec![Self::number(-1, 1), rhs.to_expr()])])
    }
}
impl Mul<Symbol> for Expr {
    type Output = Self;
    fn mul(self, rhs: Symbol) -> Self {
        Self::mul(vec![self, rhs.to_expr()])
    }
}
impl Div<Symbol> for Expr {
    type Output = Self;
    fn div(self, rhs: Symbol) -> Self {
        Self::mul(vec![self, Self::pow(rhs.to_expr(), Rational::from_integer(-1))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_operators_match_constructors() {
        let x = Expr::symbol("q_arithmetic_operators_match_constructors_x");
        assert_eq!(x.clone() + Expr::number(1, 1), Expr::add(vec![x.clone(), Expr::number(1, 1)]));
        assert_eq!(x.clone() - 1, Expr::add(vec![x.clone(), Expr::number(-1, 1)]));
        assert_eq!(-x.clone(), Expr::mul(vec![Expr::number(-1, 1), x]));
    }
}
