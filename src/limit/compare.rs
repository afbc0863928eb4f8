//! The comparability-class comparator (§4.2).

use num_traits::Zero;

use crate::Expr;
use crate::core::error::LimitError;
use crate::core::expr::ExprKind;
use crate::core::rational::Rational;
use crate::core::symbol::Symbol;

use super::driver::{Limit, limitinf};

/// The result of comparing two expressions' comparability classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    /// `a`'s class is strictly below `b`'s.
    Less,
    /// `a` and `b` share a comparability class.
    Equal,
    /// `a`'s class is strictly above `b`'s.
    Greater,
}

/// `compare(a, b, x) = limitinf(ln(a)/ln(b), x)`, classified into
/// `Less`/`Equal`/`Greater` by whether that limit is `0`, finite nonzero,
/// or `∞`.
///
/// Callers only invoke this on positive, unbounded expressions (elements
/// of an MRV set, or the bare variable), so `ln a`/`ln b` are well-defined
/// and the recursive `limitinf` call below operates on a strictly smaller
/// expression than whatever produced `a`/`b`.
pub(crate) fn compare(
    cfg: &Limit,
    a: &Expr,
    b: &Expr,
    x: &Symbol,
    depth: u32,
) -> Result<Comparison, LimitError> {
    let ratio = Expr::mul(vec![
        Expr::ln(a.clone()),
        Expr::pow(Expr::ln(b.clone()), Rational::from_integer(-1)),
    ]);
    let c = limitinf(cfg, &ratio, x, depth + 1)?;
    match &c.kind {
        ExprKind::Number(r) if r.is_zero() => Ok(Comparison::Less),
        ExprKind::Infinity(_) => Ok(Comparison::Greater),
        _ => Ok(Comparison::Equal),
    }
}
