//! `depends_on`, `differentiate`, and the two substitution primitives
//! (§6's external-interface contract for the expression kernel).
//!
//! There are two distinct substitutions in this crate, and the limit
//! driver needs both:
//! - [`substitute`] replaces a *symbol* (by identity) with a replacement
//!   expression — used to normalise `limit(e,z,z0)` into `limitinf`, and by
//!   `mrvleadterm`'s moveup/movedown (§4.6 step 3).
//! - [`replace`] replaces a *subexpression* (by structural equality) with a
//!   replacement expression — used by the rewriter (§4.4) to swap every
//!   element of the MRV set for its monomial in `w`.
//!
//! Both rebuild through the canonicalising constructors at every step
//! (§9's "substitute-and-canonicalise discipline"), so neither can leave a
//! stale, non-canonical node behind.

use super::{Expr, ExprKind};
use crate::core::rational::Rational;
use crate::core::symbol::Symbol;

impl Expr {
    /// Whether `self` depends on `x`, i.e. `∂self/∂x != 0` (§3 invariant 2).
    #[must_use]
    pub fn depends_on(&self, x: &Symbol) -> bool {
        depends_on(self, x)
    }

    /// Substitute the symbol `old` with `new` throughout `self`.
    #[must_use]
    pub fn substitute(&self, old: &Symbol, new: &Self) -> Self {
        substitute(self, old, new)
    }

    /// `∂self/∂x`, via the sum, product, power, and chain rules.
    #[must_use]
    pub fn differentiate(&self, x: &Symbol) -> Self {
        differentiate(self, x)
    }
}

pub(crate) fn depends_on(e: &Expr, x: &Symbol) -> bool {
    match &e.kind {
        ExprKind::Number(_) | ExprKind::Infinity(_) => false,
        ExprKind::Symbol(s) => s == x,
        ExprKind::Add(ts) | ExprKind::Mul(ts) => ts.iter().any(|t| depends_on(t, x)),
        ExprKind::Pow(b, _) => depends_on(b, x),
        ExprKind::Exp(a) | ExprKind::Ln(a) => depends_on(a, x),
    }
}

pub(crate) fn substitute(e: &Expr, old: &Symbol, new: &Expr) -> Expr {
    match &e.kind {
        ExprKind::Symbol(s) if s == old => new.clone(),
        ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Infinity(_) => e.clone(),
        ExprKind::Add(ts) => Expr::add(ts.iter().map(|t| substitute(t, old, new)).collect()),
        ExprKind::Mul(ts) => Expr::mul(ts.iter().map(|t| substitute(t, old, new)).collect()),
        ExprKind::Pow(b, exp) => Expr::pow(substitute(b, old, new), *exp),
        ExprKind::Exp(a) => Expr::exp(substitute(a, old, new)),
        ExprKind::Ln(a) => Expr::ln(substitute(a, old, new)),
    }
}

/// Replace every subtree structurally equal to `old` with `new`.
///
/// Unlike [`substitute`], this matches on value, not identity — it is how
/// the rewriter (§4.4) swaps `exp(u) ∈ Ω` for its monomial in `w`.
pub(crate) fn replace(e: &Expr, old: &Expr, new: &Expr) -> Expr {
    if e == old {
        return new.clone();
    }
    match &e.kind {
        ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Infinity(_) => e.clone(),
        ExprKind::Add(ts) => Expr::add(ts.iter().map(|t| replace(t, old, new)).collect()),
        ExprKind::Mul(ts) => Expr::mul(ts.iter().map(|t| replace(t, old, new)).collect()),
        ExprKind::Pow(b, exp) => Expr::pow(replace(b, old, new), *exp),
        ExprKind::Exp(a) => Expr::exp(replace(a, old, new)),
        ExprKind::Ln(a) => Expr::ln(replace(a, old, new)),
    }
}

pub(crate) fn differentiate(e: &Expr, x: &Symbol) -> Expr {
    match &e.kind {
        ExprKind::Number(_) | ExprKind::Infinity(_) => Expr::number(0, 1),
        ExprKind::Symbol(s) => {
            if s == x {
                Expr::number(1, 1)
            } else {
                Expr::number(0, 1)
            }
        }
        ExprKind::Add(ts) => Expr::add(ts.iter().map(|t| differentiate(t, x)).collect()),
        ExprKind::Mul(ts) => {
            // Generalised product rule: sum over i of (d/dx ts[i]) * prod(ts[!=i]).
            let mut sum_terms = Vec::with_capacity(ts.len());
            for i in 0..ts.len() {
                let factors: Vec<Expr> = ts
                    .iter()
                    .enumerate()
                    .map(|(j, t)| if i == j { differentiate(t, x) } else { (**t).clone() })
                    .collect();
                sum_terms.push(Expr::mul(factors));
            }
            Expr::add(sum_terms)
        }
        ExprKind::Pow(b, exp) => {
            let db = differentiate(b, x);
            Expr::mul(vec![
                Expr::number_from(*exp),
                Expr::pow((**b).clone(), *exp - Rational::from_integer(1)),
                db,
            ])
        }
        ExprKind::Exp(a) => Expr::mul(vec![e.clone(), differentiate(a, x)]),
        ExprKind::Ln(a) => Expr::mul(vec![
            differentiate(a, x),
            Expr::pow((**a).clone(), Rational::from_integer(-1)),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::symb;

    #[test]
    fn depends_on_detects_the_variable() {
        let x = symb("q_depends_on_detects_the_variable_x");
        let y = symb("q_depends_on_detects_the_variable_y");
        let e = Expr::add(vec![Expr::from_symbol(x.clone()), Expr::number(1, 1)]);
        assert!(e.depends_on(&x));
        assert!(!e.depends_on(&y));
    }

    #[test]
    fn differentiate_power_rule() {
        let x = symb("q_differentiate_power_rule_x");
        let e = Expr::pow(Expr::from_symbol(x.clone()), Rational::new(3, 1));
        let d = e.differentiate(&x);
        let expected = Expr::mul(vec![
            Expr::number(3, 1),
            Expr::pow(Expr::from_symbol(x), Rational::new(2, 1)),
        ]);
        assert_eq!(d, expected);
    }

    #[test]
    fn differentiate_exp_is_chain_rule() {
        let x = symb("q_differentiate_exp_is_chain_rule_x");
        let e = Expr::exp(Expr::from_symbol(x.clone()));
        let d = e.differentiate(&x);
        assert_eq!(d, e);
    }

    #[test]
    fn substitute_replaces_symbol() {
        let x = symb("q_substitute_replaces_symbol_x");
        let e = Expr::add(vec![Expr::from_symbol(x.clone()), Expr::number(1, 1)]);
        let got = e.substitute(&x, &Expr::number(5, 1));
        assert_eq!(got, Expr::number(6, 1));
    }

    #[test]
    fn replace_matches_structurally() {
        let x = symb("q_replace_matches_structurally_x");
        let w = symb("q_replace_matches_structurally_w");
        let target = Expr::exp(Expr::from_symbol(x.clone()));
        let e = Expr::add(vec![target.clone(), Expr::number(1, 1)]);
        let got = replace(&e, &target, &Expr::from_symbol(w.clone()));
        assert_eq!(got, Expr::add(vec![Expr::from_symbol(w), Expr::number(1, 1)]));
    }
}
