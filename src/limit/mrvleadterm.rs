//! MRV leading-term extraction, tying together `mrv`, `rewrite`, and
//! `leadterm`, plus the moveup/movedown handling for the degenerate case
//! where `x` itself dominates (§4.6).

use crate::Expr;
use crate::core::error::LimitError;
use crate::core::expr::ExprKind;
use crate::core::rational::Rational;
use crate::core::symbol::{Symbol, fresh_dummy};

use super::check_depth;
use super::driver::Limit;
use super::mrv::mrv;
use super::rewrite::rewrite;
use super::series::leadterm;

/// Return `(c0, e0)` for `e` as `x -> infinity`.
///
/// Canonicalizes `e`, computes its MRV set, and — unless `e` is already
/// independent of `x` — rewrites `e` in terms of a fresh `w` and extracts
/// its leading term.
///
/// When the MRV set degenerates to containing the bare `x` (no
/// transcendental dominates the polynomial growth), applies moveup/movedown:
/// `x -> exp(x)` is substituted into both `e` *and the already-computed Ω*
/// in lockstep, and the rewrite/leadterm steps proceed directly on the
/// moved pair. Recomputing `mrv` on the moved expression instead (rather
/// than reusing the moved Ω) would ask `limitinf(x, x)` again for the very
/// `exp(x)` moveup just introduced, since `mrv`'s `exp(u)` rule tests
/// whether `u` tends to infinity — an infinite regress for this exact
/// degenerate case. Reusing the moved Ω sidesteps that call entirely.
pub(crate) fn mrvleadterm(
    cfg: &Limit,
    e: &Expr,
    x: &Symbol,
    depth: u32,
) -> Result<(Expr, Rational), LimitError> {
    check_depth(depth, cfg.max_depth)?;
    let orig_e = e.canonicalize();
    if !orig_e.depends_on(x) {
        return Ok((orig_e, Rational::from_integer(0)));
    }

    let omega = mrv(cfg, &orig_e, x, depth + 1)?;
    if omega.is_empty() {
        return Ok((orig_e, Rational::from_integer(0)));
    }

    let degenerate = omega
        .iter()
        .any(|t| matches!(&t.kind, ExprKind::Symbol(s) if s == x));

    let (e, omega) = if degenerate {
        let moved_e = moveup(&orig_e, x);
        let moved_omega: Vec<Expr> = omega.iter().map(|t| moveup(t, x)).collect();
        (moved_e, moved_omega)
    } else {
        (orig_e.clone(), omega)
    };

    let w = fresh_dummy();
    let f = rewrite(cfg, &e, &omega, x, &w, depth + 1)?;
    let (c0, e0) = leadterm(cfg, &f, &w, depth + 1)?;

    if degenerate {
        let result = movedown(&c0, x);
        // `moveup` substitutes `x -> exp(x)`, but a literal `ln(x)` inside
        // `e` folds straight back through `Expr::ln`'s `Ln(Exp(a)) -> a`
        // identity (§3), undoing the substitution before `rewrite` ever
        // sees it. When that happens the whole round-trip is a no-op:
        // `result` comes back identical to `orig_e` with order zero, and a
        // caller that keeps recursing on an unchanged pair would never
        // terminate except by hitting the generic depth cap. Fail closed
        // here instead — this is the documented branch-sensitivity gap in
        // moveup/movedown (see `DESIGN.md`), not a transient failure.
        if e0.is_zero() && result == orig_e {
            return Err(LimitError::pole(format!(
                "moveup/movedown made no progress on {orig_e} as x -> infinity (likely a log-type singularity the series engine cannot represent)"
            )));
        }
        Ok((result, e0))
    } else {
        Ok((c0, e0))
    }
}

/// `x -> exp(x)`, lifting polynomial growth into the exponential
/// hierarchy so the rewriter has a non-trivial class to factor out.
fn moveup(e: &Expr, x: &Symbol) -> Expr {
    e.substitute(x, &Expr::exp(x.to_expr())).canonicalize()
}

/// `x -> ln(x)`, the inverse of [`moveup`], applied to the result.
fn movedown(e: &Expr, x: &Symbol) -> Expr {
    e.substitute(x, &Expr::ln(x.to_expr())).canonicalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::symb;

    #[test]
    fn constant_has_order_zero() {
        let cfg = Limit::new();
        let x = symb("q_mrvleadterm_constant_has_order_zero_x");
        let (c, e0) = mrvleadterm(&cfg, &Expr::number(5, 1), &x, 0).expect("should succeed");
        assert_eq!(c, Expr::number(5, 1));
        assert_eq!(e0, Rational::from_integer(0));
    }

    #[test]
    fn bare_x_moves_up_and_back_down() {
        let cfg = Limit::new();
        let x = symb("q_mrvleadterm_bare_x_moves_up_and_back_down_x");
        let (c, e0) = mrvleadterm(&cfg, &x.to_expr(), &x, 0).expect("should succeed");
        // x rewritten in terms of w = 1/exp(x) has leading term 1 * w^(-1).
        assert_eq!(c, Expr::number(1, 1));
        assert_eq!(e0, Rational::from_integer(-1));
    }

    #[test]
    fn exp_of_x_has_order_zero_coefficient_one() {
        let cfg = Limit::new();
        let x = symb("q_mrvleadterm_exp_of_x_has_order_zero_x");
        let (c, e0) = mrvleadterm(&cfg, &Expr::exp(x.to_expr()), &x, 0).expect("should succeed");
        assert_eq!(c, Expr::number(1, 1));
        assert_eq!(e0, Rational::from_integer(0));
    }

    #[test]
    fn bare_ln_x_fails_closed_instead_of_looping() {
        // moveup(ln(x)) folds straight back through Ln(Exp(a)) -> a, so the
        // degenerate branch makes no progress. This must surface as a
        // PoleError immediately, not recurse until the depth cap trips.
        let cfg = Limit::new();
        let x = symb("q_mrvleadterm_bare_ln_x_fails_closed_x");
        let err = mrvleadterm(&cfg, &Expr::ln(x.to_expr()), &x, 0).expect_err("should fail closed");
        assert!(matches!(err, LimitError::PoleError { .. }));
    }
}
