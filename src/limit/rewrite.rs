//! The rewrite-into-`w` transformation (§4.4).

use num_traits::Zero;

use crate::Expr;
use crate::core::error::LimitError;
use crate::core::expr::{ExprKind, replace};
use crate::core::rational::Rational;
use crate::core::symbol::Symbol;

use super::check_depth;
use super::driver::Limit;
use super::mrv::mrv;
use super::mrvleadterm::mrvleadterm;
use super::sign::sign;

/// Rewrite `e`, replacing every element of `omega` by a monomial in `w`
/// such that `w -> 0+` as `x -> infinity`.
///
/// `omega` is assumed to be an MRV set of `exp(u)` nodes all in a single
/// comparability class (the bare-variable degenerate case is resolved by
/// `mrvleadterm`'s moveup step before this is ever called).
pub(crate) fn rewrite(
    cfg: &Limit,
    e: &Expr,
    omega: &[Expr],
    x: &Symbol,
    w: &Symbol,
    depth: u32,
) -> Result<Expr, LimitError> {
    check_depth(depth, cfg.max_depth)?;
    if omega.is_empty() {
        return Ok(e.clone());
    }

    // Step 1: sort by |mrv(arg(t),x)| descending; the representative `g` is
    // the structurally simplest element, i.e. the last after sorting.
    //
    // This sizes the *argument* of each `exp` element, not the element
    // itself: sizing `t` directly (e.g. `mrv(exp(x), x)`) would re-enter
    // `mrv`'s `exp(u)` rule, which asks `limitinf(u, x)` — for `u = x` that
    // is the very call that got us here via `mrvleadterm`'s degenerate-case
    // moveup, an infinite regress. Sizing the bare argument instead hits
    // `mrv`'s direct `x` base case with no further recursion.
    let mut sized = Vec::with_capacity(omega.len());
    for t in omega {
        let arg = match &t.kind {
            ExprKind::Exp(u) => (**u).clone(),
            ExprKind::Symbol(s) if s == x => x.to_expr(),
            _ => {
                return Err(LimitError::class_mismatch(
                    "MRV set element is neither exp(u) nor the bare variable",
                ));
            }
        };
        let m = mrv(cfg, &arg, x, depth + 1)?;
        sized.push((t.clone(), m.len()));
    }
    sized.sort_by(|a, b| b.1.cmp(&a.1));
    let g = sized
        .last()
        .map(|(t, _)| t.clone())
        .ok_or_else(|| LimitError::class_mismatch("rewrite called with an empty MRV set"))?;

    let g_arg = match &g.kind {
        ExprKind::Exp(u) => (**u).clone(),
        ExprKind::Symbol(s) if s == x => x.to_expr(),
        _ => {
            return Err(LimitError::class_mismatch(
                "MRV set representative is neither exp(u) nor the bare variable",
            ));
        }
    };

    // Step 2: the substitution variable tends to 0+ as x -> infinity:
    // 1/w if g -> infinity, w otherwise.
    let g_sign = sign(&g_arg, x)?;
    let subst_var = if g_sign == 1 {
        Expr::pow(w.to_expr(), Rational::from_integer(-1))
    } else {
        w.to_expr()
    };

    let mut out = e.clone();
    for f in omega {
        let u = match &f.kind {
            ExprKind::Exp(u) => (**u).clone(),
            ExprKind::Symbol(s) if s == x => x.to_expr(),
            _ => {
                return Err(LimitError::class_mismatch(
                    "MRV set element is neither exp(u) nor the bare variable",
                ));
            }
        };

        // Step 3: (c, 0) = mrvleadterm(u / arg(g), x) — the leading
        // coefficient of the ratio of arguments; the exponent must be 0
        // since f and g share a comparability class.
        let ratio = u.clone() / g_arg.clone();
        let (c_expr, e0) = mrvleadterm(cfg, &ratio, x, depth + 1)?;
        if !e0.is_zero() {
            return Err(LimitError::class_mismatch(format!(
                "rewrite assertion failed: {f} and {g} are not in the same comparability class"
            )));
        }
        let c = c_expr.as_rational().ok_or_else(|| {
            LimitError::class_mismatch(format!(
                "leading coefficient of {u} / {g_arg} is not a rational constant"
            ))
        })?;

        // Step 4: f -> exp(u - c*arg(g)) * (subst_var)^c.
        let residual_arg = Expr::add(vec![u, Expr::mul(vec![Expr::number_from(-c), g_arg.clone()])]);
        let new_factor = Expr::mul(vec![Expr::exp(residual_arg), Expr::pow(subst_var.clone(), c)]);
        out = replace(&out, f, &new_factor);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::{fresh_dummy, symb};

    #[test]
    fn rewrites_exp_of_x_to_inverse_w() {
        let cfg = Limit::new();
        let x = symb("q_rewrites_exp_of_x_to_inverse_w_x");
        let w = fresh_dummy();
        let g = Expr::exp(x.to_expr());
        let got = rewrite(&cfg, &g, &[g.clone()], &x, &w, 0).expect("rewrite should succeed");
        let expected = Expr::pow(w.to_expr(), Rational::from_integer(-1));
        assert_eq!(got, expected);
    }

    #[test]
    fn rewrite_leaves_expressions_without_omega_elements_untouched() {
        let cfg = Limit::new();
        let x = symb("q_rewrite_leaves_expressions_untouched_x");
        let w = fresh_dummy();
        let e = Expr::number(7, 1);
        let got = rewrite(&cfg, &e, &[], &x, &w, 0).expect("rewrite should succeed");
        assert_eq!(got, e);
    }
}
