//! The most-rapidly-varying set builder (§4.3).

use crate::Expr;
use crate::core::error::LimitError;
use crate::core::expr::{ExprKind, depends_on};
use crate::core::symbol::Symbol;

use super::compare::{Comparison, compare};
use super::driver::{Limit, limitinf};
use super::check_depth;

/// Compute `mrv(e, x)`: the set of subexpressions of `e`, all in the
/// single highest comparability class occurring in `e`. Empty iff `e`
/// does not depend on `x`.
///
/// Every element returned is either the bare symbol `x` or an `exp(u)`
/// node (§3's "MRV set" invariant); [`max`] relies on this to recognise
/// "the degenerate `{x}` case" by structural match rather than growth
/// analysis.
pub(crate) fn mrv(cfg: &Limit, e: &Expr, x: &Symbol, depth: u32) -> Result<Vec<Expr>, LimitError> {
    check_depth(depth, cfg.max_depth)?;
    if !depends_on(e, x) {
        return Ok(Vec::new());
    }
    match &e.kind {
        ExprKind::Symbol(s) if s == x => Ok(vec![e.clone()]),
        ExprKind::Add(terms) | ExprKind::Mul(terms) => {
            let mut acc = Vec::new();
            for t in terms {
                let m = mrv(cfg, t, x, depth + 1)?;
                acc = max(cfg, acc, m, x, depth + 1)?;
            }
            Ok(acc)
        }
        ExprKind::Pow(base, _) => mrv(cfg, base, x, depth + 1),
        ExprKind::Ln(u) => mrv(cfg, u, x, depth + 1),
        ExprKind::Exp(u) => {
            let grows = matches!(limitinf(cfg, u, x, depth + 1)?.kind, ExprKind::Infinity(true));
            if grows {
                let mu = mrv(cfg, u, x, depth + 1)?;
                let combined = max(cfg, vec![e.clone()], mu, x, depth + 1)?;
                max(cfg, combined, vec![x.to_expr()], x, depth + 1)
            } else {
                mrv(cfg, u, x, depth + 1)
            }
        }
        _ => Err(LimitError::unsupported(e)),
    }
}

/// `max(F, G, x)` from §4.3: combine two MRV sets into the set for the
/// dominant comparability class between them.
fn max(
    cfg: &Limit,
    f: Vec<Expr>,
    g: Vec<Expr>,
    x: &Symbol,
    depth: u32,
) -> Result<Vec<Expr>, LimitError> {
    if f.is_empty() {
        return Ok(g);
    }
    if g.is_empty() {
        return Ok(f);
    }
    if f.iter().any(|fe| g.contains(fe)) {
        let mut union = f;
        for ge in g {
            if !union.contains(&ge) {
                union.push(ge);
            }
        }
        return Ok(union);
    }

    let is_x = |e: &Expr| matches!(&e.kind, ExprKind::Symbol(s) if s == x);
    let f_has_x = f.iter().any(is_x);
    let g_has_x = g.iter().any(is_x);
    if f_has_x && !g_has_x {
        return Ok(g);
    }
    if g_has_x && !f_has_x {
        return Ok(f);
    }

    let Some(rep_f) = f.first() else {
        return Ok(g);
    };
    let Some(rep_g) = g.first() else {
        return Ok(f);
    };
    match compare(cfg, rep_f, rep_g, x, depth)? {
        Comparison::Greater => Ok(f),
        Comparison::Less => Ok(g),
        Comparison::Equal => {
            let mut union = f;
            for ge in g {
                if !union.contains(&ge) {
                    union.push(ge);
                }
            }
            Ok(union)
        }
    }
}
