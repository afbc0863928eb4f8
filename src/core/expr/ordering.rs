//! Canonical ordering for `Add`/`Mul` children (§3 invariant 1).
//!
//! A fixed total order over node kinds (`Number < Symbol < Pow < Exp < Ln <
//! Add < Mul < Infinity`), falling back to structural recursion on children
//! when both sides share a kind. Recursion always descends into strictly
//! smaller subtrees, so this terminates.

use std::cmp::Ordering;

use super::{Expr, ExprKind};

/// Compare two expressions for canonical (`Add`/`Mul` child) ordering.
pub(crate) fn expr_cmp(a: &Expr, b: &Expr) -> Ordering {
    match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => x.cmp(y),
        (ExprKind::Symbol(x), ExprKind::Symbol(y)) => x.cmp(y),
        (ExprKind::Pow(b1, e1), ExprKind::Pow(b2, e2)) => expr_cmp(b1, b2).then_with(|| e1.cmp(e2)),
        (ExprKind::Exp(a1), ExprKind::Exp(b1)) | (ExprKind::Ln(a1), ExprKind::Ln(b1)) => {
            expr_cmp(a1, b1)
        }
        (ExprKind::Add(t1), ExprKind::Add(t2)) | (ExprKind::Mul(t1), ExprKind::Mul(t2)) => {
            t1.len().cmp(&t2.len()).then_with(|| {
                for (x, y) in t1.iter().zip(t2.iter()) {
                    let c = expr_cmp(x, y);
                    if c != Ordering::Equal {
                        return c;
                    }
                }
                Ordering::Equal
            })
        }
        (ExprKind::Infinity(p1), ExprKind::Infinity(p2)) => p1.cmp(p2),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(e: &Expr) -> u8 {
    match &e.kind {
        ExprKind::Number(_) => 0,
        ExprKind::Symbol(_) => 1,
        ExprKind::Pow(_, _) => 2,
        ExprKind::Exp(_) => 3,
        ExprKind::Ln(_) => 4,
        ExprKind::Add(_) => 5,
        ExprKind::Mul(_) => 6,
        ExprKind::Infinity(_) => 7,
    }
}
