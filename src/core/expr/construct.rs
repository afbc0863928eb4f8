//! Canonicalising constructors for [`Expr`] (§3 invariant 1).
//!
//! Every public way to build a composite node goes through one of the
//! functions here, so a freshly built `Expr` is canonical by construction:
//! `Add`/`Mul` are flattened and sorted, numeric factors are combined,
//! trivial identities vanish, and the `exp`/`ln` algebraic identities from
//! §3 are folded in. `canonicalize` rebuilds an arbitrary (possibly
//! hand-assembled, e.g. after a raw `substitute`) tree by re-running every
//! node through these same constructors.

use std::sync::Arc;

use num_traits::Zero;

use super::{Expr, ExprKind, expr_cmp};
use crate::core::rational::Rational;
use crate::core::symbol::Symbol;

impl Expr {
    pub(crate) fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Expr { hash, kind }
    }

    /// Build the exact rational constant `p/q`.
    #[must_use]
    pub fn number(p: i64, q: i64) -> Self {
        Self::number_from(Rational::new(p, q))
    }

    pub(crate) fn number_from(r: Rational) -> Self {
        Self::new(ExprKind::Number(r))
    }

    /// Build (or intern) the leaf symbol named `name`.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::from_symbol(crate::core::symbol::symb(name))
    }

    /// Wrap an already-interned [`Symbol`] as a leaf expression.
    #[must_use]
    pub fn from_symbol(s: Symbol) -> Self {
        Self::new(ExprKind::Symbol(s))
    }

    /// The signed infinity sentinel (`true` for `+∞`).
    #[must_use]
    pub fn infinity(positive: bool) -> Self {
        Self::new(ExprKind::Infinity(positive))
    }

    /// `a + b + ...`, flattened, combined, and sorted into canonical form.
    #[must_use]
    pub fn add(terms: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(terms.len());
        for t in terms {
            match t.kind {
                ExprKind::Add(inner) => flat.extend(inner.iter().map(|a| (**a).clone())),
                _ => flat.push(t),
            }
        }

        let mut constant = Rational::from_integer(0);
        let mut groups: Vec<(Self, Rational)> = Vec::new();
        for t in flat {
            if let ExprKind::Number(r) = &t.kind {
                constant += *r;
                continue;
            }
            let (base, coeff) = split_coeff(&t);
            if let Some(slot) = groups.iter_mut().find(|(b, _)| *b == base) {
                slot.1 += coeff;
            } else {
                groups.push((base, coeff));
            }
        }

        let mut out: Vec<Self> = Vec::with_capacity(groups.len() + 1);
        for (base, coeff) in groups {
            if coeff.is_zero() {
                continue;
            } else if coeff == Rational::from_integer(1) {
                out.push(base);
            } else {
                out.push(Self::mul(vec![Self::number_from(coeff), base]));
            }
        }
        if !constant.is_zero() || out.is_empty() {
            out.push(Self::number_from(constant));
        }

        if out.len() == 1 {
            return out.into_iter().next().unwrap_or_else(|| Self::number(0, 1));
        }
        out.sort_by(expr_cmp);
        Self::new(ExprKind::Add(out.into_iter().map(Arc::new).collect()))
    }

    /// `a * b * ...`, flattened, combined, and sorted into canonical form.
    #[must_use]
    pub fn mul(factors: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(factors.len());
        for f in factors {
            match f.kind {
                ExprKind::Mul(inner) => flat.extend(inner.iter().map(|a| (**a).clone())),
                _ => flat.push(f),
            }
        }

        let mut coeff = Rational::from_integer(1);
        let mut groups: Vec<(Self, Rational)> = Vec::new();
        for f in flat {
            if let ExprKind::Number(r) = &f.kind {
                coeff *= *r;
                continue;
            }
            let (base, exp) = split_pow(&f);
            if let Some(slot) = groups.iter_mut().find(|(b, _)| *b == base) {
                slot.1 += exp;
            } else {
                groups.push((base, exp));
            }
        }

        if coeff.is_zero() {
            return Self::number(0, 1);
        }

        let mut rest: Vec<Self> = Vec::with_capacity(groups.len());
        for (base, exp) in groups {
            if exp.is_zero() {
                continue;
            } else if exp == Rational::from_integer(1) {
                rest.push(base);
            } else {
                rest.push(Self::pow(base, exp));
            }
        }
        rest.sort_by(expr_cmp);

        let has_coeff = coeff != Rational::from_integer(1);

        // A bare numeric coefficient times a single `Add` factor is
        // distributed into the sum (`k*(a+b) -> k*a + k*b`) rather than left
        // as an opaque `Mul` node. Without this, a compound argument built
        // as `Mul([k, Add(...)])` — e.g. `rewrite`'s `-c * g_arg` residual —
        // never exposes its terms for `Expr::add`'s like-term cancellation
        // to find, even when they are structurally identical to terms
        // elsewhere in the sum (see `DESIGN.md`).
        if has_coeff && rest.len() == 1 {
            if let ExprKind::Add(terms) = &rest[0].kind {
                let distributed = terms
                    .iter()
                    .map(|t| Self::mul(vec![Self::number_from(coeff), (**t).clone()]))
                    .collect();
                return Self::add(distributed);
            }
        }

        match (has_coeff, rest.len()) {
            (false, 0) => Self::number(1, 1),
            (false, 1) => rest.into_iter().next().unwrap_or_else(|| Self::number(1, 1)),
            (false, _) => Self::new(ExprKind::Mul(rest.into_iter().map(Arc::new).collect())),
            (true, 0) => Self::number_from(coeff),
            (true, _) => {
                let mut all = Vec::with_capacity(rest.len() + 1);
                all.push(Self::number_from(coeff));
                all.extend(rest);
                Self::new(ExprKind::Mul(all.into_iter().map(Arc::new).collect()))
            }
        }
    }

    /// `base ^ exp` for a rational constant exponent, folding `exp=0`,
    /// `exp=1`, and `Pow(Pow(b,e1),e2) -> Pow(b,e1*e2)` (§3 invariant 1).
    ///
    /// Deliberately does *not* fold `Pow(Exp(u),q) -> Exp(q*u)`: the
    /// rewriter (§4.4) and the moveup/movedown step (§4.6) rely on a
    /// substituted `exp(u)` node staying intact as a literal `Exp` subtree
    /// so that structural replacement can find it — see `DESIGN.md`.
    #[must_use]
    pub fn pow(base: Self, exp: Rational) -> Self {
        if exp.is_zero() {
            return Self::number(1, 1);
        }
        if exp == Rational::from_integer(1) {
            return base;
        }
        if let ExprKind::Number(r) = &base.kind {
            if *exp.denom() == 1 {
                if let Some(folded) = checked_rational_pow(*r, *exp.numer()) {
                    return Self::number_from(folded);
                }
            }
            let r = *r;
            return Self::new(ExprKind::Pow(Arc::new(Self::number_from(r)), exp));
        }
        if let ExprKind::Pow(inner_base, inner_exp) = &base.kind {
            return Self::pow((**inner_base).clone(), *inner_exp * exp);
        }
        Self::new(ExprKind::Pow(Arc::new(base), exp))
    }

    /// `exp(arg)`, folding `exp(0) -> 1` and `exp(ln(a)) -> a`.
    #[must_use]
    pub fn exp(arg: Self) -> Self {
        if let ExprKind::Number(r) = &arg.kind {
            if r.is_zero() {
                return Self::number(1, 1);
            }
        }
        if let ExprKind::Ln(inner) = &arg.kind {
            return (**inner).clone();
        }
        Self::new(ExprKind::Exp(Arc::new(arg)))
    }

    /// `ln(arg)`, folding `ln(1) -> 0`, `ln(exp(a)) -> a`,
    /// `ln(a*b) -> ln a + ln b`, and `ln(a^b) -> b*ln a`.
    #[must_use]
    pub fn ln(arg: Self) -> Self {
        if let ExprKind::Number(r) = &arg.kind {
            if *r == Rational::from_integer(1) {
                return Self::number(0, 1);
            }
        }
        if let ExprKind::Exp(inner) = &arg.kind {
            return (**inner).clone();
        }
        if let ExprKind::Mul(factors) = &arg.kind {
            let terms: Vec<Self> = factors.iter().map(|f| Self::ln((**f).clone())).collect();
            return Self::add(terms);
        }
        if let ExprKind::Pow(base, exp) = &arg.kind {
            return Self::mul(vec![Self::number_from(*exp), Self::ln((**base).clone())]);
        }
        Self::new(ExprKind::Ln(Arc::new(arg)))
    }

    /// Re-run every node of `self` through the canonicalising constructors.
    ///
    /// Needed after a raw structural rewrite (e.g. [`crate::core::expr::replace`])
    /// so a stale, non-canonical subtree can't leak past the rewrite (§9's
    /// "substitute-and-canonicalise discipline").
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        canonicalize(self)
    }

    /// This expression's value as an exact rational constant, if it is one.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        match &self.kind {
            ExprKind::Number(r) => Some(*r),
            _ => None,
        }
    }

    /// Whether this expression is the constant `0`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, ExprKind::Number(r) if r.is_zero())
    }
}

pub(crate) fn canonicalize(e: &Expr) -> Expr {
    match &e.kind {
        ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Infinity(_) => e.clone(),
        ExprKind::Add(terms) => Expr::add(terms.iter().map(|t| canonicalize(t)).collect()),
        ExprKind::Mul(factors) => Expr::mul(factors.iter().map(|f| canonicalize(f)).collect()),
        ExprKind::Pow(base, exp) => Expr::pow(canonicalize(base), *exp),
        ExprKind::Exp(arg) => Expr::exp(canonicalize(arg)),
        ExprKind::Ln(arg) => Expr::ln(canonicalize(arg)),
    }
}

/// Decompose `t` as `(base, coeff)` such that `t == coeff * base`, undoing
/// the leading-numeric-factor convention `Mul` stores (used by `Expr::add`
/// to find like terms to combine).
fn split_coeff(t: &Expr) -> (Expr, Rational) {
    if let ExprKind::Mul(factors) = &t.kind {
        if let Some(first) = factors.first() {
            if let ExprKind::Number(r) = &first.kind {
                let rest: Vec<Arc<Expr>> = factors[1..].to_vec();
                let base = if rest.len() == 1 {
                    (*rest[0]).clone()
                } else {
                    Expr::new(ExprKind::Mul(rest))
                };
                return (base, *r);
            }
        }
    }
    (t.clone(), Rational::from_integer(1))
}

/// Decompose `t` as `(base, exp)` such that `t == base ^ exp`, undoing
/// `Pow` (used by `Expr::mul` to find like factors to combine).
fn split_pow(t: &Expr) -> (Expr, Rational) {
    if let ExprKind::Pow(base, exp) = &t.kind {
        ((**base).clone(), *exp)
    } else {
        (t.clone(), Rational::from_integer(1))
    }
}

fn checked_rational_pow(r: Rational, n: i64) -> Option<Rational> {
    if n == 0 {
        return Some(Rational::from_integer(1));
    }
    if r.is_zero() {
        return if n > 0 { Some(Rational::from_integer(0)) } else { None };
    }
    let mut acc = Rational::from_integer(1);
    for _ in 0..n.unsigned_abs() {
        acc *= r;
    }
    if n > 0 { Some(acc) } else { Some(acc.recip()) }
}

/// Structural hash of an [`ExprKind`], used to populate [`Expr::hash`].
///
/// Children contribute their own *precomputed* hash (`Arc<Expr>::hash`)
/// rather than being rehashed from scratch, keeping this O(1) in the
/// number of immediate children regardless of subtree size.
pub(crate) fn compute_expr_hash(kind: &ExprKind) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    kind.hash(&mut hasher);
    hasher.finish()
}
