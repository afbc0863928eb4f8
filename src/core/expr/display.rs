//! `Display` for [`Expr`].
//!
//! Purely diagnostic (used in `LimitError` messages and `Debug`-adjacent
//! output); pretty-printing is explicitly a non-goal of the engine (§1), so
//! this makes no attempt at minimal parenthesisation or LaTeX-style output.

use std::fmt;

use super::{Expr, ExprKind};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(r) => {
                if *r.denom() == 1 {
                    write!(f, "{}", r.numer())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
            ExprKind::Symbol(s) => write!(f, "{s}"),
            ExprKind::Add(terms) => {
                write!(f, "(")?;
                for (i, t) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, ")")
            }
            ExprKind::Mul(factors) => {
                write!(f, "(")?;
                for (i, t) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, ")")
            }
            ExprKind::Pow(base, exp) => write!(f, "{base}^({exp})"),
            ExprKind::Exp(arg) => write!(f, "exp({arg})"),
            ExprKind::Ln(arg) => write!(f, "ln({arg})"),
            ExprKind::Infinity(true) => write!(f, "oo"),
            ExprKind::Infinity(false) => write!(f, "-oo"),
        }
    }
}
