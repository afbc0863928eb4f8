//! Error types for the limit engine.
//!
//! This module provides `LimitError`, the closed taxonomy of failures the
//! driver can surface. There is no in-band retry: every variant propagates
//! straight to the top-level caller.

use std::fmt;

use crate::core::expr::Expr;

/// Errors that can occur while computing a limit.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LimitError {
    /// `mrv` or `sign` encountered a function class outside
    /// `{Rational, Symbol, Add, Mul, Pow, Exp, Ln}`.
    UnsupportedExpression {
        /// The offending subexpression, rendered for diagnostics.
        expr: String,
    },
    /// `sign` could not determine the sign of an expression at infinity.
    IndeterminateSign {
        /// The expression whose sign could not be decided.
        expr: String,
    },
    /// Series expansion hit a pole, or an essential singularity outside the
    /// supported fragment (e.g. `ln` of something whose order is not zero).
    PoleError {
        /// Human-readable description of what went wrong.
        reason: String,
    },
    /// `rewrite`'s same-class assertion failed: elements of the MRV set
    /// turned out not to share a comparability class. Indicates a bug in
    /// `mrv` or in the caller.
    ClassMismatch {
        /// Human-readable description of the mismatch.
        reason: String,
    },
    /// The mutually recursive driver exceeded its recursion-depth guard.
    RecursionLimitExceeded {
        /// The depth cap that was exceeded.
        limit: u32,
    },
}

impl LimitError {
    /// Build an [`LimitError::UnsupportedExpression`] from an offending node.
    pub(crate) fn unsupported(expr: &Expr) -> Self {
        LimitError::UnsupportedExpression {
            expr: expr.to_string(),
        }
    }

    /// Build an [`LimitError::IndeterminateSign`] from the expression in
    /// question.
    pub(crate) fn indeterminate_sign(expr: &Expr) -> Self {
        LimitError::IndeterminateSign {
            expr: expr.to_string(),
        }
    }

    /// Build a [`LimitError::PoleError`] with the given reason.
    pub(crate) fn pole(reason: impl Into<String>) -> Self {
        LimitError::PoleError {
            reason: reason.into(),
        }
    }

    /// Build a [`LimitError::ClassMismatch`] with the given reason.
    pub(crate) fn class_mismatch(reason: impl Into<String>) -> Self {
        LimitError::ClassMismatch {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitError::UnsupportedExpression { expr } => {
                write!(f, "unsupported expression for limit evaluation: {expr}")
            }
            LimitError::IndeterminateSign { expr } => {
                write!(f, "cannot determine the sign of {expr} as x -> infinity")
            }
            LimitError::PoleError { reason } => {
                write!(f, "series expansion failed: {reason}")
            }
            LimitError::ClassMismatch { reason } => {
                write!(f, "MRV set elements are not in the same comparability class: {reason}")
            }
            LimitError::RecursionLimitExceeded { limit } => {
                write!(f, "recursion depth exceeded the limit of {limit}")
            }
        }
    }
}

impl std::error::Error for LimitError {}
