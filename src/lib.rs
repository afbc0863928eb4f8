#![forbid(unsafe_code)]
//! Symbolic limit engine.
//!
//! Computes `lim_{x -> x0} e(x)` for expressions built from rational
//! constants, a single symbol, `+`, `*`, rational-power exponentiation, and
//! the transcendental functions `exp`/`ln`, following Gruntz's
//! comparability-class algorithm.
//!
//! # Example
//! ```
//! use gruntz_limits::{symb, Point};
//!
//! let x = symb("x");
//! let expr = (x.clone().exp() - 1) / x.clone();
//! let result = gruntz_limits::limit(&expr, &x, &Point::Finite(gruntz_limits::Expr::number(0, 1))).unwrap();
//! assert_eq!(result, gruntz_limits::Expr::number(1, 1));
//! ```

mod core;
mod limit;

#[cfg(test)]
mod tests;

pub use core::error::LimitError;
pub use core::expr::{Expr, ExprKind};
pub use core::rational::Rational;
pub use core::symbol::{symb, Symbol};

pub use limit::driver::{limit, Limit, Point};

/// Default recursion-depth cap for the mutually recursive driver (see
/// [`Limit::max_depth`]).
pub const DEFAULT_MAX_DEPTH: u32 = 256;
