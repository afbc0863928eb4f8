//! The top-level limit driver — `limit(e, z, z0)` and `limitinf(e, x)` (§4.7).

use crate::Expr;
use crate::core::error::LimitError;
use crate::core::rational::rational_sign;
use crate::core::symbol::{Symbol, fresh_dummy};

use super::check_depth;
use super::mrvleadterm::mrvleadterm;
use super::sign::sign;
use super::trace;

/// The point a limit is taken at.
#[derive(Debug, Clone, PartialEq)]
pub enum Point {
    /// `z -> z0` for a finite `z0`.
    Finite(Expr),
    /// `z -> +infinity`.
    Infinity,
}

/// Configuration for a limit evaluation, mirroring the teacher's
/// `Simplifier`/`Diff` builder pattern (`with_max_iterations`,
/// `with_max_depth` in `simplification/engine.rs`).
///
/// The only runtime-tunable knob is the recursion-depth cap of §5.
#[derive(Debug, Clone, Copy)]
pub struct Limit {
    pub(crate) max_depth: u32,
}

impl Default for Limit {
    fn default() -> Self {
        Self {
            max_depth: crate::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limit {
    /// A limit evaluator with the default recursion-depth cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the recursion-depth cap (§5).
    #[must_use]
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluate `lim_{z -> z0} e`.
    pub fn eval(&self, e: &Expr, z: &Symbol, z0: &Point) -> Result<Expr, LimitError> {
        let x_prime = fresh_dummy();
        let e_prime = match z0 {
            Point::Infinity => e.substitute(z, &x_prime.to_expr()),
            Point::Finite(point) => {
                let approach = Expr::add(vec![
                    point.clone(),
                    Expr::pow(x_prime.to_expr(), crate::core::rational::Rational::from_integer(-1)),
                ]);
                e.substitute(z, &approach)
            }
        };
        limitinf(self, &e_prime, &x_prime, 0)
    }
}

/// `lim_{x -> infinity} e`, via Gruntz's comparability-class method (§4.7).
pub(crate) fn limitinf(cfg: &Limit, e: &Expr, x: &Symbol, depth: u32) -> Result<Expr, LimitError> {
    check_depth(depth, cfg.max_depth)?;
    trace!("limitinf({e}, {x}) at depth {depth}");
    if !e.depends_on(x) {
        return Ok(e.clone());
    }
    let (c0, e0) = mrvleadterm(cfg, e, x, depth + 1)?;
    match rational_sign(&e0) {
        1 => Ok(Expr::number(0, 1)),
        -1 => {
            let s = sign(&c0, x)?;
            Ok(Expr::infinity(s == 1))
        }
        _ => limitinf(cfg, &c0, x, depth + 1),
    }
}

/// `lim_{z -> z0} e`, the crate's top-level entry point (§6).
///
/// # Errors
///
/// Returns [`LimitError`] when the limit cannot be decided under this
/// engine's supported fragment — see the variants of `LimitError` for the
/// specific failure modes.
///
/// # Examples
///
/// ```
/// let x = gruntz_limits::symb("x");
/// let expr = x.to_expr();
/// let result = gruntz_limits::limit(&expr, &x, &gruntz_limits::Point::Infinity).unwrap();
/// assert_eq!(result, gruntz_limits::Expr::infinity(true));
/// ```
pub fn limit(e: &Expr, z: &Symbol, z0: &Point) -> Result<Expr, LimitError> {
    Limit::new().eval(e, z, z0)
}
