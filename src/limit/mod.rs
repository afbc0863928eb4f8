//! The mutually recursive Gruntz procedures (§2, §4).
//!
//! Leaves-first: [`sign`] and [`compare`] are the base collaborators;
//! [`mrv`] builds on `compare`; [`rewrite`] and [`series::leadterm`] build
//! on `mrv`; [`mrvleadterm`] ties rewrite and leadterm together
//! (moveup/movedown for the degenerate `x ∈ Ω` case); and [`driver`]'s
//! `limitinf`/`limit` sit on top, recursing back into `mrvleadterm`,
//! `sign`, and `compare`.
//!
//! Every recursive entry point threads a `depth: u32` counter, checked by
//! [`check_depth`] against `Limit::max_depth` (§5) — the mutual recursion
//! has no other structural termination check an implementation can lean
//! on, so this is the guard against pathological or buggy inputs
//! overflowing the native stack.

mod compare;
pub(crate) mod driver;
mod mrv;
mod mrvleadterm;
mod rewrite;
mod series;
mod sign;

use crate::core::error::LimitError;

pub(crate) use compare::{Comparison, compare};
pub(crate) use mrv::mrv;
pub(crate) use mrvleadterm::mrvleadterm;
pub(crate) use rewrite::rewrite;
pub(crate) use series::leadterm;
pub(crate) use sign::sign;

/// Gate a trace print behind `GRUNTZ_TRACE=1`, mirroring the teacher's
/// `SYMB_TRACE`-gated tracing in `simplification/engine.rs` — a logging
/// crate would be overkill for a synchronous, in-process library with no
/// ambient logger to plug into.
pub(crate) fn trace_enabled() -> bool {
    std::env::var("GRUNTZ_TRACE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

macro_rules! trace {
    ($($arg:tt)*) => {
        if crate::limit::trace_enabled() {
            eprintln!($($arg)*);
        }
    };
}
pub(crate) use trace;

/// Check the recursion-depth guard (§5), failing closed above `max_depth`.
pub(crate) fn check_depth(depth: u32, max_depth: u32) -> Result<(), LimitError> {
    if depth > max_depth {
        Err(LimitError::RecursionLimitExceeded { limit: max_depth })
    } else {
        Ok(())
    }
}
