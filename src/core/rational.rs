//! Exact rational arithmetic for symbolic constants.
//!
//! `Rational` is a thin alias over [`num_rational::Ratio`], which already
//! keeps values reduced to lowest terms with a positive denominator — the
//! exact invariant §3 of the specification requires (`gcd(|p|,q)=1`, `q>0`).

use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{Signed, Zero};

/// An exact rational number, always reduced to lowest terms with `q > 0`.
pub type Rational = Ratio<i64>;

/// Sign of a rational: -1, 0, or +1.
pub(crate) fn rational_sign(r: &Rational) -> i32 {
    if r.is_zero() {
        0
    } else if r.is_positive() {
        1
    } else {
        -1
    }
}

/// Verify §3's `gcd(|p|, q) = 1, q > 0` invariant holds for `r`.
///
/// `Ratio` maintains this on every arithmetic operation internally; this is
/// a cheap sanity check for the unit tests below, using `num-integer`'s
/// `gcd` directly rather than trusting `Ratio`'s reduction blindly.
#[cfg(test)]
pub(crate) fn is_reduced(r: &Rational) -> bool {
    *r.denom() > 0 && r.numer().unsigned_abs().gcd(&r.denom().unsigned_abs()) == 1
}
