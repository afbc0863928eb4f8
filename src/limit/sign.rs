//! The sign oracle (§4.1).

use crate::core::error::LimitError;
use crate::core::expr::ExprKind;
use crate::core::rational::rational_sign;
use crate::core::symbol::Symbol;
use crate::Expr;

/// Decide the sign of `e` for all sufficiently large `x`, returning `-1`,
/// `0`, or `1`. Fails with [`LimitError::IndeterminateSign`] when the sign
/// cannot be decided under these (intentionally partial) rules.
///
/// Rules, in order: a rational constant returns its own sign; the bare
/// variable `x` is always `+1`; a product multiplies the signs of its
/// factors; `exp(u)` is always `+1`; `base^exp` is `+1` when `base` is
/// positive; everything else fails.
///
/// Extension beyond the literal rule list (§9's open question on
/// negative-coefficient `Add` summands): a sum is resolved when every
/// nonzero summand agrees in sign, and fails otherwise — see `DESIGN.md`.
pub(crate) fn sign(e: &Expr, x: &Symbol) -> Result<i32, LimitError> {
    match &e.kind {
        ExprKind::Number(r) => Ok(rational_sign(r)),
        ExprKind::Symbol(s) if s == x => Ok(1),
        ExprKind::Mul(factors) => {
            let mut acc = 1i32;
            for f in factors {
                acc *= sign(f, x)?;
                if acc == 0 {
                    return Ok(0);
                }
            }
            Ok(acc)
        }
        ExprKind::Exp(_) => Ok(1),
        ExprKind::Pow(base, _) => {
            if sign(base, x)? == 1 {
                Ok(1)
            } else {
                Err(LimitError::indeterminate_sign(e))
            }
        }
        ExprKind::Add(terms) => {
            let mut seen: Option<i32> = None;
            for t in terms {
                let s = sign(t, x)?;
                if s == 0 {
                    continue;
                }
                match seen {
                    None => seen = Some(s),
                    Some(prev) if prev == s => {}
                    Some(_) => return Err(LimitError::indeterminate_sign(e)),
                }
            }
            Ok(seen.unwrap_or(0))
        }
        _ => Err(LimitError::indeterminate_sign(e)),
    }
}
