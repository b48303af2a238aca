//! Interval arithmetic storage type.
//!
//! Plain lo/hi endpoint arithmetic without outward rounding — good enough
//! for approximate range analysis, not for verified numerics. Transcendental
//! functions assume monotonicity on the domains they are applied to; the
//! non-monotonic trig functions return their conservative full ranges.
//!
//! Domain edge cases use explicit policies instead of silent NaN:
//!   • `rcp` of a zero-straddling interval is [-inf, +inf]
//!   • `sqrt` clamps its domain at 0
//!   • `ln`/`log2`/`log10` map a non-positive bound to -inf
//!   • `tan` is [-inf, +inf]

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use super::RawFloat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: RawFloat> Interval<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Interval { lo, hi }
    }

    /// The degenerate interval [value, value].
    pub fn splat(value: T) -> Self {
        Interval { lo: value, hi: value }
    }

    pub fn width(self) -> T {
        self.hi - self.lo
    }

    pub fn center(self) -> T {
        (self.lo + self.hi) / T::from_f64(2.0)
    }

    pub fn radius(self) -> T {
        self.width() / T::from_f64(2.0)
    }

    pub fn contains_zero(self) -> bool {
        self.lo <= T::ZERO && self.hi >= T::ZERO
    }

    // ── Transcendentals (monotonic: apply to both bounds) ────────────────────

    pub fn rcp(self) -> Self {
        if self.contains_zero() {
            return Interval::new(T::NEG_INFINITY, T::INFINITY);
        }
        Interval::new(T::ONE / self.hi, T::ONE / self.lo)
    }

    pub fn rsq(self) -> Self {
        self.sqrt().rcp()
    }

    pub fn sqrt(self) -> Self {
        Interval::new(self.lo.max(T::ZERO).sqrt(), self.hi.max(T::ZERO).sqrt())
    }

    pub fn cbrt(self) -> Self {
        Interval::new(self.lo.cbrt(), self.hi.cbrt())
    }

    pub fn exp(self) -> Self {
        Interval::new(self.lo.exp(), self.hi.exp())
    }

    pub fn exp2(self) -> Self {
        Interval::new(self.lo.exp2(), self.hi.exp2())
    }

    pub fn exp10(self) -> Self {
        let ln10 = T::from_f64(std::f64::consts::LN_10);
        (self * Interval::splat(ln10)).exp()
    }

    fn log_bound(x: T, f: fn(T) -> T) -> T {
        if x <= T::ZERO { T::NEG_INFINITY } else { f(x) }
    }

    pub fn ln(self) -> Self {
        Interval::new(
            Self::log_bound(self.lo, T::ln),
            Self::log_bound(self.hi, T::ln),
        )
    }

    pub fn log2(self) -> Self {
        Interval::new(
            Self::log_bound(self.lo, T::log2),
            Self::log_bound(self.hi, T::log2),
        )
    }

    pub fn log10(self) -> Self {
        Interval::new(
            Self::log_bound(self.lo, T::log10),
            Self::log_bound(self.hi, T::log10),
        )
    }

    pub fn pow(self, other: Self) -> Self {
        (self.ln() * other).exp()
    }

    // ── Non-monotonic: conservative full ranges ──────────────────────────────

    pub fn sin(self) -> Self {
        Interval::new(-T::ONE, T::ONE)
    }

    pub fn cos(self) -> Self {
        Interval::new(-T::ONE, T::ONE)
    }

    pub fn tan(self) -> Self {
        Interval::new(T::NEG_INFINITY, T::INFINITY)
    }

    pub fn asin(self) -> Self {
        Interval::new(-T::FRAC_PI_2, T::FRAC_PI_2)
    }

    pub fn acos(self) -> Self {
        Interval::new(T::ZERO, T::PI)
    }

    pub fn atan(self) -> Self {
        Interval::new(-T::FRAC_PI_2, T::FRAC_PI_2)
    }

    pub fn atan2(self, _other: Self) -> Self {
        Interval::new(-T::PI, T::PI)
    }

    // ── Rounding-family and misc componentwise ───────────────────────────────

    pub fn floor(self) -> Self {
        Interval::new(self.lo.floor(), self.hi.floor())
    }

    pub fn ceil(self) -> Self {
        Interval::new(self.lo.ceil(), self.hi.ceil())
    }

    pub fn round(self) -> Self {
        Interval::new(self.lo.round(), self.hi.round())
    }

    pub fn frac(self) -> Self {
        Interval::new(T::ZERO, T::ONE)
    }

    pub fn abs(self) -> Self {
        let lo_abs = self.lo.abs();
        let hi_abs = self.hi.abs();
        let hi = lo_abs.max(hi_abs);
        let lo = if self.contains_zero() { T::ZERO } else { lo_abs.min(hi_abs) };
        Interval::new(lo, hi)
    }

    pub fn sgn(self) -> Self {
        fn s<T: RawFloat>(x: T) -> T {
            if x < T::ZERO {
                -T::ONE
            } else if x > T::ZERO {
                T::ONE
            } else {
                T::ZERO
            }
        }
        Interval::new(s(self.lo), s(self.hi))
    }

    pub fn min(self, other: Self) -> Self {
        Interval::new(self.lo.min(other.lo), self.hi.min(other.hi))
    }

    pub fn max(self, other: Self) -> Self {
        Interval::new(self.lo.max(other.lo), self.hi.max(other.hi))
    }

    // ── Tri-state comparisons ────────────────────────────────────────────────
    //
    // A comparison over intervals is itself an interval: the true value, the
    // false value, or the whole [false, true] range when the answer is not
    // decidable over the operands.

    fn tri(always: bool, never: bool) -> Self {
        if always {
            Interval::splat(T::ONE)
        } else if never {
            Interval::splat(T::ZERO)
        } else {
            Interval::new(T::ZERO, T::ONE)
        }
    }

    pub fn lt(self, b: Self) -> Self {
        Self::tri(self.hi < b.lo, self.lo >= b.hi)
    }

    pub fn le(self, b: Self) -> Self {
        Self::tri(self.hi <= b.lo, self.lo > b.hi)
    }

    pub fn gt(self, b: Self) -> Self {
        Self::tri(self.lo > b.hi, self.hi <= b.lo)
    }

    pub fn ge(self, b: Self) -> Self {
        Self::tri(self.lo >= b.hi, self.hi < b.lo)
    }

    pub fn eq_s(self, b: Self) -> Self {
        Self::tri(
            self.lo == self.hi && b.lo == b.hi && self.lo == b.lo,
            self.hi < b.lo || self.lo > b.hi,
        )
    }

    pub fn ne_s(self, b: Self) -> Self {
        Self::tri(
            self.hi < b.lo || self.lo > b.hi,
            self.lo == self.hi && b.lo == b.hi && self.lo == b.lo,
        )
    }

    /// Linear interpolation `a*b + (1-a)*c`, also the basis of `cond`.
    pub fn lerp(self, b: Self, c: Self) -> Self {
        self * b + (Interval::splat(T::ONE) - self) * c
    }

    pub fn cond(self, b: Self, c: Self) -> Self {
        self.gt(Interval::splat(T::ZERO)).lerp(b, c)
    }
}

// ─── Operators ────────────────────────────────────────────────────────────────

impl<T: RawFloat> Add for Interval<T> {
    type Output = Self;
    fn add(self, b: Self) -> Self {
        Interval::new(self.lo + b.lo, self.hi + b.hi)
    }
}

impl<T: RawFloat> Sub for Interval<T> {
    type Output = Self;
    fn sub(self, b: Self) -> Self {
        Interval::new(self.lo - b.hi, self.hi - b.lo)
    }
}

impl<T: RawFloat> Mul for Interval<T> {
    type Output = Self;
    fn mul(self, b: Self) -> Self {
        let ll = self.lo * b.lo;
        let lh = self.lo * b.hi;
        let hl = self.hi * b.lo;
        let hh = self.hi * b.hi;
        Interval::new(ll.min(lh).min(hl.min(hh)), ll.max(lh).max(hl.max(hh)))
    }
}

impl<T: RawFloat> Div for Interval<T> {
    type Output = Self;
    fn div(self, b: Self) -> Self {
        self * b.rcp()
    }
}

impl<T: RawFloat> Rem for Interval<T> {
    type Output = Self;
    /// Result magnitude is bounded by the divisor's largest magnitude.
    fn rem(self, b: Self) -> Self {
        let large = b.lo.abs().max(b.hi.abs());
        Interval::new(-large, large)
    }
}

impl<T: RawFloat> Neg for Interval<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Interval::new(-self.hi, -self.lo)
    }
}

// ─── Text form ────────────────────────────────────────────────────────────────

// `[lo;hi]` — the semicolon keeps the tuple encoding's comma separator
// unambiguous.

impl<T: RawFloat> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{};{}]", self.lo, self.hi)
    }
}

impl<T: RawFloat> FromStr for Interval<T> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        let inner = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')).ok_or(())?;
        let (lo, hi) = inner.split_once(';').ok_or(())?;
        Ok(Interval::new(
            lo.parse().map_err(|_| ())?,
            hi.parse().map_err(|_| ())?,
        ))
    }
}
