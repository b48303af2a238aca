//! Affine arithmetic storage type.
//!
//! A value is a center plus a sum of signed error terms, each tagged with a
//! globally unique symbol index. Linear operations track correlations exactly
//! by matching terms with equal indices (a sorted merge); multiplication
//! approximates the bilinear cross term with one fresh error term sized
//! `radius(a) * radius(b)` — a deliberate precision loss, not a bug.
//! Nonlinear univariate functions are linearized with a minimax (Chebyshev)
//! affine fit over the operand's current bounds; see `convex_approx`.
//!
//! Like the interval type, none of this carries rounding error — it is a
//! range-analysis tool, not verified arithmetic. Domain violations degrade
//! to the interval policy result wrapped as a fresh affine form.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use super::RawFloat;
use super::interval::Interval;

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(0);

/// Issue a fresh error-symbol index. Indices are process-global so terms
/// from unrelated computations never alias.
pub fn fresh_symbol() -> u64 {
    NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed)
}

/// One error term: a symbol identity and its signed magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sym<T> {
    pub index: u64,
    pub err: T,
}

impl<T: RawFloat> Sym<T> {
    pub fn abs_err(self) -> T {
        self.err.abs()
    }
}

/// Affine form `center + Σ err_i · ε_i`, terms sorted by symbol index.
#[derive(Debug, Clone)]
pub struct Affine<T> {
    pub center: T,
    syms: Vec<Sym<T>>,
}

impl<T: RawFloat> Affine<T> {
    /// The exact constant `value` (no error terms).
    pub fn splat(value: T) -> Self {
        Affine { center: value, syms: Vec::new() }
    }

    /// The range [lo, hi] as a fresh single-symbol form. Any non-finite
    /// bound degrades to the fully unbounded form — a center/radius pair
    /// cannot represent a half-infinite range without producing NaN.
    pub fn from_bounds(lo: T, hi: T) -> Self {
        if !lo.is_finite() || !hi.is_finite() {
            let mut a = Affine::splat(T::ZERO);
            a.push(Sym { index: fresh_symbol(), err: T::INFINITY });
            return a;
        }
        let center = (lo + hi) / T::from_f64(2.0);
        let radius = (hi - lo) / T::from_f64(2.0);
        let mut a = Affine::splat(center);
        if radius != T::ZERO {
            a.push(Sym { index: fresh_symbol(), err: radius });
        }
        a
    }

    pub fn from_interval(iv: Interval<T>) -> Self {
        Affine::from_bounds(iv.lo, iv.hi)
    }

    pub fn to_interval(&self) -> Interval<T> {
        let r = self.radius();
        Interval::new(self.center - r, self.center + r)
    }

    pub fn radius(&self) -> T {
        self.syms
            .iter()
            .fold(T::ZERO, |acc, s| acc + s.abs_err())
    }

    pub fn lo(&self) -> T {
        self.center - self.radius()
    }

    pub fn hi(&self) -> T {
        self.center + self.radius()
    }

    pub fn syms(&self) -> &[Sym<T>] {
        &self.syms
    }

    /// Rebuild a form from raw parts, preserving symbol identities (used by
    /// the width-changing casts). Terms must be sorted by index.
    pub fn from_terms(center: T, syms: Vec<Sym<T>>) -> Self {
        debug_assert!(syms.windows(2).all(|w| w[0].index < w[1].index));
        Affine { center, syms }
    }

    fn push(&mut self, s: Sym<T>) {
        debug_assert!(self.syms.last().is_none_or(|last| last.index < s.index));
        self.syms.push(s);
    }

    fn scaled(&self, s: T) -> Self {
        Affine {
            center: self.center * s,
            syms: self.syms.iter().map(|t| Sym { index: t.index, err: t.err * s }).collect(),
        }
    }

    /// `alpha·x + beta` over the existing terms plus one fresh `delta` term —
    /// the writeback step of every linearized function.
    pub fn affine_approx(&self, alpha: T, beta: T, delta: T) -> Self {
        let mut out = self.scaled(alpha);
        out.center = out.center + beta;
        let delta = delta.abs();
        if delta != T::ZERO {
            out.push(Sym { index: fresh_symbol(), err: delta });
        }
        out
    }

    /// Minimax affine fit of a convex (or concave) `f` over this form's
    /// current bounds.
    ///
    /// By the alternation argument the optimal slope is the secant slope
    /// between `f(lo)` and `f(hi)`; the third alternation point is where the
    /// tangent matches that slope, found by `dfinv` (inverse of `f'`, handed
    /// the bounds so it can pick the in-range root). `beta`/`delta` then
    /// solve the two endpoint residual equations.
    pub fn convex_approx(
        &self,
        f: impl Fn(T) -> T,
        dfinv: impl Fn(T, T, T) -> T,
    ) -> Self {
        let bounds = self.to_interval();
        let (lo, hi) = (bounds.lo, bounds.hi);
        if lo == hi {
            return Affine::splat(f(self.center));
        }
        let flo = f(lo);
        let fhi = f(hi);
        let alpha = (fhi - flo) / (hi - lo);
        let ss = dfinv(alpha, lo, hi).max(lo).min(hi);
        let bmd = flo - alpha * lo;
        let bpd = f(ss) - alpha * ss;
        let beta = (bpd + bmd) / T::from_f64(2.0);
        let delta = (bpd - bmd) / T::from_f64(2.0);
        self.affine_approx(alpha, beta, delta)
    }

    // ── Linearized univariate functions ──────────────────────────────────────

    pub fn rcp(&self) -> Self {
        let bounds = self.to_interval();
        if bounds.contains_zero() || !bounds.lo.is_finite() || !bounds.hi.is_finite() {
            return Affine::from_interval(bounds.rcp());
        }
        let hi = bounds.hi;
        self.convex_approx(
            |x| T::ONE / x,
            // f'(x) = -1/x²; both roots exist, take the one inside the bounds
            move |alpha, _lo, _hi| {
                let r = (-(T::ONE / alpha)).sqrt();
                if hi < T::ZERO { -r } else { r }
            },
        )
    }

    pub fn sqrt(&self) -> Self {
        let bounds = self.to_interval();
        if bounds.lo < T::ZERO || !bounds.hi.is_finite() {
            return Affine::from_interval(bounds.sqrt());
        }
        self.convex_approx(
            T::sqrt,
            // f'(x) = 1/(2√x)  ⇒  x = 1/(4α²)
            |alpha, _lo, _hi| T::ONE / (T::from_f64(4.0) * alpha * alpha),
        )
    }

    pub fn rsq(&self) -> Self {
        self.sqrt().rcp()
    }

    pub fn exp(&self) -> Self {
        let bounds = self.to_interval();
        if !bounds.lo.is_finite() || !bounds.hi.is_finite() {
            return Affine::from_interval(bounds.exp());
        }
        // f' = f  ⇒  tangent point is ln(α)
        self.convex_approx(T::exp, |alpha, _lo, _hi| alpha.ln())
    }

    pub fn exp2(&self) -> Self {
        self.scaled(T::from_f64(std::f64::consts::LN_2)).exp()
    }

    pub fn exp10(&self) -> Self {
        self.scaled(T::from_f64(std::f64::consts::LN_10)).exp()
    }

    pub fn ln(&self) -> Self {
        let bounds = self.to_interval();
        if bounds.lo <= T::ZERO || !bounds.hi.is_finite() {
            return Affine::from_interval(bounds.ln());
        }
        // f'(x) = 1/x  ⇒  tangent point is 1/α
        self.convex_approx(T::ln, |alpha, _lo, _hi| T::ONE / alpha)
    }

    pub fn log2(&self) -> Self {
        self.ln().scaled(T::ONE / T::from_f64(std::f64::consts::LN_2))
    }

    pub fn log10(&self) -> Self {
        self.ln().scaled(T::ONE / T::from_f64(std::f64::consts::LN_10))
    }

    pub fn pow(&self, b: &Self) -> Self {
        (self.ln() * b.clone()).exp()
    }

    pub fn cbrt(&self) -> Self {
        Affine::from_interval(self.to_interval().cbrt())
    }

    // ── Bound-fallback functions (trig and rounding) ─────────────────────────

    pub fn sin(&self) -> Self {
        Affine::from_interval(self.to_interval().sin())
    }

    pub fn cos(&self) -> Self {
        Affine::from_interval(self.to_interval().cos())
    }

    pub fn tan(&self) -> Self {
        Affine::from_interval(self.to_interval().tan())
    }

    pub fn asin(&self) -> Self {
        Affine::from_interval(self.to_interval().asin())
    }

    pub fn acos(&self) -> Self {
        Affine::from_interval(self.to_interval().acos())
    }

    pub fn atan(&self) -> Self {
        Affine::from_interval(self.to_interval().atan())
    }

    pub fn atan2(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().atan2(b.to_interval()))
    }

    pub fn round(&self) -> Self {
        Affine::from_interval(self.to_interval().round())
    }

    /// Constant when the whole range floors to one integer; otherwise the
    /// line `x - 1/2` is a best fit for the staircase.
    pub fn floor(&self) -> Self {
        let image = self.to_interval().floor();
        if image.lo == image.hi {
            return Affine::splat(image.lo);
        }
        let mut out = self.clone();
        out.center = out.center - T::from_f64(0.5);
        out
    }

    /// Mirror of `floor` with the line `x + 1/2`.
    pub fn ceil(&self) -> Self {
        let image = self.to_interval().ceil();
        if image.lo == image.hi {
            return Affine::splat(image.lo);
        }
        let mut out = self.clone();
        out.center = out.center + T::from_f64(0.5);
        out
    }

    /// Remainder by a scalar modulus: exact shift when the range stays
    /// within one period, otherwise the full [0, m] band.
    pub fn rem_scalar(&self, m: T) -> Self {
        let bounds = self.to_interval();
        let ilow = (bounds.lo / m).floor();
        let dhigh = bounds.hi / m;
        if dhigh - ilow > T::ONE {
            let half = m / T::from_f64(2.0);
            let mut out = Affine::splat(half);
            out.push(Sym { index: fresh_symbol(), err: half });
            out
        } else {
            let mut out = self.clone();
            out.center = out.center - ilow * m;
            out
        }
    }

    pub fn frac(&self) -> Self {
        self.rem_scalar(T::ONE)
    }

    // ── Piecewise-linear family ──────────────────────────────────────────────

    pub fn abs(&self) -> Self {
        let bounds = self.to_interval();
        let (lo, hi) = (bounds.lo, bounds.hi);
        if lo >= T::ZERO {
            return self.clone();
        }
        if hi <= T::ZERO {
            return -self.clone();
        }
        // minimax fit of the kink: secant slope, alternation at x = 0
        let alpha = (hi + lo) / (hi - lo);
        let beta = -(lo * hi) / (hi - lo);
        self.affine_approx(alpha, beta, beta)
    }

    pub fn sgn(&self) -> Self {
        let bounds = self.to_interval();
        if bounds.lo > T::ZERO {
            Affine::splat(T::ONE)
        } else if bounds.hi < T::ZERO {
            Affine::splat(-T::ONE)
        } else {
            Affine::from_bounds(-T::ONE, T::ONE)
        }
    }

    /// The positive part max(x, 0), as a scaled ramp.
    pub fn pos(&self) -> Self {
        let bounds = self.to_interval();
        let (lo, hi) = (bounds.lo, bounds.hi);
        if lo > T::ZERO {
            return self.clone();
        }
        if hi <= T::ZERO {
            return Affine::splat(T::ZERO);
        }
        let scaling = T::from_f64(0.5) * hi / (hi - lo);
        let mut out = self.scaled(scaling);
        out.center = hi / T::from_f64(2.0);
        out
    }

    pub fn min(&self, b: &Self) -> Self {
        self.clone() - (self.clone() - b.clone()).pos()
    }

    pub fn max(&self, b: &Self) -> Self {
        (self.clone() - b.clone()).pos() + b.clone()
    }

    // ── Comparisons and selection (through the interval bounds) ──────────────

    pub fn lt(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().lt(b.to_interval()))
    }

    pub fn le(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().le(b.to_interval()))
    }

    pub fn gt(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().gt(b.to_interval()))
    }

    pub fn ge(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().ge(b.to_interval()))
    }

    pub fn eq_s(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().eq_s(b.to_interval()))
    }

    pub fn ne_s(&self, b: &Self) -> Self {
        Affine::from_interval(self.to_interval().ne_s(b.to_interval()))
    }

    pub fn lerp(&self, b: &Self, c: &Self) -> Self {
        self.clone() * (b.clone() - c.clone()) + c.clone()
    }

    pub fn cond(&self, b: &Self, c: &Self) -> Self {
        self.gt(&Affine::splat(T::ZERO)).lerp(b, c)
    }
}

// ─── Operators ────────────────────────────────────────────────────────────────

/// Sorted merge of two term lists, combining terms with equal symbol index.
fn merge<T: RawFloat>(
    a: &[Sym<T>],
    b: &[Sym<T>],
    combine: impl Fn(Option<T>, Option<T>) -> T,
) -> Vec<Sym<T>> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (sa, sb) = (a[i], b[j]);
        if sa.index < sb.index {
            out.push(Sym { index: sa.index, err: combine(Some(sa.err), None) });
            i += 1;
        } else if sb.index < sa.index {
            out.push(Sym { index: sb.index, err: combine(None, Some(sb.err)) });
            j += 1;
        } else {
            out.push(Sym { index: sa.index, err: combine(Some(sa.err), Some(sb.err)) });
            i += 1;
            j += 1;
        }
    }
    for s in &a[i..] {
        out.push(Sym { index: s.index, err: combine(Some(s.err), None) });
    }
    for s in &b[j..] {
        out.push(Sym { index: s.index, err: combine(None, Some(s.err)) });
    }
    out
}

impl<T: RawFloat> Add for Affine<T> {
    type Output = Self;
    fn add(self, b: Self) -> Self {
        Affine {
            center: self.center + b.center,
            syms: merge(&self.syms, &b.syms, |x, y| {
                x.unwrap_or(T::ZERO) + y.unwrap_or(T::ZERO)
            }),
        }
    }
}

impl<T: RawFloat> Sub for Affine<T> {
    type Output = Self;
    fn sub(self, b: Self) -> Self {
        Affine {
            center: self.center - b.center,
            syms: merge(&self.syms, &b.syms, |x, y| {
                x.unwrap_or(T::ZERO) - y.unwrap_or(T::ZERO)
            }),
        }
    }
}

impl<T: RawFloat> Mul for Affine<T> {
    type Output = Self;
    fn mul(self, b: Self) -> Self {
        let (ac, bc) = (self.center, b.center);
        let mut out = Affine {
            center: ac * bc,
            syms: merge(&self.syms, &b.syms, |x, y| {
                x.unwrap_or(T::ZERO) * bc + y.unwrap_or(T::ZERO) * ac
            }),
        };
        // bilinear cross term collapses into one fresh symbol
        let cross = self.radius() * b.radius();
        if cross != T::ZERO {
            out.push(Sym { index: fresh_symbol(), err: cross });
        }
        out
    }
}

impl<T: RawFloat> Div for Affine<T> {
    type Output = Self;
    fn div(self, b: Self) -> Self {
        self * b.rcp()
    }
}

impl<T: RawFloat> Rem for Affine<T> {
    type Output = Self;
    /// Fractional part of the quotient; rescaling by the divisor is left to
    /// the caller.
    fn rem(self, b: Self) -> Self {
        let q = self / b;
        let fq = q.floor();
        q - fq
    }
}

impl<T: RawFloat> Neg for Affine<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Affine {
            center: -self.center,
            syms: self
                .syms
                .iter()
                .map(|s| Sym { index: s.index, err: -s.err })
                .collect(),
        }
    }
}

/// Bounds equality: two forms are equal when they denote the same range,
/// regardless of symbol identity.
impl<T: RawFloat> PartialEq for Affine<T> {
    fn eq(&self, other: &Self) -> bool {
        self.lo() == other.lo() && self.hi() == other.hi()
    }
}

// ─── Text form ────────────────────────────────────────────────────────────────

// `(center;idx:err;idx:err;…)` — no top-level commas, so the tuple encoding
// can keep its comma separator.

impl<T: RawFloat> fmt::Display for Affine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.center)?;
        for s in &self.syms {
            write!(f, ";{}:{}", s.index, s.err)?;
        }
        write!(f, ")")
    }
}

impl<T: RawFloat> FromStr for Affine<T> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        let inner = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')).ok_or(())?;
        let mut parts = inner.split(';');
        let center = parts.next().ok_or(())?.parse().map_err(|_| ())?;
        let mut out = Affine::splat(center);
        for part in parts {
            let (idx, err) = part.split_once(':').ok_or(())?;
            out.syms.push(Sym {
                index: idx.parse().map_err(|_| ())?,
                err: err.parse().map_err(|_| ())?,
            });
        }
        Ok(out)
    }
}
