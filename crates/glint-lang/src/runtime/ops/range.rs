//! `Scalar`/`Real` semantics for the interval and affine families.
//!
//! The kernels themselves are the generic ones in `real`; only the element
//! semantics differ. Comparisons return the type's tri-state truth range,
//! and `cond`/`lrp` are overridden so selection under an undecidable
//! condition produces the hull of both branches instead of picking one.

use crate::types::RawFloat;
use crate::types::affine::Affine;
use crate::types::interval::Interval;

use super::{Real, Scalar};
use crate::runtime::variant::HostData;

// ─── Interval ─────────────────────────────────────────────────────────────────

impl<T: RawFloat> Scalar for Interval<T>
where
    Interval<T>: HostData,
{
    fn one() -> Self {
        Interval::splat(T::ONE)
    }
    fn add(a: Self, b: Self) -> Self {
        a + b
    }
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }
    fn mul(a: Self, b: Self) -> Self {
        a * b
    }
    fn neg(a: Self) -> Self {
        -a
    }
    fn abs(a: Self) -> Self {
        a.abs()
    }
    fn sgn(a: Self) -> Self {
        a.sgn()
    }
    fn min_v(a: Self, b: Self) -> Self {
        a.min(b)
    }
    fn max_v(a: Self, b: Self) -> Self {
        a.max(b)
    }
    fn slt(a: Self, b: Self) -> Self {
        a.lt(b)
    }
    fn sle(a: Self, b: Self) -> Self {
        a.le(b)
    }
    fn sgt(a: Self, b: Self) -> Self {
        a.gt(b)
    }
    fn sge(a: Self, b: Self) -> Self {
        a.ge(b)
    }
    fn seq(a: Self, b: Self) -> Self {
        a.eq_s(b)
    }
    fn sne(a: Self, b: Self) -> Self {
        a.ne_s(b)
    }
    fn checked_div(a: Self, b: Self) -> Option<Self> {
        Some(a / b)
    }
    fn checked_rem(a: Self, b: Self) -> Option<Self> {
        Some(a % b)
    }
    fn cond_sel(c: Self, a: Self, b: Self) -> Self {
        c.cond(a, b)
    }
    fn lrp(alpha: Self, a: Self, b: Self) -> Self {
        alpha.lerp(a, b)
    }
}

impl<T: RawFloat> Real for Interval<T>
where
    Interval<T>: HostData,
{
    fn div_r(a: Self, b: Self) -> Self {
        a / b
    }
    fn rem_r(a: Self, b: Self) -> Self {
        a % b
    }
    fn rcp(a: Self) -> Self {
        a.rcp()
    }
    fn rsq(a: Self) -> Self {
        a.rsq()
    }
    fn sqrt(a: Self) -> Self {
        a.sqrt()
    }
    fn cbrt(a: Self) -> Self {
        a.cbrt()
    }
    fn exp(a: Self) -> Self {
        a.exp()
    }
    fn exp2(a: Self) -> Self {
        a.exp2()
    }
    fn exp10(a: Self) -> Self {
        a.exp10()
    }
    fn ln(a: Self) -> Self {
        a.ln()
    }
    fn log2(a: Self) -> Self {
        a.log2()
    }
    fn log10(a: Self) -> Self {
        a.log10()
    }
    fn sin(a: Self) -> Self {
        a.sin()
    }
    fn cos(a: Self) -> Self {
        a.cos()
    }
    fn tan(a: Self) -> Self {
        a.tan()
    }
    fn asin(a: Self) -> Self {
        a.asin()
    }
    fn acos(a: Self) -> Self {
        a.acos()
    }
    fn atan(a: Self) -> Self {
        a.atan()
    }
    fn atan2(a: Self, b: Self) -> Self {
        a.atan2(b)
    }
    fn floor(a: Self) -> Self {
        a.floor()
    }
    fn ceil(a: Self) -> Self {
        a.ceil()
    }
    fn round(a: Self) -> Self {
        a.round()
    }
    fn frac(a: Self) -> Self {
        a.frac()
    }
    fn pow(a: Self, b: Self) -> Self {
        a.pow(b)
    }
}

// ─── Affine ───────────────────────────────────────────────────────────────────

impl<T: RawFloat> Scalar for Affine<T>
where
    Affine<T>: HostData,
{
    fn one() -> Self {
        Affine::splat(T::ONE)
    }
    fn add(a: Self, b: Self) -> Self {
        a + b
    }
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }
    fn mul(a: Self, b: Self) -> Self {
        a * b
    }
    fn neg(a: Self) -> Self {
        -a
    }
    fn abs(a: Self) -> Self {
        a.abs()
    }
    fn sgn(a: Self) -> Self {
        a.sgn()
    }
    fn min_v(a: Self, b: Self) -> Self {
        a.min(&b)
    }
    fn max_v(a: Self, b: Self) -> Self {
        a.max(&b)
    }
    fn slt(a: Self, b: Self) -> Self {
        a.lt(&b)
    }
    fn sle(a: Self, b: Self) -> Self {
        a.le(&b)
    }
    fn sgt(a: Self, b: Self) -> Self {
        a.gt(&b)
    }
    fn sge(a: Self, b: Self) -> Self {
        a.ge(&b)
    }
    fn seq(a: Self, b: Self) -> Self {
        a.eq_s(&b)
    }
    fn sne(a: Self, b: Self) -> Self {
        a.ne_s(&b)
    }
    fn checked_div(a: Self, b: Self) -> Option<Self> {
        Some(a / b)
    }
    fn checked_rem(a: Self, b: Self) -> Option<Self> {
        Some(a % b)
    }
    fn cond_sel(c: Self, a: Self, b: Self) -> Self {
        c.cond(&a, &b)
    }
    fn lrp(alpha: Self, a: Self, b: Self) -> Self {
        alpha.lerp(&a, &b)
    }
}

impl<T: RawFloat> Real for Affine<T>
where
    Affine<T>: HostData,
{
    fn div_r(a: Self, b: Self) -> Self {
        a / b
    }
    fn rem_r(a: Self, b: Self) -> Self {
        a % b
    }
    fn rcp(a: Self) -> Self {
        a.rcp()
    }
    fn rsq(a: Self) -> Self {
        a.rsq()
    }
    fn sqrt(a: Self) -> Self {
        a.sqrt()
    }
    fn cbrt(a: Self) -> Self {
        a.cbrt()
    }
    fn exp(a: Self) -> Self {
        a.exp()
    }
    fn exp2(a: Self) -> Self {
        a.exp2()
    }
    fn exp10(a: Self) -> Self {
        a.exp10()
    }
    fn ln(a: Self) -> Self {
        a.ln()
    }
    fn log2(a: Self) -> Self {
        a.log2()
    }
    fn log10(a: Self) -> Self {
        a.log10()
    }
    fn sin(a: Self) -> Self {
        a.sin()
    }
    fn cos(a: Self) -> Self {
        a.cos()
    }
    fn tan(a: Self) -> Self {
        a.tan()
    }
    fn asin(a: Self) -> Self {
        a.asin()
    }
    fn acos(a: Self) -> Self {
        a.acos()
    }
    fn atan(a: Self) -> Self {
        a.atan()
    }
    fn atan2(a: Self, b: Self) -> Self {
        a.atan2(&b)
    }
    fn floor(a: Self) -> Self {
        a.floor()
    }
    fn ceil(a: Self) -> Self {
        a.ceil()
    }
    fn round(a: Self) -> Self {
        a.round()
    }
    fn frac(a: Self) -> Self {
        a.frac()
    }
    fn pow(a: Self, b: Self) -> Self {
        a.pow(&b)
    }
}
