//! Float semantics (`f32`/`f64`) and registration of the `Real` families:
//! the plain floats, half, the fractions (all f32-hosted), and — through the
//! same generic list — the interval and affine families, whose `Real` impls
//! live in `range`.

use crate::error::Error;
use crate::runtime::eval::Eval;
use crate::runtime::opcode::Op;
use crate::runtime::variant::Variant;
use crate::types::ValueType;

use super::{Real, Scalar};

macro_rules! real_impl {
    ($t:ty) => {
        impl Scalar for $t {
            fn one() -> Self {
                1.0
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
                if a > 0.0 {
                    1.0
                } else if a < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            fn min_v(a: Self, b: Self) -> Self {
                a.min(b)
            }
            fn max_v(a: Self, b: Self) -> Self {
                a.max(b)
            }
            fn slt(a: Self, b: Self) -> Self {
                if a < b { 1.0 } else { 0.0 }
            }
            fn sle(a: Self, b: Self) -> Self {
                if a <= b { 1.0 } else { 0.0 }
            }
            fn sgt(a: Self, b: Self) -> Self {
                if a > b { 1.0 } else { 0.0 }
            }
            fn sge(a: Self, b: Self) -> Self {
                if a >= b { 1.0 } else { 0.0 }
            }
            fn seq(a: Self, b: Self) -> Self {
                if a == b { 1.0 } else { 0.0 }
            }
            fn sne(a: Self, b: Self) -> Self {
                if a != b { 1.0 } else { 0.0 }
            }
            // IEEE: float division by zero is ±inf, not an error
            fn checked_div(a: Self, b: Self) -> Option<Self> {
                Some(a / b)
            }
            fn checked_rem(a: Self, b: Self) -> Option<Self> {
                Some(a % b)
            }
        }

        impl Real for $t {
            fn div_r(a: Self, b: Self) -> Self {
                a / b
            }
            fn rem_r(a: Self, b: Self) -> Self {
                a % b
            }
            fn rcp(a: Self) -> Self {
                1.0 / a
            }
            fn rsq(a: Self) -> Self {
                1.0 / a.sqrt()
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
                (10.0 as $t).powf(a)
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
                a - a.floor()
            }
            fn pow(a: Self, b: Self) -> Self {
                a.powf(b)
            }
        }
    };
}

real_impl!(f32);
real_impl!(f64);

// ─── Real-only kernels ────────────────────────────────────────────────────────

fn k_rcp<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Rcp, T::rcp)
}
fn k_rsq<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Rsq, T::rsq)
}
fn k_sqrt<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Sqrt, T::sqrt)
}
fn k_cbrt<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Cbrt, T::cbrt)
}
fn k_exp<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Exp, T::exp)
}
fn k_exp2<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Exp2, T::exp2)
}
fn k_exp10<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Exp10, T::exp10)
}
fn k_log<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Log, T::ln)
}
fn k_log2<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Log2, T::log2)
}
fn k_log10<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Log10, T::log10)
}
fn k_sin<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Sin, T::sin)
}
fn k_cos<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Cos, T::cos)
}
fn k_tan<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Tan, T::tan)
}
fn k_asin<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Asin, T::asin)
}
fn k_acos<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Acos, T::acos)
}
fn k_atan<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Atan, T::atan)
}
fn k_flr<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Flr, T::floor)
}
fn k_ceil<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Ceil, T::ceil)
}
fn k_rnd<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Rnd, T::round)
}
fn k_frac<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::unary::<T, _>(d, s[0], Op::Frac, T::frac)
}
fn k_div<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::binary::<T, _>(d, s[0], s[1], Op::Div, T::div_r)
}
fn k_mod<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::binary::<T, _>(d, s[0], s[1], Op::Mod, T::rem_r)
}
fn k_pow<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::binary::<T, _>(d, s[0], s[1], Op::Pow, T::pow)
}
fn k_atan2<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::binary::<T, _>(d, s[0], s[1], Op::Atan2, T::atan2)
}

// derivatives only exist while a program records; immediate-mode use is a
// user error surfaced to the embedding application
fn k_dx(_d: &mut Variant, _s: &[&Variant]) -> Result<(), Error> {
    Err(Error::DerivativeOutsideProgram { op: Op::Dx })
}
fn k_dy(_d: &mut Variant, _s: &[&Variant]) -> Result<(), Error> {
    Err(Error::DerivativeOutsideProgram { op: Op::Dy })
}

// ─── Registration ─────────────────────────────────────────────────────────────

pub(crate) fn register<T: Real>(eval: &mut Eval, ty: ValueType) {
    use super::*;
    let s = Some(ty);
    let u = [s, None, None];
    let b = [s, s, None];
    let t = [s, s, s];

    eval.add_op(Op::Asn, ty, u, k_asn::<T>);
    eval.add_op(Op::Neg, ty, u, k_neg::<T>);
    eval.add_op(Op::Abs, ty, u, k_abs::<T>);
    eval.add_op(Op::Sgn, ty, u, k_sgn::<T>);
    eval.add_op(Op::Rcp, ty, u, k_rcp::<T>);
    eval.add_op(Op::Rsq, ty, u, k_rsq::<T>);
    eval.add_op(Op::Sqrt, ty, u, k_sqrt::<T>);
    eval.add_op(Op::Cbrt, ty, u, k_cbrt::<T>);
    eval.add_op(Op::Exp, ty, u, k_exp::<T>);
    eval.add_op(Op::Exp2, ty, u, k_exp2::<T>);
    eval.add_op(Op::Exp10, ty, u, k_exp10::<T>);
    eval.add_op(Op::Log, ty, u, k_log::<T>);
    eval.add_op(Op::Log2, ty, u, k_log2::<T>);
    eval.add_op(Op::Log10, ty, u, k_log10::<T>);
    eval.add_op(Op::Sin, ty, u, k_sin::<T>);
    eval.add_op(Op::Cos, ty, u, k_cos::<T>);
    eval.add_op(Op::Tan, ty, u, k_tan::<T>);
    eval.add_op(Op::Asin, ty, u, k_asin::<T>);
    eval.add_op(Op::Acos, ty, u, k_acos::<T>);
    eval.add_op(Op::Atan, ty, u, k_atan::<T>);
    eval.add_op(Op::Flr, ty, u, k_flr::<T>);
    eval.add_op(Op::Ceil, ty, u, k_ceil::<T>);
    eval.add_op(Op::Rnd, ty, u, k_rnd::<T>);
    eval.add_op(Op::Frac, ty, u, k_frac::<T>);
    eval.add_op(Op::Norm, ty, u, k_norm::<T>);
    eval.add_op(Op::Csum, ty, u, k_csum::<T>);
    eval.add_op(Op::Cmul, ty, u, k_cmul::<T>);
    eval.add_op(Op::Dx, ty, u, k_dx);
    eval.add_op(Op::Dy, ty, u, k_dy);

    eval.add_op(Op::Add, ty, b, k_add::<T>);
    eval.add_op(Op::Mul, ty, b, k_mul::<T>);
    eval.add_op(Op::Div, ty, b, k_div::<T>);
    eval.add_op(Op::Mod, ty, b, k_mod::<T>);
    eval.add_op(Op::Pow, ty, b, k_pow::<T>);
    eval.add_op(Op::Atan2, ty, b, k_atan2::<T>);
    eval.add_op(Op::Min, ty, b, k_min::<T>);
    eval.add_op(Op::Max, ty, b, k_max::<T>);
    eval.add_op(Op::Slt, ty, b, k_slt::<T>);
    eval.add_op(Op::Sle, ty, b, k_sle::<T>);
    eval.add_op(Op::Sgt, ty, b, k_sgt::<T>);
    eval.add_op(Op::Sge, ty, b, k_sge::<T>);
    eval.add_op(Op::Seq, ty, b, k_seq::<T>);
    eval.add_op(Op::Sne, ty, b, k_sne::<T>);
    eval.add_op(Op::Dot, ty, b, k_dot::<T>);
    eval.add_op(Op::Xpd, ty, b, k_xpd::<T>);

    eval.add_op(Op::Lrp, ty, t, k_lrp::<T>);
    eval.add_op(Op::Mad, ty, t, k_mad::<T>);
    eval.add_op(Op::Cond, ty, t, k_cond::<T>);
}
