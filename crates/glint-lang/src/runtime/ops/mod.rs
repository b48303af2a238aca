//! Concrete operation kernels and their registration.
//!
//! Kernels receive operands already cast to their registered storage type;
//! all they validate is shape. Componentwise kernels broadcast length-1
//! sources by iterating them with stride 0, so a scalar operand repeats for
//! every destination element; any other length disagreement is an error.
//!
//! The semantics that differ per storage family live behind two traits:
//! `Scalar` (everything a numeric storage type can do, comparisons included
//! — a comparison yields the *type's* truth encoding, which for the range
//! types can itself be a range) and `Real` (the transcendental surface of
//! the float-backed families). One generic registration function per trait
//! then covers the whole family list.

pub(crate) mod int;
pub(crate) mod range;
pub(crate) mod real;

use crate::error::Error;
use crate::types::ValueType;

use super::eval::Eval;
use super::opcode::Op;
use super::variant::{HostData, Variant};

// ─── Per-family semantics ─────────────────────────────────────────────────────

pub(crate) trait Scalar: HostData {
    fn one() -> Self;
    fn add(a: Self, b: Self) -> Self;
    fn sub(a: Self, b: Self) -> Self;
    fn mul(a: Self, b: Self) -> Self;
    fn neg(a: Self) -> Self;
    fn abs(a: Self) -> Self;
    /// -1 / 0 / 1 in the type's own representation (a range for the range
    /// types when the sign is not decidable).
    fn sgn(a: Self) -> Self;
    fn min_v(a: Self, b: Self) -> Self;
    fn max_v(a: Self, b: Self) -> Self;
    // comparisons produce the type's true/false values, never bare 0/1 ints
    fn slt(a: Self, b: Self) -> Self;
    fn sle(a: Self, b: Self) -> Self;
    fn sgt(a: Self, b: Self) -> Self;
    fn sge(a: Self, b: Self) -> Self;
    fn seq(a: Self, b: Self) -> Self;
    fn sne(a: Self, b: Self) -> Self;
    /// `None` on division by zero where the type has no way to express the
    /// result (the integers). Float families never fail here.
    fn checked_div(a: Self, b: Self) -> Option<Self>;
    fn checked_rem(a: Self, b: Self) -> Option<Self>;

    fn cond_sel(c: Self, a: Self, b: Self) -> Self {
        if Self::positive(&c) { a } else { b }
    }

    /// `alpha·a + (1-alpha)·b`.
    fn lrp(alpha: Self, a: Self, b: Self) -> Self {
        Self::add(
            Self::mul(alpha.clone(), a),
            Self::mul(Self::sub(Self::one(), alpha), b),
        )
    }

    fn mad(a: Self, b: Self, c: Self) -> Self {
        Self::add(Self::mul(a, b), c)
    }
}

pub(crate) trait Real: Scalar {
    fn div_r(a: Self, b: Self) -> Self;
    fn rem_r(a: Self, b: Self) -> Self;
    fn rcp(a: Self) -> Self;
    fn rsq(a: Self) -> Self;
    fn sqrt(a: Self) -> Self;
    fn cbrt(a: Self) -> Self;
    fn exp(a: Self) -> Self;
    fn exp2(a: Self) -> Self;
    fn exp10(a: Self) -> Self;
    fn ln(a: Self) -> Self;
    fn log2(a: Self) -> Self;
    fn log10(a: Self) -> Self;
    fn sin(a: Self) -> Self;
    fn cos(a: Self) -> Self;
    fn tan(a: Self) -> Self;
    fn asin(a: Self) -> Self;
    fn acos(a: Self) -> Self;
    fn atan(a: Self) -> Self;
    fn atan2(a: Self, b: Self) -> Self;
    fn floor(a: Self) -> Self;
    fn ceil(a: Self) -> Self;
    fn round(a: Self) -> Self;
    fn frac(a: Self) -> Self;
    fn pow(a: Self, b: Self) -> Self;
}

// ─── Broadcast helpers ────────────────────────────────────────────────────────

fn check_len(op: Op, n: usize, got: usize) -> Result<(), Error> {
    if got == n || got == 1 {
        Ok(())
    } else {
        Err(Error::SizeMismatch { op, expected: n, got })
    }
}

pub(crate) fn unary<T: Scalar, F: Fn(T) -> T>(
    dest: &mut Variant,
    a: &Variant,
    op: Op,
    f: F,
) -> Result<(), Error> {
    let n = dest.len();
    let av = T::data(a);
    check_len(op, n, av.len())?;
    let ao = (av.len() > 1) as usize;
    let d = T::data_mut(dest);
    let mut ai = 0;
    for x in d.iter_mut() {
        *x = f(av[ai].clone());
        ai += ao;
    }
    Ok(())
}

pub(crate) fn binary<T: Scalar, F: Fn(T, T) -> T>(
    dest: &mut Variant,
    a: &Variant,
    b: &Variant,
    op: Op,
    f: F,
) -> Result<(), Error> {
    let n = dest.len();
    let (av, bv) = (T::data(a), T::data(b));
    check_len(op, n, av.len())?;
    check_len(op, n, bv.len())?;
    let (ao, bo) = ((av.len() > 1) as usize, (bv.len() > 1) as usize);
    let d = T::data_mut(dest);
    let (mut ai, mut bi) = (0, 0);
    for x in d.iter_mut() {
        *x = f(av[ai].clone(), bv[bi].clone());
        ai += ao;
        bi += bo;
    }
    Ok(())
}

pub(crate) fn try_binary<T: Scalar, F: Fn(T, T) -> Option<T>>(
    dest: &mut Variant,
    a: &Variant,
    b: &Variant,
    op: Op,
    f: F,
) -> Result<(), Error> {
    let n = dest.len();
    let (av, bv) = (T::data(a), T::data(b));
    check_len(op, n, av.len())?;
    check_len(op, n, bv.len())?;
    let (ao, bo) = ((av.len() > 1) as usize, (bv.len() > 1) as usize);
    let d = T::data_mut(dest);
    let (mut ai, mut bi) = (0, 0);
    for x in d.iter_mut() {
        *x = f(av[ai].clone(), bv[bi].clone()).ok_or(Error::DivideByZero { op })?;
        ai += ao;
        bi += bo;
    }
    Ok(())
}

pub(crate) fn ternary<T: Scalar, F: Fn(T, T, T) -> T>(
    dest: &mut Variant,
    a: &Variant,
    b: &Variant,
    c: &Variant,
    op: Op,
    f: F,
) -> Result<(), Error> {
    let n = dest.len();
    let (av, bv, cv) = (T::data(a), T::data(b), T::data(c));
    check_len(op, n, av.len())?;
    check_len(op, n, bv.len())?;
    check_len(op, n, cv.len())?;
    let (ao, bo, co) = (
        (av.len() > 1) as usize,
        (bv.len() > 1) as usize,
        (cv.len() > 1) as usize,
    );
    let d = T::data_mut(dest);
    let (mut ai, mut bi, mut ci) = (0, 0, 0);
    for x in d.iter_mut() {
        *x = f(av[ai].clone(), bv[bi].clone(), cv[ci].clone());
        ai += ao;
        bi += bo;
        ci += co;
    }
    Ok(())
}

/// Reduce the whole source tuple into a length-1 destination.
pub(crate) fn reduce<T: Scalar, F: Fn(T, T) -> T>(
    dest: &mut Variant,
    a: &Variant,
    op: Op,
    seed: T,
    f: F,
) -> Result<(), Error> {
    if dest.len() != 1 {
        return Err(Error::SizeMismatch { op, expected: 1, got: dest.len() });
    }
    let acc = T::data(a).iter().fold(seed, |acc, x| f(acc, x.clone()));
    T::data_mut(dest)[0] = acc;
    Ok(())
}

// ─── Shared kernels ───────────────────────────────────────────────────────────

pub(crate) fn k_asn<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    unary::<T, _>(d, s[0], Op::Asn, |a| a)
}
pub(crate) fn k_neg<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    unary::<T, _>(d, s[0], Op::Neg, T::neg)
}
pub(crate) fn k_abs<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    unary::<T, _>(d, s[0], Op::Abs, T::abs)
}
pub(crate) fn k_sgn<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    unary::<T, _>(d, s[0], Op::Sgn, T::sgn)
}
pub(crate) fn k_add<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Add, T::add)
}
pub(crate) fn k_mul<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Mul, T::mul)
}
pub(crate) fn k_min<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Min, T::min_v)
}
pub(crate) fn k_max<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Max, T::max_v)
}
pub(crate) fn k_slt<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Slt, T::slt)
}
pub(crate) fn k_sle<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Sle, T::sle)
}
pub(crate) fn k_sgt<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Sgt, T::sgt)
}
pub(crate) fn k_sge<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Sge, T::sge)
}
pub(crate) fn k_seq<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Seq, T::seq)
}
pub(crate) fn k_sne<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    binary::<T, _>(d, s[0], s[1], Op::Sne, T::sne)
}
pub(crate) fn k_mad<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    ternary::<T, _>(d, s[0], s[1], s[2], Op::Mad, T::mad)
}
pub(crate) fn k_lrp<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    ternary::<T, _>(d, s[0], s[1], s[2], Op::Lrp, T::lrp)
}
pub(crate) fn k_cond<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    ternary::<T, _>(d, s[0], s[1], s[2], Op::Cond, T::cond_sel)
}
pub(crate) fn k_csum<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    reduce::<T, _>(d, s[0], Op::Csum, T::zero(), T::add)
}
pub(crate) fn k_cmul<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    reduce::<T, _>(d, s[0], Op::Cmul, T::one(), T::mul)
}

/// Inner product accumulated from the additive identity into a length-1
/// destination.
pub(crate) fn k_dot<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    let (av, bv) = (T::data(s[0]), T::data(s[1]));
    if av.len() != bv.len() {
        return Err(Error::SizeMismatch { op: Op::Dot, expected: av.len(), got: bv.len() });
    }
    if d.len() != 1 {
        return Err(Error::SizeMismatch { op: Op::Dot, expected: 1, got: d.len() });
    }
    let acc = av
        .iter()
        .zip(bv)
        .fold(T::zero(), |acc, (x, y)| T::add(acc, T::mul(x.clone(), y.clone())));
    T::data_mut(d)[0] = acc;
    Ok(())
}

/// 3-element cross product. The middle term is explicitly negated;
/// downstream lighting depends on this right-hand-rule orientation.
pub(crate) fn k_xpd<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    for v in [&*d, s[0], s[1]] {
        if v.len() != 3 {
            return Err(Error::SizeMismatch { op: Op::Xpd, expected: 3, got: v.len() });
        }
    }
    let a = T::data(s[0]).to_vec();
    let b = T::data(s[1]).to_vec();
    let out = T::data_mut(d);
    out[0] = T::sub(
        T::mul(a[1].clone(), b[2].clone()),
        T::mul(a[2].clone(), b[1].clone()),
    );
    out[1] = T::neg(T::sub(
        T::mul(a[0].clone(), b[2].clone()),
        T::mul(a[2].clone(), b[0].clone()),
    ));
    out[2] = T::sub(
        T::mul(a[0].clone(), b[1].clone()),
        T::mul(a[1].clone(), b[0].clone()),
    );
    Ok(())
}

/// Divide by the root of the sum of squares.
pub(crate) fn k_norm<T: Real>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    let av = T::data(s[0]);
    if d.len() != av.len() {
        return Err(Error::SizeMismatch { op: Op::Norm, expected: d.len(), got: av.len() });
    }
    let m = T::sqrt(
        av.iter()
            .fold(T::zero(), |acc, x| T::add(acc, T::mul(x.clone(), x.clone()))),
    );
    let av = av.to_vec();
    let out = T::data_mut(d);
    for (x, a) in out.iter_mut().zip(av) {
        *x = T::div_r(a, m.clone());
    }
    Ok(())
}

// ─── Registration ─────────────────────────────────────────────────────────────

/// Register every family's kernels. Registration order is the dispatch
/// tie-break, so keep it stable: floats widest-first, then the float-hosted
/// fraction types, integers, and the range families.
pub(crate) fn register_all(eval: &mut Eval) {
    use crate::types::affine::Affine;
    use crate::types::interval::Interval;
    use ValueType::*;

    real::register::<f64>(eval, F64);
    real::register::<f32>(eval, F32);
    real::register::<f32>(eval, F16);
    real::register::<f32>(eval, FracI32);
    real::register::<f32>(eval, FracI16);
    real::register::<f32>(eval, FracI8);
    real::register::<f32>(eval, FracU32);
    real::register::<f32>(eval, FracU16);
    real::register::<f32>(eval, FracU8);
    int::register::<i32>(eval, I32);
    int::register::<i16>(eval, I16);
    int::register::<i8>(eval, I8);
    int::register::<u32>(eval, U32);
    int::register::<u16>(eval, U16);
    int::register::<u8>(eval, U8);
    real::register::<Interval<f32>>(eval, IF32);
    real::register::<Interval<f64>>(eval, IF64);
    real::register::<Affine<f32>>(eval, AF32);
    real::register::<Affine<f64>>(eval, AF64);
}
