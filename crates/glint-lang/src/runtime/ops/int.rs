//! Integer semantics and registration of the six integer families.
//!
//! Arithmetic wraps (the memory types behave like their GPU counterparts,
//! not like checked host integers); division and modulus by zero are real
//! errors because the types have no value to express them with. Unsigned
//! negation is the identity, which makes `Abs`/`Sgn` degenerate accordingly.

use crate::error::Error;
use crate::runtime::eval::Eval;
use crate::runtime::opcode::Op;
use crate::runtime::variant::Variant;
use crate::types::ValueType;

use super::Scalar;

macro_rules! signed_int_impl {
    ($t:ty) => {
        impl Scalar for $t {
            fn one() -> Self {
                1
            }
            fn add(a: Self, b: Self) -> Self {
                a.wrapping_add(b)
            }
            fn sub(a: Self, b: Self) -> Self {
                a.wrapping_sub(b)
            }
            fn mul(a: Self, b: Self) -> Self {
                a.wrapping_mul(b)
            }
            fn neg(a: Self) -> Self {
                a.wrapping_neg()
            }
            fn abs(a: Self) -> Self {
                a.wrapping_abs()
            }
            fn sgn(a: Self) -> Self {
                a.signum()
            }
            fn min_v(a: Self, b: Self) -> Self {
                a.min(b)
            }
            fn max_v(a: Self, b: Self) -> Self {
                a.max(b)
            }
            fn slt(a: Self, b: Self) -> Self {
                (a < b) as $t
            }
            fn sle(a: Self, b: Self) -> Self {
                (a <= b) as $t
            }
            fn sgt(a: Self, b: Self) -> Self {
                (a > b) as $t
            }
            fn sge(a: Self, b: Self) -> Self {
                (a >= b) as $t
            }
            fn seq(a: Self, b: Self) -> Self {
                (a == b) as $t
            }
            fn sne(a: Self, b: Self) -> Self {
                (a != b) as $t
            }
            fn checked_div(a: Self, b: Self) -> Option<Self> {
                if b == 0 { None } else { Some(a.wrapping_div(b)) }
            }
            fn checked_rem(a: Self, b: Self) -> Option<Self> {
                if b == 0 { None } else { Some(a.wrapping_rem(b)) }
            }
        }
    };
}

macro_rules! unsigned_int_impl {
    ($t:ty) => {
        impl Scalar for $t {
            fn one() -> Self {
                1
            }
            fn add(a: Self, b: Self) -> Self {
                a.wrapping_add(b)
            }
            fn sub(a: Self, b: Self) -> Self {
                a.wrapping_sub(b)
            }
            fn mul(a: Self, b: Self) -> Self {
                a.wrapping_mul(b)
            }
            // no unsigned negation
            fn neg(a: Self) -> Self {
                a
            }
            fn abs(a: Self) -> Self {
                a
            }
            fn sgn(a: Self) -> Self {
                (a > 0) as $t
            }
            fn min_v(a: Self, b: Self) -> Self {
                a.min(b)
            }
            fn max_v(a: Self, b: Self) -> Self {
                a.max(b)
            }
            fn slt(a: Self, b: Self) -> Self {
                (a < b) as $t
            }
            fn sle(a: Self, b: Self) -> Self {
                (a <= b) as $t
            }
            fn sgt(a: Self, b: Self) -> Self {
                (a > b) as $t
            }
            fn sge(a: Self, b: Self) -> Self {
                (a >= b) as $t
            }
            fn seq(a: Self, b: Self) -> Self {
                (a == b) as $t
            }
            fn sne(a: Self, b: Self) -> Self {
                (a != b) as $t
            }
            fn checked_div(a: Self, b: Self) -> Option<Self> {
                if b == 0 { None } else { Some(a / b) }
            }
            fn checked_rem(a: Self, b: Self) -> Option<Self> {
                if b == 0 { None } else { Some(a % b) }
            }
        }
    };
}

signed_int_impl!(i32);
signed_int_impl!(i16);
signed_int_impl!(i8);
unsigned_int_impl!(u32);
unsigned_int_impl!(u16);
unsigned_int_impl!(u8);

// ─── Registration ─────────────────────────────────────────────────────────────

fn k_div_int<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::try_binary::<T, _>(d, s[0], s[1], Op::Div, T::checked_div)
}

fn k_mod_int<T: Scalar>(d: &mut Variant, s: &[&Variant]) -> Result<(), Error> {
    super::try_binary::<T, _>(d, s[0], s[1], Op::Mod, T::checked_rem)
}

pub(crate) fn register<T: Scalar>(eval: &mut Eval, ty: ValueType) {
    use super::*;
    let s = Some(ty);
    let u = [s, None, None];
    let b = [s, s, None];
    let t = [s, s, s];

    eval.add_op(Op::Asn, ty, u, k_asn::<T>);
    eval.add_op(Op::Neg, ty, u, k_neg::<T>);
    eval.add_op(Op::Abs, ty, u, k_abs::<T>);
    eval.add_op(Op::Sgn, ty, u, k_sgn::<T>);
    eval.add_op(Op::Csum, ty, u, k_csum::<T>);
    eval.add_op(Op::Cmul, ty, u, k_cmul::<T>);

    eval.add_op(Op::Add, ty, b, k_add::<T>);
    eval.add_op(Op::Mul, ty, b, k_mul::<T>);
    eval.add_op(Op::Div, ty, b, k_div_int::<T>);
    eval.add_op(Op::Mod, ty, b, k_mod_int::<T>);
    eval.add_op(Op::Min, ty, b, k_min::<T>);
    eval.add_op(Op::Max, ty, b, k_max::<T>);
    eval.add_op(Op::Slt, ty, b, k_slt::<T>);
    eval.add_op(Op::Sle, ty, b, k_sle::<T>);
    eval.add_op(Op::Sgt, ty, b, k_sgt::<T>);
    eval.add_op(Op::Sge, ty, b, k_sge::<T>);
    eval.add_op(Op::Seq, ty, b, k_seq::<T>);
    eval.add_op(Op::Sne, ty, b, k_sne::<T>);
    eval.add_op(Op::Dot, ty, b, k_dot::<T>);

    eval.add_op(Op::Mad, ty, t, k_mad::<T>);
    eval.add_op(Op::Cond, ty, t, k_cond::<T>);
}
