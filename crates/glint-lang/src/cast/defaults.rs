//! The standard cast edge set.
//!
//! Automatic edges double as the precedence DAG and always point toward a
//! more general type, so the automatic subgraph is acyclic by construction:
//!
//! ```text
//! h → f → d      b → s → i → f      ub → us → ui → f
//! fb fs fi fub fus fui → f
//! f → i_f → i_d      d → i_d      i_f → a_f → a_d      i_d → a_d
//! ```
//!
//! Everything else (narrowing, truncation, range collapse) is registered
//! explicit-only, which keeps implicit promotion loss-free while still
//! connecting every ordered pair of types under the unrestricted policy.

use crate::ContextBuilder;
use crate::runtime::variant::{HostData, Variant};
use crate::types::affine::{Affine, Sym};
use crate::types::interval::Interval;
use crate::types::{ValueType, fraction, half};

fn map<S: HostData, D: HostData>(
    v: &Variant,
    dest: ValueType,
    f: impl Fn(&S) -> D,
) -> Variant {
    Variant::from_vec(dest, S::data(v).iter().map(f).collect())
}

// ─── Widening (automatic) ─────────────────────────────────────────────────────

// half and the fractions already compute in f32; promotion just relabels
fn f16_to_f32(v: &Variant) -> Variant {
    map(v, ValueType::F32, |&x: &f32| x)
}
fn frac_to_f32(v: &Variant) -> Variant {
    map(v, ValueType::F32, |&x: &f32| x)
}

fn f32_to_f64(v: &Variant) -> Variant {
    map(v, ValueType::F64, |&x: &f32| x as f64)
}
fn i8_to_i16(v: &Variant) -> Variant {
    map(v, ValueType::I16, |&x: &i8| x as i16)
}
fn i16_to_i32(v: &Variant) -> Variant {
    map(v, ValueType::I32, |&x: &i16| x as i32)
}
fn i32_to_f32(v: &Variant) -> Variant {
    map(v, ValueType::F32, |&x: &i32| x as f32)
}
fn u8_to_u16(v: &Variant) -> Variant {
    map(v, ValueType::U16, |&x: &u8| x as u16)
}
fn u16_to_u32(v: &Variant) -> Variant {
    map(v, ValueType::U32, |&x: &u16| x as u32)
}
fn u32_to_f32(v: &Variant) -> Variant {
    map(v, ValueType::F32, |&x: &u32| x as f32)
}

fn f32_to_if32(v: &Variant) -> Variant {
    map(v, ValueType::IF32, |&x: &f32| Interval::splat(x))
}
fn f64_to_if64(v: &Variant) -> Variant {
    map(v, ValueType::IF64, |&x: &f64| Interval::splat(x))
}
fn if32_to_if64(v: &Variant) -> Variant {
    map(v, ValueType::IF64, |x: &Interval<f32>| {
        Interval::new(x.lo as f64, x.hi as f64)
    })
}
fn if32_to_af32(v: &Variant) -> Variant {
    map(v, ValueType::AF32, |x: &Interval<f32>| Affine::from_interval(*x))
}
fn if64_to_af64(v: &Variant) -> Variant {
    map(v, ValueType::AF64, |x: &Interval<f64>| Affine::from_interval(*x))
}
fn af32_to_af64(v: &Variant) -> Variant {
    map(v, ValueType::AF64, |x: &Affine<f32>| {
        Affine::from_terms(
            x.center as f64,
            x.syms()
                .iter()
                .map(|s| Sym { index: s.index, err: s.err as f64 })
                .collect(),
        )
    })
}

// ─── Narrowing (explicit-only) ────────────────────────────────────────────────

fn f64_to_f32(v: &Variant) -> Variant {
    map(v, ValueType::F32, |&x: &f64| x as f32)
}
// narrowing to half quantizes through the binary16 encoding
fn f32_to_f16(v: &Variant) -> Variant {
    map(v, ValueType::F16, |&x: &f32| half::quantize(x))
}
fn f32_to_i32(v: &Variant) -> Variant {
    map(v, ValueType::I32, |&x: &f32| x as i32)
}
fn f32_to_u32(v: &Variant) -> Variant {
    map(v, ValueType::U32, |&x: &f32| x as u32)
}
fn i32_to_i16(v: &Variant) -> Variant {
    map(v, ValueType::I16, |&x: &i32| x as i16)
}
fn i16_to_i8(v: &Variant) -> Variant {
    map(v, ValueType::I8, |&x: &i16| x as i8)
}
fn u32_to_u16(v: &Variant) -> Variant {
    map(v, ValueType::U16, |&x: &u32| x as u16)
}
fn u16_to_u8(v: &Variant) -> Variant {
    map(v, ValueType::U8, |&x: &u16| x as u8)
}
fn i32_to_u32(v: &Variant) -> Variant {
    map(v, ValueType::U32, |&x: &i32| x.max(0) as u32)
}
fn u32_to_i32(v: &Variant) -> Variant {
    map(v, ValueType::I32, |&x: &u32| x.min(i32::MAX as u32) as i32)
}

fn f32_to_frac_i8(v: &Variant) -> Variant {
    map(v, ValueType::FracI8, |&x: &f32| fraction::clamp_signed(x))
}
fn f32_to_frac_i16(v: &Variant) -> Variant {
    map(v, ValueType::FracI16, |&x: &f32| fraction::clamp_signed(x))
}
fn f32_to_frac_i32(v: &Variant) -> Variant {
    map(v, ValueType::FracI32, |&x: &f32| fraction::clamp_signed(x))
}
fn f32_to_frac_u8(v: &Variant) -> Variant {
    map(v, ValueType::FracU8, |&x: &f32| fraction::clamp_unsigned(x))
}
fn f32_to_frac_u16(v: &Variant) -> Variant {
    map(v, ValueType::FracU16, |&x: &f32| fraction::clamp_unsigned(x))
}
fn f32_to_frac_u32(v: &Variant) -> Variant {
    map(v, ValueType::FracU32, |&x: &f32| fraction::clamp_unsigned(x))
}

// collapsing a range takes its midpoint
fn if32_to_f32(v: &Variant) -> Variant {
    map(v, ValueType::F32, |x: &Interval<f32>| x.center())
}
fn if64_to_f64(v: &Variant) -> Variant {
    map(v, ValueType::F64, |x: &Interval<f64>| x.center())
}
fn if64_to_if32(v: &Variant) -> Variant {
    map(v, ValueType::IF32, |x: &Interval<f64>| {
        Interval::new(x.lo as f32, x.hi as f32)
    })
}
fn af32_to_if32(v: &Variant) -> Variant {
    map(v, ValueType::IF32, |x: &Affine<f32>| x.to_interval())
}
fn af64_to_if64(v: &Variant) -> Variant {
    map(v, ValueType::IF64, |x: &Affine<f64>| x.to_interval())
}
fn af64_to_af32(v: &Variant) -> Variant {
    map(v, ValueType::AF32, |x: &Affine<f64>| {
        Affine::from_terms(
            x.center as f32,
            x.syms()
                .iter()
                .map(|s| Sym { index: s.index, err: s.err as f32 })
                .collect(),
        )
    })
}

// ─── Registration ─────────────────────────────────────────────────────────────

pub(crate) fn register_standard(b: &mut ContextBuilder) {
    use ValueType::*;

    // automatic promotions (also the precedence DAG)
    b.add_cast(F32, F16, f16_to_f32, true, true);
    b.add_cast(F64, F32, f32_to_f64, true, true);
    b.add_cast(I16, I8, i8_to_i16, true, true);
    b.add_cast(I32, I16, i16_to_i32, true, true);
    b.add_cast(F32, I32, i32_to_f32, true, true);
    b.add_cast(U16, U8, u8_to_u16, true, true);
    b.add_cast(U32, U16, u16_to_u32, true, true);
    b.add_cast(F32, U32, u32_to_f32, true, true);
    b.add_cast(F32, FracI8, frac_to_f32, true, true);
    b.add_cast(F32, FracI16, frac_to_f32, true, true);
    b.add_cast(F32, FracI32, frac_to_f32, true, true);
    b.add_cast(F32, FracU8, frac_to_f32, true, true);
    b.add_cast(F32, FracU16, frac_to_f32, true, true);
    b.add_cast(F32, FracU32, frac_to_f32, true, true);
    b.add_cast(IF32, F32, f32_to_if32, true, true);
    b.add_cast(IF64, F64, f64_to_if64, true, true);
    b.add_cast(IF64, IF32, if32_to_if64, true, true);
    b.add_cast(AF32, IF32, if32_to_af32, true, true);
    b.add_cast(AF64, IF64, if64_to_af64, true, true);
    b.add_cast(AF64, AF32, af32_to_af64, true, true);

    // explicit narrowing
    b.add_cast(F32, F64, f64_to_f32, false, false);
    b.add_cast(F16, F32, f32_to_f16, false, false);
    b.add_cast(I32, F32, f32_to_i32, false, false);
    b.add_cast(U32, F32, f32_to_u32, false, false);
    b.add_cast(I16, I32, i32_to_i16, false, false);
    b.add_cast(I8, I16, i16_to_i8, false, false);
    b.add_cast(U16, U32, u32_to_u16, false, false);
    b.add_cast(U8, U16, u16_to_u8, false, false);
    b.add_cast(U32, I32, i32_to_u32, false, false);
    b.add_cast(I32, U32, u32_to_i32, false, false);
    b.add_cast(FracI8, F32, f32_to_frac_i8, false, false);
    b.add_cast(FracI16, F32, f32_to_frac_i16, false, false);
    b.add_cast(FracI32, F32, f32_to_frac_i32, false, false);
    b.add_cast(FracU8, F32, f32_to_frac_u8, false, false);
    b.add_cast(FracU16, F32, f32_to_frac_u16, false, false);
    b.add_cast(FracU32, F32, f32_to_frac_u32, false, false);
    b.add_cast(F32, IF32, if32_to_f32, false, false);
    b.add_cast(F64, IF64, if64_to_f64, false, false);
    b.add_cast(IF32, IF64, if64_to_if32, false, false);
    b.add_cast(IF32, AF32, af32_to_if32, false, false);
    b.add_cast(IF64, AF64, af64_to_if64, false, false);
    b.add_cast(AF32, AF64, af64_to_af32, false, false);
}
