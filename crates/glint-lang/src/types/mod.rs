//! Storage types and the descriptor registry.
//!
//! `ValueType` is the dense index every derived table is keyed by: the cast
//! resolution tables, the operation dispatch cache, and the descriptor
//! registry are all sized by `ValueType::COUNT`.

pub mod affine;
pub mod fraction;
pub mod half;
pub mod interval;
pub mod registry;

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

// ─── ValueType ────────────────────────────────────────────────────────────────

/// Identity of a storage type. The discriminant is the dense type index.
///
/// Half and the fraction types compute on the host as `f32` but serialize to
/// memory in their own encodings (see `half` and `fraction`); the host/memory
/// split is recorded in each type's descriptor.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    F64,
    F32,
    F16,
    I32,
    I16,
    I8,
    U32,
    U16,
    U8,
    FracI32,
    FracI16,
    FracI8,
    FracU32,
    FracU16,
    FracU8,
    IF32,
    IF64,
    AF32,
    AF64,
}

impl ValueType {
    pub const COUNT: usize = 19;

    pub const ALL: [ValueType; Self::COUNT] = [
        ValueType::F64,
        ValueType::F32,
        ValueType::F16,
        ValueType::I32,
        ValueType::I16,
        ValueType::I8,
        ValueType::U32,
        ValueType::U16,
        ValueType::U8,
        ValueType::FracI32,
        ValueType::FracI16,
        ValueType::FracI8,
        ValueType::FracU32,
        ValueType::FracU16,
        ValueType::FracU8,
        ValueType::IF32,
        ValueType::IF64,
        ValueType::AF32,
        ValueType::AF64,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<ValueType> {
        Self::ALL.get(i).copied()
    }

    /// Short display name, one token per type.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::F64 => "d",
            ValueType::F32 => "f",
            ValueType::F16 => "h",
            ValueType::I32 => "i",
            ValueType::I16 => "s",
            ValueType::I8 => "b",
            ValueType::U32 => "ui",
            ValueType::U16 => "us",
            ValueType::U8 => "ub",
            ValueType::FracI32 => "fi",
            ValueType::FracI16 => "fs",
            ValueType::FracI8 => "fb",
            ValueType::FracU32 => "fui",
            ValueType::FracU16 => "fus",
            ValueType::FracU8 => "fub",
            ValueType::IF32 => "i_f",
            ValueType::IF64 => "i_d",
            ValueType::AF32 => "a_f",
            ValueType::AF64 => "a_d",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, ValueType::F64 | ValueType::F32 | ValueType::F16)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ValueType::I32
                | ValueType::I16
                | ValueType::I8
                | ValueType::U32
                | ValueType::U16
                | ValueType::U8
        )
    }

    pub fn is_fraction(self) -> bool {
        matches!(
            self,
            ValueType::FracI32
                | ValueType::FracI16
                | ValueType::FracI8
                | ValueType::FracU32
                | ValueType::FracU16
                | ValueType::FracU8
        )
    }

    pub fn is_interval(self) -> bool {
        matches!(self, ValueType::IF32 | ValueType::IF64)
    }

    pub fn is_affine(self) -> bool {
        matches!(self, ValueType::AF32 | ValueType::AF64)
    }

    /// Interval or affine.
    pub fn is_range(self) -> bool {
        self.is_interval() || self.is_affine()
    }

    /// Whether negation is meaningful. Unsigned integer and unsigned
    /// fraction tuples treat negation as a no-op.
    pub fn has_negation(self) -> bool {
        !matches!(
            self,
            ValueType::U32
                | ValueType::U16
                | ValueType::U8
                | ValueType::FracU32
                | ValueType::FracU16
                | ValueType::FracU8
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── RawFloat ─────────────────────────────────────────────────────────────────

/// The raw float surface the range types are generic over. `f32` and `f64`
/// only; forwarding the inherent methods keeps the interval/affine code free
/// of per-width duplication.
pub trait RawFloat:
    Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + fmt::Debug
    + fmt::Display
    + std::str::FromStr
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const PI: Self;
    const FRAC_PI_2: Self;

    fn from_f64(x: f64) -> Self;
    fn to_f64(self) -> f64;
    fn is_finite(self) -> bool;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn exp(self) -> Self;
    fn exp2(self) -> Self;
    fn ln(self) -> Self;
    fn log2(self) -> Self;
    fn log10(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn powf(self, other: Self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
}

macro_rules! raw_float_impl {
    ($t:ty) => {
        impl RawFloat for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const INFINITY: Self = <$t>::INFINITY;
            const NEG_INFINITY: Self = <$t>::NEG_INFINITY;
            const PI: Self = std::f64::consts::PI as $t;
            const FRAC_PI_2: Self = std::f64::consts::FRAC_PI_2 as $t;

            #[inline]
            fn from_f64(x: f64) -> Self {
                x as $t
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn is_finite(self) -> bool {
                self.is_finite()
            }

            #[inline]
            fn abs(self) -> Self {
                self.abs()
            }
            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }
            #[inline]
            fn cbrt(self) -> Self {
                self.cbrt()
            }
            #[inline]
            fn exp(self) -> Self {
                self.exp()
            }
            #[inline]
            fn exp2(self) -> Self {
                self.exp2()
            }
            #[inline]
            fn ln(self) -> Self {
                self.ln()
            }
            #[inline]
            fn log2(self) -> Self {
                self.log2()
            }
            #[inline]
            fn log10(self) -> Self {
                self.log10()
            }
            #[inline]
            fn sin(self) -> Self {
                self.sin()
            }
            #[inline]
            fn cos(self) -> Self {
                self.cos()
            }
            #[inline]
            fn tan(self) -> Self {
                self.tan()
            }
            #[inline]
            fn asin(self) -> Self {
                self.asin()
            }
            #[inline]
            fn acos(self) -> Self {
                self.acos()
            }
            #[inline]
            fn atan(self) -> Self {
                self.atan()
            }
            #[inline]
            fn atan2(self, other: Self) -> Self {
                self.atan2(other)
            }
            #[inline]
            fn floor(self) -> Self {
                self.floor()
            }
            #[inline]
            fn ceil(self) -> Self {
                self.ceil()
            }
            #[inline]
            fn round(self) -> Self {
                self.round()
            }
            #[inline]
            fn powf(self, other: Self) -> Self {
                self.powf(other)
            }
            #[inline]
            fn min(self, other: Self) -> Self {
                self.min(other)
            }
            #[inline]
            fn max(self, other: Self) -> Self {
                self.max(other)
            }
        }
    };
}

raw_float_impl!(f32);
raw_float_impl!(f64);
