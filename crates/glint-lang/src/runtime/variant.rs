//! The type-erased tuple value — the currency passed between the statement
//! layer, the cast manager, and the operation kernels.
//!
//! A `Variant` is a fixed-length homogeneous array of one storage type's
//! *host* representation, tagged with its `ValueType` identity. Half and
//! fraction tuples therefore carry `f32` data; their distinct memory
//! encodings only appear at the `write_memory`/`read_memory` boundary.
//!
//! `set` is a copy between same-shape tuples and transparently promotes
//! through the automatic cast graph when the source type differs. Shape
//! violations (length mismatch, out-of-range write index) are caller bugs
//! and assert.

use std::str::FromStr;

use crate::Context;
use crate::error::Error;
use crate::types::affine::Affine;
use crate::types::interval::Interval;
use crate::types::registry;
use crate::types::{ValueType, fraction, half};

use super::swizzle::Swizzle;

// ─── Storage ──────────────────────────────────────────────────────────────────

/// One arm per host representation. Several `ValueType`s share an arm
/// (half and the fractions compute in `f32`); the `Variant`'s type tag is
/// what tells them apart.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Data {
    F64(Vec<f64>),
    F32(Vec<f32>),
    I32(Vec<i32>),
    I16(Vec<i16>),
    I8(Vec<i8>),
    U32(Vec<u32>),
    U16(Vec<u16>),
    U8(Vec<u8>),
    IF32(Vec<Interval<f32>>),
    IF64(Vec<Interval<f64>>),
    AF32(Vec<Affine<f32>>),
    AF64(Vec<Affine<f64>>),
}

mod sealed {
    pub trait Sealed {}
}

/// Host-representation element types. Sealed: the set of storage
/// representations is closed.
pub trait HostData:
    sealed::Sealed + Clone + PartialEq + std::fmt::Display + FromStr + 'static
{
    #[doc(hidden)]
    fn data(v: &Variant) -> &[Self];
    #[doc(hidden)]
    fn data_mut(v: &mut Variant) -> &mut [Self];
    #[doc(hidden)]
    fn wrap(data: Vec<Self>) -> Data;
    #[doc(hidden)]
    fn zero() -> Self;
    /// Element predicate behind `Variant::is_true`: strictly greater than
    /// zero; range types require their whole range above zero.
    #[doc(hidden)]
    fn positive(x: &Self) -> bool;
}

macro_rules! host_data_impl {
    ($t:ty, $arm:ident, $zero:expr, $pos:expr) => {
        impl sealed::Sealed for $t {}
        impl HostData for $t {
            fn data(v: &Variant) -> &[Self] {
                match &v.data {
                    Data::$arm(d) => d,
                    _ => unreachable!("host representation mismatch"),
                }
            }
            fn data_mut(v: &mut Variant) -> &mut [Self] {
                match &mut v.data {
                    Data::$arm(d) => d,
                    _ => unreachable!("host representation mismatch"),
                }
            }
            fn wrap(data: Vec<Self>) -> Data {
                Data::$arm(data)
            }
            fn zero() -> Self {
                $zero
            }
            fn positive(x: &Self) -> bool {
                ($pos)(x)
            }
        }
    };
}

host_data_impl!(f64, F64, 0.0, |x: &f64| *x > 0.0);
host_data_impl!(f32, F32, 0.0, |x: &f32| *x > 0.0);
host_data_impl!(i32, I32, 0, |x: &i32| *x > 0);
host_data_impl!(i16, I16, 0, |x: &i16| *x > 0);
host_data_impl!(i8, I8, 0, |x: &i8| *x > 0);
host_data_impl!(u32, U32, 0, |x: &u32| *x > 0);
host_data_impl!(u16, U16, 0, |x: &u16| *x > 0);
host_data_impl!(u8, U8, 0, |x: &u8| *x > 0);
host_data_impl!(Interval<f32>, IF32, Interval::splat(0.0), |x: &Interval<f32>| x.lo > 0.0);
host_data_impl!(Interval<f64>, IF64, Interval::splat(0.0), |x: &Interval<f64>| x.lo > 0.0);
host_data_impl!(Affine<f32>, AF32, Affine::splat(0.0), |x: &Affine<f32>| x.lo() > 0.0);
host_data_impl!(Affine<f64>, AF64, Affine::splat(0.0), |x: &Affine<f64>| x.lo() > 0.0);

/// Dispatch a generic body on a `ValueType`'s host representation.
macro_rules! host_dispatch {
    ($ty:expr, $T:ident => $body:expr) => {
        match $ty {
            ValueType::F64 => {
                type $T = f64;
                $body
            }
            ValueType::F32
            | ValueType::F16
            | ValueType::FracI32
            | ValueType::FracI16
            | ValueType::FracI8
            | ValueType::FracU32
            | ValueType::FracU16
            | ValueType::FracU8 => {
                type $T = f32;
                $body
            }
            ValueType::I32 => {
                type $T = i32;
                $body
            }
            ValueType::I16 => {
                type $T = i16;
                $body
            }
            ValueType::I8 => {
                type $T = i8;
                $body
            }
            ValueType::U32 => {
                type $T = u32;
                $body
            }
            ValueType::U16 => {
                type $T = u16;
                $body
            }
            ValueType::U8 => {
                type $T = u8;
                $body
            }
            ValueType::IF32 => {
                type $T = Interval<f32>;
                $body
            }
            ValueType::IF64 => {
                type $T = Interval<f64>;
                $body
            }
            ValueType::AF32 => {
                type $T = Affine<f32>;
                $body
            }
            ValueType::AF64 => {
                type $T = Affine<f64>;
                $body
            }
        }
    };
}

fn els<T: HostData>(v: &Variant) -> &[T] {
    T::data(v)
}

// ─── Variant ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    ty: ValueType,
    data: Data,
}

impl Variant {
    // ── Construction ─────────────────────────────────────────────────────────

    /// Zero-filled tuple.
    pub fn zeros(ty: ValueType, n: usize) -> Variant {
        Variant {
            ty,
            data: host_dispatch!(ty, T => T::wrap(vec![T::zero(); n])),
        }
    }

    /// Tuple of `n` copies of `value`, saturated/quantized into the storage
    /// type (fractions clamp to their unit range, half quantizes through
    /// binary16, integers round and saturate).
    pub fn splat(ty: ValueType, n: usize, value: f64) -> Variant {
        Variant { ty, data: splat_data(ty, n, value) }
    }

    /// Tuple from explicit host-representation elements. The element type
    /// must be `ty`'s host representation.
    pub fn from_vec<T: HostData>(ty: ValueType, data: Vec<T>) -> Variant {
        let v = Variant { ty, data: T::wrap(data) };
        assert_eq!(
            std::mem::discriminant(&v.data),
            std::mem::discriminant(&Variant::zeros(ty, 0).data),
            "element type is not the host representation of {ty}",
        );
        v
    }

    // ── Identity and shape ───────────────────────────────────────────────────

    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    pub fn len(&self) -> usize {
        host_dispatch!(self.ty, T => T::data(self).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte size of one element in host computation form.
    pub fn host_elem_size(&self) -> usize {
        registry::host_size(self.ty)
    }

    /// Byte size of one element in memory form; `None` for affine tuples.
    pub fn mem_elem_size(&self) -> Option<usize> {
        registry::mem_size(self.ty)
    }

    /// Borrow the elements as the host representation slice. `T` must be
    /// `value_type()`'s host representation.
    pub fn as_slice<T: HostData>(&self) -> &[T] {
        T::data(self)
    }

    // ── Elementwise access ───────────────────────────────────────────────────

    /// In-place negation. A no-op for unsigned storage, which has no
    /// meaningful negation.
    pub fn negate(&mut self) {
        if !self.ty.has_negation() {
            return;
        }
        match &mut self.data {
            Data::F64(d) => d.iter_mut().for_each(|x| *x = -*x),
            Data::F32(d) => d.iter_mut().for_each(|x| *x = -*x),
            Data::I32(d) => d.iter_mut().for_each(|x| *x = x.wrapping_neg()),
            Data::I16(d) => d.iter_mut().for_each(|x| *x = x.wrapping_neg()),
            Data::I8(d) => d.iter_mut().for_each(|x| *x = x.wrapping_neg()),
            Data::U32(_) | Data::U16(_) | Data::U8(_) => {}
            Data::IF32(d) => d.iter_mut().for_each(|x| *x = -*x),
            Data::IF64(d) => d.iter_mut().for_each(|x| *x = -*x),
            Data::AF32(d) => d.iter_mut().for_each(|x| *x = -x.clone()),
            Data::AF64(d) => d.iter_mut().for_each(|x| *x = -x.clone()),
        }
    }

    /// Full copy.
    pub fn get(&self) -> Variant {
        self.clone()
    }

    /// Length-1 copy of element `index`.
    pub fn get_at(&self, index: usize) -> Variant {
        assert!(index < self.len(), "element index out of range");
        host_dispatch!(self.ty, T => {
            Variant::from_vec(self.ty, vec![T::data(self)[index].clone()])
        })
    }

    /// Swizzled (and optionally negated) copy. Indices may repeat; each must
    /// be in range.
    pub fn get_swiz(&self, neg: bool, swizzle: &Swizzle) -> Variant {
        let mut out = host_dispatch!(self.ty, T => {
            let src = T::data(self);
            let data: Vec<T> = swizzle
                .iter()
                .map(|i| {
                    assert!(i < src.len(), "swizzle index out of range");
                    src[i].clone()
                })
                .collect();
            Variant::from_vec(self.ty, data)
        });
        if neg {
            out.negate();
        }
        out
    }

    /// Full-tuple copy from `other`, promoting through the automatic cast
    /// graph when types differ. Lengths must match.
    pub fn set(&mut self, ctx: &Context, other: &Variant) -> Result<(), Error> {
        let src = self.cast_in(ctx, other)?;
        assert_eq!(src.len(), self.len(), "`set` size mismatch");
        self.data = src.data;
        Ok(())
    }

    /// Write `other`'s first element into element `index`.
    pub fn set_at(&mut self, ctx: &Context, other: &Variant, index: usize) -> Result<(), Error> {
        let src = self.cast_in(ctx, other)?;
        assert!(index < self.len(), "element index out of range");
        assert!(!src.is_empty(), "`set` from an empty tuple");
        host_dispatch!(self.ty, T => {
            T::data_mut(self)[index] = T::data(&src)[0].clone();
        });
        Ok(())
    }

    /// Scattered write through `writemask`, optionally negating. The source
    /// must have the mask's length, or be a scalar (length 1), which
    /// broadcasts to every masked slot.
    pub fn set_masked(
        &mut self,
        ctx: &Context,
        other: &Variant,
        neg: bool,
        writemask: &Swizzle,
    ) -> Result<(), Error> {
        let mut src = self.cast_in(ctx, other)?;
        assert!(
            src.len() == writemask.len() || src.len() == 1,
            "`set` write-mask size mismatch",
        );
        if neg {
            src.negate();
        }
        host_dispatch!(self.ty, T => {
            let vals: Vec<T> = T::data(&src).to_vec();
            let d = T::data_mut(self);
            for (k, idx) in writemask.iter().enumerate() {
                assert!(idx < d.len(), "write index out of range");
                d[idx] = vals[if vals.len() == 1 { 0 } else { k }].clone();
            }
        });
        Ok(())
    }

    fn cast_in(&self, ctx: &Context, other: &Variant) -> Result<Variant, Error> {
        if other.ty == self.ty {
            Ok(other.clone())
        } else {
            ctx.cast(self.ty, other, true)
        }
    }

    // ── Predicates ───────────────────────────────────────────────────────────

    /// Same type, same length, equal elements (bounds-equality for the range
    /// types).
    pub fn equals(&self, other: &Variant) -> bool {
        self == other
    }

    /// True iff every element is positive — the branch predicate of the
    /// control-flow walker.
    pub fn is_true(&self) -> bool {
        host_dispatch!(self.ty, T => T::data(self).iter().all(T::positive))
    }

    // ── Text encoding ────────────────────────────────────────────────────────

    /// `"<n>,<v0>,…,<v(n-1)>"`; the empty tuple encodes as the empty string.
    /// Stable: other subsystems persist and re-parse these strings.
    pub fn encode(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        host_dispatch!(self.ty, T => {
            let mut out = self.len().to_string();
            for x in T::data(self) {
                out.push(',');
                out.push_str(&x.to_string());
            }
            out
        })
    }

    /// Inverse of `encode` for the given type.
    pub fn decode(ty: ValueType, s: &str) -> Result<Variant, Error> {
        if s.is_empty() {
            return Ok(Variant::zeros(ty, 0));
        }
        let decode_err = || Error::Decode { ty, text: s.to_string() };
        let mut parts = s.split(',');
        let n: usize = parts
            .next()
            .expect("split yields at least one part")
            .trim()
            .parse()
            .map_err(|_| decode_err())?;
        host_dispatch!(ty, T => {
            let mut data: Vec<T> = Vec::with_capacity(n);
            for p in parts {
                data.push(p.trim().parse().map_err(|_| decode_err())?);
            }
            if data.len() != n {
                return Err(decode_err());
            }
            Ok(Variant::from_vec(ty, data))
        })
    }

    // ── Memory encoding ──────────────────────────────────────────────────────

    /// Serialize to the storage type's memory form (little-endian; half and
    /// fraction tuples quantize here). Affine tuples have none.
    pub fn write_memory(&self) -> Result<Vec<u8>, Error> {
        use ValueType::*;
        let mut out = Vec::new();
        match self.ty {
            F64 => els::<f64>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            F32 => els::<f32>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            F16 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(half::f32_to_half(x).to_le_bytes())),
            I32 => els::<i32>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            I16 => els::<i16>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            I8 => els::<i8>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            U32 => els::<u32>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            U16 => els::<u16>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            U8 => els::<u8>(self).iter().for_each(|x| out.extend(x.to_le_bytes())),
            FracI32 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(fraction::encode_i32(x).to_le_bytes())),
            FracI16 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(fraction::encode_i16(x).to_le_bytes())),
            FracI8 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(fraction::encode_i8(x).to_le_bytes())),
            FracU32 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(fraction::encode_u32(x).to_le_bytes())),
            FracU16 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(fraction::encode_u16(x).to_le_bytes())),
            FracU8 => els::<f32>(self)
                .iter()
                .for_each(|&x| out.extend(fraction::encode_u8(x).to_le_bytes())),
            IF32 => els::<Interval<f32>>(self).iter().for_each(|iv| {
                out.extend(iv.lo.to_le_bytes());
                out.extend(iv.hi.to_le_bytes());
            }),
            IF64 => els::<Interval<f64>>(self).iter().for_each(|iv| {
                out.extend(iv.lo.to_le_bytes());
                out.extend(iv.hi.to_le_bytes());
            }),
            AF32 | AF64 => return Err(Error::NoMemoryForm { ty: self.ty }),
        }
        Ok(out)
    }

    /// Deserialize from the memory form produced by `write_memory`.
    pub fn read_memory(ty: ValueType, bytes: &[u8]) -> Result<Variant, Error> {
        use ValueType::*;
        let es = registry::mem_size(ty).ok_or(Error::NoMemoryForm { ty })?;
        if bytes.len() % es != 0 {
            return Err(Error::Decode { ty, text: format!("<{} bytes>", bytes.len()) });
        }
        fn chunk<const N: usize>(c: &[u8]) -> [u8; N] {
            c.try_into().expect("chunk size checked above")
        }
        let c = bytes.chunks_exact(es);
        Ok(match ty {
            F64 => Variant::from_vec(ty, c.map(|b| f64::from_le_bytes(chunk(b))).collect()),
            F32 => Variant::from_vec(ty, c.map(|b| f32::from_le_bytes(chunk(b))).collect()),
            F16 => Variant::from_vec(
                ty,
                c.map(|b| half::half_to_f32(u16::from_le_bytes(chunk(b)))).collect(),
            ),
            I32 => Variant::from_vec(ty, c.map(|b| i32::from_le_bytes(chunk(b))).collect()),
            I16 => Variant::from_vec(ty, c.map(|b| i16::from_le_bytes(chunk(b))).collect()),
            I8 => Variant::from_vec(ty, c.map(|b| i8::from_le_bytes(chunk(b))).collect()),
            U32 => Variant::from_vec(ty, c.map(|b| u32::from_le_bytes(chunk(b))).collect()),
            U16 => Variant::from_vec(ty, c.map(|b| u16::from_le_bytes(chunk(b))).collect()),
            U8 => Variant::from_vec(ty, c.map(|b| u8::from_le_bytes(chunk(b))).collect()),
            FracI32 => Variant::from_vec(
                ty,
                c.map(|b| fraction::decode_i32(i32::from_le_bytes(chunk(b)))).collect(),
            ),
            FracI16 => Variant::from_vec(
                ty,
                c.map(|b| fraction::decode_i16(i16::from_le_bytes(chunk(b)))).collect(),
            ),
            FracI8 => Variant::from_vec(
                ty,
                c.map(|b| fraction::decode_i8(i8::from_le_bytes(chunk(b)))).collect(),
            ),
            FracU32 => Variant::from_vec(
                ty,
                c.map(|b| fraction::decode_u32(u32::from_le_bytes(chunk(b)))).collect(),
            ),
            FracU16 => Variant::from_vec(
                ty,
                c.map(|b| fraction::decode_u16(u16::from_le_bytes(chunk(b)))).collect(),
            ),
            FracU8 => Variant::from_vec(
                ty,
                c.map(|b| fraction::decode_u8(u8::from_le_bytes(chunk(b)))).collect(),
            ),
            IF32 => Variant::from_vec(
                ty,
                c.map(|b| {
                    Interval::new(
                        f32::from_le_bytes(chunk(&b[..4])),
                        f32::from_le_bytes(chunk(&b[4..])),
                    )
                })
                .collect(),
            ),
            IF64 => Variant::from_vec(
                ty,
                c.map(|b| {
                    Interval::new(
                        f64::from_le_bytes(chunk(&b[..8])),
                        f64::from_le_bytes(chunk(&b[8..])),
                    )
                })
                .collect(),
            ),
            AF32 | AF64 => unreachable!("rejected by mem_size above"),
        })
    }
}

fn splat_data(ty: ValueType, n: usize, x: f64) -> Data {
    use ValueType::*;
    fn sat(x: f64, lo: f64, hi: f64) -> f64 {
        x.round().clamp(lo, hi)
    }
    match ty {
        F64 => Data::F64(vec![x; n]),
        F32 => Data::F32(vec![x as f32; n]),
        F16 => Data::F32(vec![half::quantize(x as f32); n]),
        I32 => Data::I32(vec![sat(x, i32::MIN as f64, i32::MAX as f64) as i32; n]),
        I16 => Data::I16(vec![sat(x, i16::MIN as f64, i16::MAX as f64) as i16; n]),
        I8 => Data::I8(vec![sat(x, i8::MIN as f64, i8::MAX as f64) as i8; n]),
        U32 => Data::U32(vec![sat(x, 0.0, u32::MAX as f64) as u32; n]),
        U16 => Data::U16(vec![sat(x, 0.0, u16::MAX as f64) as u16; n]),
        U8 => Data::U8(vec![sat(x, 0.0, u8::MAX as f64) as u8; n]),
        FracI32 | FracI16 | FracI8 => Data::F32(vec![fraction::clamp_signed(x as f32); n]),
        FracU32 | FracU16 | FracU8 => Data::F32(vec![fraction::clamp_unsigned(x as f32); n]),
        IF32 => Data::IF32(vec![Interval::splat(x as f32); n]),
        IF64 => Data::IF64(vec![Interval::splat(x); n]),
        AF32 => Data::AF32(vec![Affine::splat(x as f32); n]),
        AF64 => Data::AF64(vec![Affine::splat(x); n]),
    }
}
