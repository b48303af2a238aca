//! Unit-range fixed-point memory encodings for the fraction types.
//!
//! A fraction value computes on the host as `f32`, clamped to [0,1]
//! (unsigned) or [-1,1] (signed), and serializes to memory as the clamped
//! value scaled by the integer type's maximum. Quantization happens only at
//! the memory boundary; host arithmetic stays in float.

/// Clamp to the signed fraction domain [-1, 1].
#[inline]
pub fn clamp_signed(v: f32) -> f32 {
    v.clamp(-1.0, 1.0)
}

/// Clamp to the unsigned fraction domain [0, 1].
#[inline]
pub fn clamp_unsigned(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

macro_rules! signed_frac {
    ($enc:ident, $dec:ident, $t:ty) => {
        pub fn $enc(v: f32) -> $t {
            (clamp_signed(v) as f64 * <$t>::MAX as f64).round() as $t
        }
        pub fn $dec(m: $t) -> f32 {
            // MIN encodes the same value as MIN+1 so decode stays in [-1,1]
            (m as f64 / <$t>::MAX as f64).max(-1.0) as f32
        }
    };
}

macro_rules! unsigned_frac {
    ($enc:ident, $dec:ident, $t:ty) => {
        pub fn $enc(v: f32) -> $t {
            (clamp_unsigned(v) as f64 * <$t>::MAX as f64).round() as $t
        }
        pub fn $dec(m: $t) -> f32 {
            (m as f64 / <$t>::MAX as f64) as f32
        }
    };
}

signed_frac!(encode_i8, decode_i8, i8);
signed_frac!(encode_i16, decode_i16, i16);
signed_frac!(encode_i32, decode_i32, i32);
unsigned_frac!(encode_u8, decode_u8, u8);
unsigned_frac!(encode_u16, decode_u16, u16);
unsigned_frac!(encode_u32, decode_u32, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(encode_u8(0.0), 0);
        assert_eq!(encode_u8(1.0), u8::MAX);
        assert_eq!(encode_i16(1.0), i16::MAX);
        assert_eq!(encode_i16(-1.0), -i16::MAX);
        assert_eq!(decode_u8(u8::MAX), 1.0);
        assert_eq!(decode_i16(i16::MAX), 1.0);
        assert_eq!(decode_i16(-i16::MAX), -1.0);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(encode_u8(1.5), u8::MAX);
        assert_eq!(encode_u8(-0.5), 0);
        assert_eq!(encode_i8(-2.0), -i8::MAX);
    }

    #[test]
    fn round_trip_error_is_half_a_step() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let err = (decode_u16(encode_u16(v)) - v).abs();
            assert!(err <= 0.5 / u16::MAX as f32 + f32::EPSILON);
        }
    }
}
