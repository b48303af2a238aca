//! Variant behavior: construction, swizzled reads and masked writes,
//! negation, truth testing, and the text/memory encodings.

use glint_lang::{Affine, Context, Error, Interval, Swizzle, ValueType, Variant};
use ValueType::*;

fn ctx() -> Context {
    Context::standard()
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn zeros_are_zero_filled_with_the_right_identity() {
    let v = Variant::zeros(F32, 3);
    assert_eq!(v.value_type(), F32);
    assert_eq!(v.len(), 3);
    assert_eq!(v.as_slice::<f32>(), &[0.0, 0.0, 0.0]);
}

#[test]
fn splat_saturates_into_the_storage_type() {
    assert_eq!(Variant::splat(U8, 2, -5.0).as_slice::<u8>(), &[0, 0]);
    assert_eq!(Variant::splat(U8, 1, 300.0).as_slice::<u8>(), &[255]);
    assert_eq!(Variant::splat(I8, 1, 200.0).as_slice::<i8>(), &[127]);
    assert_eq!(Variant::splat(FracU8, 1, 2.0).as_slice::<f32>(), &[1.0]);
    assert_eq!(Variant::splat(FracI16, 1, -2.0).as_slice::<f32>(), &[-1.0]);
}

#[test]
fn element_sizes_split_host_and_memory() {
    let v = Variant::zeros(F16, 4);
    assert_eq!(v.host_elem_size(), 4);
    assert_eq!(v.mem_elem_size(), Some(2));
    assert_eq!(Variant::zeros(AF32, 1).mem_elem_size(), None);
}

// ─── Swizzled access ─────────────────────────────────────────────────────────

#[test]
fn swizzled_reads_select_and_reorder() {
    let v = Variant::from_vec(F32, vec![1.0f32, 2.0, 3.0, 4.0]);
    let out = v.get_swiz(false, &Swizzle::from([2, 0, 2]));
    assert_eq!(out.as_slice::<f32>(), &[3.0, 1.0, 3.0]);
}

#[test]
fn get_at_extracts_a_length_one_tuple() {
    let v = Variant::from_vec(F32, vec![1.0f32, 2.0, 3.0]);
    assert!(v.get_at(1).equals(&Variant::from_vec(F32, vec![2.0f32])));
}

#[test]
fn identity_swizzle_reads_everything_in_order() {
    let v = Variant::from_vec(F32, vec![1.0f32, 2.0]);
    let out = v.get_swiz(false, &Swizzle::identity(2));
    assert!(out.equals(&v));
}

#[test]
fn negated_reads_negate_every_selected_element() {
    let v = Variant::from_vec(F32, vec![1.0f32, -2.0]);
    let out = v.get_swiz(true, &Swizzle::from([1, 0]));
    assert_eq!(out.as_slice::<f32>(), &[2.0, -1.0]);
}

#[test]
fn masked_writes_scatter_and_broadcast_scalars() {
    let ctx = ctx();
    let mut v = Variant::zeros(F32, 4);
    let src = Variant::from_vec(F32, vec![9.0f32, 8.0]);
    v.set_masked(&ctx, &src, false, &Swizzle::from([3, 1])).unwrap();
    assert_eq!(v.as_slice::<f32>(), &[0.0, 8.0, 0.0, 9.0]);

    let scalar = Variant::from_vec(F32, vec![5.0f32]);
    v.set_masked(&ctx, &scalar, false, &Swizzle::from([0, 2])).unwrap();
    assert_eq!(v.as_slice::<f32>(), &[5.0, 8.0, 5.0, 9.0]);
}

#[test]
fn set_promotes_through_the_automatic_graph() {
    let ctx = ctx();
    let mut v = Variant::zeros(F32, 2);
    v.set(&ctx, &Variant::from_vec(I32, vec![3, -4])).unwrap();
    assert_eq!(v.as_slice::<f32>(), &[3.0, -4.0]);
}

#[test]
fn set_at_writes_one_element_from_a_scalar() {
    let ctx = ctx();
    let mut v = Variant::from_vec(F32, vec![1.0f32, 2.0, 3.0]);
    v.set_at(&ctx, &Variant::from_vec(F32, vec![9.0f32]), 1).unwrap();
    assert_eq!(v.as_slice::<f32>(), &[1.0, 9.0, 3.0]);
}

// ─── Negation ────────────────────────────────────────────────────────────────

#[test]
fn negate_flips_signed_storage() {
    let mut v = Variant::from_vec(I32, vec![1, -2, 0]);
    v.negate();
    assert_eq!(v.as_slice::<i32>(), &[-1, 2, 0]);
}

#[test]
fn negate_is_a_no_op_for_unsigned_storage() {
    let mut v = Variant::from_vec(U16, vec![1u16, 2]);
    v.negate();
    assert_eq!(v.as_slice::<u16>(), &[1, 2]);

    // unsigned fractions share f32 host storage but still do not negate
    let mut v = Variant::splat(FracU8, 2, 0.5);
    v.negate();
    assert_eq!(v.as_slice::<f32>(), &[0.5, 0.5]);
}

#[test]
fn negate_flips_interval_bounds() {
    let mut v = Variant::from_vec(IF32, vec![Interval::new(1.0f32, 3.0)]);
    v.negate();
    assert!(v.equals(&Variant::from_vec(IF32, vec![Interval::new(-3.0f32, -1.0)])));
}

// ─── Predicates ──────────────────────────────────────────────────────────────

#[test]
fn equals_requires_type_length_and_elements() {
    let a = Variant::from_vec(F32, vec![1.0f32, 2.0]);
    assert!(a.equals(&Variant::from_vec(F32, vec![1.0f32, 2.0])));
    assert!(!a.equals(&Variant::from_vec(F32, vec![1.0f32])));
    assert!(!a.equals(&Variant::from_vec(F64, vec![1.0f64, 2.0])));
}

#[test]
fn range_equality_is_bounds_equality() {
    // two affine forms with different symbols but the same bounds are equal
    let a = Variant::from_vec(AF32, vec![Affine::from_bounds(0.0f32, 2.0)]);
    let b = Variant::from_vec(AF32, vec![Affine::from_bounds(0.0f32, 2.0)]);
    assert!(a.equals(&b));
}

#[test]
fn is_true_means_every_element_positive() {
    assert!(Variant::from_vec(F32, vec![1.0f32, 0.5]).is_true());
    assert!(!Variant::from_vec(F32, vec![1.0f32, 0.0]).is_true());
    assert!(Variant::from_vec(I32, vec![2, 3]).is_true());
    assert!(!Variant::from_vec(I32, vec![2, -1]).is_true());
    // an interval is only true when its whole range is positive
    assert!(Variant::from_vec(IF32, vec![Interval::new(0.5f32, 2.0)]).is_true());
    assert!(!Variant::from_vec(IF32, vec![Interval::new(-0.5f32, 2.0)]).is_true());
}

// ─── Text encoding ───────────────────────────────────────────────────────────

#[test]
fn encode_uses_count_then_elements() {
    let v = Variant::from_vec(F32, vec![1.0f32, 2.5, -3.0]);
    assert_eq!(v.encode(), "3,1,2.5,-3");
}

#[test]
fn decode_round_trips_every_storage_type() {
    let ctx = ctx();
    for ty in ValueType::ALL {
        // a representative patterned tuple, saturated per type
        let mut v = Variant::zeros(ty, 3);
        for (i, x) in [0.0, 0.5, 1.0].iter().enumerate() {
            v.set_at(&ctx, &Variant::splat(ty, 1, *x), i).unwrap();
        }
        let back = Variant::decode(ty, &v.encode())
            .unwrap_or_else(|e| panic!("decode {ty} failed: {e}"));
        assert!(back.equals(&v), "{ty} round trip");
    }
}

#[test]
fn decode_round_trips_nontrivial_ranges() {
    let v = Variant::from_vec(
        IF32,
        vec![Interval::new(-1.5f32, 2.5), Interval::new(0.0f32, 0.0)],
    );
    assert!(Variant::decode(IF32, &v.encode()).unwrap().equals(&v));

    let v = Variant::from_vec(
        AF32,
        vec![Affine::from_bounds(-1.0f32, 3.0), Affine::splat(2.0f32)],
    );
    assert!(Variant::decode(AF32, &v.encode()).unwrap().equals(&v));
}

#[test]
fn empty_tuples_encode_as_the_empty_string() {
    let v = Variant::zeros(F32, 0);
    assert_eq!(v.encode(), "");
    assert!(Variant::decode(F32, "").unwrap().equals(&v));
}

#[test]
fn malformed_text_is_a_decode_error() {
    assert!(matches!(
        Variant::decode(F32, "2,1.0"),
        Err(Error::Decode { ty: F32, .. })
    ));
    assert!(matches!(
        Variant::decode(I32, "1,notanint"),
        Err(Error::Decode { ty: I32, .. })
    ));
}

// ─── Memory encoding ─────────────────────────────────────────────────────────

#[test]
fn plain_types_round_trip_through_memory() {
    let v = Variant::from_vec(I16, vec![-300i16, 12000]);
    let bytes = v.write_memory().unwrap();
    assert_eq!(bytes.len(), 4);
    assert!(Variant::read_memory(I16, &bytes).unwrap().equals(&v));
}

#[test]
fn half_memory_form_is_two_bytes_per_element() {
    let v = Variant::from_vec(F16, vec![0.5f32, -2.0]);
    let bytes = v.write_memory().unwrap();
    assert_eq!(bytes.len(), 4);
    assert!(Variant::read_memory(F16, &bytes).unwrap().equals(&v));
}

#[test]
fn fraction_memory_form_quantizes() {
    let v = Variant::from_vec(FracU8, vec![0.0f32, 1.0, 0.5]);
    let bytes = v.write_memory().unwrap();
    assert_eq!(bytes.len(), 3);
    let back = Variant::read_memory(FracU8, &bytes).unwrap();
    let got = back.as_slice::<f32>();
    assert_eq!(got[0], 0.0);
    assert_eq!(got[1], 1.0);
    assert!((got[2] - 0.5).abs() <= 0.5 / 255.0 + f32::EPSILON);
}

#[test]
fn intervals_serialize_both_bounds() {
    let v = Variant::from_vec(IF32, vec![Interval::new(-1.0f32, 2.0)]);
    let bytes = v.write_memory().unwrap();
    assert_eq!(bytes.len(), 8);
    assert!(Variant::read_memory(IF32, &bytes).unwrap().equals(&v));
}

#[test]
fn affine_tuples_have_no_memory_form() {
    let v = Variant::from_vec(AF32, vec![Affine::splat(1.0f32)]);
    assert!(matches!(v.write_memory(), Err(Error::NoMemoryForm { ty: AF32 })));
    assert!(matches!(
        Variant::read_memory(AF32, &[0, 0, 0, 0]),
        Err(Error::NoMemoryForm { ty: AF32 })
    ));
}
