//! Cast graph behavior through the public surface: promotion paths,
//! policy separation, narrowing semantics, and table-driven walking.

use glint_lang::{Context, ValueType, Variant};
use ValueType::*;

fn ctx() -> Context {
    Context::standard()
}

// ─── Path structure ──────────────────────────────────────────────────────────

#[test]
fn identity_cast_returns_an_equal_value() {
    let ctx = ctx();
    let v = Variant::from_vec(F32, vec![1.5f32, -2.0]);
    let out = ctx.cast(F32, &v, true).unwrap();
    assert!(out.equals(&v));
    assert_eq!(ctx.casts().steps(F32, F32, true), Some(0));
}

#[test]
fn three_hop_chain_has_distance_three_and_walks_three_edges() {
    // u8 → u16 → u32 → f32 is the only automatic route; no shortcuts exist
    let ctx = ctx();
    assert_eq!(ctx.casts().distance(F32, U8), 3);
    assert_eq!(ctx.casts().steps(F32, U8, true), Some(3));

    let v = Variant::from_vec(U8, vec![3u8, 250]);
    let out = ctx.cast(F32, &v, true).unwrap();
    assert!(out.equals(&Variant::from_vec(F32, vec![3.0f32, 250.0])));
}

#[test]
fn walk_length_never_exceeds_the_precomputed_distance() {
    let ctx = ctx();
    for src in ValueType::ALL {
        for dest in ValueType::ALL {
            let d = ctx.casts().distance(dest, src);
            if d >= 0 {
                let s = ctx.casts().steps(dest, src, true);
                assert_eq!(s, Some(d as usize), "{src} -> {dest}");
            }
        }
    }
}

#[test]
fn every_ordered_pair_is_connected_under_the_unrestricted_policy() {
    let ctx = ctx();
    for src in ValueType::ALL {
        for dest in ValueType::ALL {
            assert!(
                ctx.casts().steps(dest, src, false).is_some(),
                "no registered path {src} -> {dest}",
            );
        }
    }
}

#[test]
fn precedence_distances_match_the_promotion_dag() {
    let ctx = ctx();
    assert_eq!(ctx.casts().distance(F64, F32), 1);
    assert_eq!(ctx.casts().distance(F64, I32), 2); // i → f → d
    assert_eq!(ctx.casts().distance(F32, F16), 1);
    assert_eq!(ctx.casts().distance(AF64, F32), 3); // f → i_f → a_f → a_d
    // no demotion in the precedence DAG
    assert_eq!(ctx.casts().distance(F32, F64), -1);
    assert_eq!(ctx.casts().distance(I32, F32), -1);
}

// ─── Policy separation ───────────────────────────────────────────────────────

#[test]
fn narrowing_is_explicit_only() {
    let ctx = ctx();
    let v = Variant::from_vec(F32, vec![2.7f32]);
    assert!(ctx.cast(I32, &v, true).is_err());
    let out = ctx.cast(I32, &v, false).unwrap();
    assert!(out.equals(&Variant::from_vec(I32, vec![2])));
}

#[test]
fn automatic_promotion_of_ints_lands_in_float() {
    let ctx = ctx();
    let v = Variant::from_vec(I16, vec![-7i16]);
    let out = ctx.cast(F32, &v, true).unwrap();
    assert!(out.equals(&Variant::from_vec(F32, vec![-7.0f32])));
}

// ─── Narrowing semantics ─────────────────────────────────────────────────────

#[test]
fn fraction_narrowing_clamps_to_the_unit_range() {
    let ctx = ctx();
    let v = Variant::from_vec(F32, vec![1.5f32, -0.25, 0.5]);
    let out = ctx.cast(FracU8, &v, false).unwrap();
    assert!(out.equals(&Variant::from_vec(FracU8, vec![1.0f32, 0.0, 0.5])));

    let v = Variant::from_vec(F32, vec![-3.0f32, 0.75]);
    let out = ctx.cast(FracI16, &v, false).unwrap();
    assert!(out.equals(&Variant::from_vec(FracI16, vec![-1.0f32, 0.75])));
}

#[test]
fn half_narrowing_quantizes_through_binary16() {
    let ctx = ctx();
    let v = Variant::from_vec(F32, vec![0.1f32]);
    let out = ctx.cast(F16, &v, false).unwrap();
    let q = out.as_slice::<f32>()[0];
    assert_ne!(q, 0.1); // 0.1 is not representable in binary16
    assert!((q - 0.1).abs() < 1e-4);
    // exactly representable values survive unchanged
    let v = Variant::from_vec(F32, vec![0.5f32]);
    assert_eq!(ctx.cast(F16, &v, false).unwrap().as_slice::<f32>()[0], 0.5);
}

#[test]
fn interval_collapse_takes_the_midpoint() {
    let ctx = ctx();
    let v = Variant::from_vec(IF32, vec![glint_lang::Interval::new(1.0f32, 3.0)]);
    let out = ctx.cast(F32, &v, false).unwrap();
    assert!(out.equals(&Variant::from_vec(F32, vec![2.0f32])));
}

#[test]
fn scalar_to_interval_promotes_to_a_degenerate_interval() {
    let ctx = ctx();
    let v = Variant::from_vec(F32, vec![4.0f32]);
    let out = ctx.cast(IF32, &v, true).unwrap();
    assert!(out.equals(&Variant::from_vec(IF32, vec![glint_lang::Interval::splat(4.0f32)])));
}

#[test]
fn affine_round_trip_through_interval_preserves_bounds() {
    let ctx = ctx();
    let v = Variant::from_vec(IF32, vec![glint_lang::Interval::new(-1.0f32, 3.0)]);
    let af = ctx.cast(ValueType::AF32, &v, true).unwrap();
    let back = ctx.cast(IF32, &af, false).unwrap();
    assert!(back.equals(&v));
}
