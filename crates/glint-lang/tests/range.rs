//! Interval and affine arithmetic through the full dispatch pipeline.

use glint_lang::{Affine, Context, Interval, Op, ValueType, Variant};
use ValueType::*;

fn ctx() -> Context {
    Context::standard()
}

fn iv(lo: f32, hi: f32) -> Interval<f32> {
    Interval::new(lo, hi)
}

fn iv1(v: Interval<f32>) -> Variant {
    Variant::from_vec(IF32, vec![v])
}

fn apply(ctx: &Context, op: Op, dest: &mut Variant, srcs: &[&Variant]) {
    ctx.apply(op, dest, srcs).unwrap_or_else(|e| panic!("{op} failed: {e}"));
}

// ─── Interval kernels ────────────────────────────────────────────────────────

#[test]
fn interval_addition_adds_endpoints() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    apply(&ctx, Op::Add, &mut out, &[&iv1(iv(1.0, 2.0)), &iv1(iv(-3.0, 5.0))]);
    assert!(out.equals(&iv1(iv(-2.0, 7.0))));
}

#[test]
fn interval_multiplication_takes_corner_extremes() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    apply(&ctx, Op::Mul, &mut out, &[&iv1(iv(-2.0, 3.0)), &iv1(iv(-1.0, 4.0))]);
    assert!(out.equals(&iv1(iv(-8.0, 12.0))));
}

#[test]
fn interval_reciprocal_of_a_straddling_range_is_unbounded() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    apply(&ctx, Op::Rcp, &mut out, &[&iv1(iv(-2.0, 3.0))]);
    assert!(out.equals(&iv1(iv(f32::NEG_INFINITY, f32::INFINITY))));
}

#[test]
fn interval_comparisons_are_tri_state() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);

    apply(&ctx, Op::Slt, &mut out, &[&iv1(iv(1.0, 2.0)), &iv1(iv(3.0, 4.0))]);
    assert!(out.equals(&iv1(iv(1.0, 1.0))), "definitely true");

    apply(&ctx, Op::Slt, &mut out, &[&iv1(iv(3.0, 4.0)), &iv1(iv(1.0, 2.0))]);
    assert!(out.equals(&iv1(iv(0.0, 0.0))), "definitely false");

    apply(&ctx, Op::Slt, &mut out, &[&iv1(iv(1.0, 3.0)), &iv1(iv(2.0, 4.0))]);
    assert!(out.equals(&iv1(iv(0.0, 1.0))), "undecidable");
}

#[test]
fn interval_cond_with_undecidable_condition_hulls_both_branches() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    let c = iv1(iv(-1.0, 1.0));
    let a = iv1(iv(10.0, 10.0));
    let b = iv1(iv(20.0, 20.0));
    apply(&ctx, Op::Cond, &mut out, &[&c, &a, &b]);
    let got = out.as_slice::<Interval<f32>>()[0];
    // lerp([0,1], 10, 20) covers everything between the branches
    assert!(got.lo <= 10.0 && got.hi >= 20.0);
}

#[test]
fn interval_sqrt_clamps_its_domain_at_zero() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    apply(&ctx, Op::Sqrt, &mut out, &[&iv1(iv(-4.0, 9.0))]);
    assert!(out.equals(&iv1(iv(0.0, 3.0))));
}

#[test]
fn interval_mod_is_bounded_by_the_divisor_magnitude() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    apply(&ctx, Op::Mod, &mut out, &[&iv1(iv(7.0, 9.0)), &iv1(iv(-3.0, 2.0))]);
    assert!(out.equals(&iv1(iv(-3.0, 3.0))));
}

#[test]
fn mixed_scalar_and_interval_operands_promote() {
    let ctx = ctx();
    let mut out = Variant::zeros(IF32, 1);
    let s = Variant::from_vec(F32, vec![2.0f32]);
    apply(&ctx, Op::Mul, &mut out, &[&s, &iv1(iv(1.0, 3.0))]);
    assert!(out.equals(&iv1(iv(2.0, 6.0))));
}

// ─── Affine kernels ──────────────────────────────────────────────────────────

fn af1(v: Affine<f32>) -> Variant {
    Variant::from_vec(AF32, vec![v])
}

#[test]
fn affine_subtraction_of_correlated_values_cancels() {
    // x - x through ADD with a negated second operand: exactly zero under
    // affine tracking, where plain intervals would widen to [-2, 2]
    let ctx = ctx();
    let x = Affine::from_bounds(1.0f32, 3.0);
    let mut neg_x = af1(x.clone());
    neg_x.negate();
    let mut out = Variant::zeros(AF32, 1);
    apply(&ctx, Op::Add, &mut out, &[&af1(x), &neg_x]);
    assert!(out.equals(&af1(Affine::splat(0.0f32))));
}

#[test]
fn affine_multiplication_grows_by_the_radius_product() {
    let ctx = ctx();
    let a = Affine::from_bounds(1.0f32, 3.0); // 2 ± 1
    let b = Affine::from_bounds(4.0f32, 6.0); // 5 ± 1
    let mut out = Variant::zeros(AF32, 1);
    apply(&ctx, Op::Mul, &mut out, &[&af1(a), &af1(b)]);
    let got = out.as_slice::<Affine<f32>>()[0].clone();
    assert_eq!(got.center, 10.0);
    assert_eq!(got.radius(), 8.0); // 5 + 2 + 1·1 cross term
}

#[test]
fn affine_exp_encloses_the_true_range() {
    let ctx = ctx();
    let mut out = Variant::zeros(AF32, 1);
    apply(&ctx, Op::Exp, &mut out, &[&af1(Affine::from_bounds(0.0f32, 1.0))]);
    let got = out.as_slice::<Affine<f32>>()[0].to_interval();
    assert!(got.lo <= 1.0 + 1e-5);
    assert!(got.hi >= std::f32::consts::E - 1e-5);
}

#[test]
fn affine_sign_matches_interval_sign_on_straddling_ranges() {
    let ctx = ctx();
    let mut out = Variant::zeros(AF32, 1);
    apply(&ctx, Op::Sgn, &mut out, &[&af1(Affine::from_bounds(-2.0f32, 5.0))]);
    assert!(out.equals(&af1(Affine::from_bounds(-1.0f32, 1.0))));
}

#[test]
fn interval_operands_promote_into_affine_kernels() {
    let ctx = ctx();
    let mut out = Variant::zeros(AF32, 1);
    let a = af1(Affine::from_bounds(0.0f32, 2.0));
    let b = iv1(iv(1.0, 1.0));
    apply(&ctx, Op::Add, &mut out, &[&a, &b]);
    assert!(out.equals(&af1(Affine::from_bounds(1.0f32, 3.0))));
}

#[test]
fn affine_min_max_bound_the_tighter_branch() {
    let ctx = ctx();
    let a = af1(Affine::from_bounds(0.0f32, 1.0));
    let b = af1(Affine::splat(5.0f32));
    let mut out = Variant::zeros(AF32, 1);
    apply(&ctx, Op::Min, &mut out, &[&a, &b]);
    let got = out.as_slice::<Affine<f32>>()[0].to_interval();
    // min(x, 5) = x when x ≤ 1; the approximation may widen but must cover
    assert!(got.lo <= 0.0 + 1e-5 && got.hi >= 1.0 - 1e-5);
    assert!(got.hi < 5.0);
}
