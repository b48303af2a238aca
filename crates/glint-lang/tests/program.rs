//! Statement and control-flow evaluation: the seam the IR layer drives.

use glint_lang::{
    Bindings, Block, Context, ControlGraph, Exit, Op, Statement, ValueType, VarRef, Variant,
};
use ValueType::*;

fn ctx() -> Context {
    Context::standard()
}

fn f32s(vals: &[f32]) -> Variant {
    Variant::from_vec(F32, vals.to_vec())
}

// ─── Single statements ───────────────────────────────────────────────────────

#[test]
fn assign_copies_between_slots() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let src = b.push(f32s(&[1.0, 2.0, 3.0]));
    let dst = b.push(Variant::zeros(F32, 3));

    let stmt = Statement::new(Op::Asn, VarRef::new(dst), vec![VarRef::new(src)]);
    glint_lang::runtime::program::evaluate(&ctx, &mut b, &stmt).unwrap();
    assert!(b.get(dst).equals(&f32s(&[1.0, 2.0, 3.0])));
}

#[test]
fn subtraction_is_add_with_a_negated_source() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let a = b.push(f32s(&[10.0]));
    let c = b.push(f32s(&[4.0]));
    let out = b.push(Variant::zeros(F32, 1));

    let stmt = Statement::new(
        Op::Add,
        VarRef::new(out),
        vec![VarRef::new(a), VarRef::new(c).negated()],
    );
    glint_lang::runtime::program::evaluate(&ctx, &mut b, &stmt).unwrap();
    assert!(b.get(out).equals(&f32s(&[6.0])));
}

#[test]
fn swizzled_sources_reorder_operands() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let v = b.push(f32s(&[1.0, 2.0, 3.0]));
    let out = b.push(Variant::zeros(F32, 3));

    // out = v.zyx
    let stmt = Statement::new(Op::Asn, VarRef::new(out), vec![VarRef::swiz(v, [2, 1, 0])]);
    glint_lang::runtime::program::evaluate(&ctx, &mut b, &stmt).unwrap();
    assert!(b.get(out).equals(&f32s(&[3.0, 2.0, 1.0])));
}

#[test]
fn masked_destinations_leave_other_lanes_alone() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let v = b.push(f32s(&[9.0, 8.0]));
    let out = b.push(f32s(&[1.0, 2.0, 3.0, 4.0]));

    // out.wx = v
    let stmt = Statement::new(Op::Asn, VarRef::swiz(out, [3, 0]), vec![VarRef::new(v)]);
    glint_lang::runtime::program::evaluate(&ctx, &mut b, &stmt).unwrap();
    assert!(b.get(out).equals(&f32s(&[8.0, 2.0, 3.0, 9.0])));
}

#[test]
fn statements_dispatch_across_types() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let i = b.push(Variant::from_vec(I32, vec![3]));
    let f = b.push(f32s(&[2.5]));
    let out = b.push(Variant::zeros(F32, 1));

    let stmt = Statement::new(Op::Add, VarRef::new(out), vec![VarRef::new(i), VarRef::new(f)]);
    glint_lang::runtime::program::evaluate(&ctx, &mut b, &stmt).unwrap();
    assert!(b.get(out).equals(&f32s(&[5.5])));
}

// ─── Control flow ────────────────────────────────────────────────────────────

#[test]
fn conditional_exits_follow_the_truth_of_the_condition_slot() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let cond = b.push(f32s(&[0.0])); // false
    let out = b.push(Variant::zeros(F32, 1));
    let ten = b.push(f32s(&[10.0]));
    let twenty = b.push(f32s(&[20.0]));

    // entry: branch to 1 if cond else 2; block 1: out = 10; block 2: out = 20
    let graph = ControlGraph {
        entry: 0,
        blocks: vec![
            Block { stmts: vec![], exits: vec![Exit::when(cond, 1), Exit::always(2)] },
            Block {
                stmts: vec![Statement::new(Op::Asn, VarRef::new(out), vec![VarRef::new(ten)])],
                exits: vec![],
            },
            Block {
                stmts: vec![Statement::new(
                    Op::Asn,
                    VarRef::new(out),
                    vec![VarRef::new(twenty)],
                )],
                exits: vec![],
            },
        ],
    };
    graph.run(&ctx, &mut b).unwrap();
    assert!(b.get(out).equals(&f32s(&[20.0])));
}

#[test]
fn back_edges_express_loops() {
    // i = 0; while (i < 5) i = i + 1;
    let ctx = ctx();
    let mut b = Bindings::new();
    let i = b.push(f32s(&[0.0]));
    let one = b.push(f32s(&[1.0]));
    let five = b.push(f32s(&[5.0]));
    let cond = b.push(Variant::zeros(F32, 1));

    let check = Statement::new(
        Op::Slt,
        VarRef::new(cond),
        vec![VarRef::new(i), VarRef::new(five)],
    );
    let bump = Statement::new(
        Op::Add,
        VarRef::new(i),
        vec![VarRef::new(i), VarRef::new(one)],
    );

    let graph = ControlGraph {
        entry: 0,
        blocks: vec![
            // head: cond = i < 5; loop to body while true
            Block { stmts: vec![check], exits: vec![Exit::when(cond, 1)] },
            // body: i = i + 1; back to head
            Block { stmts: vec![bump], exits: vec![Exit::always(0)] },
        ],
    };
    graph.run(&ctx, &mut b).unwrap();
    assert!(b.get(i).equals(&f32s(&[5.0])));
}

#[test]
fn interval_conditions_branch_only_when_definitely_true() {
    let ctx = ctx();
    let mut b = Bindings::new();
    let cond = b.push(Variant::from_vec(
        IF32,
        vec![glint_lang::Interval::new(-1.0f32, 2.0)],
    ));
    let out = b.push(f32s(&[0.0]));
    let one = b.push(f32s(&[1.0]));

    let graph = ControlGraph {
        entry: 0,
        blocks: vec![
            Block { stmts: vec![], exits: vec![Exit::when(cond, 1)] },
            Block {
                stmts: vec![Statement::new(Op::Asn, VarRef::new(out), vec![VarRef::new(one)])],
                exits: vec![],
            },
        ],
    };
    graph.run(&ctx, &mut b).unwrap();
    // [-1, 2] is not definitely positive, so the branch is not taken
    assert!(b.get(out).equals(&f32s(&[0.0])));
}
