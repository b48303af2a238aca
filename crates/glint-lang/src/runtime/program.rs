//! Immediate-mode statement and control-flow evaluation — the seam between
//! this core and the IR layer that records programs.
//!
//! A statement names an opcode, a destination reference, and up to three
//! source references into a slot store. Evaluation loads each source (with
//! its swizzle and negation applied), dispatches through the context, and
//! writes the result back through the destination's write mask. The
//! control-flow walker runs blocks sequentially and takes the first exit
//! whose condition tuple `is_true`.

use crate::Context;
use crate::error::Error;

use super::opcode::Op;
use super::swizzle::Swizzle;
use super::variant::Variant;

// ─── Slots ────────────────────────────────────────────────────────────────────

/// The variable store a program evaluates against. Slot indices are the
/// statement layer's variable identities.
#[derive(Default)]
pub struct Bindings {
    slots: Vec<Variant>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, v: Variant) -> usize {
        self.slots.push(v);
        self.slots.len() - 1
    }

    pub fn get(&self, slot: usize) -> &Variant {
        &self.slots[slot]
    }

    pub fn get_mut(&mut self, slot: usize) -> &mut Variant {
        &mut self.slots[slot]
    }
}

// ─── Statements ───────────────────────────────────────────────────────────────

/// How a statement addresses a tuple: a slot, an optional swizzle, and a
/// negation flag. Reads apply the swizzle as a selection; the destination
/// applies it as a write mask. Destinations do not negate.
#[derive(Debug, Clone)]
pub struct VarRef {
    pub slot: usize,
    pub swizzle: Option<Swizzle>,
    pub neg: bool,
}

impl VarRef {
    pub fn new(slot: usize) -> Self {
        Self { slot, swizzle: None, neg: false }
    }

    pub fn swiz(slot: usize, swizzle: impl Into<Swizzle>) -> Self {
        Self { slot, swizzle: Some(swizzle.into()), neg: false }
    }

    pub fn negated(mut self) -> Self {
        self.neg = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Statement {
    pub op: Op,
    pub dest: VarRef,
    pub srcs: Vec<VarRef>,
}

impl Statement {
    pub fn new(op: Op, dest: VarRef, srcs: Vec<VarRef>) -> Self {
        assert_eq!(srcs.len(), op.arity(), "wrong operand count for {op}");
        assert!(!dest.neg, "destinations do not negate");
        Self { op, dest, srcs }
    }
}

fn load(bindings: &Bindings, r: &VarRef) -> Variant {
    let v = bindings.get(r.slot);
    match &r.swizzle {
        Some(sw) => v.get_swiz(r.neg, sw),
        None => {
            let mut out = v.get();
            if r.neg {
                out.negate();
            }
            out
        }
    }
}

/// Evaluate one statement against the bindings.
pub fn evaluate(ctx: &Context, bindings: &mut Bindings, stmt: &Statement) -> Result<(), Error> {
    let srcs: Vec<Variant> = stmt.srcs.iter().map(|r| load(bindings, r)).collect();
    let src_refs: Vec<&Variant> = srcs.iter().collect();

    // evaluate into the destination's (possibly masked) view, seeded with
    // its current value so partial writes observe prior contents
    let mut view = match &stmt.dest.swizzle {
        Some(sw) => bindings.get(stmt.dest.slot).get_swiz(false, sw),
        None => bindings.get(stmt.dest.slot).get(),
    };
    ctx.apply(stmt.op, &mut view, &src_refs)?;

    let slot = bindings.get_mut(stmt.dest.slot);
    match &stmt.dest.swizzle {
        Some(sw) => slot.set_masked(ctx, &view, false, sw)?,
        None => slot.set(ctx, &view)?,
    }
    Ok(())
}

// ─── Control flow ─────────────────────────────────────────────────────────────

/// One outgoing edge: taken when the condition slot `is_true`, or
/// unconditionally when there is no condition.
#[derive(Debug, Clone)]
pub struct Exit {
    pub cond: Option<usize>,
    pub target: usize,
}

impl Exit {
    pub fn when(cond_slot: usize, target: usize) -> Self {
        Self { cond: Some(cond_slot), target }
    }

    pub fn always(target: usize) -> Self {
        Self { cond: None, target }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub stmts: Vec<Statement>,
    pub exits: Vec<Exit>,
}

/// A control-flow graph over blocks. Back edges express loops; a block with
/// no taken exit halts the walk.
#[derive(Debug, Clone)]
pub struct ControlGraph {
    pub blocks: Vec<Block>,
    pub entry: usize,
}

impl ControlGraph {
    /// Execute from the entry block until no exit is taken. Strictly
    /// sequential: statements within a block run in order, and exactly one
    /// successor is followed at a time.
    pub fn run(&self, ctx: &Context, bindings: &mut Bindings) -> Result<(), Error> {
        let mut cur = Some(self.entry);
        while let Some(b) = cur {
            let block = &self.blocks[b];
            for stmt in &block.stmts {
                evaluate(ctx, bindings, stmt)?;
            }
            cur = block
                .exits
                .iter()
                .find(|e| e.cond.is_none_or(|slot| bindings.get(slot).is_true()))
                .map(|e| e.target);
        }
        Ok(())
    }
}
