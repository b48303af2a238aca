//! Runtime core of the Glint embedded shader language: a runtime-typed
//! tuple value (`Variant`), a cast graph with precomputed promotion tables,
//! and an operation dispatcher that picks the best-matching kernel for the
//! operand types it actually sees.
//!
//! Everything hangs off an explicitly constructed [`Context`]:
//!
//! ```
//! use glint_lang::{Context, Op, ValueType, Variant};
//!
//! let ctx = Context::standard();
//! let mut out = Variant::zeros(ValueType::F32, 1);
//! let a = Variant::from_vec(ValueType::I32, vec![3]);
//! let b = Variant::from_vec(ValueType::F32, vec![2.5]);
//! ctx.apply(Op::Add, &mut out, &[&a, &b]).unwrap();
//! assert_eq!(out, Variant::from_vec(ValueType::F32, vec![5.5]));
//! ```
//!
//! Registration happens on a [`ContextBuilder`]; `finish()` precomputes the
//! cast resolution tables and freezes everything, so registering after
//! finalization is not expressible. All dispatch state is immutable after
//! that point except the dispatch cache, which is interior-mutable and
//! single-threaded (`Context` is intentionally not `Sync`).

pub mod cast;
pub mod error;
pub mod runtime;
pub mod types;

pub use error::Error;
pub use runtime::opcode::Op;
pub use runtime::program::{Bindings, Block, ControlGraph, Exit, Statement, VarRef, evaluate};
pub use runtime::swizzle::Swizzle;
pub use runtime::variant::{HostData, Variant};
pub use types::ValueType;
pub use types::affine::Affine;
pub use types::interval::Interval;
pub use types::registry::{Semantic, TypeDesc, TypeRegistry};

use tracing::trace;

use cast::{CastEdge, CastFn, CastManager};
use runtime::eval::{Eval, OpFn};

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Collects cast and operation registrations, then finalizes them into an
/// immutable [`Context`]. The split is what guarantees the resolution
/// tables are built after every registration: there is no way to add an
/// edge to a finished context.
pub struct ContextBuilder {
    types: TypeRegistry,
    edges: Vec<CastEdge>,
    eval: Eval,
}

impl ContextBuilder {
    /// An empty builder: all type descriptors, no casts, no operations.
    pub fn new() -> Self {
        Self { types: TypeRegistry::new(), edges: Vec::new(), eval: Eval::new() }
    }

    /// Register a directed cast edge. `automatic` edges participate in
    /// implicit promotion; `precedence` edges define the specificity DAG
    /// operation dispatch ranks candidates with.
    pub fn add_cast(
        &mut self,
        dest: ValueType,
        src: ValueType,
        apply: CastFn,
        automatic: bool,
        precedence: bool,
    ) {
        self.edges.push(CastEdge { dest, src, automatic, precedence, apply });
    }

    /// Register a concrete operation implementation for the given signature.
    pub fn add_op(
        &mut self,
        op: Op,
        dest: ValueType,
        srcs: [Option<ValueType>; 3],
        run: OpFn,
    ) {
        self.eval.add_op(op, dest, srcs, run);
    }

    /// Precompute the cast resolution tables and freeze the registrations.
    pub fn finish(self) -> Context {
        Context {
            types: self.types,
            casts: CastManager::build(self.edges),
            eval: self.eval,
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Context ──────────────────────────────────────────────────────────────────

/// The finalized runtime environment: type registry, cast manager, and
/// operation dispatcher. One per embedding; passed explicitly wherever the
/// original design reached for process-wide singletons.
pub struct Context {
    types: TypeRegistry,
    casts: CastManager,
    eval: Eval,
}

impl Context {
    /// A context with the standard cast graph and the full kernel tables
    /// for every storage type.
    pub fn standard() -> Context {
        let mut b = ContextBuilder::new();
        cast::defaults::register_standard(&mut b);
        runtime::ops::register_all(&mut b.eval);
        b.finish()
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn casts(&self) -> &CastManager {
        &self.casts
    }

    pub fn eval(&self) -> &Eval {
        &self.eval
    }

    /// Convert `v` to `dest`, walking a shortest path of registered casts.
    pub fn cast(&self, dest: ValueType, v: &Variant, auto_only: bool) -> Result<Variant, Error> {
        self.casts.cast(dest, v, auto_only)
    }

    /// Dispatch `op` over the runtime types of `dest` and `srcs`: find the
    /// best-matching registration, promote differing sources, run the
    /// kernel, and cast the result back into `dest` if the kernel computed
    /// in a different type.
    pub fn apply(&self, op: Op, dest: &mut Variant, srcs: &[&Variant]) -> Result<(), Error> {
        assert_eq!(srcs.len(), op.arity(), "wrong operand count for {op}");

        let mut actual = [None; 3];
        for (k, s) in srcs.iter().enumerate() {
            actual[k] = Some(s.value_type());
        }
        let info = self.eval.resolve(op, actual, &self.casts)?;
        trace!(op = %op, dest = %info.dest, "dispatch");

        let mut cast_srcs: [Option<Variant>; 3] = [None, None, None];
        for (k, src) in srcs.iter().enumerate() {
            let want = info.srcs[k].expect("arity checked against the signature");
            if src.value_type() != want {
                cast_srcs[k] = Some(self.casts.cast(want, src, true)?);
            }
        }
        let src_refs: Vec<&Variant> = srcs
            .iter()
            .enumerate()
            .map(|(k, src)| cast_srcs[k].as_ref().unwrap_or(*src))
            .collect();

        if dest.value_type() == info.dest {
            (info.run)(dest, &src_refs)
        } else {
            // seed the temporary from the current destination value: kernels
            // may write only part of each element
            let mut tmp = self.casts.cast(info.dest, dest, false)?;
            (info.run)(&mut tmp, &src_refs)?;
            *dest = self.casts.cast(dest.value_type(), &tmp, false)?;
            Ok(())
        }
    }
}
