//! Operation dispatch — from (opcode, runtime operand types) to a concrete
//! kernel.
//!
//! Lookup is a two-tier affair: an exact-match cache keyed by the *actual*
//! operand types, seeded at registration and filled as new combinations are
//! seen, over a linear best-match scan that sums precedence distances per
//! operand. Dispatch runs per statement per evaluation, and an opcode can
//! carry a dozen registrations across the storage types, so the cache is
//! what keeps repeated evaluations (loops, per-fragment reruns) cheap.
//!
//! Ties on distance keep the first-registered candidate; registration order
//! is part of the observable contract.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use crate::cast::CastManager;
use crate::error::Error;
use crate::types::ValueType;

use super::opcode::Op;
use super::variant::Variant;

/// A concrete kernel. Operands arrive already cast to the registered
/// signature; the kernel validates shapes (broadcast rules) but never types.
pub type OpFn = fn(&mut Variant, &[&Variant]) -> Result<(), Error>;

/// One registered implementation. `(op, srcs)` is the lookup identity;
/// the destination type is derived, never matched on.
#[derive(Clone, Copy)]
pub struct OpEntry {
    pub op: Op,
    pub dest: ValueType,
    pub srcs: [Option<ValueType>; 3],
    pub(crate) run: OpFn,
}

pub struct Eval {
    table: HashMap<Op, Vec<OpEntry>>,
    cache: RefCell<HashMap<(Op, [Option<ValueType>; 3]), usize>>,
}

impl Eval {
    pub(crate) fn new() -> Self {
        Self { table: HashMap::new(), cache: RefCell::new(HashMap::new()) }
    }

    /// Register one implementation. `(op, srcs)` must be unique; the exact
    /// combination is seeded into the dispatch cache immediately.
    pub(crate) fn add_op(
        &mut self,
        op: Op,
        dest: ValueType,
        srcs: [Option<ValueType>; 3],
        run: OpFn,
    ) {
        let entries = self.table.entry(op).or_default();
        debug_assert!(
            entries.iter().all(|e| e.srcs != srcs),
            "duplicate registration for {op} {srcs:?}",
        );
        entries.push(OpEntry { op, dest, srcs, run });
        self.cache.borrow_mut().entry((op, srcs)).or_insert(entries.len() - 1);
    }

    /// Best-matching registration for the actual operand types, through the
    /// cache.
    pub fn resolve(
        &self,
        op: Op,
        srcs: [Option<ValueType>; 3],
        casts: &CastManager,
    ) -> Result<OpEntry, Error> {
        if let Some(&i) = self.cache.borrow().get(&(op, srcs)) {
            return Ok(self.table[&op][i]);
        }
        let (i, entry) = self.scan(op, srcs, casts)?;
        self.cache.borrow_mut().insert((op, srcs), i);
        debug!(op = %op, "dispatch cache fill");
        Ok(entry)
    }

    /// The uncached linear scan. Exposed so diagnostics and tests can check
    /// the cache never diverges from the slow path.
    pub fn resolve_scan(
        &self,
        op: Op,
        srcs: [Option<ValueType>; 3],
        casts: &CastManager,
    ) -> Result<OpEntry, Error> {
        self.scan(op, srcs, casts).map(|(_, e)| e)
    }

    fn scan(
        &self,
        op: Op,
        srcs: [Option<ValueType>; 3],
        casts: &CastManager,
    ) -> Result<(usize, OpEntry), Error> {
        let entries = self.table.get(&op).ok_or(Error::NoOperation { op, srcs })?;
        let mut best: Option<(usize, i32)> = None;
        for (i, e) in entries.iter().enumerate() {
            let Some(d) = signature_distance(e, srcs, casts) else { continue };
            // strict <: ties keep the first registration found
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        let (i, _) = best.ok_or(Error::NoOperation { op, srcs })?;
        Ok((i, entries[i]))
    }

    /// All registrations for an opcode, in registration order.
    pub fn entries(&self, op: Op) -> &[OpEntry] {
        self.table.get(&op).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Total promotion distance from the actual operand types up to the
/// registered signature, or `None` when any used slot has no promotion path
/// or the slot-usage patterns differ.
fn signature_distance(
    e: &OpEntry,
    actual: [Option<ValueType>; 3],
    casts: &CastManager,
) -> Option<i32> {
    let mut total = 0;
    for k in 0..3 {
        match (e.srcs[k], actual[k]) {
            (None, None) => {}
            (Some(reg), Some(act)) => {
                let d = casts.distance(reg, act);
                if d < 0 {
                    return None;
                }
                total += d;
            }
            _ => return None,
        }
    }
    Some(total)
}
