//! The cast graph and its precomputed resolution tables.
//!
//! Vertices are type indices; edges are registered conversion functions,
//! each flagged `automatic` (usable for implicit promotion) and/or
//! `precedence` (an edge of the specificity DAG the dispatcher ranks
//! candidates with). The automatic subgraph must stay acyclic or "most
//! general common type" stops being well-defined; the standard edge set
//! keeps every promotion pointing strictly toward more general types.
//!
//! `build` runs an all-pairs shortest path three times — unrestricted,
//! automatic-only, precedence-only — weighting admissible edges 1 and
//! inadmissible ones `LARGE`, so one pass also discovers the restricted
//! subgraph's connectivity. Lookups afterwards are O(1) per hop.

pub mod defaults;

use tracing::trace;

use crate::error::Error;
use crate::runtime::variant::Variant;
use crate::types::ValueType;

/// Converts a tuple to the edge's destination type, preserving length.
pub type CastFn = fn(&Variant) -> Variant;

pub struct CastEdge {
    pub dest: ValueType,
    pub src: ValueType,
    pub automatic: bool,
    pub precedence: bool,
    pub(crate) apply: CastFn,
}

/// Larger than any usable cast sequence, small enough that summing a few
/// cannot overflow.
pub(crate) const LARGE: i32 = 10_000_000;

// ─── Manager ──────────────────────────────────────────────────────────────────

pub struct CastManager {
    edges: Vec<CastEdge>,
    /// First edge to apply walking src → dest over any registered cast,
    /// indexed `[dest][src]`. `None` means unreachable.
    step_any: Vec<Option<usize>>,
    /// Same, restricted to automatic edges.
    step_auto: Vec<Option<usize>>,
    /// Distance in the precedence subgraph, `-1` when unreachable.
    dist_prec: Vec<i32>,
}

impl CastManager {
    pub(crate) fn build(edges: Vec<CastEdge>) -> Self {
        let (step_any, _) = shortest_paths(&edges, |_| true);
        let (step_auto, _) = shortest_paths(&edges, |e| e.automatic);
        let (_, dist_prec) = shortest_paths(&edges, |e| e.precedence);
        Self { edges, step_any, step_auto, dist_prec }
    }

    /// Walk a shortest cast path from `v` to `dest`, one registered edge per
    /// hop. A same-type cast is the zero-length path (a copy).
    pub fn cast(&self, dest: ValueType, v: &Variant, auto_only: bool) -> Result<Variant, Error> {
        if v.value_type() == dest {
            return Ok(v.clone());
        }
        let steps = if auto_only { &self.step_auto } else { &self.step_any };
        let policy = if auto_only { "automatic" } else { "registered" };
        let n = ValueType::COUNT;
        let mut cur = v.clone();
        // a shortest path never revisits a vertex, so COUNT hops is a hard
        // ceiling; exceeding it means the tables cycled
        for _ in 0..n {
            let ei = steps[dest.index() * n + cur.value_type().index()].ok_or(
                Error::NoCastPath { dest, src: v.value_type(), policy },
            )?;
            let edge = &self.edges[ei];
            trace!(from = %cur.value_type(), to = %edge.dest, "cast step");
            let next = (edge.apply)(&cur);
            debug_assert_eq!(next.value_type(), edge.dest, "edge produced the wrong type");
            debug_assert_ne!(next.value_type(), cur.value_type(), "cast step must change the type");
            cur = next;
            if cur.value_type() == dest {
                return Ok(cur);
            }
        }
        unreachable!("cast resolution tables contain a cycle")
    }

    /// Precedence-subgraph distance from `src` up to `dest`; `-1` when no
    /// promotion path exists. Zero for identical types. This is the ranking
    /// metric of operation dispatch, never used to perform casts.
    pub fn distance(&self, dest: ValueType, src: ValueType) -> i32 {
        self.dist_prec[dest.index() * ValueType::COUNT + src.index()]
    }

    /// Number of edges a `cast` walk would apply, without applying them.
    pub fn steps(&self, dest: ValueType, src: ValueType, auto_only: bool) -> Option<usize> {
        if src == dest {
            return Some(0);
        }
        let steps = if auto_only { &self.step_auto } else { &self.step_any };
        let n = ValueType::COUNT;
        let mut cur = src;
        for count in 1..=n {
            let ei = steps[dest.index() * n + cur.index()]?;
            cur = self.edges[ei].dest;
            if cur == dest {
                return Some(count);
            }
        }
        unreachable!("cast resolution tables contain a cycle")
    }
}

/// Floyd–Warshall with first-hop tracking. Returns (`first[dest][src]`,
/// `dist[dest][src]`) where dist ≥ `LARGE` marks unreachable pairs (mapped
/// to `None` / `-1`).
fn shortest_paths(
    edges: &[CastEdge],
    admit: impl Fn(&CastEdge) -> bool,
) -> (Vec<Option<usize>>, Vec<i32>) {
    let n = ValueType::COUNT;
    let at = |dest: usize, src: usize| dest * n + src;

    let mut dist = vec![LARGE; n * n];
    let mut first: Vec<Option<usize>> = vec![None; n * n];
    for i in 0..n {
        dist[at(i, i)] = 0;
    }
    for (ei, e) in edges.iter().enumerate() {
        let w = if admit(e) { 1 } else { LARGE };
        let slot = at(e.dest.index(), e.src.index());
        if w < dist[slot] {
            dist[slot] = w;
            first[slot] = Some(ei);
        }
    }

    for k in 0..n {
        for s in 0..n {
            let head = dist[at(k, s)];
            if head >= LARGE {
                continue;
            }
            for d in 0..n {
                let via = head.saturating_add(dist[at(d, k)]);
                if via < dist[at(d, s)] {
                    dist[at(d, s)] = via;
                    first[at(d, s)] = first[at(k, s)];
                }
            }
        }
    }

    let first = first
        .iter()
        .enumerate()
        .map(|(i, f)| if dist[i] >= LARGE { None } else { *f })
        .collect();
    let dist = dist
        .iter()
        .map(|&d| if d >= LARGE { -1 } else { d })
        .collect();
    (first, dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContextBuilder;
    use crate::types::ValueType::*;

    fn i32_widen(v: &Variant) -> Variant {
        Variant::from_vec(
            F64,
            v.as_slice::<i32>().iter().map(|&x| x as f64).collect(),
        )
    }

    fn i16_widen(v: &Variant) -> Variant {
        Variant::from_vec(
            I32,
            v.as_slice::<i16>().iter().map(|&x| x as i32).collect(),
        )
    }

    #[test]
    fn identity_cast_is_a_zero_length_path() {
        let ctx = crate::Context::standard();
        let v = Variant::splat(F32, 3, 2.5);
        assert_eq!(ctx.casts().steps(F32, F32, true), Some(0));
        assert_eq!(ctx.cast(F32, &v, true).unwrap(), v);
    }

    #[test]
    fn two_hop_chain_resolves_through_the_middle_type() {
        let mut b = ContextBuilder::new();
        b.add_cast(I32, I16, i16_widen, true, true);
        b.add_cast(F64, I32, i32_widen, true, true);
        let ctx = b.finish();
        assert_eq!(ctx.casts().distance(F64, I16), 2);
        assert_eq!(ctx.casts().steps(F64, I16, true), Some(2));
        let out = ctx.cast(F64, &Variant::from_vec(I16, vec![7i16, -2]), true).unwrap();
        assert_eq!(out, Variant::from_vec(F64, vec![7.0, -2.0]));
    }

    #[test]
    fn unreachable_pairs_report_no_path() {
        let mut b = ContextBuilder::new();
        b.add_cast(F64, I32, i32_widen, true, true);
        let ctx = b.finish();
        assert_eq!(ctx.casts().distance(I32, F64), -1);
        let v = Variant::splat(F64, 1, 1.0);
        assert!(matches!(
            ctx.cast(I32, &v, true),
            Err(Error::NoCastPath { dest: I32, src: F64, .. })
        ));
    }

    #[test]
    fn non_automatic_edges_are_invisible_to_the_auto_policy() {
        let mut b = ContextBuilder::new();
        b.add_cast(F64, I32, i32_widen, false, false);
        let ctx = b.finish();
        let v = Variant::from_vec(I32, vec![3]);
        assert!(ctx.cast(F64, &v, true).is_err());
        assert_eq!(
            ctx.cast(F64, &v, false).unwrap(),
            Variant::from_vec(F64, vec![3.0]),
        );
    }
}
