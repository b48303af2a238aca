//! Error taxonomy for the runtime core.
//!
//! Two groups, kept in one enum so `?` composes across the pipeline:
//!   • Internal dispatch failures (`NoCastPath`, `NoOperation`) — a missing
//!     registration or a promotion-table bug. These never retry; hitting one
//!     during bootstrap or testing exposes the gap immediately.
//!   • User-reachable failures (`SizeMismatch`, `DivideByZero`,
//!     `DerivativeOutsideProgram`, `Decode`) — raised by expressions an
//!     embedding application can actually write, and meant to be caught
//!     and displayed by it.
//!
//! Contract violations on guaranteed-type internal paths (kernel operand
//! unwrapping, swizzle bounds) are asserts, not error values.

use crate::runtime::opcode::Op;
use crate::types::ValueType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No cast path exists from `src` to `dest` under the requested policy.
    #[error("no {policy} cast path from `{src}` to `{dest}`")]
    NoCastPath {
        dest: ValueType,
        src: ValueType,
        /// "automatic" or "registered" depending on the cast policy used.
        policy: &'static str,
    },

    /// No registered implementation of `op` accepts the operand types,
    /// even after automatic promotion.
    #[error("no `{op}` implementation accepts operand types {srcs:?}")]
    NoOperation { op: Op, srcs: [Option<ValueType>; 3] },

    /// Operand tuple lengths are incompatible: equal lengths or a scalar
    /// (length-1) operand are the only legal combinations.
    #[error("`{op}` operand size mismatch: expected {expected}, got {got}")]
    SizeMismatch { op: Op, expected: usize, got: usize },

    /// Integer division or modulus by zero.
    #[error("division by zero in `{op}`")]
    DivideByZero { op: Op },

    /// Derivative opcodes are only defined while a program is being
    /// recorded; they have no immediate-mode value.
    #[error("`{op}` used outside a program definition")]
    DerivativeOutsideProgram { op: Op },

    /// A string did not round-trip through the variant text encoding.
    #[error("cannot decode `{text}` as {ty}")]
    Decode { ty: ValueType, text: String },

    /// The type has no fixed-size memory form (affine tuples are
    /// variable-length).
    #[error("{ty} has no memory representation")]
    NoMemoryForm { ty: ValueType },
}
