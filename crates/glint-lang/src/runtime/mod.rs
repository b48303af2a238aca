pub mod eval;
pub mod opcode;
pub(crate) mod ops;
pub mod program;
pub mod swizzle;
pub mod variant;
