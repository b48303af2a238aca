//! The host-evaluable instruction set.
//!
//! There is no `Sub`: subtraction is `Add` with a negated source, which the
//! statement layer expresses through a source negation flag.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // assignment / unary componentwise
    Asn,
    Neg,
    Abs,
    Sgn,
    Rcp,
    Rsq,
    Sqrt,
    Cbrt,
    Exp,
    Exp2,
    Exp10,
    Log,
    Log2,
    Log10,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Flr,
    Ceil,
    Rnd,
    Frac,
    // unary, not componentwise
    Norm,
    Csum,
    Cmul,
    // derivatives — only meaningful while recording a program
    Dx,
    Dy,
    // binary componentwise
    Add,
    Mul,
    Div,
    Mod,
    Pow,
    Atan2,
    Min,
    Max,
    Slt,
    Sle,
    Sgt,
    Sge,
    Seq,
    Sne,
    // binary, not componentwise
    Dot,
    Xpd,
    // ternary
    Lrp,
    Mad,
    Cond,
}

impl Op {
    /// Number of source operands.
    pub fn arity(self) -> usize {
        use Op::*;
        match self {
            Asn | Neg | Abs | Sgn | Rcp | Rsq | Sqrt | Cbrt | Exp | Exp2 | Exp10 | Log
            | Log2 | Log10 | Sin | Cos | Tan | Asin | Acos | Atan | Flr | Ceil | Rnd
            | Frac | Norm | Csum | Cmul | Dx | Dy => 1,
            Add | Mul | Div | Mod | Pow | Atan2 | Min | Max | Slt | Sle | Sgt | Sge
            | Seq | Sne | Dot | Xpd => 2,
            Lrp | Mad | Cond => 3,
        }
    }

    pub fn name(self) -> &'static str {
        use Op::*;
        match self {
            Asn => "ASN",
            Neg => "NEG",
            Abs => "ABS",
            Sgn => "SGN",
            Rcp => "RCP",
            Rsq => "RSQ",
            Sqrt => "SQRT",
            Cbrt => "CBRT",
            Exp => "EXP",
            Exp2 => "EXP2",
            Exp10 => "EXP10",
            Log => "LOG",
            Log2 => "LOG2",
            Log10 => "LOG10",
            Sin => "SIN",
            Cos => "COS",
            Tan => "TAN",
            Asin => "ASIN",
            Acos => "ACOS",
            Atan => "ATAN",
            Flr => "FLR",
            Ceil => "CEIL",
            Rnd => "RND",
            Frac => "FRAC",
            Norm => "NORM",
            Csum => "CSUM",
            Cmul => "CMUL",
            Dx => "DX",
            Dy => "DY",
            Add => "ADD",
            Mul => "MUL",
            Div => "DIV",
            Mod => "MOD",
            Pow => "POW",
            Atan2 => "ATAN2",
            Min => "MIN",
            Max => "MAX",
            Slt => "SLT",
            Sle => "SLE",
            Sgt => "SGT",
            Sge => "SGE",
            Seq => "SEQ",
            Sne => "SNE",
            Dot => "DOT",
            Xpd => "XPD",
            Lrp => "LRP",
            Mad => "MAD",
            Cond => "COND",
        }
    }

    /// Whether the result comes from outside the evaluator (texture and
    /// stream fetches in the full instruction set). Such opcodes must never
    /// be constant-folded and are always non-constant to any analysis. None
    /// of the host-evaluable opcodes qualify; the flag is the seam the IR
    /// layer keys on.
    pub fn has_external_result(self) -> bool {
        false
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
