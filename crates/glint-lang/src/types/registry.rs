//! Type descriptor registry — single source of truth for the storage types.
//!
//! Consumed by:
//!   • the cast manager — table sizing and edge validation
//!   • the evaluator   — tuple factories for cast temporaries
//!   • the IR layer    — display names and default range metadata
//!
//! Descriptors are plain data built once inside `ContextBuilder::new()`;
//! nothing here is lazy and nothing mutates after construction.

use super::ValueType;
use crate::runtime::variant::Variant;

// ─── Semantic roles ───────────────────────────────────────────────────────────

/// What a tuple means to the program, as opposed to how it is stored.
/// Geometry roles default to the signed unit range, everything else to the
/// unsigned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantic {
    Attrib,
    Point,
    Vector,
    Normal,
    Position,
    Color,
    TexCoord,
}

impl Semantic {
    fn signed_range(self) -> bool {
        matches!(
            self,
            Semantic::Point | Semantic::Vector | Semantic::Normal | Semantic::Position
        )
    }
}

// ─── Descriptors ──────────────────────────────────────────────────────────────

pub struct TypeDesc {
    pub value_type: ValueType,
    /// Short display name ("f", "i_d", …).
    pub name: &'static str,
    /// Byte size of one element in host computation form.
    pub host_size: usize,
    /// Byte size of one element in memory-serialized form. `None` for the
    /// affine types, whose term lists are variable-length.
    pub mem_size: Option<usize>,
}

impl TypeDesc {
    /// Zero-filled tuple factory.
    pub fn make(&self, n: usize) -> Variant {
        Variant::zeros(self.value_type, n)
    }

    /// Default (lo, hi) range bounds for a tuple of this type in the given
    /// semantic role, as length-1 variants. Values unrepresentable by the
    /// storage type saturate (e.g. -1 becomes 0 for unsigned storage).
    pub fn default_range(&self, sem: Semantic) -> (Variant, Variant) {
        let lo = if sem.signed_range() { -1.0 } else { 0.0 };
        (
            Variant::splat(self.value_type, 1, lo),
            Variant::splat(self.value_type, 1, 1.0),
        )
    }
}

// ─── Registry ─────────────────────────────────────────────────────────────────

pub struct TypeRegistry {
    descs: Vec<TypeDesc>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let descs = ValueType::ALL
            .iter()
            .map(|&vt| TypeDesc {
                value_type: vt,
                name: vt.name(),
                host_size: host_size(vt),
                mem_size: mem_size(vt),
            })
            .collect();
        Self { descs }
    }

    /// Number of registered types; sizes every derived table.
    pub fn count(&self) -> usize {
        self.descs.len()
    }

    pub fn get(&self, vt: ValueType) -> &TypeDesc {
        &self.descs[vt.index()]
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn host_size(vt: ValueType) -> usize {
    use std::mem::size_of;
    use ValueType::*;
    match vt {
        F64 => size_of::<f64>(),
        F32 | F16 => size_of::<f32>(),
        I32 => size_of::<i32>(),
        I16 => size_of::<i16>(),
        I8 => size_of::<i8>(),
        U32 => size_of::<u32>(),
        U16 => size_of::<u16>(),
        U8 => size_of::<u8>(),
        // fractions compute in f32
        FracI32 | FracI16 | FracI8 | FracU32 | FracU16 | FracU8 => size_of::<f32>(),
        IF32 => 2 * size_of::<f32>(),
        IF64 => 2 * size_of::<f64>(),
        // center only; the term list is heap-backed
        AF32 => size_of::<f32>(),
        AF64 => size_of::<f64>(),
    }
}

pub(crate) fn mem_size(vt: ValueType) -> Option<usize> {
    use ValueType::*;
    Some(match vt {
        F64 => 8,
        F32 => 4,
        F16 => 2, // binary16
        I32 | U32 | FracI32 | FracU32 => 4,
        I16 | U16 | FracI16 | FracU16 => 2,
        I8 | U8 | FracI8 | FracU8 => 1,
        IF32 => 8,
        IF64 => 16,
        AF32 | AF64 => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_type() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.count(), ValueType::COUNT);
        for vt in ValueType::ALL {
            assert_eq!(reg.get(vt).value_type, vt);
        }
    }

    #[test]
    fn factories_build_zero_filled_tuples() {
        let reg = TypeRegistry::new();
        let v = reg.get(ValueType::I16).make(4);
        assert_eq!(v.value_type(), ValueType::I16);
        assert_eq!(v.len(), 4);
        assert_eq!(v.as_slice::<i16>(), &[0, 0, 0, 0]);
    }

    #[test]
    fn half_and_fractions_split_host_and_memory_sizes() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.get(ValueType::F16).host_size, 4);
        assert_eq!(reg.get(ValueType::F16).mem_size, Some(2));
        assert_eq!(reg.get(ValueType::FracU8).host_size, 4);
        assert_eq!(reg.get(ValueType::FracU8).mem_size, Some(1));
    }

    #[test]
    fn default_ranges_follow_semantic_role() {
        let reg = TypeRegistry::new();
        let (lo, hi) = reg.get(ValueType::F32).default_range(Semantic::Normal);
        assert_eq!(lo, Variant::splat(ValueType::F32, 1, -1.0));
        assert_eq!(hi, Variant::splat(ValueType::F32, 1, 1.0));
        // unsigned storage saturates the signed default
        let (lo, _) = reg.get(ValueType::U8).default_range(Semantic::Point);
        assert_eq!(lo, Variant::splat(ValueType::U8, 1, 0.0));
        let (lo, hi) = reg.get(ValueType::F32).default_range(Semantic::Color);
        assert_eq!(lo, Variant::splat(ValueType::F32, 1, 0.0));
        assert_eq!(hi, Variant::splat(ValueType::F32, 1, 1.0));
    }
}
