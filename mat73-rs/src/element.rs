//! Dataset element kinds.
//!
//! MAT v7.3 datasets hold either plain numbers of one of MATLAB's numeric
//! classes, or object references (cell arrays). Everything numeric is
//! decoded to `f64`.

use std::fmt;

/// Numeric storage types a dataset may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    /// 32-bit floating point (`single`)
    F32,

    /// 64-bit floating point (`double`)
    F64,

    /// 8-bit signed integer (`int8`)
    I8,

    /// 16-bit signed integer (`int16`)
    I16,

    /// 32-bit signed integer (`int32`)
    I32,

    /// 64-bit signed integer (`int64`)
    I64,

    /// 8-bit unsigned integer (`uint8`, also `logical`)
    U8,

    /// 16-bit unsigned integer (`uint16`, also `char` codes)
    U16,

    /// 32-bit unsigned integer (`uint32`)
    U32,

    /// 64-bit unsigned integer (`uint64`)
    U64,

    /// HDF5 boolean enum
    Bool,
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericType::F32 => write!(f, "float32"),
            NumericType::F64 => write!(f, "float64"),
            NumericType::I8 => write!(f, "int8"),
            NumericType::I16 => write!(f, "int16"),
            NumericType::I32 => write!(f, "int32"),
            NumericType::I64 => write!(f, "int64"),
            NumericType::U8 => write!(f, "uint8"),
            NumericType::U16 => write!(f, "uint16"),
            NumericType::U32 => write!(f, "uint32"),
            NumericType::U64 => write!(f, "uint64"),
            NumericType::Bool => write!(f, "bool"),
        }
    }
}

/// The element-kind tag of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Plain numbers.
    Numeric(NumericType),

    /// Object references into the same file.
    Reference,

    /// Anything else (compound, string, opaque...), with a description.
    Unsupported(String),
}

impl ElementKind {
    /// Check if elements are object references.
    pub fn is_reference(&self) -> bool {
        matches!(self, ElementKind::Reference)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Numeric(t) => write!(f, "{}", t),
            ElementKind::Reference => write!(f, "reference"),
            ElementKind::Unsupported(desc) => write!(f, "{}", desc),
        }
    }
}

impl From<NumericType> for ElementKind {
    fn from(t: NumericType) -> Self {
        ElementKind::Numeric(t)
    }
}
