//! Dataset classification.

use crate::container::{DatasetInfo, ATTR_EMPTY, ATTR_INT_DECODE};

/// Logical kind of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain numeric array.
    Numeric,

    /// Character codes forming a string.
    Character,

    /// Array of references (a cell array).
    ReferenceArray,

    /// An empty array; the buffer holds only its dimensions.
    Empty,
}

/// Classify a dataset from its metadata alone.
pub fn classify(info: &DatasetInfo) -> NodeKind {
    if info.element_kind.is_reference() {
        NodeKind::ReferenceArray
    } else if info.has_attribute(ATTR_EMPTY) {
        NodeKind::Empty
    } else if info.has_attribute(ATTR_INT_DECODE) {
        NodeKind::Character
    } else {
        NodeKind::Numeric
    }
}
