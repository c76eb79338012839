//! Object reference resolution.

use crate::container::{Container, NodeOf};
use crate::error::{Error, Result};
use crate::walker::DecodeContext;

/// Resolve a reference found in the dataset at `owner`.
///
/// References are looked up in the file's global table, never relative to
/// the dataset holding them. A reference that designates nothing means the
/// file is corrupt and fails with [`Error::DanglingReference`].
pub fn resolve<C: Container>(
    reference: &C::Reference,
    owner: &str,
    ctx: &DecodeContext<'_, C>,
) -> Result<NodeOf<C>> {
    ctx.container()
        .dereference(reference)?
        .ok_or_else(|| Error::dangling(owner, reference.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Node;
    use crate::mem::{MemDataset, MemFile, ObjectRef};
    use crate::options::DecodeOptions;

    #[test]
    fn test_resolve_existing() {
        let mut file = MemFile::new();
        let root = file.root_id();
        let target = file
            .add_dataset(root, "a", MemDataset::numeric(&[1, 1], vec![1.0]))
            .unwrap();
        let ctx = DecodeContext::new(&file, DecodeOptions::default());

        let node = resolve(&file.reference(target), "/c", &ctx).unwrap();
        assert!(matches!(node, Node::Dataset(id) if id == target));
    }

    #[test]
    fn test_resolve_dangling() {
        let file = MemFile::new();
        let ctx = DecodeContext::new(&file, DecodeOptions::default());

        let err = resolve(&ObjectRef::from_raw(99), "/c", &ctx).unwrap_err();
        match err {
            Error::DanglingReference { path, reference } => {
                assert_eq!(path, "/c");
                assert_eq!(reference, "#99");
            }
            other => panic!("Expected DanglingReference, got {:?}", other),
        }
    }
}
