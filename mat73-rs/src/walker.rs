//! Recursive traversal of the container tree.
//!
//! [`decode`] turns any node into a [`DecodedValue`]: groups become
//! mappings, datasets are dispatched on their [`NodeKind`]. Cell arrays
//! recurse back into this module through [`crate::cell`].

use indexmap::IndexMap;
use tracing::trace;

use crate::cell::{self, Invocation};
use crate::classify::{classify, NodeKind};
use crate::container::{Container, DatasetInfo, Node, NodeOf};
use crate::element::ElementKind;
use crate::error::{Error, Result};
use crate::options::DecodeOptions;
use crate::shape;
use crate::value::DecodedValue;

/// Everything a decode needs besides the node itself.
///
/// Carries the open container explicitly: references are resolved against
/// the whole file, so every recursive step receives the same context.
#[derive(Debug)]
pub struct DecodeContext<'c, C> {
    container: &'c C,
    options: DecodeOptions,
}

impl<'c, C: Container> DecodeContext<'c, C> {
    /// Create a context over an open container.
    pub fn new(container: &'c C, options: DecodeOptions) -> Self {
        DecodeContext { container, options }
    }

    /// The container being decoded.
    pub fn container(&self) -> &'c C {
        self.container
    }

    /// The decode options.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    fn check_depth(&self, path: &str, depth: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(Error::max_depth(path, self.options.max_depth));
        }
        Ok(())
    }
}

/// Decode a node and everything below it.
///
/// `depth` is the nesting level of `node`; top-level variables are decoded
/// at depth 1.
pub fn decode<C: Container>(
    node: &NodeOf<C>,
    ctx: &DecodeContext<'_, C>,
    depth: usize,
) -> Result<DecodedValue> {
    match node {
        Node::Group(group) => decode_group(group, ctx, depth),
        Node::Dataset(dataset) => {
            let info = ctx.container().dataset_info(dataset)?;
            decode_dataset(dataset, &info, ctx, depth)
        }
        Node::Unsupported { path, kind } => {
            Err(Error::unsupported_node(path.as_str(), kind.as_str()))
        }
    }
}

/// Decode a group into a mapping, in member enumeration order.
pub(crate) fn decode_group<C: Container>(
    group: &C::Group,
    ctx: &DecodeContext<'_, C>,
    depth: usize,
) -> Result<DecodedValue> {
    ctx.check_depth(&ctx.container().group_path(group), depth)?;

    let mut fields = IndexMap::new();
    for (name, child) in ctx.container().members(group)? {
        let value = decode(&child, ctx, depth + 1)?;
        fields.insert(name, value);
    }
    Ok(DecodedValue::Mapping(fields))
}

/// Decode a dataset according to its classification.
pub(crate) fn decode_dataset<C: Container>(
    dataset: &C::Dataset,
    info: &DatasetInfo,
    ctx: &DecodeContext<'_, C>,
    depth: usize,
) -> Result<DecodedValue> {
    ctx.check_depth(&info.path, depth)?;

    let kind = classify(info);
    trace!(path = %info.path, element = %info.element_kind, ?kind, "decoding dataset");
    match kind {
        NodeKind::Numeric => decode_numeric(dataset, info, ctx),
        NodeKind::Character => decode_text(dataset, ctx),
        NodeKind::ReferenceArray => {
            cell::decode_cell(dataset, info, ctx, depth, Invocation::Outermost)
        }
        NodeKind::Empty => Ok(DecodedValue::EmptyArray),
    }
}

fn decode_numeric<C: Container>(
    dataset: &C::Dataset,
    info: &DatasetInfo,
    ctx: &DecodeContext<'_, C>,
) -> Result<DecodedValue> {
    if let ElementKind::Unsupported(found) = &info.element_kind {
        return Err(Error::unsupported_element(info.path.as_str(), found.as_str()));
    }
    let buffer = ctx.container().read_numeric(dataset)?;
    shape::reconcile(buffer, &info.shape)
        .map_err(|e| Error::invalid_format(format!("{}: {}", info.path, e)))
}

/// Character codes are UTF-16 code units; unpaired surrogates become U+FFFD.
fn decode_text<C: Container>(
    dataset: &C::Dataset,
    ctx: &DecodeContext<'_, C>,
) -> Result<DecodedValue> {
    let codes = ctx.container().read_numeric(dataset)?;
    let text = char::decode_utf16(codes.iter().map(|&c| c as u16))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    Ok(DecodedValue::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::{MemDataset, MemFile};

    fn decode_root(file: &MemFile) -> Result<DecodedValue> {
        let ctx = DecodeContext::new(file, DecodeOptions::default());
        let root = file.root()?;
        decode(&Node::Group(root), &ctx, 0)
    }

    #[test]
    fn test_group_to_mapping() {
        let mut file = MemFile::new();
        let root = file.root_id();
        file.add_dataset(root, "x", MemDataset::numeric(&[3, 1], vec![1.0, 2.0, 3.0]))
            .unwrap();
        let s = file.add_group(root, "s").unwrap();
        file.add_dataset(s, "name", MemDataset::text("sensor")).unwrap();

        let v = decode_root(&file).unwrap();
        assert_eq!(v.get("x"), Some(&DecodedValue::from(vec![1.0, 2.0, 3.0])));
        assert_eq!(
            v.get("s").and_then(|s| s.get("name")),
            Some(&DecodedValue::from("sensor"))
        );
    }

    #[test]
    fn test_text_decoding() {
        let mut file = MemFile::new();
        let root = file.root_id();
        file.add_dataset(
            root,
            "greeting",
            MemDataset::codes(&[5, 1], vec![72.0, 101.0, 108.0, 108.0, 111.0]),
        )
        .unwrap();

        let v = decode_root(&file).unwrap();
        assert_eq!(v.get("greeting").and_then(DecodedValue::as_str), Some("Hello"));
    }

    #[test]
    fn test_unsupported_element_type() {
        let mut file = MemFile::new();
        let root = file.root_id();
        let ds = MemDataset::numeric(&[1, 1], vec![0.0])
            .with_element_kind(ElementKind::Unsupported("compound".into()));
        file.add_dataset(root, "z", ds).unwrap();

        let err = decode_root(&file).unwrap_err();
        assert!(matches!(err, Error::UnsupportedElementType { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let mut file = MemFile::new();
        let mut parent = file.root_id();
        for i in 0..10 {
            parent = file.add_group(parent, &format!("g{}", i)).unwrap();
        }

        let ctx = DecodeContext::new(&file, DecodeOptions::new().max_depth(3));
        let err = decode(&Node::Group(file.root_id()), &ctx, 0).unwrap_err();
        assert!(matches!(err, Error::MaxDepthExceeded { limit: 3, .. }));

        assert!(decode_root(&file).is_ok());
    }
}
