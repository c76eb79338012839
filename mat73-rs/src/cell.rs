//! Cell array decoding.
//!
//! A cell array is stored as a dataset of object references, each pointing
//! at the dataset or group (usually under `#refs#`) holding one element.
//! Decoding walks the reference array one run at a time, resolves every
//! reference through the file's global table, and decodes the targets with
//! the hierarchy walker.

use ndarray::{ArrayViewD, Axis, IxDyn};
use tracing::debug;

use crate::classify::{classify, NodeKind};
use crate::container::{Container, DatasetInfo, Node};
use crate::error::{Error, Result};
use crate::reference::resolve;
use crate::shape;
use crate::value::DecodedValue;
use crate::walker::{self, DecodeContext};

/// Whether a cell decode is the top-level call for its dataset.
///
/// Only the outermost call reshapes the built structure to the declared
/// shape; calls on sub-slices leave their part as built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The call made for the whole reference dataset.
    Outermost,

    /// A call on a sub-slice of the reference array.
    Nested,
}

/// Decode a reference dataset into a (possibly nested) sequence.
pub fn decode_cell<C: Container>(
    dataset: &C::Dataset,
    info: &DatasetInfo,
    ctx: &DecodeContext<'_, C>,
    depth: usize,
    invocation: Invocation,
) -> Result<DecodedValue> {
    let references = ctx.container().read_references(dataset)?;
    if references.len() != info.element_count() {
        return Err(Error::invalid_format(format!(
            "{}: {} references for declared shape {:?}",
            info.path,
            references.len(),
            info.shape
        )));
    }
    let view = ArrayViewD::from_shape(IxDyn(&info.shape), &references[..])
        .map_err(|e| Error::invalid_format(format!("{}: {}", info.path, e)))?;

    decode_slice(view, info, ctx, depth, invocation)
}

fn decode_slice<C: Container>(
    view: ArrayViewD<'_, C::Reference>,
    info: &DatasetInfo,
    ctx: &DecodeContext<'_, C>,
    depth: usize,
    invocation: Invocation,
) -> Result<DecodedValue> {
    let built = if view.ndim() > 1 {
        // Outermost varying index of MATLAB's column-major flattening.
        let axis = Axis(view.ndim() - 2);
        let mut items = Vec::with_capacity(view.len_of(axis));
        for k in 0..view.len_of(axis) {
            let sub = view.index_axis(axis, k);
            items.push(decode_slice(sub, info, ctx, depth, Invocation::Nested)?);
        }
        DecodedValue::Sequence(items)
    } else {
        decode_run(&view, info, ctx, depth)?
    };

    if invocation == Invocation::Nested {
        return Ok(built);
    }
    match shape::reshape_cell(&built, view.shape(), &nesting_order(view.ndim())) {
        Ok(reshaped) => Ok(reshaped),
        Err(e) if !e.is_fatal() => {
            debug!(path = %info.path, error = %e, "keeping cell array unreshaped");
            Ok(built)
        }
        Err(e) => Err(e),
    }
}

/// Declared axes in the order `decode_slice` nests them: every axis but
/// the last, from the second-to-last down to 0, then the run axis.
fn nesting_order(ndim: usize) -> Vec<usize> {
    if ndim < 2 {
        return (0..ndim).collect();
    }
    let mut order: Vec<usize> = (0..ndim - 1).rev().collect();
    order.push(ndim - 1);
    order
}

/// Decode a flat run of references.
///
/// A run holding a single reference to a non-character array of rank > 1
/// collapses to that array's decoded value.
fn decode_run<C: Container>(
    view: &ArrayViewD<'_, C::Reference>,
    info: &DatasetInfo,
    ctx: &DecodeContext<'_, C>,
    depth: usize,
) -> Result<DecodedValue> {
    let single = view.len() == 1;
    let mut items = Vec::with_capacity(view.len());

    for reference in view.iter() {
        match resolve(reference, &info.path, ctx)? {
            Node::Dataset(target) => {
                let target_info = ctx.container().dataset_info(&target)?;
                if target_info.rank() <= 1 {
                    // MATLAB arrays are at least 2-D unless empty.
                    items.push(DecodedValue::EmptyArray);
                    continue;
                }
                let value = walker::decode_dataset(&target, &target_info, ctx, depth + 1)?;
                if single && classify(&target_info) != NodeKind::Character {
                    return Ok(value);
                }
                items.push(value);
            }
            Node::Group(group) => {
                items.push(walker::decode_group(&group, ctx, depth + 1)?);
            }
            Node::Unsupported { path, kind } => {
                return Err(Error::unsupported_node(path, kind));
            }
        }
    }
    Ok(DecodedValue::Sequence(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::{MemDataset, MemFile};
    use crate::options::DecodeOptions;

    #[test]
    fn test_nesting_order() {
        assert!(nesting_order(0).is_empty());
        assert_eq!(nesting_order(1), vec![0]);
        assert_eq!(nesting_order(2), vec![0, 1]);
        assert_eq!(nesting_order(3), vec![1, 0, 2]);
        assert_eq!(nesting_order(4), vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_three_dimensional_cell_matches_numeric_layout() {
        // MATLAB 2x2x2 cell, element (i, j, k) = 100i + 10j + k, stored
        // column by column
        let values: Vec<f64> = (0..8)
            .map(|n| (100 * (n % 2 + 1) + 10 * (n / 2 % 2 + 1) + (n / 4 + 1)) as f64)
            .collect();

        let mut file = MemFile::new();
        let root = file.root_id();
        let refs = file.add_group(root, "#refs#").unwrap();
        let mut targets = Vec::new();
        for (n, v) in values.iter().enumerate() {
            let id = file
                .add_dataset(refs, &format!("e{}", n), MemDataset::numeric(&[1, 1], vec![*v]))
                .unwrap();
            targets.push(file.reference(id));
        }
        let cell_ds = file
            .add_dataset(root, "c", MemDataset::references(&[2, 2, 2], targets))
            .unwrap();

        let ctx = DecodeContext::new(&file, DecodeOptions::default());
        let info = file.dataset_info(&cell_ds).unwrap();
        let v = decode_cell(&cell_ds, &info, &ctx, 1, Invocation::Outermost).unwrap();

        assert_eq!(v, shape::reconcile(values, &[2, 2, 2]).unwrap());
        let at = |i: usize, j: usize, k: usize| {
            v.index(i)
                .and_then(|x| x.index(j))
                .and_then(|x| x.index(k))
                .and_then(DecodedValue::as_f64)
        };
        assert_eq!(at(0, 0, 1), Some(112.0));
        assert_eq!(at(0, 1, 0), Some(121.0));
        assert_eq!(at(1, 0, 0), Some(211.0));
    }
}
