//! Dimension-order correction and squeezing.
//!
//! HDF5 lists dimensions in the reverse of MATLAB's order: a MATLAB `2x3`
//! matrix is stored with declared shape `[3, 2]`. The buffer is row-major
//! over the declared shape, which is exactly column-major over the MATLAB
//! (logical) shape, so decoding is a Fortran-order view of the buffer.

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, ShapeBuilder};

use crate::error::{Error, Result};
use crate::value::DecodedValue;

/// MATLAB shape of an array, given its declared container shape.
pub fn logical_shape(declared: &[usize]) -> Vec<usize> {
    declared.iter().rev().copied().collect()
}

/// Drop dimensions of size 1.
pub fn squeeze(shape: &[usize]) -> Vec<usize> {
    shape.iter().copied().filter(|&d| d != 1).collect()
}

/// Decode a numeric buffer stored row-major over `declared`.
///
/// The result has the squeezed MATLAB shape: a bare scalar for rank 0, a
/// flat sequence for rank 1, nested sequences otherwise. An empty buffer
/// yields [`DecodedValue::EmptyArray`].
///
/// # Example
///
/// ```
/// use mat73_rs::shape::reconcile;
/// use mat73_rs::DecodedValue;
///
/// // MATLAB [1 2 3; 4 5 6] is stored column by column with shape [3, 2].
/// let v = reconcile(vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0], &[3, 2])?;
/// assert_eq!(
///     v,
///     DecodedValue::Sequence(vec![
///         DecodedValue::from(vec![1.0, 2.0, 3.0]),
///         DecodedValue::from(vec![4.0, 5.0, 6.0]),
///     ])
/// );
/// # Ok::<(), mat73_rs::Error>(())
/// ```
pub fn reconcile(buffer: Vec<f64>, declared: &[usize]) -> Result<DecodedValue> {
    reconcile_logical(buffer, &logical_shape(declared))
}

/// Decode a numeric buffer stored column-major over the MATLAB shape.
pub fn reconcile_logical(buffer: Vec<f64>, logical: &[usize]) -> Result<DecodedValue> {
    if buffer.is_empty() {
        return Ok(DecodedValue::EmptyArray);
    }
    let array = column_major(buffer, &squeeze(logical))?;
    Ok(nest(array.view(), &|x: &f64| DecodedValue::Scalar(*x)))
}

/// Rebuild a decoded cell structure into its declared shape.
///
/// The structure's regular (rectangular) shape is measured first and its
/// elements are laid out over the declared dimensions in the order the
/// structure nests them: `axis_order[i]` is the declared axis found at
/// nesting level `i`. Fails with [`Error::ShapeMismatch`] when the element
/// count differs from the declared one; callers keep the structure as
/// built in that case.
pub fn reshape_cell(
    value: &DecodedValue,
    declared: &[usize],
    axis_order: &[usize],
) -> Result<DecodedValue> {
    let mut sorted = axis_order.to_vec();
    sorted.sort_unstable();
    if !sorted.iter().copied().eq(0..declared.len()) {
        return Err(Error::invalid_format(format!(
            "axis order {:?} does not match declared shape {:?}",
            axis_order, declared
        )));
    }

    let expected: usize = declared.iter().product();
    let depth = regular_shape(value).len();
    let mut leaves = Vec::with_capacity(expected);
    flatten(value, depth, &mut leaves);
    if leaves.len() != expected {
        return Err(Error::shape_mismatch(expected, leaves.len()));
    }
    if leaves.is_empty() {
        return Ok(DecodedValue::EmptyArray);
    }

    let nested_shape: Vec<usize> = axis_order.iter().map(|&a| declared[a]).collect();
    let nested = ArrayD::from_shape_vec(IxDyn(&nested_shape), leaves)
        .map_err(|_| Error::shape_mismatch(expected, expected))?;

    // Back to declared axis order, then MATLAB order.
    let mut inverse = vec![0; axis_order.len()];
    for (level, &axis) in axis_order.iter().enumerate() {
        inverse[axis] = level;
    }
    let logical = nested.permuted_axes(IxDyn(&inverse)).reversed_axes();

    let items: Vec<&DecodedValue> = logical.iter().copied().collect();
    let array = ArrayD::from_shape_vec(IxDyn(&squeeze(logical.shape())), items)
        .map_err(|_| Error::shape_mismatch(expected, expected))?;
    Ok(nest(array.view(), &|v: &&DecodedValue| (*v).clone()))
}

/// Shape of the largest rectangular block of nested sequences.
///
/// Descends while every value at a level is a sequence of one common
/// length. Text, mappings, scalars and empty arrays are elements.
pub fn regular_shape(value: &DecodedValue) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut level = vec![value];
    loop {
        let mut len = None;
        let mut next = Vec::new();
        for v in &level {
            match v {
                DecodedValue::Sequence(items) if len.map_or(true, |l| l == items.len()) => {
                    len = Some(items.len());
                    next.extend(items.iter());
                }
                _ => return shape,
            }
        }
        match len {
            Some(l) => shape.push(l),
            None => return shape,
        }
        level = next;
    }
}

fn flatten<'v>(value: &'v DecodedValue, depth: usize, out: &mut Vec<&'v DecodedValue>) {
    match value {
        DecodedValue::Sequence(items) if depth > 0 => {
            for item in items {
                flatten(item, depth - 1, out);
            }
        }
        other => out.push(other),
    }
}

fn column_major<T>(buffer: Vec<T>, shape: &[usize]) -> Result<ArrayD<T>> {
    let found = buffer.len();
    ArrayD::from_shape_vec(IxDyn(shape).f(), buffer)
        .map_err(|_| Error::shape_mismatch(shape.iter().product(), found))
}

fn nest<T>(view: ArrayViewD<'_, T>, leaf: &impl Fn(&T) -> DecodedValue) -> DecodedValue {
    if view.ndim() == 0 {
        return view.first().map(leaf).unwrap_or(DecodedValue::EmptyArray);
    }
    DecodedValue::Sequence(view.axis_iter(Axis(0)).map(|sub| nest(sub, leaf)).collect())
}
