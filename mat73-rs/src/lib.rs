//! # mat73-rs
//!
//! Read MATLAB `.mat` files into plain, dynamically typed values.
//!
//! MATLAB writes two incompatible encodings. Version 7.3 files are HDF5
//! containers in which numeric arrays, character arrays, structs and cell
//! arrays are spread over groups, datasets and object references. Older
//! files use the Level 5 binary encoding. Both are decoded into
//! [`DecodedValue`] trees keyed by variable name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mat73_rs::{load_variables, Result};
//!
//! fn main() -> Result<()> {
//!     let vars = load_variables("results.mat", None)?;
//!
//!     for (name, value) in &vars {
//!         println!("{}: {}", name, value.kind_name());
//!     }
//!
//!     // Only load what you need
//!     let vars = load_variables("results.mat", Some(&["signal"]))?;
//!     if let Some(signal) = vars.get("signal").and_then(|v| v.as_sequence()) {
//!         println!("signal has {} rows", signal.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Value Mapping
//!
//! | MATLAB | HDF5 layout | [`DecodedValue`] |
//! |--------|-------------|------------------|
//! | numeric array | dataset | `Scalar` or nested `Sequence` |
//! | char array | `uint16` dataset with `MATLAB_int_decode` | `Text` |
//! | struct | group | `Mapping` |
//! | cell array | reference dataset | nested `Sequence` |
//! | empty array | dataset with `MATLAB_empty` | `EmptyArray` |
//!
//! Shapes are reported the way MATLAB shows them: the HDF5 declared shape
//! reversed, with size-1 dimensions squeezed out.
//!
//! ## Feature Flags
//!
//! - `hdf5`: Enable the HDF5 backend ([`Hdf5File`]) for v7.3 files. Without
//!   it, v7.3 files fail with [`Error::UnsupportedFormat`]. Requires the HDF5
//!   C library.
//!
//! ## Thread Safety
//!
//! A decode borrows its container for its whole duration and never mutates
//! it. Separate files can be decoded on separate threads.

#![deny(missing_docs)]

// Modules
mod cell;
mod classify;
mod container;
mod element;
mod error;
#[cfg(feature = "hdf5")]
mod h5;
mod mat;
mod mem;
mod options;
mod reference;
pub mod shape;
mod value;
mod walker;

// Public exports
pub use cell::{decode_cell, Invocation};
pub use classify::{classify, NodeKind};
pub use container::{
    Container, DatasetInfo, Node, NodeOf, ATTR_CLASS, ATTR_EMPTY, ATTR_INT_DECODE, RESERVED_PREFIX,
};
pub use element::{ElementKind, NumericType};
pub use error::{Error, Result};
pub use mat::{
    list_container_names, list_variable_names, load_from_container, load_variables,
    load_variables_with, MatFormat,
};
pub use mem::{MemDataset, MemFile, NodeId, ObjectRef};
pub use options::{DecodeOptions, DEFAULT_MAX_DEPTH};
pub use reference::resolve;
pub use value::DecodedValue;
pub use walker::{decode, DecodeContext};

#[cfg(feature = "hdf5")]
pub use h5::{Hdf5File, Hdf5Ref};

// Conditional re-exports
#[cfg(feature = "hdf5")]
pub use hdf5;
