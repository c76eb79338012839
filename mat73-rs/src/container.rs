//! The hierarchical container contract.
//!
//! MAT v7.3 files are HDF5 files: a tree of groups (namespaces) and
//! datasets (typed, shaped buffers with attributes). The decoder only needs
//! a small read-only view of that model, captured by the [`Container`]
//! trait. [`MemFile`](crate::MemFile) implements it in memory;
//! `Hdf5File` implements it over a real file when the `hdf5` feature is
//! enabled.

use std::fmt;

use crate::element::ElementKind;
use crate::error::Result;

/// Attribute flagging a dataset of character codes.
pub const ATTR_INT_DECODE: &str = "MATLAB_int_decode";

/// Attribute flagging an empty array; the buffer then holds its dimensions.
pub const ATTR_EMPTY: &str = "MATLAB_empty";

/// Attribute naming the MATLAB class of a variable.
pub const ATTR_CLASS: &str = "MATLAB_class";

/// Root-level names starting with this marker are internal to the format
/// (`#refs#`, `#subsystem#`).
pub const RESERVED_PREFIX: char = '#';

/// A node of the container tree.
#[derive(Debug, Clone)]
pub enum Node<G, D> {
    /// A namespace of named children.
    Group(G),

    /// A leaf holding a typed, shaped buffer.
    Dataset(D),

    /// Anything else the container reports (named datatypes, broken links).
    Unsupported {
        /// Path of the node.
        path: String,
        /// What the container says it is.
        kind: String,
    },
}

impl<G, D> Node<G, D> {
    /// Short name of the node kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Group(_) => "group",
            Node::Dataset(_) => "dataset",
            Node::Unsupported { kind, .. } => kind,
        }
    }
}

/// Node type of a given container.
pub type NodeOf<C> = Node<<C as Container>::Group, <C as Container>::Dataset>;

/// Metadata of a dataset: everything needed to classify it without reading
/// its buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    /// Absolute path in the file.
    pub path: String,

    /// Declared shape, in the container's dimension order.
    pub shape: Vec<usize>,

    /// Element-kind tag.
    pub element_kind: ElementKind,

    /// Names of the dataset's attributes.
    pub attributes: Vec<String>,
}

impl DatasetInfo {
    /// Number of declared dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Product of the declared shape.
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Check whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }
}

/// Read-only access to a hierarchical container.
///
/// References are file-global: they are always resolved through the
/// container itself, never through a subtree.
pub trait Container {
    /// Handle to a group.
    type Group;

    /// Handle to a dataset.
    type Dataset;

    /// Opaque object reference stored inside reference datasets.
    type Reference: fmt::Display;

    /// The root group.
    fn root(&self) -> Result<Self::Group>;

    /// Absolute path of a group.
    fn group_path(&self, group: &Self::Group) -> String;

    /// Children of a group, in enumeration order.
    fn members(&self, group: &Self::Group) -> Result<Vec<(String, NodeOf<Self>)>>;

    /// Metadata of a dataset.
    fn dataset_info(&self, dataset: &Self::Dataset) -> Result<DatasetInfo>;

    /// Read a numeric dataset's buffer as `f64`, row-major over the
    /// declared shape.
    fn read_numeric(&self, dataset: &Self::Dataset) -> Result<Vec<f64>>;

    /// Read a reference dataset's buffer, row-major over the declared shape.
    fn read_references(&self, dataset: &Self::Dataset) -> Result<Vec<Self::Reference>>;

    /// Look a reference up in the file's global reference table.
    ///
    /// Returns `Ok(None)` when the reference designates nothing.
    fn dereference(&self, reference: &Self::Reference) -> Result<Option<NodeOf<Self>>>;
}
