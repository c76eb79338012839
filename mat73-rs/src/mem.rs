//! In-memory container.
//!
//! [`MemFile`] is a plain-data implementation of [`Container`]: a tree of
//! groups and datasets built up in memory, with references that are simply
//! node ids. It is what the test suites decode, and it is handy for
//! building MAT-shaped data without an HDF5 library.
//!
//! # Example
//!
//! ```
//! use mat73_rs::{load_from_container, DecodeOptions, DecodedValue, MemDataset, MemFile};
//!
//! let mut file = MemFile::new();
//! let root = file.root_id();
//! file.add_dataset(root, "x", MemDataset::numeric(&[3, 1], vec![1.0, 2.0, 3.0]))?;
//!
//! let vars = load_from_container(&file, None, &DecodeOptions::default())?;
//! assert_eq!(vars["x"], DecodedValue::from(vec![1.0, 2.0, 3.0]));
//! # Ok::<(), mat73_rs::Error>(())
//! ```

use std::fmt;

use crate::container::{
    Container, DatasetInfo, Node, NodeOf, ATTR_CLASS, ATTR_EMPTY, ATTR_INT_DECODE,
};
use crate::element::{ElementKind, NumericType};
use crate::error::{Error, Result};

/// Identifier of a node in a [`MemFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Object reference in a [`MemFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef(u64);

impl ObjectRef {
    /// Create a reference from a raw address, valid or not.
    pub const fn from_raw(addr: u64) -> Self {
        ObjectRef(addr)
    }

    /// The raw address.
    pub const fn addr(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MemData {
    Numeric(Vec<f64>),
    References(Vec<ObjectRef>),
}

/// A dataset held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemDataset {
    shape: Vec<usize>,
    element_kind: ElementKind,
    attributes: Vec<String>,
    data: MemData,
}

impl MemDataset {
    /// A `double` array with the given declared shape.
    pub fn numeric(shape: &[usize], values: Vec<f64>) -> Self {
        Self::typed(shape, NumericType::F64, values)
    }

    /// A numeric array of a given storage type.
    pub fn typed(shape: &[usize], ty: NumericType, values: Vec<f64>) -> Self {
        MemDataset {
            shape: shape.to_vec(),
            element_kind: ElementKind::Numeric(ty),
            attributes: vec![ATTR_CLASS.to_string()],
            data: MemData::Numeric(values),
        }
    }

    /// A char array of raw character codes.
    pub fn codes(shape: &[usize], codes: Vec<f64>) -> Self {
        Self::typed(shape, NumericType::U16, codes).with_attribute(ATTR_INT_DECODE)
    }

    /// A MATLAB row string, declared `[n, 1]` like MATLAB writes it.
    pub fn text(s: &str) -> Self {
        let codes: Vec<f64> = s.encode_utf16().map(f64::from).collect();
        Self::codes(&[codes.len(), 1], codes)
    }

    /// An array of references (a cell array).
    pub fn references(shape: &[usize], refs: Vec<ObjectRef>) -> Self {
        MemDataset {
            shape: shape.to_vec(),
            element_kind: ElementKind::Reference,
            attributes: vec![ATTR_CLASS.to_string()],
            data: MemData::References(refs),
        }
    }

    /// An empty `0x0` array, stored the way MATLAB stores it.
    pub fn empty() -> Self {
        Self::typed(&[2], NumericType::U64, vec![0.0, 0.0]).with_attribute(ATTR_EMPTY)
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: &str) -> Self {
        if !self.attributes.iter().any(|a| a == name) {
            self.attributes.push(name.to_string());
        }
        self
    }

    /// Override the element-kind tag.
    pub fn with_element_kind(mut self, kind: ElementKind) -> Self {
        self.element_kind = kind;
        self
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Group {
        path: String,
        children: Vec<(String, NodeId)>,
    },
    Dataset {
        path: String,
        dataset: MemDataset,
    },
    Other {
        path: String,
        kind: String,
    },
}

impl Entry {
    fn path(&self) -> &str {
        match self {
            Entry::Group { path, .. } | Entry::Dataset { path, .. } | Entry::Other { path, .. } => {
                path
            }
        }
    }
}

/// A container tree held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemFile {
    entries: Vec<Entry>,
}

impl Default for MemFile {
    fn default() -> Self {
        Self::new()
    }
}

impl MemFile {
    /// Create a file holding only an empty root group.
    pub fn new() -> Self {
        MemFile {
            entries: vec![Entry::Group {
                path: "/".to_string(),
                children: Vec::new(),
            }],
        }
    }

    /// Id of the root group.
    pub const fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a group under `parent`.
    pub fn add_group(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let path = self.child_path(parent, name)?;
        self.attach(
            parent,
            name,
            Entry::Group {
                path,
                children: Vec::new(),
            },
        )
    }

    /// Add a dataset under `parent`.
    pub fn add_dataset(
        &mut self,
        parent: NodeId,
        name: &str,
        dataset: MemDataset,
    ) -> Result<NodeId> {
        let path = self.child_path(parent, name)?;
        self.attach(parent, name, Entry::Dataset { path, dataset })
    }

    /// Add a node that is neither a group nor a dataset.
    pub fn add_unsupported(&mut self, parent: NodeId, name: &str, kind: &str) -> Result<NodeId> {
        let path = self.child_path(parent, name)?;
        self.attach(
            parent,
            name,
            Entry::Other {
                path,
                kind: kind.to_string(),
            },
        )
    }

    /// A reference designating the given node.
    pub fn reference(&self, id: NodeId) -> ObjectRef {
        ObjectRef(id.0 as u64)
    }

    /// Absolute path of a node.
    pub fn path(&self, id: NodeId) -> Option<&str> {
        self.entries.get(id.0).map(Entry::path)
    }

    fn child_path(&self, parent: NodeId, name: &str) -> Result<String> {
        match self.entries.get(parent.0) {
            Some(Entry::Group { path, .. }) if path == "/" => Ok(format!("/{}", name)),
            Some(Entry::Group { path, .. }) => Ok(format!("{}/{}", path, name)),
            Some(other) => Err(Error::container(format!("{} is not a group", other.path()))),
            None => Err(Error::container(format!("no node {:?}", parent))),
        }
    }

    fn attach(&mut self, parent: NodeId, name: &str, entry: Entry) -> Result<NodeId> {
        let id = NodeId(self.entries.len());
        match self.entries.get_mut(parent.0) {
            Some(Entry::Group { children, .. }) => {
                if children.iter().any(|(n, _)| n == name) {
                    return Err(Error::container(format!("duplicate member '{}'", entry.path())));
                }
                children.push((name.to_string(), id));
            }
            _ => return Err(Error::container(format!("no group {:?}", parent))),
        }
        self.entries.push(entry);
        Ok(id)
    }

    fn node(&self, id: NodeId) -> Option<NodeOf<Self>> {
        self.entries.get(id.0).map(|entry| match entry {
            Entry::Group { .. } => Node::Group(id),
            Entry::Dataset { .. } => Node::Dataset(id),
            Entry::Other { path, kind } => Node::Unsupported {
                path: path.clone(),
                kind: kind.clone(),
            },
        })
    }

    fn dataset(&self, id: NodeId) -> Result<(&str, &MemDataset)> {
        match self.entries.get(id.0) {
            Some(Entry::Dataset { path, dataset }) => Ok((path.as_str(), dataset)),
            _ => Err(Error::container(format!("{:?} is not a dataset", id))),
        }
    }
}

impl Container for MemFile {
    type Group = NodeId;
    type Dataset = NodeId;
    type Reference = ObjectRef;

    fn root(&self) -> Result<NodeId> {
        Ok(self.root_id())
    }

    fn group_path(&self, group: &NodeId) -> String {
        self.path(*group).unwrap_or_default().to_string()
    }

    fn members(&self, group: &NodeId) -> Result<Vec<(String, NodeOf<Self>)>> {
        match self.entries.get(group.0) {
            Some(Entry::Group { children, .. }) => children
                .iter()
                .map(|(name, id)| {
                    self.node(*id)
                        .map(|node| (name.clone(), node))
                        .ok_or_else(|| Error::container(format!("no node {:?}", id)))
                })
                .collect(),
            _ => Err(Error::container(format!("{:?} is not a group", group))),
        }
    }

    fn dataset_info(&self, dataset: &NodeId) -> Result<DatasetInfo> {
        let (path, ds) = self.dataset(*dataset)?;
        Ok(DatasetInfo {
            path: path.to_string(),
            shape: ds.shape.clone(),
            element_kind: ds.element_kind.clone(),
            attributes: ds.attributes.clone(),
        })
    }

    fn read_numeric(&self, dataset: &NodeId) -> Result<Vec<f64>> {
        let (path, ds) = self.dataset(*dataset)?;
        match &ds.data {
            MemData::Numeric(values) => Ok(values.clone()),
            MemData::References(_) => Err(Error::unsupported_element(path, "reference")),
        }
    }

    fn read_references(&self, dataset: &NodeId) -> Result<Vec<ObjectRef>> {
        let (path, ds) = self.dataset(*dataset)?;
        match &ds.data {
            MemData::References(refs) => Ok(refs.clone()),
            MemData::Numeric(_) => Err(Error::unsupported_element(path, "numeric")),
        }
    }

    fn dereference(&self, reference: &ObjectRef) -> Result<Option<NodeOf<Self>>> {
        Ok(usize::try_from(reference.0).ok().and_then(|i| self.node(NodeId(i))))
    }
}
