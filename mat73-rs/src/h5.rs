//! HDF5 backend for v7.3 MAT files.
//!
//! [`Hdf5File`] wraps an `hdf5::File` opened read-only and implements
//! [`Container`] over it. The file is closed when the `Hdf5File` is dropped.

use std::fmt;
use std::path::{Path, PathBuf};

use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
use hdf5::{Dataset, Group, LocationType, ObjectReference1, ReferencedObject};
use tracing::debug;

use crate::container::{Container, DatasetInfo, Node, NodeOf};
use crate::element::{ElementKind, NumericType};
use crate::error::{Error, Result};

/// An HDF5 object reference as MATLAB writes them.
#[derive(Debug, Clone)]
pub struct Hdf5Ref(ObjectReference1);

impl fmt::Display for Hdf5Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A v7.3 MAT file opened for reading.
///
/// # Thread Safety
///
/// Decodes sharing one `Hdf5File` must not run concurrently; open one
/// handle per decode instead.
pub struct Hdf5File {
    file: hdf5::File,
    path: PathBuf,
}

impl Hdf5File {
    /// Open an HDF5 file read-only.
    ///
    /// # Errors
    ///
    /// - [`Error::OpenFailed`] if the file doesn't exist
    /// - [`Error::Container`] if the HDF5 library rejects it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::open_failed(path));
        }
        let file = hdf5::File::open(path)?;
        debug!(path = %path.display(), "opened HDF5 file");
        Ok(Hdf5File {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn node_of(&self, group: &Group, name: &str) -> Result<NodeOf<Self>> {
        let node = match group.loc_type_by_name(name)? {
            LocationType::Group => Node::Group(group.group(name)?),
            LocationType::Dataset => Node::Dataset(group.dataset(name)?),
            other => Node::Unsupported {
                path: join(&group.name(), name),
                kind: format!("{:?}", other),
            },
        };
        Ok(node)
    }
}

impl fmt::Debug for Hdf5File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hdf5File").field("path", &self.path).finish()
    }
}

impl Container for Hdf5File {
    type Group = Group;
    type Dataset = Dataset;
    type Reference = Hdf5Ref;

    fn root(&self) -> Result<Group> {
        Ok(self.file.group("/")?)
    }

    fn group_path(&self, group: &Group) -> String {
        group.name()
    }

    fn members(&self, group: &Group) -> Result<Vec<(String, NodeOf<Self>)>> {
        group
            .member_names()?
            .into_iter()
            .map(|name| {
                let node = self.node_of(group, &name)?;
                Ok((name, node))
            })
            .collect()
    }

    fn dataset_info(&self, dataset: &Dataset) -> Result<DatasetInfo> {
        let dtype = dataset.dtype()?;
        let element_kind = if dtype.is::<ObjectReference1>() {
            ElementKind::Reference
        } else {
            match dtype.to_descriptor() {
                Ok(descriptor) => element_kind(&descriptor),
                Err(e) => ElementKind::Unsupported(e.to_string()),
            }
        };
        Ok(DatasetInfo {
            path: dataset.name(),
            shape: dataset.shape(),
            element_kind,
            attributes: dataset.attr_names()?,
        })
    }

    fn read_numeric(&self, dataset: &Dataset) -> Result<Vec<f64>> {
        if dataset.dtype()?.is::<bool>() {
            let flags = dataset.read_raw::<bool>()?;
            return Ok(flags.into_iter().map(|b| if b { 1.0 } else { 0.0 }).collect());
        }
        Ok(dataset.read_raw::<f64>()?)
    }

    fn read_references(&self, dataset: &Dataset) -> Result<Vec<Hdf5Ref>> {
        let refs = dataset.read_raw::<ObjectReference1>()?;
        Ok(refs.into_iter().map(Hdf5Ref).collect())
    }

    fn dereference(&self, reference: &Hdf5Ref) -> Result<Option<NodeOf<Self>>> {
        match self.file.dereference(&reference.0) {
            Ok(ReferencedObject::Group(g)) => Ok(Some(Node::Group(g))),
            Ok(ReferencedObject::Dataset(d)) => Ok(Some(Node::Dataset(d))),
            Ok(ReferencedObject::Datatype(_)) => Ok(Some(Node::Unsupported {
                path: reference.to_string(),
                kind: "named datatype".to_string(),
            })),
            Err(e) => {
                debug!(reference = %reference, error = %e, "reference did not resolve");
                Ok(None)
            }
        }
    }
}

fn element_kind(descriptor: &TypeDescriptor) -> ElementKind {
    let numeric = match descriptor {
        TypeDescriptor::Float(FloatSize::U4) => NumericType::F32,
        TypeDescriptor::Float(FloatSize::U8) => NumericType::F64,
        TypeDescriptor::Integer(IntSize::U1) => NumericType::I8,
        TypeDescriptor::Integer(IntSize::U2) => NumericType::I16,
        TypeDescriptor::Integer(IntSize::U4) => NumericType::I32,
        TypeDescriptor::Integer(IntSize::U8) => NumericType::I64,
        TypeDescriptor::Unsigned(IntSize::U1) => NumericType::U8,
        TypeDescriptor::Unsigned(IntSize::U2) => NumericType::U16,
        TypeDescriptor::Unsigned(IntSize::U4) => NumericType::U32,
        TypeDescriptor::Unsigned(IntSize::U8) => NumericType::U64,
        TypeDescriptor::Boolean => NumericType::Bool,
        other => return ElementKind::Unsupported(other.to_string()),
    };
    ElementKind::Numeric(numeric)
}

fn join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent() {
        let result = Hdf5File::open("/nonexistent/file.mat");
        assert!(matches!(result, Err(Error::OpenFailed { .. })));
    }

    #[test]
    fn test_element_kind_mapping() {
        assert_eq!(
            element_kind(&TypeDescriptor::Float(FloatSize::U8)),
            ElementKind::Numeric(NumericType::F64)
        );
        assert_eq!(
            element_kind(&TypeDescriptor::Unsigned(IntSize::U2)),
            ElementKind::Numeric(NumericType::U16)
        );
        assert!(matches!(
            element_kind(&TypeDescriptor::VarLenUnicode),
            ElementKind::Unsupported(_)
        ));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "x"), "/x");
        assert_eq!(join("/s", "x"), "/s/x");
    }
}
