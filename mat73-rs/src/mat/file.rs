//! Loading variables and listing variable names.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use super::format::MatFormat;
use super::legacy;
use crate::container::{Container, RESERVED_PREFIX};
use crate::error::Result;
use crate::options::DecodeOptions;
use crate::value::DecodedValue;
use crate::walker::{self, DecodeContext};

/// Load variables from a MAT file.
///
/// # Arguments
///
/// * `path` - Path to the .mat file (any supported encoding).
/// * `names` - Variables to load; `None` loads all of them. Names not
///   present in the file are ignored.
///
/// # Returns
///
/// Variable name to decoded value, in file order.
///
/// # Errors
///
/// - [`Error::OpenFailed`](crate::Error::OpenFailed) if the file cannot be opened
/// - [`Error::InvalidFormat`](crate::Error::InvalidFormat) if it is not a MAT file
/// - [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat) for v7.3
///   files when built without the `hdf5` feature
/// - any decode error of the selected variables
pub fn load_variables(
    path: impl AsRef<Path>,
    names: Option<&[&str]>,
) -> Result<IndexMap<String, DecodedValue>> {
    load_variables_with(path, names, &DecodeOptions::default())
}

/// Like [`load_variables`], with explicit decode options.
pub fn load_variables_with(
    path: impl AsRef<Path>,
    names: Option<&[&str]>,
    options: &DecodeOptions,
) -> Result<IndexMap<String, DecodedValue>> {
    let path = path.as_ref();
    match MatFormat::detect(path)? {
        MatFormat::Level5 => {
            debug!(path = %path.display(), "loading Level 5 MAT file");
            legacy::load(path, names)
        }
        MatFormat::V73 => {
            debug!(path = %path.display(), "loading v7.3 MAT file");
            hierarchical::load(path, names, options)
        }
    }
}

/// List the variable names stored in a MAT file, in file order.
///
/// Internal entries of the v7.3 encoding (`#refs#`, `#subsystem#`) are not
/// variables and are left out.
pub fn list_variable_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    match MatFormat::detect(path)? {
        MatFormat::Level5 => legacy::list(path),
        MatFormat::V73 => hierarchical::list(path),
    }
}

/// Load variables from an open container.
///
/// This is the v7.3 path of [`load_variables`], usable with any
/// [`Container`] implementation.
pub fn load_from_container<C: Container>(
    container: &C,
    names: Option<&[&str]>,
    options: &DecodeOptions,
) -> Result<IndexMap<String, DecodedValue>> {
    let ctx = DecodeContext::new(container, options.clone());
    let root = container.root()?;
    let mut variables = IndexMap::new();

    for (name, node) in container.members(&root)? {
        if name.starts_with(RESERVED_PREFIX) {
            continue;
        }
        if names.map_or(false, |selected| !selected.contains(&name.as_str())) {
            continue;
        }
        debug!(variable = %name, kind = node.kind_name(), "decoding variable");
        let value = walker::decode(&node, &ctx, 1)?;
        variables.insert(name, value);
    }

    Ok(variables)
}

/// List the variable names of an open container.
pub fn list_container_names<C: Container>(container: &C) -> Result<Vec<String>> {
    let root = container.root()?;
    Ok(container
        .members(&root)?
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| !name.starts_with(RESERVED_PREFIX))
        .collect())
}

#[cfg(feature = "hdf5")]
mod hierarchical {
    use std::path::Path;

    use indexmap::IndexMap;

    use crate::error::Result;
    use crate::h5::Hdf5File;
    use crate::options::DecodeOptions;
    use crate::value::DecodedValue;

    pub(super) fn load(
        path: &Path,
        names: Option<&[&str]>,
        options: &DecodeOptions,
    ) -> Result<IndexMap<String, DecodedValue>> {
        // Closed on drop, on every exit path.
        let file = Hdf5File::open(path)?;
        super::load_from_container(&file, names, options)
    }

    pub(super) fn list(path: &Path) -> Result<Vec<String>> {
        let file = Hdf5File::open(path)?;
        super::list_container_names(&file)
    }
}

#[cfg(not(feature = "hdf5"))]
mod hierarchical {
    use std::path::Path;

    use indexmap::IndexMap;

    use crate::error::{Error, Result};
    use crate::options::DecodeOptions;
    use crate::value::DecodedValue;

    const NO_HDF5: &str =
        "v7.3 (HDF5) MAT files need the `hdf5` feature (rebuild with `--features hdf5`)";

    pub(super) fn load(
        path: &Path,
        _names: Option<&[&str]>,
        _options: &DecodeOptions,
    ) -> Result<IndexMap<String, DecodedValue>> {
        Err(Error::unsupported_format(format!("{}: {}", path.display(), NO_HDF5)))
    }

    pub(super) fn list(path: &Path) -> Result<Vec<String>> {
        Err(Error::unsupported_format(format!("{}: {}", path.display(), NO_HDF5)))
    }
}
