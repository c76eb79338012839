//! Level 5 MAT files, delegated to the `matfile` crate.
//!
//! `matfile` parses numeric arrays only; other classes (cells, structs,
//! chars) never reach this module. Complex arrays are skipped with a
//! warning.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use matfile::{Array as MatArray, MatFile as RawMatFile, NumericData};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::shape;
use crate::value::DecodedValue;

/// Names starting with this marker are parser metadata, not variables.
const METADATA_PREFIX: char = '_';

/// Decode the selected (or all) numeric variables of a Level 5 file.
pub(crate) fn load(path: &Path, names: Option<&[&str]>) -> Result<IndexMap<String, DecodedValue>> {
    let mat = parse(path)?;
    let mut variables = IndexMap::new();

    for array in mat.arrays() {
        let name = array.name();
        if name.starts_with(METADATA_PREFIX) {
            continue;
        }
        if names.map_or(false, |selected| !selected.contains(&name)) {
            continue;
        }

        match decode_array(array) {
            Ok(value) => {
                debug!(variable = name, kind = value.kind_name(), "decoded legacy variable");
                variables.insert(name.to_string(), value);
            }
            Err(e) => {
                // Skip unsupported variables rather than failing the file
                warn!(variable = name, error = %e, "skipping variable");
            }
        }
    }

    Ok(variables)
}

/// Names of the variables of a Level 5 file, in file order.
pub(crate) fn list(path: &Path) -> Result<Vec<String>> {
    let mat = parse(path)?;
    Ok(mat
        .arrays()
        .iter()
        .map(|a| a.name())
        .filter(|name| !name.starts_with(METADATA_PREFIX))
        .map(str::to_string)
        .collect())
}

fn parse(path: &Path) -> Result<RawMatFile> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::open_failed(path),
        _ => Error::Io(e),
    })?;

    RawMatFile::parse(BufReader::new(file))
        .map_err(|e| Error::legacy(format!("{}: {}", path.display(), e)))
}

/// Decode one array with squeeze semantics. `matfile` hands out data
/// column-major in MATLAB's own dimension order.
fn decode_array(array: &MatArray) -> Result<DecodedValue> {
    let (real, complex) = real_part(array.data());
    if complex {
        return Err(Error::unsupported_element(array.name(), "complex"));
    }
    shape::reconcile_logical(real, array.size())
}

/// Real part widened to `f64`, and whether an imaginary part exists.
fn real_part(data: &NumericData) -> (Vec<f64>, bool) {
    match data {
        NumericData::Double { real, imag } => (real.clone(), imag.is_some()),
        NumericData::Single { real, imag } => (widen(real), imag.is_some()),
        NumericData::Int8 { real, imag } => (widen(real), imag.is_some()),
        NumericData::Int16 { real, imag } => (widen(real), imag.is_some()),
        NumericData::Int32 { real, imag } => (widen(real), imag.is_some()),
        NumericData::UInt8 { real, imag } => (widen(real), imag.is_some()),
        NumericData::UInt16 { real, imag } => (widen(real), imag.is_some()),
        NumericData::UInt32 { real, imag } => (widen(real), imag.is_some()),
        // No lossless conversion to f64
        NumericData::Int64 { real, imag } => {
            (real.iter().map(|&x| x as f64).collect(), imag.is_some())
        }
        NumericData::UInt64 { real, imag } => {
            (real.iter().map(|&x| x as f64).collect(), imag.is_some())
        }
    }
}

fn widen<T: Copy + Into<f64>>(values: &[T]) -> Vec<f64> {
    values.iter().map(|&x| x.into()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nonexistent() {
        let result = parse(Path::new("/nonexistent/file.mat"));
        assert!(matches!(result, Err(Error::OpenFailed { .. })));
    }

    #[test]
    fn test_real_part_widens() {
        let data = NumericData::Int16 {
            real: vec![-3, 7],
            imag: None,
        };
        assert_eq!(real_part(&data), (vec![-3.0, 7.0], false));

        let data = NumericData::Double {
            real: vec![1.0],
            imag: Some(vec![2.0]),
        };
        assert!(real_part(&data).1);
    }

    #[test]
    fn test_real_part_widens_every_class() {
        let data = NumericData::UInt8 {
            real: vec![0, 255],
            imag: None,
        };
        assert_eq!(real_part(&data), (vec![0.0, 255.0], false));

        let data = NumericData::Single {
            real: vec![0.5, -1.25],
            imag: None,
        };
        assert_eq!(real_part(&data), (vec![0.5, -1.25], false));

        let data = NumericData::Int64 {
            real: vec![-9, 1 << 40],
            imag: Some(vec![0, 0]),
        };
        assert_eq!(real_part(&data), (vec![-9.0, (1u64 << 40) as f64], true));

        let data = NumericData::UInt64 {
            real: vec![42],
            imag: None,
        };
        assert_eq!(real_part(&data), (vec![42.0], false));
    }
}
