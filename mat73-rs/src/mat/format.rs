//! MAT header inspection.
//!
//! Level 5 and v7.3 files share a 128-byte text header. Bytes 124..126
//! hold the version (`0x0100` for Level 5, `0x0200` for v7.3) and bytes
//! 126..128 the endian indicator `IM` or `MI`. A v7.3 file is an HDF5 file
//! with that header in a 512-byte user block.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Length of the MAT text header.
const HEADER_LEN: usize = 128;

/// Offset of the HDF5 superblock in a v7.3 file.
const USERBLOCK_LEN: usize = 512;

/// HDF5 format signature.
const HDF5_SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// Encoding used by a MAT file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatFormat {
    /// Legacy Level 5 encoding (MATLAB v5, v6, v7).
    Level5,

    /// HDF5-based encoding (MATLAB v7.3), or a bare HDF5 file.
    V73,
}

impl MatFormat {
    /// Detect the encoding of the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::OpenFailed`] if the file cannot be opened
    /// - [`Error::InvalidFormat`] if the header is not a MAT header
    /// - [`Error::UnsupportedFormat`] for unknown header versions
    pub fn detect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::open_failed(path),
            _ => Error::Io(e),
        })?;

        let mut bytes = Vec::with_capacity(USERBLOCK_LEN + HDF5_SIGNATURE.len());
        file.take((USERBLOCK_LEN + HDF5_SIGNATURE.len()) as u64)
            .read_to_end(&mut bytes)?;

        Self::from_header(&bytes)
    }

    /// Detect the encoding from the leading bytes of a file.
    pub fn from_header(bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(&HDF5_SIGNATURE) {
            return Ok(MatFormat::V73);
        }
        let after_userblock = bytes.get(USERBLOCK_LEN..USERBLOCK_LEN + HDF5_SIGNATURE.len());
        if after_userblock == Some(&HDF5_SIGNATURE[..]) {
            return Ok(MatFormat::V73);
        }
        if bytes.len() < HEADER_LEN {
            return Err(Error::invalid_format(format!(
                "file too short for a MAT header ({} bytes)",
                bytes.len()
            )));
        }

        let raw = [bytes[124], bytes[125]];
        let version = match &bytes[126..128] {
            b"IM" => u16::from_le_bytes(raw),
            b"MI" => u16::from_be_bytes(raw),
            other => {
                return Err(Error::invalid_format(format!(
                    "bad endian indicator {:?}",
                    String::from_utf8_lossy(other)
                )))
            }
        };

        match version {
            0x0100 => Ok(MatFormat::Level5),
            0x0200 => Ok(MatFormat::V73),
            v => Err(Error::unsupported_format(format!("MAT version 0x{:04x}", v))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(version: u16, endian: &[u8; 2]) -> Vec<u8> {
        let mut bytes = vec![b' '; HEADER_LEN];
        let text = b"MATLAB 5.0 MAT-file, Platform: GLNXA64";
        bytes[..text.len()].copy_from_slice(text);
        let v = if endian == b"IM" {
            version.to_le_bytes()
        } else {
            version.to_be_bytes()
        };
        bytes[124..126].copy_from_slice(&v);
        bytes[126..128].copy_from_slice(endian);
        bytes
    }

    #[test]
    fn test_level5() {
        assert_eq!(MatFormat::from_header(&header(0x0100, b"IM")).unwrap(), MatFormat::Level5);
        assert_eq!(MatFormat::from_header(&header(0x0100, b"MI")).unwrap(), MatFormat::Level5);
    }

    #[test]
    fn test_v73() {
        assert_eq!(MatFormat::from_header(&header(0x0200, b"IM")).unwrap(), MatFormat::V73);

        let mut bytes = header(0x0200, b"IM");
        bytes.resize(USERBLOCK_LEN, 0);
        bytes.extend_from_slice(&HDF5_SIGNATURE);
        assert_eq!(MatFormat::from_header(&bytes).unwrap(), MatFormat::V73);
    }

    #[test]
    fn test_bare_hdf5() {
        let mut bytes = HDF5_SIGNATURE.to_vec();
        bytes.resize(64, 0);
        assert_eq!(MatFormat::from_header(&bytes).unwrap(), MatFormat::V73);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            MatFormat::from_header(b"dummy"),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            MatFormat::from_header(&header(0x0100, b"XX")),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            MatFormat::from_header(&header(0x0300, b"IM")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }
}
