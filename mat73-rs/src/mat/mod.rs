//! MAT file entry points.
//!
//! This module detects which encoding a `.mat` file uses and dispatches:
//!
//! - Level 5 files (MATLAB v5, v6, v7) are decoded by the `matfile` crate;
//!   numeric arrays come back squeezed, like the v7.3 path.
//! - v7.3 files are HDF5 files and go through the hierarchy walker over an
//!   [`Hdf5File`](crate::Hdf5File) (requires the `hdf5` feature).
//!
//! # Example
//!
//! ```no_run
//! use mat73_rs::{list_variable_names, load_variables};
//!
//! for name in list_variable_names("session.mat")? {
//!     println!("Variable: {}", name);
//! }
//!
//! let vars = load_variables("session.mat", Some(&["spikes", "meta"]))?;
//! if let Some(meta) = vars.get("meta") {
//!     println!("{}", meta.kind_name());
//! }
//! # Ok::<(), mat73_rs::Error>(())
//! ```

mod file;
mod format;
mod legacy;

// Re-exports
pub use file::{
    list_container_names, list_variable_names, load_from_container, load_variables,
    load_variables_with,
};
pub use format::MatFormat;
