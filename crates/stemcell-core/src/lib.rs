//! Extracted stemcell handle and the filesystem capability it writes through.
//!
//! `ExtractedStemcell` pairs a `Manifest` with the directory a stemcell
//! archive was unpacked into. It mutates the manifest in place, persists it
//! as `stemcell.MF`, and removes the directory tree. All disk access goes
//! through an injected `FileSystem`, with `OsFileSystem` for real disks and
//! `FakeFileSystem` as an in-memory double.

pub mod extracted;
pub mod fake;
pub mod fs;

pub use extracted::{ExtractedStemcell, MANIFEST_FILE_NAME};
pub use fake::FakeFileSystem;
pub use fs::{FileSystem, OsFileSystem};
pub use stemcell_schema::{CloudProperties, Manifest, ManifestError, PropertyValue};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StemcellError {
    #[error("invalid cloud properties: {0}")]
    CloudProperties(#[source] ManifestError),
    #[error("stemcell manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove '{}': {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
