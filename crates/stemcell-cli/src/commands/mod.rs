pub mod delete;
pub mod inspect;
pub mod repack;

use std::path::Path;
use std::sync::Arc;
use stemcell_core::{ExtractedStemcell, OsFileSystem, StemcellError};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Manifest problems get the `manifest error:` prefix that `main` maps to
/// [`EXIT_MANIFEST_ERROR`].
pub fn describe(err: &StemcellError) -> String {
    match err {
        StemcellError::Read { .. }
        | StemcellError::Manifest(_)
        | StemcellError::CloudProperties(_) => format!("manifest error: {err}"),
        StemcellError::Write { .. } | StemcellError::Remove { .. } => err.to_string(),
    }
}

pub fn open(dir: &Path) -> Result<ExtractedStemcell, String> {
    ExtractedStemcell::load(dir, Arc::new(OsFileSystem::new())).map_err(|e| describe(&e))
}
