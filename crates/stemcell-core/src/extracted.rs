use crate::fs::FileSystem;
use crate::StemcellError;
use stemcell_schema::{
    encode_manifest, merge_properties, parse_cloud_properties, parse_manifest_bytes, Manifest,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the manifest file inside an extracted stemcell directory.
pub const MANIFEST_FILE_NAME: &str = "stemcell.MF";
const IMAGE_FILE_NAME: &str = "image";

/// A stemcell manifest paired with the directory its archive was unpacked into.
///
/// Setters only touch the in-memory manifest; nothing reaches disk until
/// [`save`](Self::save). After [`delete`](Self::delete) the directory is gone
/// and the handle should be dropped.
pub struct ExtractedStemcell {
    manifest: Manifest,
    extracted_path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ExtractedStemcell {
    pub fn new(
        manifest: Manifest,
        extracted_path: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            manifest,
            extracted_path: extracted_path.into(),
            fs,
        }
    }

    /// Open a directory that already holds an unpacked stemcell by decoding
    /// its `stemcell.MF`.
    ///
    /// A manifest without an `image_path` points at the `image` file in the
    /// directory, which is where stemcell archives keep their disk image.
    pub fn load(
        extracted_path: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self, StemcellError> {
        let extracted_path = extracted_path.into();
        let path = extracted_path.join(MANIFEST_FILE_NAME);
        let bytes = fs.read_file(&path).map_err(|source| StemcellError::Read {
            path: path.clone(),
            source,
        })?;
        let mut manifest = parse_manifest_bytes(&bytes)?;
        if manifest.image_path.is_empty() {
            manifest.image_path = extracted_path
                .join(IMAGE_FILE_NAME)
                .to_string_lossy()
                .into_owned();
        }
        tracing::debug!(
            "loaded stemcell {}/{} from {}",
            manifest.name,
            manifest.version,
            extracted_path.display()
        );
        Ok(Self::new(manifest, extracted_path, fs))
    }

    #[inline]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    #[inline]
    pub fn extracted_path(&self) -> &Path {
        &self.extracted_path
    }

    #[inline]
    pub fn manifest_path(&self) -> PathBuf {
        self.extracted_path.join(MANIFEST_FILE_NAME)
    }

    pub fn os_and_version(&self) -> String {
        format!("{}/{}", self.manifest.os, self.manifest.version)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.manifest.name = name.into();
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.manifest.version = version.into();
    }

    /// Merge YAML-encoded overrides into the manifest's cloud properties.
    ///
    /// Keys in `raw` replace existing values wholesale; keys not mentioned are
    /// kept. If `raw` does not decode to a mapping the manifest is untouched.
    pub fn set_cloud_properties(&mut self, raw: &str) -> Result<(), StemcellError> {
        let overrides = parse_cloud_properties(raw).map_err(StemcellError::CloudProperties)?;
        for (key, value) in &overrides {
            match self.manifest.cloud_properties.get(key) {
                Some(old) => tracing::trace!("cloud property '{key}': {old} -> {value}"),
                None => tracing::trace!("cloud property '{key}' added: {value}"),
            }
        }
        merge_properties(&mut self.manifest.cloud_properties, overrides);
        Ok(())
    }

    /// Write the manifest to `stemcell.MF` in the extracted directory,
    /// replacing any previous copy.
    pub fn save(&self) -> Result<(), StemcellError> {
        let content = encode_manifest(&self.manifest)?;
        let path = self.manifest_path();
        self.fs
            .write_file(&path, content.as_bytes())
            .map_err(|source| StemcellError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("saved {} to {}", self, path.display());
        Ok(())
    }

    /// Remove the extracted directory and everything in it.
    pub fn delete(&self) -> Result<(), StemcellError> {
        self.fs
            .remove_all(&self.extracted_path)
            .map_err(|source| StemcellError::Remove {
                path: self.extracted_path.clone(),
                source,
            })?;
        tracing::debug!("removed {}", self.extracted_path.display());
        Ok(())
    }
}

impl fmt::Display for ExtractedStemcell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtractedStemcell{{name={} version={}}}",
            self.manifest.name, self.manifest.version
        )
    }
}

impl fmt::Debug for ExtractedStemcell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractedStemcell")
            .field("manifest", &self.manifest)
            .field("extracted_path", &self.extracted_path)
            .finish_non_exhaustive()
    }
}
