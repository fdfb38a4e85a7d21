use crate::property::{CloudProperties, PropertyValue};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to parse YAML: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("failed to encode manifest: {0}")]
    Encode(#[source] serde_yaml::Error),
    #[error("expected a YAML mapping, got {0}")]
    NotAMapping(String),
    #[error("expected a scalar, got {0}")]
    NotAScalar(String),
}

/// The `stemcell.MF` descriptor shipped inside every stemcell.
///
/// No field is validated. Missing keys decode to empty values and unknown
/// keys are ignored, so manifests written by newer tooling still load.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Manifest {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub version: String,
    #[serde(
        default,
        rename = "operating_system",
        alias = "os",
        deserialize_with = "scalar_as_string"
    )]
    pub os: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub image_path: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub sha1: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "scalar_as_string"
    )]
    pub bosh_protocol: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stemcell_formats: Vec<String>,
    #[serde(default)]
    pub cloud_properties: CloudProperties,
}

// Hand-written manifests leave versions like `3312.12` or `bosh_protocol: 1`
// unquoted, which YAML would otherwise hand over as numbers.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = PropertyValue::deserialize(deserializer)?;
    match value {
        PropertyValue::Null => Ok(String::new()),
        PropertyValue::String(s) => Ok(s),
        PropertyValue::Bool(b) => Ok(b.to_string()),
        PropertyValue::Integer(i) => Ok(i.to_string()),
        PropertyValue::Unsigned(u) => Ok(u.to_string()),
        // Shortest round-trip form: an unquoted `3312.0` comes back as "3312".
        PropertyValue::Float(x) => Ok(x.to_string()),
        other => Err(serde::de::Error::custom(ManifestError::NotAScalar(
            other.kind().to_owned(),
        ))),
    }
}

pub fn parse_manifest_str(input: &str) -> Result<Manifest, ManifestError> {
    serde_yaml::from_str(input).map_err(ManifestError::Parse)
}

pub fn parse_manifest_bytes(input: &[u8]) -> Result<Manifest, ManifestError> {
    serde_yaml::from_slice(input).map_err(ManifestError::Parse)
}

pub fn encode_manifest(manifest: &Manifest) -> Result<String, ManifestError> {
    serde_yaml::to_string(manifest).map_err(ManifestError::Encode)
}

/// Decode a YAML document holding cloud property overrides.
///
/// An empty document decodes to an empty set of overrides. Any top-level
/// value other than a mapping is rejected. A key repeated within one mapping
/// keeps its last value.
pub fn parse_cloud_properties(raw: &str) -> Result<CloudProperties, ManifestError> {
    // Decoding straight into `PropertyValue` rather than `serde_yaml::Value`,
    // whose `Mapping` refuses duplicate keys.
    let value: Option<PropertyValue> = serde_yaml::from_str(raw).map_err(ManifestError::Parse)?;
    match value {
        None | Some(PropertyValue::Null) => Ok(CloudProperties::new()),
        Some(PropertyValue::Map(map)) => Ok(map),
        Some(other) => Err(ManifestError::NotAMapping(other.kind().to_owned())),
    }
}
