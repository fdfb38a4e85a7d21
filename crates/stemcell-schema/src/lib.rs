//! Manifest model and YAML codec for extracted stemcells.
//!
//! This crate defines the schema layer: the `stemcell.MF` descriptor
//! (`Manifest`), the loosely typed cloud property bag (`PropertyValue`,
//! `CloudProperties`) with its shallow override merge, and the YAML
//! encode/decode functions used to persist both.

pub mod manifest;
pub mod property;

pub use manifest::{
    encode_manifest, parse_cloud_properties, parse_manifest_bytes, parse_manifest_str, Manifest,
    ManifestError,
};
pub use property::{merge_properties, CloudProperties, PropertyValue};
