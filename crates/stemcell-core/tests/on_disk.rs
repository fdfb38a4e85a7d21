//! ExtractedStemcell against a real directory tree.

use std::path::Path;
use std::sync::Arc;
use stemcell_core::{
    CloudProperties, ExtractedStemcell, Manifest, OsFileSystem, PropertyValue, StemcellError,
    MANIFEST_FILE_NAME,
};

fn populated_dir(root: &Path) {
    std::fs::create_dir_all(root).unwrap();
    std::fs::write(root.join("image"), b"not really a disk image").unwrap();
    std::fs::write(
        root.join(MANIFEST_FILE_NAME),
        r"---
name: bosh-aws-xen-hvm-ubuntu-jammy-go_agent
version: '1.200'
operating_system: ubuntu-jammy
sha1: da39a3ee5e6b4b0d3255bfef95601890afd80709
stemcell_formats:
- aws-raw
cloud_properties:
  name: bosh-aws-xen-hvm-ubuntu-jammy-go_agent
  architecture: x86_64
  root_device_name: /dev/sda1
",
    )
    .unwrap();
}

#[test]
fn load_mutate_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("extracted");
    populated_dir(&root);

    let fs = Arc::new(OsFileSystem::new());
    let mut stemcell = ExtractedStemcell::load(&root, fs.clone()).unwrap();
    assert_eq!(stemcell.os_and_version(), "ubuntu-jammy/1.200");
    assert_eq!(
        Path::new(&stemcell.manifest().image_path),
        root.join("image")
    );

    stemcell.set_name("custom-stemcell");
    stemcell.set_version("1.200.1");
    stemcell
        .set_cloud_properties("architecture: arm64\nboot_mode: uefi\n")
        .unwrap();
    stemcell.save().unwrap();

    let reloaded = ExtractedStemcell::load(&root, fs).unwrap();
    assert_eq!(reloaded.manifest(), stemcell.manifest());
    let props = &reloaded.manifest().cloud_properties;
    assert_eq!(props["architecture"].as_str(), Some("arm64"));
    assert_eq!(props["boot_mode"].as_str(), Some("uefi"));
    assert_eq!(props["root_device_name"].as_str(), Some("/dev/sda1"));
    assert_eq!(reloaded.manifest().stemcell_formats, vec!["aws-raw"]);

    // The disk image is never touched.
    assert_eq!(
        std::fs::read(root.join("image")).unwrap(),
        b"not really a disk image"
    );
}

#[test]
fn save_into_fresh_directory_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut cloud_properties = CloudProperties::new();
    cloud_properties.insert("infrastructure".to_owned(), "vsphere".into());
    cloud_properties.insert("disk".to_owned(), PropertyValue::Integer(3072));
    let manifest = Manifest {
        name: "fake-stemcell-name".to_owned(),
        version: "3312.12".to_owned(),
        os: "centos-7".to_owned(),
        image_path: "fake-image-path".to_owned(),
        sha1: "fake-sha".to_owned(),
        cloud_properties,
        ..Manifest::default()
    };

    let stemcell = ExtractedStemcell::new(manifest.clone(), dir.path(), Arc::new(OsFileSystem));
    stemcell.save().unwrap();

    let on_disk = std::fs::read_to_string(dir.path().join("stemcell.MF")).unwrap();
    assert_eq!(
        stemcell_schema::parse_manifest_str(&on_disk).unwrap(),
        manifest
    );
}

#[test]
fn save_into_missing_directory_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let stemcell = ExtractedStemcell::new(Manifest::default(), &missing, Arc::new(OsFileSystem));

    let err = stemcell.save().unwrap_err();
    assert!(matches!(err, StemcellError::Write { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn delete_removes_tree_and_tolerates_absence() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("extracted");
    populated_dir(&root);
    std::fs::create_dir_all(root.join("nested")).unwrap();
    std::fs::write(root.join("nested/file"), b"x").unwrap();

    let stemcell = ExtractedStemcell::load(&root, Arc::new(OsFileSystem)).unwrap();
    stemcell.delete().unwrap();
    assert!(!root.exists());
    assert!(dir.path().exists());

    stemcell.delete().unwrap();
}
