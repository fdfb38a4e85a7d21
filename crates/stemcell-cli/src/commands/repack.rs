use super::{describe, json_pretty, open, EXIT_SUCCESS};
use std::path::Path;

pub struct RepackOptions<'a> {
    pub name: Option<&'a str>,
    pub version: Option<&'a str>,
    pub cloud_properties: Option<&'a str>,
    pub cloud_properties_file: Option<&'a Path>,
}

pub fn run(dir: &Path, opts: &RepackOptions<'_>, json: bool) -> Result<u8, String> {
    // Read the file up front so a bad path fails before anything is mutated.
    let file_overrides = opts
        .cloud_properties_file
        .map(|path| {
            std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read '{}': {e}", path.display()))
        })
        .transpose()?;

    let mut stemcell = open(dir)?;
    tracing::debug!("repacking {stemcell} in {}", dir.display());
    if let Some(name) = opts.name {
        stemcell.set_name(name);
    }
    if let Some(version) = opts.version {
        stemcell.set_version(version);
    }
    for raw in opts.cloud_properties.into_iter().chain(file_overrides.as_deref()) {
        stemcell
            .set_cloud_properties(raw)
            .map_err(|e| describe(&e))?;
    }
    stemcell.save().map_err(|e| describe(&e))?;

    if json {
        let out = serde_json::json!({
            "name": stemcell.manifest().name,
            "version": stemcell.manifest().version,
            "os_and_version": stemcell.os_and_version(),
            "manifest_path": stemcell.manifest_path(),
        });
        println!("{}", json_pretty(&out)?);
    } else {
        println!("saved {stemcell}");
    }
    Ok(EXIT_SUCCESS)
}
