use super::{json_pretty, open, EXIT_SUCCESS};
use std::path::Path;

pub fn run(dir: &Path, json: bool) -> Result<u8, String> {
    let stemcell = open(dir)?;
    let manifest = stemcell.manifest();
    if json {
        println!("{}", json_pretty(manifest)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("name:        {}", manifest.name);
    println!("version:     {}", manifest.version);
    println!("os:          {}", manifest.os);
    println!("sha1:        {}", manifest.sha1);
    println!("image:       {}", manifest.image_path);
    if !manifest.stemcell_formats.is_empty() {
        println!("formats:     {}", manifest.stemcell_formats.join(", "));
    }
    if manifest.cloud_properties.is_empty() {
        println!("cloud_properties: (none)");
    } else {
        println!("cloud_properties:");
        for (key, value) in &manifest.cloud_properties {
            println!("  {key}: {value}");
        }
    }
    Ok(EXIT_SUCCESS)
}
