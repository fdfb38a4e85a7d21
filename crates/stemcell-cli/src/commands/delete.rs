use super::{describe, open, EXIT_SUCCESS};
use std::path::Path;

pub fn run(dir: &Path, json: bool) -> Result<u8, String> {
    // Loading first refuses to wipe directories that are not stemcells.
    let stemcell = open(dir)?;
    let label = stemcell.to_string();
    stemcell.delete().map_err(|e| describe(&e))?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": dir, "stemcell": label })
        );
    } else {
        println!("deleted {label} at {}", dir.display());
    }
    Ok(EXIT_SUCCESS)
}
