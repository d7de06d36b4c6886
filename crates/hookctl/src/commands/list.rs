use anyhow::Result;
use serde_json::json;

use crate::transforms::CATALOG;

pub fn execute(as_json: bool) -> Result<()> {
    if as_json {
        let entries: Vec<_> = CATALOG
            .iter()
            .map(|(name, about)| json!({ "name": name, "description": about }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (name, about) in CATALOG {
        println!("{:<16} {}", name, about);
    }
    Ok(())
}
