//! `qconf derive` — print the configuration for one host and target.

use anyhow::{bail, Result};
use qconf_engine::Engine;
use qconf_facts::{collect, RawEnvironment};

use crate::render::{host_header, target_header};

/// Collect, derive, and print in the requested format (`header` or `json`).
pub fn run(raw: &RawEnvironment, format: Option<&str>) -> Result<()> {
    let facts = collect(raw)?;
    let set = Engine::standard().derive(&facts);

    match format.unwrap_or("header") {
        "header" => {
            print!("{}", host_header(&set));
            println!();
            print!("{}", target_header(&set, &facts));
        }
        "json" => {
            let doc = serde_json::json!({
                "facts": facts,
                "flags": set,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        other => bail!("unknown format: '{other}' (expected 'header' or 'json')"),
    }
    Ok(())
}
