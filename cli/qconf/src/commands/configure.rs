//! `qconf configure` — write per-host and per-target headers.
//!
//! Layout under the output directory:
//! - `<family>-<arch>/config-host.h`
//! - `target-<arch>/config.h`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qconf_engine::{ConfigurationSet, Engine};
use qconf_facts::{collect, PlatformFacts, RawEnvironment, TargetArch};

use crate::render::{host_header, target_header};

/// Header file name inside the host directory.
pub const HOST_HEADER: &str = "config-host.h";
/// Header file name inside each target directory.
pub const TARGET_HEADER: &str = "config.h";

/// Derive every requested target and write the headers.
///
/// `targets` empty means only the target in `raw`. Returns the written paths.
pub fn run(raw: &RawEnvironment, targets: &[String], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let facts = collect(raw)?;

    let selected = if targets.is_empty() {
        vec![facts.clone()]
    } else {
        targets
            .iter()
            .map(|name| {
                let mut raw = raw.clone();
                raw.target_arch.clone_from(name);
                collect(&raw)
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let engine = Engine::standard();
    let derived = derive_all(&engine, &selected);

    let mut written = Vec::new();
    let host_dir = out_dir.join(facts.host_dir_name());
    // Host flags do not depend on the target, so any derived set will do.
    if let Some((_, set)) = derived.first() {
        written.push(write_header(&host_dir, HOST_HEADER, &host_header(set))?);
    }
    for (target_facts, set) in &derived {
        let dir = out_dir.join(target_facts.target_dir_name());
        written.push(write_header(&dir, TARGET_HEADER, &target_header(set, target_facts))?);
    }

    for path in &written {
        println!("  wrote {}", path.display());
    }
    Ok(written)
}

/// Names of every modelled target, for `--all-targets` without a manifest list.
pub fn all_target_names() -> Vec<String> {
    TargetArch::ALL.iter().map(|t| t.as_str().to_string()).collect()
}

/// Derive each facts value on its own thread.
fn derive_all(engine: &Engine, selected: &[PlatformFacts]) -> Vec<(PlatformFacts, ConfigurationSet)> {
    std::thread::scope(|s| {
        let handles: Vec<_> = selected
            .iter()
            .map(|facts| s.spawn(move || (facts.clone(), engine.derive(facts))))
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(pair) => pair,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    })
}

fn write_header(dir: &Path, file: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(file);
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}
