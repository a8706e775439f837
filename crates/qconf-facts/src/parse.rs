//! TOML parsing, serialization, and discovery for environment descriptions.
//!
//! A declared build environment is stored as a `<name>.env.toml` file in the
//! `platforms/` directory of a project. This module loads, writes, and
//! discovers these files; validation is [`crate::collect`]'s job.

use std::path::{Path, PathBuf};

use crate::collect::{collect, RawEnvironment};
use crate::error::{FactsError, Result};
use crate::facts::PlatformFacts;

/// File suffix of environment descriptions.
pub const ENV_FILE_SUFFIX: &str = ".env.toml";

/// Load a raw environment from a `.env.toml` file.
pub fn load_environment_toml(path: &Path) -> Result<RawEnvironment> {
    if !path.exists() {
        return Err(FactsError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_environment_toml(&content)
}

/// Load a `.env.toml` file and collect it into validated facts.
pub fn load_facts(path: &Path) -> Result<PlatformFacts> {
    let raw = load_environment_toml(path)?;
    Ok(collect(&raw)?)
}

/// Parse a raw environment from a TOML string.
pub fn parse_environment_toml(toml_str: &str) -> Result<RawEnvironment> {
    let raw: RawEnvironment = toml::from_str(toml_str)?;
    Ok(raw)
}

/// Serialize a raw environment to pretty TOML.
pub fn environment_to_toml(raw: &RawEnvironment) -> Result<String> {
    let toml_str = toml::to_string_pretty(raw)?;
    Ok(toml_str)
}

/// Generate a template `.env.toml` for the given host and target.
pub fn generate_template(host_family: &str, host_arch: &str, target_arch: &str) -> Result<String> {
    let raw = RawEnvironment::new(host_family, host_arch, target_arch);
    // Reject templates that would not collect.
    collect(&raw)?;
    environment_to_toml(&raw)
}

/// Discover all `.env.toml` files in a project's `platforms/` directory.
///
/// Returns a list of (name, file_path) pairs sorted by name.
pub fn discover_environments(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let platforms_dir = project_dir.join("platforms");
    if !platforms_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(&platforms_dir)? {
        let path = entry?.path();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(ENV_FILE_SUFFIX))
            .map(str::to_string);
        if let Some(name) = name {
            found.push((name, path));
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
