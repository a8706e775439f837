//! `qconf platforms` — list and create environment descriptions under `platforms/`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use qconf_facts::parse::{discover_environments, generate_template, load_facts, ENV_FILE_SUFFIX};

/// List discovered descriptions and whether each one collects.
pub fn list(project_dir: &Path) -> Result<()> {
    let found = discover_environments(project_dir)?;
    if found.is_empty() {
        println!("No environment descriptions in {}", project_dir.join("platforms").display());
        return Ok(());
    }

    println!("Environment descriptions:");
    println!();
    for (name, path) in found {
        match load_facts(&path) {
            Ok(facts) => println!(
                "  {name:<25} {} -> {}",
                facts.host_dir_name(),
                facts.target_dir_name()
            ),
            Err(e) => println!("  {name:<25} invalid: {e}"),
        }
    }
    Ok(())
}

/// Write `platforms/<name>.env.toml` for a declared host and target.
///
/// Refuses to overwrite an existing description.
pub fn new(
    project_dir: &Path,
    name: &str,
    host_os: &str,
    host_arch: &str,
    target: &str,
) -> Result<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) {
        bail!("invalid description name '{name}'");
    }
    let template = generate_template(host_os, host_arch, target)?;

    let dir = project_dir.join("platforms");
    let path = dir.join(format!("{name}{ENV_FILE_SUFFIX}"));
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    std::fs::write(&path, template).with_context(|| format!("writing {}", path.display()))?;
    println!("  created {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_valid_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let platforms = dir.path().join("platforms");
        std::fs::create_dir_all(&platforms).unwrap();
        std::fs::write(
            platforms.join("good.env.toml"),
            "host-family = \"linux\"\nhost-arch = \"x86_64\"\ntarget-arch = \"x86\"\n",
        )
        .unwrap();
        std::fs::write(platforms.join("bad.env.toml"), "host-family = 1").unwrap();
        assert!(list(dir.path()).is_ok());
    }

    #[test]
    fn empty_project() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list(dir.path()).is_ok());
    }

    #[test]
    fn new_writes_discoverable_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = new(dir.path(), "linux-ppc", "Linux", "ppc64", "x86").unwrap();
        assert_eq!(path, dir.path().join("platforms").join("linux-ppc.env.toml"));

        let found = discover_environments(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "linux-ppc");
        let facts = load_facts(&found[0].1).unwrap();
        assert_eq!(facts.host_dir_name(), "linux-ppc64");
        assert_eq!(facts.target_dir_name(), "target-x86");
    }

    #[test]
    fn new_rejects_invalid_platform() {
        let dir = tempfile::tempdir().unwrap();
        let err = new(dir.path(), "beos", "BeOS", "x86", "x86").unwrap_err();
        assert!(err.to_string().contains("hostFamily = 'BeOS'"));
        assert!(!dir.path().join("platforms").exists());
    }

    #[test]
    fn new_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        new(dir.path(), "host", "linux", "x86_64", "x86").unwrap();
        let err = new(dir.path(), "host", "darwin", "arm64", "arm64").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let text =
            std::fs::read_to_string(dir.path().join("platforms").join("host.env.toml")).unwrap();
        assert!(text.contains("host-family = \"linux\""));
    }

    #[test]
    fn new_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(new(dir.path(), "../escape", "linux", "x86_64", "x86").is_err());
    }
}
