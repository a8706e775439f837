//! CLI command implementations.

pub mod configure;
pub mod derive;
pub mod host;
pub mod platforms;
pub mod rules;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use qconf_facts::parse::{discover_environments, load_environment_toml};
use qconf_facts::RawEnvironment;

use crate::detect;
use crate::manifest::QconfManifest;

/// Where the raw platform description comes from, plus per-field overrides.
#[derive(Debug, Default, clap::Args)]
pub struct PlatformArgs {
    /// Environment description: a `.env.toml` path or a name under platforms/
    #[arg(long)]
    pub env: Option<String>,
    /// Host OS (e.g., linux, darwin, windows); default: the build host
    #[arg(long)]
    pub host_os: Option<String>,
    /// Host CPU (e.g., x86_64, ppc64, aarch64); default: the build host
    #[arg(long)]
    pub host_arch: Option<String>,
    /// Host pointer width (32 or 64)
    #[arg(long)]
    pub word_bits: Option<String>,
    /// Host byte order (little or big)
    #[arg(long)]
    pub byte_order: Option<String>,
    /// Target CPU (e.g., x86, x86_64, arm, arm64, mips, ppc)
    #[arg(long)]
    pub target: Option<String>,
    /// Product version (semantic version)
    #[arg(long)]
    pub product_version: Option<String>,
    /// Product distribution label
    #[arg(long)]
    pub product_label: Option<String>,
    /// Emulator data directory
    #[arg(long)]
    pub share_dir: Option<String>,
}

impl PlatformArgs {
    /// Assemble the raw environment.
    ///
    /// Precedence, lowest first: build host (or `--env` file), manifest
    /// product section, command-line flags. A `[product]` key in the
    /// manifest therefore replaces the same key from an `--env` file.
    pub fn raw_environment(
        &self,
        project_dir: &Path,
        manifest: Option<&QconfManifest>,
    ) -> Result<RawEnvironment> {
        let mut raw = match &self.env {
            Some(env) => {
                let path = resolve_env_path(project_dir, env)?;
                log::info!("using environment description {}", path.display());
                load_environment_toml(&path)
                    .with_context(|| format!("loading {}", path.display()))?
            }
            None => {
                let (os, arch) = detect::build_host();
                let target = self
                    .target
                    .as_deref()
                    .or_else(|| manifest.and_then(|m| m.default_target()));
                let Some(target) = target else {
                    bail!("no target given; pass --target or set [targets] default in qconf.toml");
                };
                RawEnvironment::new(os, arch, target)
            }
        };

        if let Some(m) = manifest {
            override_opt(&mut raw.product_version, &m.product.version);
            override_opt(&mut raw.product_label, &m.product.label);
            if m.product.share_dir.is_some() {
                raw.share_dir = m.product.share_dir.clone();
            }
        }

        override_opt(&mut raw.host_family, &self.host_os);
        override_opt(&mut raw.host_arch, &self.host_arch);
        override_opt(&mut raw.target_arch, &self.target);
        override_opt(&mut raw.product_version, &self.product_version);
        override_opt(&mut raw.product_label, &self.product_label);
        if self.word_bits.is_some() {
            raw.host_word_bits = self.word_bits.clone();
        }
        if self.byte_order.is_some() {
            raw.host_byte_order = self.byte_order.clone();
        }
        if self.share_dir.is_some() {
            raw.share_dir = self.share_dir.clone();
        }
        Ok(raw)
    }
}

fn override_opt(field: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        field.clone_from(v);
    }
}

/// Resolve `--env`: an existing path, or a name discovered under `platforms/`.
fn resolve_env_path(project_dir: &Path, env: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(env);
    if direct.is_file() {
        return Ok(direct);
    }
    let found = discover_environments(project_dir)?;
    match found.into_iter().find(|(name, _)| name == env) {
        Some((_, path)) => Ok(path),
        None => bail!(
            "environment '{env}' not found. Use 'qconf platforms' to see available descriptions."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(s: &str) -> QconfManifest {
        QconfManifest::from_str(s).unwrap()
    }

    #[test]
    fn flags_override_build_host() {
        let args = PlatformArgs {
            host_os: Some("linux".into()),
            host_arch: Some("ppc64".into()),
            target: Some("x86".into()),
            ..Default::default()
        };
        let raw = args.raw_environment(Path::new("."), None).unwrap();
        assert_eq!(raw.host_family, "linux");
        assert_eq!(raw.host_arch, "ppc64");
        assert_eq!(raw.target_arch, "x86");
        assert_eq!(raw.product_label, "Android");
    }

    #[test]
    fn target_required_without_env() {
        let args = PlatformArgs::default();
        assert!(args.raw_environment(Path::new("."), None).is_err());
    }

    #[test]
    fn manifest_supplies_target_and_product() {
        let m = manifest(
            "[product]\nlabel = \"Custom\"\nshare-dir = \"/srv/emu\"\n[targets]\ndefault = \"arm\"\n",
        );
        let raw = PlatformArgs::default()
            .raw_environment(Path::new("."), Some(&m))
            .unwrap();
        assert_eq!(raw.target_arch, "arm");
        assert_eq!(raw.product_label, "Custom");
        assert_eq!(raw.share_dir.as_deref(), Some("/srv/emu"));
    }

    #[test]
    fn flags_beat_manifest() {
        let m = manifest("[product]\nlabel = \"Custom\"\n[targets]\ndefault = \"arm\"\n");
        let args = PlatformArgs {
            target: Some("mips".into()),
            product_label: Some("Flag".into()),
            ..Default::default()
        };
        let raw = args.raw_environment(Path::new("."), Some(&m)).unwrap();
        assert_eq!(raw.target_arch, "mips");
        assert_eq!(raw.product_label, "Flag");
    }

    #[test]
    fn env_by_name_from_platforms_dir() {
        let dir = tempfile::tempdir().unwrap();
        let platforms = dir.path().join("platforms");
        std::fs::create_dir_all(&platforms).unwrap();
        std::fs::write(
            platforms.join("linux-ppc.env.toml"),
            "host-family = \"linux\"\nhost-arch = \"ppc64\"\ntarget-arch = \"x86\"\n",
        )
        .unwrap();

        let args = PlatformArgs {
            env: Some("linux-ppc".into()),
            target: Some("arm".into()),
            ..Default::default()
        };
        let raw = args.raw_environment(dir.path(), None).unwrap();
        assert_eq!(raw.host_arch, "ppc64");
        assert_eq!(raw.target_arch, "arm");
    }

    #[test]
    fn manifest_product_applies_over_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join("host.env.toml");
        std::fs::write(
            &env,
            "host-family = \"linux\"\nhost-arch = \"ppc64\"\ntarget-arch = \"x86\"\nproduct-version = \"1.0.0\"\n",
        )
        .unwrap();
        let m = manifest("[product]\nlabel = \"Custom\"\nshare-dir = \"/srv/emu\"\n");

        let args = PlatformArgs {
            env: Some(env.to_str().unwrap().into()),
            ..Default::default()
        };
        let raw = args.raw_environment(dir.path(), Some(&m)).unwrap();
        assert_eq!(raw.host_arch, "ppc64");
        assert_eq!(raw.product_label, "Custom");
        assert_eq!(raw.share_dir.as_deref(), Some("/srv/emu"));
        // Keys the manifest leaves out keep the file's value.
        assert_eq!(raw.product_version, "1.0.0");

        let args = PlatformArgs {
            env: Some(env.to_str().unwrap().into()),
            product_label: Some("Flag".into()),
            ..Default::default()
        };
        let raw = args.raw_environment(dir.path(), Some(&m)).unwrap();
        assert_eq!(raw.product_label, "Flag");
    }

    #[test]
    fn unknown_env_name() {
        let dir = tempfile::tempdir().unwrap();
        let args = PlatformArgs {
            env: Some("nowhere".into()),
            ..Default::default()
        };
        let err = args.raw_environment(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("'nowhere' not found"));
    }
}
