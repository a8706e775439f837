//! `qconf.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Manifest file name searched for upward from the working directory.
pub const MANIFEST_FILE: &str = "qconf.toml";

/// Default output directory for generated headers.
pub const DEFAULT_OUTPUT_DIR: &str = "android/config";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QconfManifest {
    /// Product identity overrides.
    #[serde(default)]
    pub product: ProductConfig,
    /// Where headers are written.
    #[serde(default)]
    pub output: Option<OutputConfig>,
    /// Targets configured by `--all-targets`.
    #[serde(default)]
    pub targets: Option<TargetsConfig>,
}

/// Product section. Unset fields keep the built-in product identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProductConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub share_dir: Option<String>,
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for `<host>/config-host.h` and `target-<arch>/config.h`.
    pub dir: String,
}

/// Targets section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// Target used when none is given on the command line.
    #[serde(default)]
    pub default: Option<String>,
    /// Targets configured by `--all-targets` (all known targets if empty).
    #[serde(default)]
    pub list: Vec<String>,
}

impl QconfManifest {
    /// Search upward from `start_dir` for a `qconf.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: QconfManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                log::debug!("loaded {}", candidate.display());
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing qconf.toml")
    }

    /// Output directory, relative to the project directory.
    pub fn output_dir(&self) -> &str {
        self.output
            .as_ref()
            .map(|o| o.dir.as_str())
            .unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    /// Default target name, if configured.
    pub fn default_target(&self) -> Option<&str> {
        self.targets.as_ref().and_then(|t| t.default.as_deref())
    }

    /// Targets listed for `--all-targets`.
    pub fn target_list(&self) -> &[String] {
        self.targets
            .as_ref()
            .map(|t| t.list.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[product]
version = "2.0.0"
label = "Custom"
share-dir = "/opt/emu/share"

[output]
dir = "build/config"

[targets]
default = "arm"
list = ["x86", "arm"]
"#;
        let manifest = QconfManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.product.version.as_deref(), Some("2.0.0"));
        assert_eq!(manifest.product.label.as_deref(), Some("Custom"));
        assert_eq!(manifest.product.share_dir.as_deref(), Some("/opt/emu/share"));
        assert_eq!(manifest.output_dir(), "build/config");
        assert_eq!(manifest.default_target(), Some("arm"));
        assert_eq!(manifest.target_list(), ["x86", "arm"]);
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = QconfManifest::from_str("").unwrap();
        assert!(manifest.product.version.is_none());
        assert_eq!(manifest.output_dir(), DEFAULT_OUTPUT_DIR);
        assert!(manifest.default_target().is_none());
        assert!(manifest.target_list().is_empty());
    }

    #[test]
    fn parse_invalid_manifest() {
        assert!(QconfManifest::from_str("[product\nversion = ").is_err());
    }

    #[test]
    fn find_and_load_searches_upward() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[targets]\ndefault = \"mips\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_in) = QconfManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.default_target(), Some("mips"));
        assert_eq!(found_in, dir.path());
    }

    #[test]
    fn find_and_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "not = [valid").unwrap();
        let err = QconfManifest::find_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
