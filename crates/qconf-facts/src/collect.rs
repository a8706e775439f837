//! Normalization of raw platform identifiers into [`PlatformFacts`].

use serde::{Deserialize, Serialize};

use crate::error::CollectError;
use crate::facts::PlatformFacts;
use crate::host::{lookup_host_arch, ByteOrder, HostFamily, WordBits};
use crate::target::TargetArch;

/// Product version baked into this emulator line.
pub const DEFAULT_PRODUCT_VERSION: &str = "0.10.50";
/// Distribution label baked into this emulator line.
pub const DEFAULT_PRODUCT_LABEL: &str = "Android";
/// Default emulator data directory.
pub const DEFAULT_SHARE_DIR: &str = "/usr/local/share/qemu";

fn default_product_version() -> String {
    DEFAULT_PRODUCT_VERSION.to_string()
}

fn default_product_label() -> String {
    DEFAULT_PRODUCT_LABEL.to_string()
}

/// Platform identifiers as detected on, or declared for, a build host.
///
/// Nothing here has been checked yet; see [`collect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawEnvironment {
    /// Host kernel name (`uname -s`), e.g. "Linux".
    pub host_family: String,
    /// Host CPU name (`uname -m`), e.g. "x86_64".
    pub host_arch: String,
    /// Host pointer width override ("32" or "64").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_word_bits: Option<String>,
    /// Host byte order override ("little" or "big").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_byte_order: Option<String>,
    /// Guest CPU name, e.g. "i386".
    pub target_arch: String,
    #[serde(default = "default_product_version")]
    pub product_version: String,
    #[serde(default = "default_product_label")]
    pub product_label: String,
    /// Emulator data directory override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_dir: Option<String>,
}

impl RawEnvironment {
    /// A raw environment with the default product identity.
    pub fn new(
        host_family: impl Into<String>,
        host_arch: impl Into<String>,
        target_arch: impl Into<String>,
    ) -> Self {
        Self {
            host_family: host_family.into(),
            host_arch: host_arch.into(),
            host_word_bits: None,
            host_byte_order: None,
            target_arch: target_arch.into(),
            product_version: default_product_version(),
            product_label: default_product_label(),
            share_dir: None,
        }
    }
}

/// Turn raw identifiers into validated [`PlatformFacts`].
///
/// Fails with [`CollectError::InvalidPlatform`] naming the first field that
/// is unrecognized or contradicts the host CPU. Nothing is defaulted except
/// the optional word size and byte order, which follow from the host CPU.
pub fn collect(raw: &RawEnvironment) -> Result<PlatformFacts, CollectError> {
    let host_family = HostFamily::from_raw(&raw.host_family)
        .ok_or_else(|| CollectError::invalid("hostFamily", &raw.host_family))?;

    let profile = lookup_host_arch(&raw.host_arch)
        .ok_or_else(|| CollectError::invalid("hostArch", &raw.host_arch))?;

    let host_word_bits = match &raw.host_word_bits {
        Some(bits) => {
            let parsed = WordBits::from_raw(bits)
                .ok_or_else(|| CollectError::invalid("hostWordBits", bits))?;
            if parsed != profile.word_bits {
                return Err(CollectError::invalid("hostWordBits", bits));
            }
            parsed
        }
        None => profile.word_bits,
    };

    let host_byte_order = match &raw.host_byte_order {
        Some(order) => {
            let parsed = ByteOrder::from_raw(order)
                .ok_or_else(|| CollectError::invalid("hostByteOrder", order))?;
            if parsed != profile.byte_order {
                return Err(CollectError::invalid("hostByteOrder", order));
            }
            parsed
        }
        None => profile.byte_order,
    };

    let target_arch = TargetArch::from_raw(&raw.target_arch)
        .ok_or_else(|| CollectError::invalid("targetArch", &raw.target_arch))?;

    let product_version = semver::Version::parse(raw.product_version.trim())
        .map_err(|_| CollectError::invalid("productVersion", &raw.product_version))?;

    let product_label = raw.product_label.trim();
    if product_label.is_empty() {
        return Err(CollectError::invalid("productLabel", &raw.product_label));
    }

    let share_dir = match raw.share_dir.as_deref().map(str::trim) {
        Some("") => return Err(CollectError::invalid("shareDir", "")),
        Some(dir) => dir.to_string(),
        None => DEFAULT_SHARE_DIR.to_string(),
    };

    log::debug!(
        "collected host {}-{} ({} bit, {:?}), target {}",
        host_family,
        profile.arch,
        host_word_bits.bits(),
        host_byte_order,
        target_arch
    );

    Ok(PlatformFacts::new(
        host_family,
        profile.arch,
        host_word_bits,
        host_byte_order,
        target_arch,
        product_version,
        product_label.to_string(),
        share_dir,
    ))
}
