//! Validated platform facts.
//!
//! A [`PlatformFacts`] value is only produced by [`crate::collect`], so
//! every instance already satisfies the cross-axis invariants (word size and
//! byte order agree with the host CPU).

use serde::Serialize;

use crate::host::{ByteOrder, HostArch, HostFamily, WordBits};
use crate::target::TargetArch;

/// Immutable facts about one (host, target) build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformFacts {
    host_family: HostFamily,
    host_arch: HostArch,
    host_word_bits: WordBits,
    host_byte_order: ByteOrder,
    target_arch: TargetArch,
    product_version: semver::Version,
    product_label: String,
    share_dir: String,
}

impl PlatformFacts {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        host_family: HostFamily,
        host_arch: HostArch,
        host_word_bits: WordBits,
        host_byte_order: ByteOrder,
        target_arch: TargetArch,
        product_version: semver::Version,
        product_label: String,
        share_dir: String,
    ) -> Self {
        Self {
            host_family,
            host_arch,
            host_word_bits,
            host_byte_order,
            target_arch,
            product_version,
            product_label,
            share_dir,
        }
    }

    pub fn host_family(&self) -> HostFamily {
        self.host_family
    }

    pub fn host_arch(&self) -> HostArch {
        self.host_arch
    }

    pub fn host_word_bits(&self) -> WordBits {
        self.host_word_bits
    }

    pub fn host_byte_order(&self) -> ByteOrder {
        self.host_byte_order
    }

    pub fn target_arch(&self) -> TargetArch {
        self.target_arch
    }

    pub fn product_version(&self) -> &semver::Version {
        &self.product_version
    }

    pub fn product_label(&self) -> &str {
        &self.product_label
    }

    /// Emulator data directory baked into the build.
    pub fn share_dir(&self) -> &str {
        &self.share_dir
    }

    /// The same host facts with a different target selected.
    ///
    /// Host axes are untouched, so the result is as valid as `self`.
    pub fn with_target(&self, target_arch: TargetArch) -> Self {
        Self {
            target_arch,
            ..self.clone()
        }
    }

    /// Host configuration directory name, e.g. `linux-ppc64`.
    pub fn host_dir_name(&self) -> String {
        format!("{}-{}", self.host_family, self.host_arch)
    }

    /// Target configuration directory name, e.g. `target-x86`.
    pub fn target_dir_name(&self) -> String {
        format!("target-{}", self.target_arch)
    }
}
