//! Target model: the CPU architecture the emulator executes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Guest CPU architecture selected for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetArch {
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    Arm,
    Arm64,
    Mips,
    Ppc,
    /// A recognized guest without a dedicated target section.
    Other,
}

impl TargetArch {
    /// Every target, in the order `--all-targets` configures them.
    pub const ALL: [TargetArch; 6] = [
        TargetArch::X86,
        TargetArch::X86_64,
        TargetArch::Arm,
        TargetArch::Arm64,
        TargetArch::Mips,
        TargetArch::Ppc,
    ];

    /// Normalize a target CPU name.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let arch = match raw.trim().to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => TargetArch::X86,
            "x86_64" | "amd64" => TargetArch::X86_64,
            "arm" | "armv7" => TargetArch::Arm,
            "arm64" | "aarch64" => TargetArch::Arm64,
            "mips" | "mipsel" => TargetArch::Mips,
            "ppc" | "powerpc" => TargetArch::Ppc,
            "sparc" | "m68k" | "sh4" | "cris" | "alpha" | "microblaze" => TargetArch::Other,
            _ => return None,
        };
        Some(arch)
    }

    /// Canonical name used in `target-<name>` directories.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetArch::X86 => "x86",
            TargetArch::X86_64 => "x86_64",
            TargetArch::Arm => "arm",
            TargetArch::Arm64 => "arm64",
            TargetArch::Mips => "mips",
            TargetArch::Ppc => "ppc",
            TargetArch::Other => "other",
        }
    }

    /// Whether this is an x86-family guest (i386 or x86-64).
    pub fn is_x86_family(&self) -> bool {
        matches!(self, TargetArch::X86 | TargetArch::X86_64)
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_aliases() {
        assert_eq!(TargetArch::from_raw("i386"), Some(TargetArch::X86));
        assert_eq!(TargetArch::from_raw("AMD64"), Some(TargetArch::X86_64));
        assert_eq!(TargetArch::from_raw("aarch64"), Some(TargetArch::Arm64));
        assert_eq!(TargetArch::from_raw("m68k"), Some(TargetArch::Other));
        assert_eq!(TargetArch::from_raw("z80"), None);
    }

    #[test]
    fn canonical_names_round_trip() {
        for arch in TargetArch::ALL {
            assert_eq!(TargetArch::from_raw(arch.as_str()), Some(arch));
        }
    }

    #[test]
    fn x86_family() {
        assert!(TargetArch::X86.is_x86_family());
        assert!(TargetArch::X86_64.is_x86_family());
        assert!(!TargetArch::Arm64.is_x86_family());
        assert!(!TargetArch::Other.is_x86_family());
    }
}
