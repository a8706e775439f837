//! Host model.
//!
//! Describes the machine performing the build: its OS family, CPU
//! architecture, native word size and byte order.

use std::fmt;

use serde::{Deserialize, Serialize};

use ByteOrder::{BigEndian as BE, LittleEndian as LE};
use WordBits::{W32, W64};

/// Operating system family of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostFamily {
    Linux,
    /// macOS and other Darwin kernels.
    Darwin,
    /// Native Windows, including MinGW/MSYS/Cygwin shells.
    Windows,
    /// A recognized host with no family-specific configuration (BSDs, Solaris).
    Other,
}

impl HostFamily {
    /// Normalize a kernel or OS name (`uname -s` style).
    pub fn from_raw(raw: &str) -> Option<Self> {
        let name = raw.trim().to_ascii_lowercase();
        let family = match name.as_str() {
            "linux" => HostFamily::Linux,
            "darwin" | "macos" | "osx" => HostFamily::Darwin,
            "windows" | "win32" | "win64" => HostFamily::Windows,
            "freebsd" | "netbsd" | "openbsd" | "dragonfly" | "sunos" | "solaris" => {
                HostFamily::Other
            }
            // uname on Windows shells reports e.g. "MINGW64_NT-10.0-19045"
            n if n.starts_with("mingw") || n.starts_with("msys") || n.starts_with("cygwin") => {
                HostFamily::Windows
            }
            _ => return None,
        };
        Some(family)
    }

    /// Lower-case name used in host configuration directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostFamily::Linux => "linux",
            HostFamily::Darwin => "darwin",
            HostFamily::Windows => "windows",
            HostFamily::Other => "other",
        }
    }

    /// Whether the host offers POSIX storage primitives (fdatasync, madvise).
    pub fn is_posix_like(&self) -> bool {
        matches!(self, HostFamily::Linux | HostFamily::Darwin)
    }
}

impl fmt::Display for HostFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostArch {
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    Ppc,
    Ppc64,
    Arm,
    Arm64,
    /// A recognized CPU without architecture-specific configuration.
    Other,
}

impl HostArch {
    /// Canonical name used in host configuration directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostArch::X86 => "x86",
            HostArch::X86_64 => "x86_64",
            HostArch::Ppc => "ppc",
            HostArch::Ppc64 => "ppc64",
            HostArch::Arm => "arm",
            HostArch::Arm64 => "arm64",
            HostArch::Other => "other",
        }
    }

    /// Whether the host can run x86 guest code natively.
    pub fn is_x86_family(&self) -> bool {
        matches!(self, HostArch::X86 | HostArch::X86_64)
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native pointer width of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordBits {
    #[serde(rename = "32")]
    W32,
    #[serde(rename = "64")]
    W64,
}

impl WordBits {
    /// Parse `"32"` or `"64"`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim() {
            "32" => Some(WordBits::W32),
            "64" => Some(WordBits::W64),
            _ => None,
        }
    }

    /// Width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            WordBits::W32 => 32,
            WordBits::W64 => 64,
        }
    }
}

/// Byte ordering of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Parse a byte order spelling (`little`, `le`, `big-endian`, ...).
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "little-endian" | "littleendian" => Some(ByteOrder::LittleEndian),
            "big" | "be" | "big-endian" | "bigendian" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }
}

/// What a host architecture alias implies about the other host axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    pub arch: HostArch,
    pub word_bits: WordBits,
    pub byte_order: ByteOrder,
}

const fn profile(arch: HostArch, word_bits: WordBits, byte_order: ByteOrder) -> ArchProfile {
    ArchProfile {
        arch,
        word_bits,
        byte_order,
    }
}

/// Recognized `uname -m` style host CPU names.
const HOST_ARCH_ALIASES: &[(&str, ArchProfile)] = &[
    ("x86", profile(HostArch::X86, W32, LE)),
    ("i386", profile(HostArch::X86, W32, LE)),
    ("i486", profile(HostArch::X86, W32, LE)),
    ("i586", profile(HostArch::X86, W32, LE)),
    ("i686", profile(HostArch::X86, W32, LE)),
    ("x86_64", profile(HostArch::X86_64, W64, LE)),
    ("amd64", profile(HostArch::X86_64, W64, LE)),
    ("x64", profile(HostArch::X86_64, W64, LE)),
    ("ppc", profile(HostArch::Ppc, W32, BE)),
    ("powerpc", profile(HostArch::Ppc, W32, BE)),
    ("ppc64", profile(HostArch::Ppc64, W64, BE)),
    ("powerpc64", profile(HostArch::Ppc64, W64, BE)),
    ("ppc64le", profile(HostArch::Ppc64, W64, LE)),
    ("powerpc64le", profile(HostArch::Ppc64, W64, LE)),
    ("arm", profile(HostArch::Arm, W32, LE)),
    ("armv6l", profile(HostArch::Arm, W32, LE)),
    ("armv7", profile(HostArch::Arm, W32, LE)),
    ("armv7l", profile(HostArch::Arm, W32, LE)),
    ("armhf", profile(HostArch::Arm, W32, LE)),
    ("armel", profile(HostArch::Arm, W32, LE)),
    ("armeb", profile(HostArch::Arm, W32, BE)),
    ("arm64", profile(HostArch::Arm64, W64, LE)),
    ("aarch64", profile(HostArch::Arm64, W64, LE)),
    ("aarch64_be", profile(HostArch::Arm64, W64, BE)),
    ("mips", profile(HostArch::Other, W32, BE)),
    ("mipsel", profile(HostArch::Other, W32, LE)),
    ("mips64", profile(HostArch::Other, W64, BE)),
    ("riscv64", profile(HostArch::Other, W64, LE)),
    ("s390x", profile(HostArch::Other, W64, BE)),
    ("sparc64", profile(HostArch::Other, W64, BE)),
];

/// Look up a host CPU name.
pub fn lookup_host_arch(raw: &str) -> Option<ArchProfile> {
    let name = raw.trim().to_ascii_lowercase();
    HOST_ARCH_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, p)| *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_aliases() {
        assert_eq!(HostFamily::from_raw("Linux"), Some(HostFamily::Linux));
        assert_eq!(HostFamily::from_raw(" Darwin "), Some(HostFamily::Darwin));
        assert_eq!(
            HostFamily::from_raw("MINGW64_NT-10.0-19045"),
            Some(HostFamily::Windows)
        );
        assert_eq!(HostFamily::from_raw("FreeBSD"), Some(HostFamily::Other));
        assert_eq!(HostFamily::from_raw("BeOS"), None);
        assert_eq!(HostFamily::from_raw(""), None);
    }

    #[test]
    fn arch_aliases_carry_width_and_order() {
        let p = lookup_host_arch("amd64").unwrap();
        assert_eq!(p.arch, HostArch::X86_64);
        assert_eq!(p.word_bits, WordBits::W64);
        assert_eq!(p.byte_order, ByteOrder::LittleEndian);

        let p = lookup_host_arch("powerpc64").unwrap();
        assert_eq!(p.arch, HostArch::Ppc64);
        assert_eq!(p.byte_order, ByteOrder::BigEndian);

        let p = lookup_host_arch("ppc64le").unwrap();
        assert_eq!(p.arch, HostArch::Ppc64);
        assert_eq!(p.byte_order, ByteOrder::LittleEndian);

        assert_eq!(lookup_host_arch("I686").unwrap().word_bits, WordBits::W32);
        assert!(lookup_host_arch("vax").is_none());
    }

    #[test]
    fn word_bits_and_byte_order_parse() {
        assert_eq!(WordBits::from_raw("64"), Some(WordBits::W64));
        assert_eq!(WordBits::from_raw("16"), None);
        assert_eq!(WordBits::W32.bits(), 32);
        assert_eq!(ByteOrder::from_raw("BE"), Some(ByteOrder::BigEndian));
        assert_eq!(
            ByteOrder::from_raw("little-endian"),
            Some(ByteOrder::LittleEndian)
        );
        assert_eq!(ByteOrder::from_raw("middle"), None);
    }

    #[test]
    fn posix_like_hosts() {
        assert!(HostFamily::Linux.is_posix_like());
        assert!(HostFamily::Darwin.is_posix_like());
        assert!(!HostFamily::Windows.is_posix_like());
        assert!(!HostFamily::Other.is_posix_like());
    }
}
