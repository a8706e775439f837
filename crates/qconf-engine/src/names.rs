//! Flag names emitted by the standard rule table.

pub const CONFIG_QEMU_SHAREDIR: &str = "CONFIG_QEMU_SHAREDIR";
pub const CONFIG_BYTESWAP_H: &str = "CONFIG_BYTESWAP_H";
pub const CONFIG_FNMATCH: &str = "CONFIG_FNMATCH";
pub const CONFIG_GDBSTUB: &str = "CONFIG_GDBSTUB";
pub const CONFIG_SLIRP: &str = "CONFIG_SLIRP";
pub const CONFIG_SKINS: &str = "CONFIG_SKINS";
pub const CONFIG_TRACE: &str = "CONFIG_TRACE";
pub const CONFIG_POSIX: &str = "CONFIG_POSIX";
pub const CONFIG_KVM_GS_RESTORE: &str = "CONFIG_KVM_GS_RESTORE";
pub const CONFIG_IOVEC: &str = "CONFIG_IOVEC";
pub const QEMU_VERSION: &str = "QEMU_VERSION";
pub const QEMU_PKGVERSION: &str = "QEMU_PKGVERSION";
pub const CONFIG_ANDROID: &str = "CONFIG_ANDROID";

pub const HOST_LONG_BITS: &str = "HOST_LONG_BITS";
pub const HOST_WORDS_BIGENDIAN: &str = "HOST_WORDS_BIGENDIAN";

pub const CONFIG_LINUX: &str = "CONFIG_LINUX";
pub const CONFIG_DARWIN: &str = "CONFIG_DARWIN";
pub const CONFIG_WIN32: &str = "CONFIG_WIN32";

pub const HOST_I386: &str = "HOST_I386";
pub const HOST_X86_64: &str = "HOST_X86_64";
pub const HOST_PPC: &str = "HOST_PPC";
pub const HOST_ARM: &str = "HOST_ARM";
pub const HOST_AARCH64: &str = "HOST_AARCH64";

pub const CONFIG_FDATASYNC: &str = "CONFIG_FDATASYNC";
pub const CONFIG_MADVISE: &str = "CONFIG_MADVISE";
pub const CONFIG_NAND_LIMITS: &str = "CONFIG_NAND_LIMITS";

pub const CONFIG_ANDROID_OPENGLES: &str = "CONFIG_ANDROID_OPENGLES";

pub const TARGET_I386: &str = "TARGET_I386";
pub const TARGET_X86_64: &str = "TARGET_X86_64";
pub const TARGET_ARM: &str = "TARGET_ARM";
pub const TARGET_AARCH64: &str = "TARGET_AARCH64";
pub const TARGET_MIPS: &str = "TARGET_MIPS";
pub const TARGET_PPC: &str = "TARGET_PPC";

pub const CONFIG_KVM: &str = "CONFIG_KVM";
pub const CONFIG_HAX: &str = "CONFIG_HAX";

/// Every flag the universal rule emits, whatever the facts.
pub const UNIVERSAL: &[&str] = &[
    CONFIG_QEMU_SHAREDIR,
    CONFIG_BYTESWAP_H,
    CONFIG_FNMATCH,
    CONFIG_GDBSTUB,
    CONFIG_SLIRP,
    CONFIG_SKINS,
    CONFIG_TRACE,
    CONFIG_POSIX,
    CONFIG_KVM_GS_RESTORE,
    CONFIG_IOVEC,
    QEMU_VERSION,
    QEMU_PKGVERSION,
    CONFIG_ANDROID,
];

pub const HOST_FAMILY_MARKERS: &[&str] = &[CONFIG_LINUX, CONFIG_DARWIN, CONFIG_WIN32];

pub const HOST_ARCH_MARKERS: &[&str] = &[HOST_I386, HOST_X86_64, HOST_PPC, HOST_ARM, HOST_AARCH64];

pub const TARGET_MARKERS: &[&str] = &[
    TARGET_I386,
    TARGET_X86_64,
    TARGET_ARM,
    TARGET_AARCH64,
    TARGET_MIPS,
    TARGET_PPC,
];

pub const ACCELERATORS: &[&str] = &[CONFIG_KVM, CONFIG_HAX];
