//! Build host detection.
//!
//! The derivation core never reads the environment; this is where the CLI
//! turns the running machine into raw identifiers for it.

/// Host OS and CPU names for the machine running `qconf`.
///
/// Names are returned raw; an unsupported host is rejected later by
/// `collect`, not here.
pub fn build_host() -> (String, String) {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    (os.to_string(), host_arch_name(std::env::consts::ARCH, cfg!(target_endian = "big")))
}

/// Spell a CPU name so that it also carries the byte order.
fn host_arch_name(arch: &str, big_endian: bool) -> String {
    let name = match (arch, big_endian) {
        ("powerpc64", false) => "ppc64le",
        ("aarch64", true) => "aarch64_be",
        ("arm", true) => "armeb",
        ("mips", false) => "mipsel",
        (other, _) => other,
    };
    name.to_string()
}
