//! Header rendering.
//!
//! One `#define` line per present flag, in derivation order. Absent flags
//! produce no line.

use qconf_engine::{ConfigurationSet, FlagValue, Scope};
use qconf_facts::PlatformFacts;

/// Render the flags of one scope as a C header body.
pub fn render_header(set: &ConfigurationSet, scope: Scope, banner: Option<&str>) -> String {
    let mut text = String::new();
    if let Some(banner) = banner {
        text.push_str(&format!("/* {banner} */\n"));
    }
    for flag in set.scoped(scope) {
        match &flag.value {
            FlagValue::Defined => text.push_str(&format!("#define {}\n", flag.name)),
            FlagValue::Int(n) => text.push_str(&format!("#define {} {n}\n", flag.name)),
            FlagValue::Str(s) => {
                text.push_str(&format!("#define {} \"{}\"\n", flag.name, escape_c(s)))
            }
        }
    }
    text
}

/// The per-host header, `config-host.h`.
pub fn host_header(set: &ConfigurationSet) -> String {
    render_header(
        set,
        Scope::Host,
        Some("This file was autogenerated by 'qconf'"),
    )
}

/// The per-target header, `target-<arch>/config.h`.
pub fn target_header(set: &ConfigurationSet, facts: &PlatformFacts) -> String {
    let banner = format!("{}-specific configuration", facts.target_arch());
    render_header(set, Scope::Target, Some(&banner))
}

fn escape_c(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            // Octal takes at most three digits, so a following digit is safe.
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use qconf_facts::{collect, RawEnvironment};

    fn derive(host: &str, arch: &str, target: &str) -> (PlatformFacts, ConfigurationSet) {
        let facts = collect(&RawEnvironment::new(host, arch, target)).unwrap();
        let set = qconf_engine::derive(&facts);
        (facts, set)
    }

    #[test]
    fn linux_ppc64_host_header() {
        let (_, set) = derive("linux", "ppc64", "x86");
        let expected = "\
/* This file was autogenerated by 'qconf' */
#define CONFIG_QEMU_SHAREDIR \"/usr/local/share/qemu\"
#define CONFIG_BYTESWAP_H
#define CONFIG_FNMATCH
#define CONFIG_GDBSTUB
#define CONFIG_SLIRP
#define CONFIG_SKINS
#define CONFIG_TRACE
#define CONFIG_POSIX
#define CONFIG_KVM_GS_RESTORE
#define CONFIG_IOVEC
#define QEMU_VERSION \"0.10.50\"
#define QEMU_PKGVERSION \"Android\"
#define CONFIG_ANDROID
#define HOST_LONG_BITS 64
#define HOST_WORDS_BIGENDIAN
#define CONFIG_LINUX
#define HOST_PPC
#define CONFIG_FDATASYNC
#define CONFIG_MADVISE
#define CONFIG_NAND_LIMITS
#define CONFIG_ANDROID_OPENGLES
";
        assert_eq!(host_header(&set), expected);
    }

    #[test]
    fn x86_target_header_on_ppc_host() {
        let (facts, set) = derive("linux", "ppc64", "x86");
        assert_eq!(
            target_header(&set, &facts),
            "/* x86-specific configuration */\n#define TARGET_I386\n"
        );
    }

    #[test]
    fn x86_target_header_on_x86_linux_host() {
        let (facts, set) = derive("linux", "x86_64", "x86");
        assert_eq!(
            target_header(&set, &facts),
            "/* x86-specific configuration */\n#define TARGET_I386\n#define CONFIG_KVM\n"
        );
    }

    #[test]
    fn windows_host_header_omits_absent_flags() {
        let (_, set) = derive("windows", "i686", "x86");
        let header = host_header(&set);
        assert!(header.contains("#define HOST_LONG_BITS 32\n"));
        assert!(header.contains("#define CONFIG_WIN32\n"));
        assert!(!header.contains("HOST_WORDS_BIGENDIAN"));
        assert!(!header.contains("CONFIG_FDATASYNC"));
        assert!(!header.contains("CONFIG_KVM"));
    }

    #[test]
    fn no_banner() {
        let (_, set) = derive("darwin", "x86_64", "x86_64");
        assert_eq!(
            render_header(&set, Scope::Target, None),
            "#define TARGET_X86_64\n#define CONFIG_HAX\n"
        );
    }

    #[test]
    fn strings_are_escaped() {
        let mut raw = RawEnvironment::new("linux", "x86_64", "arm");
        raw.product_label = "Say \"hi\"".into();
        let set = qconf_engine::derive(&collect(&raw).unwrap());
        assert!(host_header(&set).contains("#define QEMU_PKGVERSION \"Say \\\"hi\\\"\"\n"));
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(escape_c("a\tb\r\n"), "a\\tb\\r\\n");
        assert_eq!(escape_c("x\u{1b}1"), "x\\0331");
        assert_eq!(escape_c("\u{7f}"), "\\177");

        let mut raw = RawEnvironment::new("linux", "x86_64", "arm");
        raw.share_dir = Some("/srv/\remu".into());
        let header = host_header(&qconf_engine::derive(&collect(&raw).unwrap()));
        assert!(header.contains("#define CONFIG_QEMU_SHAREDIR \"/srv/\\remu\"\n"));
        assert!(!header.contains('\r'));
    }
}
