//! The rule table.
//!
//! Rules run in [`Category`] order. Each rule sees the facts and the flags
//! set by every rule before it, and may only add flags.

use std::fmt;

use qconf_facts::{ByteOrder, HostArch, HostFamily, PlatformFacts, TargetArch};
use serde::Serialize;

use crate::error::Result;
use crate::exclusion::ExclusiveGroup;
use crate::flag::{ConfigurationSet, Flag, FlagValue, Scope};
use crate::names::*;

/// Precedence class of a rule. Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Universal,
    HostWordSize,
    HostByteOrder,
    HostFamily,
    HostArch,
    Storage,
    GpuPassthrough,
    TargetArch,
    /// In-kernel virtualization extension (KVM).
    KvmAcceleration,
    /// Alternate hypervisor (HAX).
    HaxAcceleration,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Universal => "universal",
            Category::HostWordSize => "host-word-size",
            Category::HostByteOrder => "host-byte-order",
            Category::HostFamily => "host-family",
            Category::HostArch => "host-arch",
            Category::Storage => "storage",
            Category::GpuPassthrough => "gpu-passthrough",
            Category::TargetArch => "target-arch",
            Category::KvmAcceleration => "kvm-acceleration",
            Category::HaxAcceleration => "hax-acceleration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Write access to the configuration set for the rule being evaluated.
///
/// Every flag defined through an `Emit` is tagged with the rule's id and scope.
pub struct Emit<'a> {
    set: &'a mut ConfigurationSet,
    rule: &'static str,
    scope: Scope,
    defined: usize,
}

impl<'a> Emit<'a> {
    pub(crate) fn new(set: &'a mut ConfigurationSet, rule: &Rule) -> Self {
        Self {
            set,
            rule: rule.id,
            scope: rule.scope,
            defined: 0,
        }
    }

    /// Flags set by earlier rules.
    pub fn set(&self) -> &ConfigurationSet {
        &*self.set
    }

    /// Define `name` with no value.
    pub fn define(&mut self, name: &str) -> Result<()> {
        self.insert(name, FlagValue::Defined)
    }

    /// Define `name` to a number.
    pub fn define_int(&mut self, name: &str, value: u64) -> Result<()> {
        self.insert(name, FlagValue::Int(value))
    }

    /// Define `name` to a string literal.
    pub fn define_str(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.insert(name, FlagValue::Str(value.into()))
    }

    pub(crate) fn defined(&self) -> usize {
        self.defined
    }

    fn insert(&mut self, name: &str, value: FlagValue) -> Result<()> {
        log::debug!("rule {}: {} {}", self.rule, name, value);
        self.set.insert(Flag {
            name: name.to_string(),
            value,
            scope: self.scope,
            rule: self.rule,
        })?;
        self.defined += 1;
        Ok(())
    }
}

/// Signature of a rule body.
pub type RuleFn = fn(&PlatformFacts, &mut Emit<'_>) -> Result<()>;

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier reported in inconsistency errors.
    pub id: &'static str,
    pub category: Category,
    /// Header the rule's flags go to.
    pub scope: Scope,
    pub apply: RuleFn,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("scope", &self.scope)
            .finish()
    }
}

/// An ordered set of rules plus the flag groups that must stay exclusive.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    groups: Vec<ExclusiveGroup>,
}

impl RuleTable {
    /// Build a table. Rules are stably sorted into category order.
    pub fn new(mut rules: Vec<Rule>, groups: Vec<ExclusiveGroup>) -> Self {
        rules.sort_by_key(|r| r.category);
        Self { rules, groups }
    }

    /// The emulator's rule table.
    pub fn standard() -> Self {
        let rules = vec![
            Rule {
                id: "universal",
                category: Category::Universal,
                scope: Scope::Host,
                apply: universal,
            },
            Rule {
                id: "host.word-size",
                category: Category::HostWordSize,
                scope: Scope::Host,
                apply: host_word_size,
            },
            Rule {
                id: "host.byte-order",
                category: Category::HostByteOrder,
                scope: Scope::Host,
                apply: host_byte_order,
            },
            Rule {
                id: "host.family",
                category: Category::HostFamily,
                scope: Scope::Host,
                apply: host_family,
            },
            Rule {
                id: "host.arch",
                category: Category::HostArch,
                scope: Scope::Host,
                apply: host_arch,
            },
            Rule {
                id: "host.storage",
                category: Category::Storage,
                scope: Scope::Host,
                apply: storage,
            },
            Rule {
                id: "product.gpu-passthrough",
                category: Category::GpuPassthrough,
                scope: Scope::Host,
                apply: gpu_passthrough,
            },
            Rule {
                id: "target.arch",
                category: Category::TargetArch,
                scope: Scope::Target,
                apply: target_arch,
            },
            Rule {
                id: "target.accel.kvm",
                category: Category::KvmAcceleration,
                scope: Scope::Target,
                apply: kvm,
            },
            Rule {
                id: "target.accel.hax",
                category: Category::HaxAcceleration,
                scope: Scope::Target,
                apply: hax,
            },
        ];
        Self::new(rules, ExclusiveGroup::standard())
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn groups(&self) -> &[ExclusiveGroup] {
        &self.groups
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn universal(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    emit.define_str(CONFIG_QEMU_SHAREDIR, facts.share_dir())?;
    for name in [
        CONFIG_BYTESWAP_H,
        CONFIG_FNMATCH,
        CONFIG_GDBSTUB,
        CONFIG_SLIRP,
        CONFIG_SKINS,
        CONFIG_TRACE,
        CONFIG_POSIX,
        CONFIG_KVM_GS_RESTORE,
        CONFIG_IOVEC,
    ] {
        emit.define(name)?;
    }
    emit.define_str(QEMU_VERSION, facts.product_version().to_string())?;
    emit.define_str(QEMU_PKGVERSION, facts.product_label())?;
    emit.define(CONFIG_ANDROID)
}

fn host_word_size(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    emit.define_int(HOST_LONG_BITS, u64::from(facts.host_word_bits().bits()))
}

fn host_byte_order(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    match facts.host_byte_order() {
        ByteOrder::BigEndian => emit.define(HOST_WORDS_BIGENDIAN),
        ByteOrder::LittleEndian => Ok(()),
    }
}

fn host_family(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    match facts.host_family() {
        HostFamily::Linux => emit.define(CONFIG_LINUX),
        HostFamily::Darwin => emit.define(CONFIG_DARWIN),
        HostFamily::Windows => emit.define(CONFIG_WIN32),
        HostFamily::Other => Ok(()),
    }
}

fn host_arch(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    let marker = match facts.host_arch() {
        HostArch::X86 => HOST_I386,
        HostArch::X86_64 => HOST_X86_64,
        HostArch::Ppc | HostArch::Ppc64 => HOST_PPC,
        HostArch::Arm => HOST_ARM,
        HostArch::Arm64 => HOST_AARCH64,
        HostArch::Other => return Ok(()),
    };
    emit.define(marker)
}

fn storage(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    if !facts.host_family().is_posix_like() {
        return Ok(());
    }
    emit.define(CONFIG_FDATASYNC)?;
    emit.define(CONFIG_MADVISE)?;
    emit.define(CONFIG_NAND_LIMITS)
}

// Unconditional for this product line; kept apart from `universal` so it
// can later be gated per target.
fn gpu_passthrough(_facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    emit.define(CONFIG_ANDROID_OPENGLES)
}

fn target_arch(facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    let marker = match facts.target_arch() {
        TargetArch::X86 => TARGET_I386,
        TargetArch::X86_64 => TARGET_X86_64,
        TargetArch::Arm => TARGET_ARM,
        TargetArch::Arm64 => TARGET_AARCH64,
        TargetArch::Mips => TARGET_MIPS,
        TargetArch::Ppc => TARGET_PPC,
        TargetArch::Other => {
            log::warn!("target architecture has no marker; target header will be empty");
            return Ok(());
        }
    };
    emit.define(marker)
}

/// Gate shared by both acceleration rules: an x86-family target section.
fn x86_target_selected(set: &ConfigurationSet) -> bool {
    set.contains_any(&[TARGET_I386, TARGET_X86_64])
}

// KVM needs a Linux host whose own CPU is x86.
fn kvm(_facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    let set = emit.set();
    if x86_target_selected(set)
        && set.contains(CONFIG_LINUX)
        && set.contains_any(&[HOST_I386, HOST_X86_64])
    {
        emit.define(CONFIG_KVM)?;
    }
    Ok(())
}

fn hax(_facts: &PlatformFacts, emit: &mut Emit<'_>) -> Result<()> {
    let set = emit.set();
    if x86_target_selected(set) && set.contains_any(&[CONFIG_DARWIN, CONFIG_WIN32]) {
        emit.define(CONFIG_HAX)?;
    }
    Ok(())
}
