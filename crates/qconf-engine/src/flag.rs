//! Flags and the configuration set they accumulate into.
//!
//! A flag is either absent (not in the set at all), present, or present
//! with a value. Absence is not the same as "false": downstream consumers
//! test `#ifdef`, so an undefined flag and a defined one differ.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{DeriveError, Result};

/// Value carried by a present flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagValue {
    /// Defined with no value.
    Defined,
    /// Defined to a numeric value (e.g. `HOST_LONG_BITS 64`).
    Int(u64),
    /// Defined to a string literal (e.g. `QEMU_VERSION "0.10.50"`).
    Str(String),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Defined => Ok(()),
            FlagValue::Int(n) => write!(f, "{n}"),
            FlagValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FlagValue::Defined => serializer.serialize_bool(true),
            FlagValue::Int(n) => serializer.serialize_u64(*n),
            FlagValue::Str(s) => serializer.serialize_str(s),
        }
    }
}

/// Which generated header a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Per-host header (`config-host.h`).
    Host,
    /// Per-target header (`target-<arch>/config.h`).
    Target,
}

/// A present flag together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub value: FlagValue,
    pub scope: Scope,
    /// Id of the rule that set the flag.
    pub rule: &'static str,
}

/// Derived flags, in the order rules set them.
///
/// Flags can be added but never removed or changed. Setting an existing
/// flag to the value it already has is a no-op; any other value is an
/// internal inconsistency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationSet {
    flags: Vec<Flag>,
    index: HashMap<String, usize>,
}

impl ConfigurationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag.
    pub fn insert(&mut self, flag: Flag) -> Result<()> {
        if let Some(&i) = self.index.get(&flag.name) {
            let existing = &self.flags[i];
            if existing.value == flag.value {
                return Ok(());
            }
            return Err(DeriveError::InternalInconsistency {
                rules: vec![existing.rule.to_string(), flag.rule.to_string()],
                detail: format!(
                    "{} set to '{}' and then '{}'",
                    flag.name, existing.value, flag.value
                ),
            });
        }
        self.index.insert(flag.name.clone(), self.flags.len());
        self.flags.push(flag);
        Ok(())
    }

    /// Look up a flag; `None` means absent.
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.index.get(name).map(|&i| &self.flags[i])
    }

    /// The value of a present flag.
    pub fn value(&self, name: &str) -> Option<&FlagValue> {
        self.get(name).map(|f| &f.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether any of `names` is present.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.contains(n))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// All flags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    /// Flags destined for one header, in insertion order.
    pub fn scoped(&self, scope: Scope) -> impl Iterator<Item = &Flag> {
        self.flags.iter().filter(move |f| f.scope == scope)
    }

    /// Flag names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.flags.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Serializes as a name → value map in insertion order.
impl Serialize for ConfigurationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.flags.len()))?;
        for flag in &self.flags {
            map.serialize_entry(&flag.name, &flag.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(name: &str, value: FlagValue, rule: &'static str) -> Flag {
        Flag {
            name: name.into(),
            value,
            scope: Scope::Host,
            rule,
        }
    }

    #[test]
    fn absent_until_inserted() {
        let mut set = ConfigurationSet::new();
        assert!(set.is_empty());
        assert!(set.get("CONFIG_KVM").is_none());

        set.insert(flag("CONFIG_KVM", FlagValue::Defined, "r1")).unwrap();
        assert!(set.contains("CONFIG_KVM"));
        assert_eq!(set.value("CONFIG_KVM"), Some(&FlagValue::Defined));
        assert_eq!(set.get("CONFIG_KVM").unwrap().rule, "r1");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_value_is_idempotent() {
        let mut set = ConfigurationSet::new();
        set.insert(flag("HOST_LONG_BITS", FlagValue::Int(64), "a")).unwrap();
        set.insert(flag("HOST_LONG_BITS", FlagValue::Int(64), "b")).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("HOST_LONG_BITS").unwrap().rule, "a");
    }

    #[test]
    fn conflicting_value_is_inconsistent() {
        let mut set = ConfigurationSet::new();
        set.insert(flag("HOST_LONG_BITS", FlagValue::Int(64), "a")).unwrap();
        let err = set
            .insert(flag("HOST_LONG_BITS", FlagValue::Int(32), "b"))
            .unwrap_err();
        let DeriveError::InternalInconsistency { rules, detail } = err;
        assert_eq!(rules, vec!["a", "b"]);
        assert!(detail.contains("HOST_LONG_BITS"));
        assert_eq!(set.value("HOST_LONG_BITS"), Some(&FlagValue::Int(64)));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut set = ConfigurationSet::new();
        for name in ["Z", "A", "M"] {
            set.insert(flag(name, FlagValue::Defined, "r")).unwrap();
        }
        assert_eq!(set.names(), vec!["Z", "A", "M"]);
    }

    #[test]
    fn scoped_filters() {
        let mut set = ConfigurationSet::new();
        set.insert(flag("H", FlagValue::Defined, "r")).unwrap();
        set.insert(Flag {
            name: "T".into(),
            value: FlagValue::Defined,
            scope: Scope::Target,
            rule: "r",
        })
        .unwrap();
        let host: Vec<_> = set.scoped(Scope::Host).map(|f| f.name.as_str()).collect();
        let target: Vec<_> = set.scoped(Scope::Target).map(|f| f.name.as_str()).collect();
        assert_eq!(host, vec!["H"]);
        assert_eq!(target, vec!["T"]);
    }

    #[test]
    fn value_display() {
        assert_eq!(FlagValue::Defined.to_string(), "");
        assert_eq!(FlagValue::Int(32).to_string(), "32");
        assert_eq!(FlagValue::Str("0.10.50".into()).to_string(), "\"0.10.50\"");
    }
}
