//! Mutual exclusion checks over a derived configuration set.
//!
//! An exclusive group lists flags of which at most one may be present.
//! A violation means the rule table is broken, not that the facts were bad.

use crate::error::{DeriveError, Result};
use crate::flag::ConfigurationSet;
use crate::names;

/// Flags of which at most one may be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup {
    /// Group name used in error messages.
    pub name: &'static str,
    pub flags: &'static [&'static str],
}

impl ExclusiveGroup {
    /// Groups enforced by the standard rule table.
    pub fn standard() -> Vec<Self> {
        vec![
            ExclusiveGroup {
                name: "host family",
                flags: names::HOST_FAMILY_MARKERS,
            },
            ExclusiveGroup {
                name: "host architecture",
                flags: names::HOST_ARCH_MARKERS,
            },
            ExclusiveGroup {
                name: "target architecture",
                flags: names::TARGET_MARKERS,
            },
            ExclusiveGroup {
                name: "accelerator",
                flags: names::ACCELERATORS,
            },
        ]
    }

    /// Present members of the group, in group order.
    pub fn present<'s>(&self, set: &'s ConfigurationSet) -> Vec<&'s str> {
        self.flags
            .iter()
            .filter_map(|name| set.get(name))
            .map(|flag| flag.name.as_str())
            .collect()
    }
}

/// Check every group against `set`.
///
/// The error names the rules that set the clashing flags.
pub fn check_exclusive(set: &ConfigurationSet, groups: &[ExclusiveGroup]) -> Result<()> {
    for group in groups {
        let present = group.present(set);
        if present.len() <= 1 {
            continue;
        }

        let mut rules: Vec<String> = Vec::new();
        for name in &present {
            if let Some(flag) = set.get(name) {
                if !rules.iter().any(|r| r == flag.rule) {
                    rules.push(flag.rule.to_string());
                }
            }
        }
        return Err(DeriveError::InternalInconsistency {
            rules,
            detail: format!(
                "{} flags are mutually exclusive but {} are set",
                group.name,
                present.join(" and ")
            ),
        });
    }
    Ok(())
}
