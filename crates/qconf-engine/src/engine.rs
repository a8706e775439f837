//! Rule evaluation.

use qconf_facts::PlatformFacts;

use crate::error::Result;
use crate::exclusion::check_exclusive;
use crate::flag::ConfigurationSet;
use crate::rules::{Emit, RuleTable};

/// Evaluates a rule table against platform facts.
///
/// The engine holds no state between calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    table: RuleTable,
}

impl Engine {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// An engine over [`RuleTable::standard`].
    pub fn standard() -> Self {
        Self::new(RuleTable::standard())
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Run every rule in order, then check the exclusive groups.
    pub fn try_derive(&self, facts: &PlatformFacts) -> Result<ConfigurationSet> {
        let mut set = ConfigurationSet::new();
        for rule in self.table.rules() {
            let mut emit = Emit::new(&mut set, rule);
            (rule.apply)(facts, &mut emit)?;
            if emit.defined() == 0 {
                log::trace!("rule {} ({}) defined nothing", rule.id, rule.category);
            }
        }
        check_exclusive(&set, self.table.groups())?;
        log::debug!(
            "derived {} flags for {} / target {}",
            set.len(),
            facts.host_dir_name(),
            facts.target_arch()
        );
        Ok(set)
    }

    /// Derive the configuration for `facts`.
    ///
    /// # Panics
    ///
    /// Panics if the rule table produces contradictory flags. That can only
    /// happen when the table itself is wrong, never because of the facts.
    pub fn derive(&self, facts: &PlatformFacts) -> ConfigurationSet {
        match self.try_derive(facts) {
            Ok(set) => set,
            Err(e) => panic!("rule table defect: {e}"),
        }
    }
}

/// Derive with the standard rule table.
pub fn derive(facts: &PlatformFacts) -> ConfigurationSet {
    Engine::standard().derive(facts)
}
