//! `qconf rules` — list the rule table in evaluation order.

use anyhow::Result;
use qconf_engine::{RuleTable, Scope};

/// Print every rule with its category and header scope.
pub fn run() -> Result<()> {
    let table = RuleTable::standard();
    println!("Rules (evaluation order):");
    println!();
    for (i, rule) in table.rules().iter().enumerate() {
        let scope = match rule.scope {
            Scope::Host => "host",
            Scope::Target => "target",
        };
        println!("  {:>2}. {:<25} {:<18} {scope}", i + 1, rule.id, rule.category);
    }
    println!();
    println!("Exclusive groups:");
    for group in table.groups() {
        println!("  {:<20} {}", group.name, group.flags.join(", "));
    }
    Ok(())
}
