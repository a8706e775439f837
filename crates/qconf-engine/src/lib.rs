//! Configuration derivation engine.
//!
//! Maps validated [`PlatformFacts`] to a [`ConfigurationSet`] by evaluating
//! an ordered rule table:
//! - **Host rules:** universal flags, word size, byte order, OS family,
//!   CPU architecture, storage capabilities, GPU passthrough
//! - **Target rules:** target marker and hypervisor acceleration
//!
//! Derivation is pure: no I/O, no global state, and identical facts always
//! produce identical sets.

pub mod engine;
pub mod error;
pub mod exclusion;
pub mod flag;
pub mod names;
pub mod rules;

pub use engine::{derive, Engine};
pub use error::DeriveError;
pub use flag::{ConfigurationSet, Flag, FlagValue, Scope};
pub use rules::{Category, Rule, RuleTable};

pub use qconf_facts::PlatformFacts;
