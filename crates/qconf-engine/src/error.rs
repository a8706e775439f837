//! Error types for configuration derivation.

/// Errors raised while evaluating a rule table.
///
/// Valid facts never produce an error from a correct table; every variant
/// points at a defect in the rules themselves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    /// Two rules produced flags that cannot coexist.
    #[error("internal inconsistency between rules [{}]: {detail}", rules.join(", "))]
    InternalInconsistency {
        /// Ids of the rules involved.
        rules: Vec<String>,
        /// What was contradictory.
        detail: String,
    },
}

/// Result type for derivation.
pub type Result<T> = std::result::Result<T, DeriveError>;
