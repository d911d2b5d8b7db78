//! Common error infrastructure for builder-core.
//!
//! The engine distinguishes three failure families and none of them is fatal:
//!
//! - **Lookup failures** ([`crate::catalog::CatalogError`]): a referenced id is
//!   missing from the catalog. Resolvers log them and degrade to "no effect"
//!   with the raw id as label.
//! - **Constraint violations** ([`EditRejection`]): an edit to the character
//!   (adding a feat twice, toggling a locked condition) is refused and the
//!   prior state is kept.
//! - **Invariant breaches** ([`crate::stats::Anomaly`]): malformed snapshot data
//!   is clamped for computation and flagged inside the breakdown.

use crate::state::{ConditionKey, FeatId, InstanceId};

/// Severity level of an error, used for categorization and display strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Transient condition, e.g. a catalog that is still being (re)loaded.
    ///
    /// Retrying after the catalog settles is expected to succeed.
    Recoverable,

    /// Invalid user edit, should not be retried without changes.
    ///
    /// Examples: feat already taken, specialization missing
    Validation,

    /// Inconsistent input data that indicates a bug in a collaborator.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all builder-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BuilderError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; UI layers key localized messages on it.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A refused edit to the character record.
///
/// Edit operations return this instead of mutating; the caller keeps the
/// previous state and shows the message next to the control that caused it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditRejection {
    /// Feat id is not present in the catalog.
    #[error("feat '{0}' is not in the catalog")]
    UnknownFeat(FeatId),

    /// Single-instance feat is already present, granted or chosen.
    #[error("feat '{0}' can only be taken once")]
    AlreadyTaken(FeatId),

    /// Multi-instance feat is already present with the same specialization.
    #[error("feat '{feat}' is already taken for '{specialization}'")]
    DuplicateSpecialization {
        feat: FeatId,
        specialization: String,
    },

    /// Specialized feat was added without a detail string.
    #[error("feat '{0}' requires a specialization")]
    MissingSpecialization(FeatId),

    /// A detail string was supplied for a feat that takes none.
    #[error("feat '{0}' does not take a specialization")]
    UnexpectedSpecialization(FeatId),

    /// No instance with this id exists on the character.
    #[error("feat instance {0} not found")]
    InstanceNotFound(InstanceId),

    /// Granted feats follow race/class/level and cannot be removed by hand.
    #[error("feat instance {0} is granted and cannot be removed")]
    GrantedFeat(InstanceId),

    /// No effect on the character references this condition key.
    #[error("condition '{0}' is not referenced by any effect")]
    UnknownCondition(ConditionKey),

    /// A permanent effect holds this condition on.
    #[error("condition '{0}' is held on by a permanent effect")]
    ConditionLocked(ConditionKey),
}

impl BuilderError for EditRejection {
    fn severity(&self) -> ErrorSeverity {
        use EditRejection::*;
        match self {
            // The catalog may still be loading after a locale switch
            UnknownFeat(_) => ErrorSeverity::Recoverable,

            AlreadyTaken(_)
            | DuplicateSpecialization { .. }
            | MissingSpecialization(_)
            | UnexpectedSpecialization(_)
            | GrantedFeat(_)
            | ConditionLocked(_) => ErrorSeverity::Validation,

            InstanceNotFound(_) | UnknownCondition(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EditRejection::*;
        match self {
            UnknownFeat(_) => "EDIT_UNKNOWN_FEAT",
            AlreadyTaken(_) => "EDIT_ALREADY_TAKEN",
            DuplicateSpecialization { .. } => "EDIT_DUPLICATE_SPECIALIZATION",
            MissingSpecialization(_) => "EDIT_MISSING_SPECIALIZATION",
            UnexpectedSpecialization(_) => "EDIT_UNEXPECTED_SPECIALIZATION",
            InstanceNotFound(_) => "EDIT_INSTANCE_NOT_FOUND",
            GrantedFeat(_) => "EDIT_GRANTED_FEAT",
            UnknownCondition(_) => "EDIT_UNKNOWN_CONDITION",
            ConditionLocked(_) => "EDIT_CONDITION_LOCKED",
        }
    }
}
