//! Catalog access errors.

use crate::error::{BuilderError, ErrorSeverity};
use crate::state::{ClassId, FeatId, RaceId, SkillId};

/// A lookup into the definition catalog failed.
///
/// Resolvers never propagate these: the reference contributes no effect and
/// its raw id is shown as label. Partially loaded catalogs are a normal
/// transient state while a locale switch reloads the definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("race catalog not available")]
    RacesNotAvailable,

    #[error("class catalog not available")]
    ClassesNotAvailable,

    #[error("skill catalog not available")]
    SkillsNotAvailable,

    #[error("feat catalog not available")]
    FeatsNotAvailable,

    #[error("race '{0}' not found")]
    RaceNotFound(RaceId),

    #[error("class '{0}' not found")]
    ClassNotFound(ClassId),

    #[error("skill '{0}' not found")]
    SkillNotFound(SkillId),

    #[error("feat '{0}' not found")]
    FeatNotFound(FeatId),
}

impl BuilderError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        use CatalogError::*;
        match self {
            RacesNotAvailable | ClassesNotAvailable | SkillsNotAvailable | FeatsNotAvailable => {
                ErrorSeverity::Recoverable
            }

            RaceNotFound(_) | ClassNotFound(_) | SkillNotFound(_) | FeatNotFound(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            RacesNotAvailable => "CATALOG_RACES_NOT_AVAILABLE",
            ClassesNotAvailable => "CATALOG_CLASSES_NOT_AVAILABLE",
            SkillsNotAvailable => "CATALOG_SKILLS_NOT_AVAILABLE",
            FeatsNotAvailable => "CATALOG_FEATS_NOT_AVAILABLE",
            RaceNotFound(_) => "CATALOG_RACE_NOT_FOUND",
            ClassNotFound(_) => "CATALOG_CLASS_NOT_FOUND",
            SkillNotFound(_) => "CATALOG_SKILL_NOT_FOUND",
            FeatNotFound(_) => "CATALOG_FEAT_NOT_FOUND",
        }
    }
}
