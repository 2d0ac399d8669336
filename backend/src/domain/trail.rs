//! Trail rule data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::{SkillLevel, SKILL_NAME_MAX};
use super::user::AREA_OF_INTEREST_MAX;

/// Maximum allowed length for a recommendation title.
pub const TITLE_MAX: usize = 120;
/// Maximum allowed length for a recommendation description.
pub const DESCRIPTION_MAX: usize = 500;

/// Validation errors raised while constructing trail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailValidationError {
    EmptyAreaOfInterest,
    AreaOfInterestTooLong { max: usize },
    EmptyRelatedSkill,
    RelatedSkillTooLong { max: usize },
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyDescription,
    DescriptionTooLong { max: usize },
}

impl fmt::Display for TrailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAreaOfInterest => write!(f, "area of interest must not be empty"),
            Self::AreaOfInterestTooLong { max } => {
                write!(f, "area of interest must be at most {max} characters")
            }
            Self::EmptyRelatedSkill => write!(f, "related skill must not be empty"),
            Self::RelatedSkillTooLong { max } => {
                write!(f, "related skill must be at most {max} characters")
            }
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for TrailValidationError {}

/// A static rule mapping `(area, skill, minimum level)` to recommended
/// learning content. Trails belong to no user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    pub id: Uuid,
    pub area_of_interest: String,
    pub related_skill: String,
    pub minimum_level: SkillLevel,
    pub title: String,
    pub description: String,
}

/// Validated fields for creating or updating a trail rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailDraft {
    area_of_interest: String,
    related_skill: String,
    minimum_level: SkillLevel,
    title: String,
    description: String,
}

impl TrailDraft {
    /// Validate and construct a draft from raw field values.
    pub fn new(
        area_of_interest: impl Into<String>,
        related_skill: impl Into<String>,
        minimum_level: SkillLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TrailValidationError> {
        let area_of_interest = area_of_interest.into();
        if area_of_interest.trim().is_empty() {
            return Err(TrailValidationError::EmptyAreaOfInterest);
        }
        if area_of_interest.chars().count() > AREA_OF_INTEREST_MAX {
            return Err(TrailValidationError::AreaOfInterestTooLong {
                max: AREA_OF_INTEREST_MAX,
            });
        }

        let related_skill = related_skill.into();
        if related_skill.trim().is_empty() {
            return Err(TrailValidationError::EmptyRelatedSkill);
        }
        if related_skill.chars().count() > SKILL_NAME_MAX {
            return Err(TrailValidationError::RelatedSkillTooLong {
                max: SKILL_NAME_MAX,
            });
        }

        let title = title.into();
        if title.trim().is_empty() {
            return Err(TrailValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(TrailValidationError::TitleTooLong { max: TITLE_MAX });
        }

        let description = description.into();
        if description.trim().is_empty() {
            return Err(TrailValidationError::EmptyDescription);
        }
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(TrailValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }

        Ok(Self {
            area_of_interest,
            related_skill,
            minimum_level,
            title,
            description,
        })
    }

    /// Area of interest the rule applies to.
    pub fn area_of_interest(&self) -> &str {
        &self.area_of_interest
    }

    /// Skill name the rule matches against, exactly and case-sensitively.
    pub fn related_skill(&self) -> &str {
        &self.related_skill
    }

    /// Minimum skill level admitted by the rule.
    pub fn minimum_level(&self) -> SkillLevel {
        self.minimum_level
    }

    /// Title of the recommendation the rule produces.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description of the recommendation the rule produces.
    pub fn description(&self) -> &str {
        &self.description
    }
}
