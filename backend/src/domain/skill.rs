//! Skill data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Maximum allowed length for a skill name.
pub const SKILL_NAME_MAX: usize = 80;

/// Validation errors raised while constructing skill fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillValidationError {
    EmptyName,
    NameTooLong { max: usize },
    LevelOutOfRange { value: i64 },
}

impl fmt::Display for SkillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "skill name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "skill name must be at most {max} characters")
            }
            Self::LevelOutOfRange { value } => {
                write!(f, "skill level must be between 1 and 5, got {value}")
            }
        }
    }
}

impl std::error::Error for SkillValidationError {}

/// Proficiency level between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    /// Lowest representable level.
    pub const MIN: Self = Self(1);
    /// Highest representable level.
    pub const MAX: Self = Self(5);

    /// Validate and construct a level from a raw value.
    pub fn new(value: u8) -> Result<Self, SkillValidationError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SkillValidationError::LevelOutOfRange {
                value: i64::from(value),
            })
        }
    }

    /// The raw level value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The level as stored in the database.
    pub fn as_i32(self) -> i32 {
        i32::from(self.0)
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = SkillValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for SkillLevel {
    type Error = SkillValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| SkillValidationError::LevelOutOfRange {
                value: i64::from(value),
            })
            .and_then(Self::new)
    }
}

impl From<SkillLevel> for u8 {
    fn from(value: SkillLevel) -> Self {
        value.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A self-declared skill owned by exactly one user.
///
/// ## Invariants
/// - `(user_id, name)` is unique; a user cannot declare the same skill twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub level: SkillLevel,
}

/// Validated fields for creating or updating a skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDraft {
    name: String,
    level: SkillLevel,
}

impl SkillDraft {
    /// Validate and construct a draft from raw field values.
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Result<Self, SkillValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SkillValidationError::EmptyName);
        }
        if name.chars().count() > SKILL_NAME_MAX {
            return Err(SkillValidationError::NameTooLong {
                max: SKILL_NAME_MAX,
            });
        }
        Ok(Self { name, level })
    }

    /// The skill name, matched exactly against trail rules.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared proficiency level.
    pub fn level(&self) -> SkillLevel {
        self.level
    }
}
