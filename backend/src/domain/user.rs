//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 120;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 150;
/// Maximum allowed length for an area of interest.
pub const AREA_OF_INTEREST_MAX: usize = 80;
/// Maximum allowed length for a career objective.
pub const CAREER_OBJECTIVE_MAX: usize = 200;

/// Validation errors raised while constructing user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
    AreaOfInterestTooLong { max: usize },
    CareerObjectiveTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::AreaOfInterestTooLong { max } => {
                write!(f, "area of interest must be at most {max} characters")
            }
            Self::CareerObjectiveTooLong { max } => {
                write!(f, "career objective must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately; this constrains the overall shape.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Application user.
///
/// A user owns a collection of skills and a collection of generated
/// recommendations, both reached through explicit repository queries rather
/// than embedded object graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub area_of_interest: Option<String>,
    pub career_objective: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The user's area of interest, treating an empty string as absent.
    ///
    /// An absent area acts as a wildcard during trail matching.
    pub fn effective_area_of_interest(&self) -> Option<&str> {
        self.area_of_interest
            .as_deref()
            .filter(|area| !area.is_empty())
    }
}

/// Validated profile fields for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    name: String,
    email: String,
    area_of_interest: Option<String>,
    career_objective: Option<String>,
}

impl UserProfile {
    /// Validate and construct a profile from raw field values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        area_of_interest: Option<String>,
        career_objective: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: USER_NAME_MAX });
        }

        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }

        if let Some(area) = &area_of_interest {
            if area.chars().count() > AREA_OF_INTEREST_MAX {
                return Err(UserValidationError::AreaOfInterestTooLong {
                    max: AREA_OF_INTEREST_MAX,
                });
            }
        }
        if let Some(objective) = &career_objective {
            if objective.chars().count() > CAREER_OBJECTIVE_MAX {
                return Err(UserValidationError::CareerObjectiveTooLong {
                    max: CAREER_OBJECTIVE_MAX,
                });
            }
        }

        Ok(Self {
            name,
            email,
            area_of_interest,
            career_objective,
        })
    }

    /// The user's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's unique email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Optional area of interest used for trail matching.
    pub fn area_of_interest(&self) -> Option<&str> {
        self.area_of_interest.as_deref()
    }

    /// Optional free-text career objective.
    pub fn career_objective(&self) -> Option<&str> {
        self.career_objective.as_deref()
    }
}

/// One page of search results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub items: Vec<User>,
    pub total: u64,
}

/// Filters, ordering, and pagination for the user search operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearch {
    /// Substring filter on the user name.
    pub name: Option<String>,
    /// Substring filter on the area of interest.
    pub area_of_interest: Option<String>,
    /// 1-based page number.
    pub page_number: u32,
    /// Page size, between 1 and 100.
    pub page_size: u32,
    /// Result ordering.
    pub order_by: UserOrder,
}

/// Orderings supported by the user search operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrder {
    /// Stable default ordering by identifier.
    #[default]
    Id,
    Name,
    NameDesc,
    Created,
    CreatedDesc,
}

impl UserOrder {
    /// Parse an `orderBy` query value, case-insensitively. Unknown values
    /// fall back to [`Self::Id`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("name") => Self::Name,
            Some("name_desc") => Self::NameDesc,
            Some("created") => Self::Created,
            Some("created_desc") => Self::CreatedDesc,
            _ => Self::Id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile(name: &str, email: &str) -> Result<UserProfile, UserValidationError> {
        UserProfile::new(name, email, None, None)
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("ada.lovelace@mail.example.org", true)]
    #[case("not-an-email", false)]
    #[case("missing@tld", false)]
    #[case("two@@example.com", false)]
    #[case("spaces in@example.com", false)]
    fn email_shapes_are_validated(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(profile("Ada", email).is_ok(), ok, "email: {email}");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = profile("  ", "ada@example.com").expect_err("blank name");
        assert_eq!(err, UserValidationError::EmptyName);
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long = "x".repeat(USER_NAME_MAX + 1);
        let err = profile(&long, "ada@example.com").expect_err("long name");
        assert_eq!(err, UserValidationError::NameTooLong { max: USER_NAME_MAX });

        let long_area = Some("x".repeat(AREA_OF_INTEREST_MAX + 1));
        let err = UserProfile::new("Ada", "ada@example.com", long_area, None)
            .expect_err("long area");
        assert_eq!(
            err,
            UserValidationError::AreaOfInterestTooLong {
                max: AREA_OF_INTEREST_MAX
            }
        );
    }

    #[test]
    fn empty_area_of_interest_is_treated_as_absent() {
        let user = User {
            id: UserId::random(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            area_of_interest: Some(String::new()),
            career_objective: None,
            created_at: Utc::now(),
        };
        assert_eq!(user.effective_area_of_interest(), None);
    }

    #[rstest]
    #[case(Some("name"), UserOrder::Name)]
    #[case(Some("name_desc"), UserOrder::NameDesc)]
    #[case(Some("created"), UserOrder::Created)]
    #[case(Some("created_desc"), UserOrder::CreatedDesc)]
    #[case(Some("NAME"), UserOrder::Name)]
    #[case(Some("bogus"), UserOrder::Id)]
    #[case(None, UserOrder::Id)]
    fn order_by_parsing_falls_back_to_id(#[case] raw: Option<&str>, #[case] expected: UserOrder) {
        assert_eq!(UserOrder::parse(raw), expected);
    }
}
