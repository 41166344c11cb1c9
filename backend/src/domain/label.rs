//! Tags and ingredients.
//!
//! Both are per-user named labels with identical rules, so one [`Label`] type
//! serves both and [`LabelKind`] says which table a value belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Maximum length of a label name in characters.
pub const LABEL_NAME_MAX: usize = 255;

/// Validation errors for label values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValidationError {
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for LabelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for LabelValidationError {}

/// Which label collection a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Tag,
    Ingredient,
}

impl LabelKind {
    /// Singular noun used in messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Ingredient => "ingredient",
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Database identifier of a tag or ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(i64);

impl LabelId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty label name.
///
/// # Examples
/// ```
/// use recipe_api::domain::LabelName;
///
/// let name = LabelName::new("  Thai ").expect("valid name");
/// assert_eq!(name.as_ref(), "Thai");
/// assert!(LabelName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelName(String);

impl LabelName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, LabelValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LabelValidationError::EmptyName);
        }
        if trimmed.chars().count() > LABEL_NAME_MAX {
            return Err(LabelValidationError::NameTooLong {
                max: LABEL_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for LabelName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<LabelName> for String {
    fn from(value: LabelName) -> Self {
        value.0
    }
}

impl TryFrom<String> for LabelName {
    type Error = LabelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A tag or ingredient owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    id: LabelId,
    owner: UserId,
    name: LabelName,
}

impl Label {
    pub fn new(id: LabelId, owner: UserId, name: LabelName) -> Self {
        Self { id, owner, name }
    }

    pub fn id(&self) -> LabelId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn name(&self) -> &LabelName {
        &self.name
    }

    /// Copy of this label carrying a different name.
    pub fn renamed(&self, name: LabelName) -> Self {
        Self {
            id: self.id,
            owner: self.owner.clone(),
            name,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
