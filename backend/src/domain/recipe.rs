//! Recipe entity and the value types it is built from.
//!
//! Validation lives on the newtypes so a [`RecipeDraft`] or [`RecipeChanges`]
//! can only hold values that are safe to persist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::label::Label;
use super::reconciliation::{LabelChange, LabelSelection};
use super::user::UserId;

/// Maximum length of a recipe title in characters.
pub const TITLE_MAX: usize = 255;
/// Maximum length of a recipe link in characters.
pub const LINK_MAX: usize = 255;
/// Largest representable price in cents (`999.99`).
pub const PRICE_MAX_CENTS: i32 = 99_999;

/// Validation errors for recipe fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    NegativeTime,
    TimeTooLarge,
    InvalidPrice,
    NegativePrice,
    PriceTooPrecise,
    PriceTooLarge,
    LinkTooLong { max: usize },
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::NegativeTime => write!(f, "time_minutes must not be negative"),
            Self::TimeTooLarge => write!(f, "time_minutes is too large"),
            Self::InvalidPrice => write!(f, "price must be a decimal number"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::PriceTooPrecise => write!(f, "price allows at most 2 decimal places"),
            Self::PriceTooLarge => write!(f, "price must be at most 999.99"),
            Self::LinkTooLong { max } => write!(f, "link must be at most {max} characters"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Database identifier of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty recipe title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Preparation time in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeMinutes(i32);

impl TimeMinutes {
    pub fn new(minutes: i64) -> Result<Self, RecipeValidationError> {
        if minutes < 0 {
            return Err(RecipeValidationError::NegativeTime);
        }
        i32::try_from(minutes)
            .map(Self)
            .map_err(|_| RecipeValidationError::TimeTooLarge)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Non-negative price with two decimal places, held as whole cents.
///
/// # Examples
/// ```
/// use recipe_api::domain::Price;
///
/// let price: Price = "5.5".parse().expect("valid price");
/// assert_eq!(price.cents(), 550);
/// assert_eq!(price.to_string(), "5.50");
/// assert!("1000".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i32);

impl Price {
    /// Build a price from whole cents.
    pub fn from_cents(cents: i32) -> Result<Self, RecipeValidationError> {
        if cents < 0 {
            return Err(RecipeValidationError::NegativePrice);
        }
        if cents > PRICE_MAX_CENTS {
            return Err(RecipeValidationError::PriceTooLarge);
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> i32 {
        self.0
    }
}

impl FromStr for Price {
    type Err = RecipeValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let unsigned = match raw.strip_prefix('-') {
            Some(rest) if rest.chars().any(|c| c.is_ascii_digit() && c != '0') => {
                return Err(RecipeValidationError::NegativePrice);
            }
            Some(rest) => rest,
            None => raw,
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(RecipeValidationError::InvalidPrice);
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > 2 {
            return Err(RecipeValidationError::PriceTooPrecise);
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > 3 {
            return Err(RecipeValidationError::PriceTooLarge);
        }
        let whole: i32 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| RecipeValidationError::InvalidPrice)?
        };
        let cents: i32 = match fraction.len() {
            0 => Ok(0),
            1 => fraction.parse::<i32>().map(|tenths| tenths * 10),
            _ => fraction.parse::<i32>(),
        }
        .map_err(|_| RecipeValidationError::InvalidPrice)?;

        Self::from_cents(whole * 100 + cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Optional external link for a recipe; empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeLink(String);

impl RecipeLink {
    pub fn new(link: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = link.as_ref().trim();
        if trimmed.chars().count() > LINK_MAX {
            return Err(RecipeValidationError::LinkTooLong { max: LINK_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Scalar attributes shared by stored recipes and their summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: RecipeTitle,
    pub time_minutes: TimeMinutes,
    pub price: Price,
    pub description: String,
    pub link: RecipeLink,
}

impl RecipeFields {
    /// Overwrite every field present in `changes`.
    pub fn apply(&mut self, changes: &RecipeChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(time_minutes) = changes.time_minutes {
            self.time_minutes = time_minutes;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(link) = &changes.link {
            self.link = link.clone();
        }
    }
}

/// A stored recipe with its resolved tags and ingredients.
///
/// Tags and ingredients are kept in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    owner: UserId,
    fields: RecipeFields,
    tags: Vec<Label>,
    ingredients: Vec<Label>,
}

impl Recipe {
    pub fn new(
        id: RecipeId,
        owner: UserId,
        fields: RecipeFields,
        mut tags: Vec<Label>,
        mut ingredients: Vec<Label>,
    ) -> Self {
        tags.sort_by_key(Label::id);
        ingredients.sort_by_key(Label::id);
        Self {
            id,
            owner,
            fields,
            tags,
            ingredients,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn fields(&self) -> &RecipeFields {
        &self.fields
    }

    pub fn title(&self) -> &RecipeTitle {
        &self.fields.title
    }

    pub fn tags(&self) -> &[Label] {
        &self.tags
    }

    pub fn ingredients(&self) -> &[Label] {
        &self.ingredients
    }

    /// Listing projection of this recipe.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            fields: self.fields.clone(),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fields.title, f)
    }
}

/// Recipe as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub fields: RecipeFields,
}

/// Validated input for creating a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub fields: RecipeFields,
    pub tags: LabelSelection,
    pub ingredients: LabelSelection,
}

/// Whether an update replaces the whole recipe or only the supplied fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PATCH semantics.
    Partial,
    /// PUT semantics: title, time and price are mandatory.
    Full,
}

/// Validated update to an existing recipe.
///
/// `None` leaves the stored value untouched. Ownership is never part of an
/// update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub title: Option<RecipeTitle>,
    pub time_minutes: Option<TimeMinutes>,
    pub price: Option<Price>,
    pub description: Option<String>,
    pub link: Option<RecipeLink>,
    pub tags: LabelChange,
    pub ingredients: LabelChange,
}

impl RecipeChanges {
    /// Whether any scalar column is modified.
    pub fn touches_fields(&self) -> bool {
        self.title.is_some()
            || self.time_minutes.is_some()
            || self.price.is_some()
            || self.description.is_some()
            || self.link.is_some()
    }
}
