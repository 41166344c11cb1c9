//! Request and response bodies for the recipe endpoints.
//!
//! Requests deserialise into loosely typed DTOs (every field optional, JSON
//! `null` treated as absent) and are then converted into validated domain
//! values. Unknown members such as `user` are ignored, so ownership can never
//! be reassigned through a payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Label, LabelChange, LabelName, LabelSelection, Price, Recipe, RecipeChanges, RecipeDraft,
    RecipeFields, RecipeLink, RecipeSummary, RecipeTitle, RecipeValidationError, TimeMinutes,
    UpdateMode,
};
use crate::inbound::http::validation::{FieldErrors, FieldName, collected};

const TITLE: FieldName = FieldName::new("title");
const TIME_MINUTES: FieldName = FieldName::new("time_minutes");
const PRICE: FieldName = FieldName::new("price");
const LINK: FieldName = FieldName::new("link");
const TAGS: FieldName = FieldName::new("tags");
const INGREDIENTS: FieldName = FieldName::new("ingredients");

/// `{name}` object naming a tag or ingredient.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LabelInput {
    #[schema(example = "Thai")]
    pub name: String,
}

/// Price as sent by clients: either a decimal string or a JSON number.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn parse(&self) -> Result<Price, RecipeValidationError> {
        match self {
            Self::Text(raw) => raw.parse(),
            Self::Number(number) => number.to_string().parse(),
        }
    }
}

/// Body of `POST`, `PUT` and `PATCH` recipe requests.
///
/// Example JSON:
/// `{"title":"Green curry","time_minutes":30,"price":"5.25","tags":[{"name":"Thai"}]}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RecipeRequest {
    #[schema(example = "Green curry")]
    pub title: Option<String>,
    #[schema(example = 30)]
    pub time_minutes: Option<i64>,
    #[schema(value_type = Option<String>, example = "5.25")]
    pub price: Option<PriceInput>,
    pub description: Option<String>,
    #[schema(example = "https://example.com/green-curry")]
    pub link: Option<String>,
    pub tags: Option<Vec<LabelInput>>,
    pub ingredients: Option<Vec<LabelInput>>,
}

fn selection(errors: &mut FieldErrors, field: FieldName, input: Vec<LabelInput>) -> LabelSelection {
    let names: Vec<LabelName> = input
        .into_iter()
        .enumerate()
        .filter_map(|(index, label)| errors.check(field.nested_name(index), LabelName::new(label.name)))
        .collect();
    LabelSelection::from_names(names)
}

fn label_change(
    errors: &mut FieldErrors,
    field: FieldName,
    input: Option<Vec<LabelInput>>,
) -> LabelChange {
    match input {
        Some(labels) => LabelChange::Replace(selection(errors, field, labels)),
        None => LabelChange::Unchanged,
    }
}

struct CheckedScalars {
    title: Option<RecipeTitle>,
    time_minutes: Option<TimeMinutes>,
    price: Option<Price>,
    link: Option<RecipeLink>,
}

impl RecipeRequest {
    /// Validate every present scalar, recording failures in `errors`.
    fn check_scalars(&self, errors: &mut FieldErrors) -> CheckedScalars {
        CheckedScalars {
            title: self
                .title
                .as_ref()
                .and_then(|raw| errors.check(TITLE.as_str(), RecipeTitle::new(raw))),
            time_minutes: self
                .time_minutes
                .and_then(|raw| errors.check(TIME_MINUTES.as_str(), TimeMinutes::new(raw))),
            price: self
                .price
                .as_ref()
                .and_then(|raw| errors.check(PRICE.as_str(), raw.parse())),
            link: self
                .link
                .as_ref()
                .and_then(|raw| errors.check(LINK.as_str(), RecipeLink::new(raw))),
        }
    }

    fn require_core(&self, errors: &mut FieldErrors) {
        errors.required(TITLE, self.title.as_ref());
        errors.required(TIME_MINUTES, self.time_minutes);
        errors.required(PRICE, self.price.as_ref());
    }

    /// Convert a create payload; title, time and price are mandatory.
    pub fn into_draft(self) -> Result<RecipeDraft, Error> {
        let mut errors = FieldErrors::new();
        self.require_core(&mut errors);
        let scalars = self.check_scalars(&mut errors);
        let tags = selection(&mut errors, TAGS, self.tags.unwrap_or_default());
        let ingredients = selection(&mut errors, INGREDIENTS, self.ingredients.unwrap_or_default());
        errors.finish()?;

        Ok(RecipeDraft {
            fields: RecipeFields {
                title: collected(scalars.title, TITLE)?,
                time_minutes: collected(scalars.time_minutes, TIME_MINUTES)?,
                price: collected(scalars.price, PRICE)?,
                description: self.description.unwrap_or_default(),
                link: scalars.link.unwrap_or_default(),
            },
            tags,
            ingredients,
        })
    }

    /// Convert an update payload.
    ///
    /// [`UpdateMode::Full`] additionally requires title, time and price.
    /// Absent fields leave stored values untouched in both modes.
    pub fn into_changes(self, mode: UpdateMode) -> Result<RecipeChanges, Error> {
        let mut errors = FieldErrors::new();
        if mode == UpdateMode::Full {
            self.require_core(&mut errors);
        }
        let scalars = self.check_scalars(&mut errors);
        let tags = label_change(&mut errors, TAGS, self.tags);
        let ingredients = label_change(&mut errors, INGREDIENTS, self.ingredients);
        errors.finish()?;

        Ok(RecipeChanges {
            title: scalars.title,
            time_minutes: scalars.time_minutes,
            price: scalars.price,
            description: self.description,
            link: scalars.link,
            tags,
            ingredients,
        })
    }
}

/// Tag or ingredient as returned inside recipe details and label listings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LabelResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Thai")]
    pub name: String,
}

impl From<&Label> for LabelResponse {
    fn from(label: &Label) -> Self {
        Self {
            id: label.id().get(),
            name: label.name().to_string(),
        }
    }
}

/// Recipe as shown in listings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeSummaryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Green curry")]
    pub title: String,
    #[schema(example = 30)]
    pub time_minutes: i32,
    #[schema(example = "5.25")]
    pub price: String,
    pub link: String,
}

impl RecipeSummaryResponse {
    fn from_fields(id: i64, fields: &RecipeFields) -> Self {
        Self {
            id,
            title: fields.title.to_string(),
            time_minutes: fields.time_minutes.get(),
            price: fields.price.to_string(),
            link: fields.link.as_ref().to_owned(),
        }
    }
}

impl From<&RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: &RecipeSummary) -> Self {
        Self::from_fields(summary.id.get(), &summary.fields)
    }
}

/// Recipe detail including description and resolved labels.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub summary: RecipeSummaryResponse,
    pub description: String,
    pub tags: Vec<LabelResponse>,
    pub ingredients: Vec<LabelResponse>,
}

impl From<&Recipe> for RecipeDetailResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            summary: RecipeSummaryResponse::from_fields(recipe.id().get(), recipe.fields()),
            description: recipe.fields().description.clone(),
            tags: recipe.tags().iter().map(LabelResponse::from).collect(),
            ingredients: recipe.ingredients().iter().map(LabelResponse::from).collect(),
        }
    }
}
