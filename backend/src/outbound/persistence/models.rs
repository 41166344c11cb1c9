//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain values
//! re-validate every column; a row that fails validation surfaces as a Diesel
//! deserialisation error.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, Label, LabelId, LabelName, PasswordHash, Price, RecipeChanges, RecipeFields,
    RecipeId, RecipeLink, RecipeSummary, RecipeTitle, TimeMinutes, User, UserAccount, UserId,
};

use super::schema::{recipes, users};

/// Wrap a domain validation failure for a stored row.
pub(crate) fn corrupt_row<E>(error: E) -> diesel::result::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    diesel::result::Error::DeserializationError(Box::new(error))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserRow {
    pub(crate) fn into_account(self) -> Result<UserAccount, diesel::result::Error> {
        let email = EmailAddress::new(&self.email).map_err(corrupt_row)?;
        let user = User::from_parts(
            UserId::from_uuid(self.id),
            email,
            self.is_active,
            self.is_staff,
            self.is_superuser,
        );
        Ok(UserAccount::from_parts(
            user,
            PasswordHash::new(self.password_hash),
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = account.user();
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: account.password_hash().as_str(),
            is_active: user.is_active(),
            is_staff: user.is_staff(),
            is_superuser: user.is_superuser(),
        }
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price_cents: i32,
    pub description: String,
    pub link: String,
}

impl RecipeRow {
    pub(crate) fn fields(&self) -> Result<RecipeFields, diesel::result::Error> {
        Ok(RecipeFields {
            title: RecipeTitle::new(&self.title).map_err(corrupt_row)?,
            time_minutes: TimeMinutes::new(i64::from(self.time_minutes)).map_err(corrupt_row)?,
            price: Price::from_cents(self.price_cents).map_err(corrupt_row)?,
            description: self.description.clone(),
            link: RecipeLink::new(&self.link).map_err(corrupt_row)?,
        })
    }

    pub(crate) fn into_summary(self) -> Result<RecipeSummary, diesel::result::Error> {
        Ok(RecipeSummary {
            id: RecipeId::new(self.id),
            fields: self.fields()?,
        })
    }
}

/// Insertable struct for new recipes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub time_minutes: i32,
    pub price_cents: i32,
    pub description: &'a str,
    pub link: &'a str,
}

impl<'a> NewRecipeRow<'a> {
    pub(crate) fn new(owner: &UserId, fields: &'a RecipeFields) -> Self {
        Self {
            user_id: *owner.as_uuid(),
            title: fields.title.as_ref(),
            time_minutes: fields.time_minutes.get(),
            price_cents: fields.price.cents(),
            description: fields.description.as_str(),
            link: fields.link.as_ref(),
        }
    }
}

/// Changeset for partial and full updates; `None` columns are left alone.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChangeset<'a> {
    pub title: Option<&'a str>,
    pub time_minutes: Option<i32>,
    pub price_cents: Option<i32>,
    pub description: Option<&'a str>,
    pub link: Option<&'a str>,
}

impl<'a> From<&'a RecipeChanges> for RecipeChangeset<'a> {
    fn from(changes: &'a RecipeChanges) -> Self {
        Self {
            title: changes.title.as_ref().map(AsRef::as_ref),
            time_minutes: changes.time_minutes.map(TimeMinutes::get),
            price_cents: changes.price.map(Price::cents),
            description: changes.description.as_deref(),
            link: changes.link.as_ref().map(AsRef::as_ref),
        }
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// `(id, user_id, name)` as selected from `tags` or `ingredients`.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct LabelRow {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

impl LabelRow {
    pub(crate) fn into_label(self) -> Result<Label, diesel::result::Error> {
        let name = LabelName::new(&self.name).map_err(corrupt_row)?;
        Ok(Label::new(
            LabelId::new(self.id),
            UserId::from_uuid(self.user_id),
            name,
        ))
    }
}

/// Convert a batch of label rows, failing on the first invalid one.
pub(crate) fn labels_from_rows(
    rows: impl IntoIterator<Item = LabelRow>,
) -> Result<Vec<Label>, diesel::result::Error> {
    rows.into_iter().map(LabelRow::into_label).collect()
}
