//! Driving port for recipe mutations.
//!
//! Inbound adapters hand over validated drafts and changes together with the
//! authenticated caller; implementations enforce ownership.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeChanges, RecipeDraft, RecipeId, UserId};

/// Domain use-case port for creating, updating and deleting recipes.
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Create a recipe owned by `owner`.
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Update an owned recipe; foreign or missing recipes are `not_found`.
    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: RecipeChanges,
    ) -> Result<Recipe, Error>;

    /// Delete an owned recipe; foreign or missing recipes are `not_found`.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error>;
}
