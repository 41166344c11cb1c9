//! Port for recipe persistence.
//!
//! Every method takes the caller's [`UserId`]; rows owned by anyone else are
//! indistinguishable from missing rows. Writes resolve tag and ingredient
//! names with [`plan_resolution`](crate::domain::plan_resolution) and commit
//! the recipe and both relations atomically.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeChanges, RecipeDraft, RecipeId, RecipeSummary, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// The store could not be reached.
        Connection { message: String } as ServiceUnavailable
            => "recipe repository unavailable: {message}",
        /// The store answered with an error.
        Query { message: String } as InternalError
            => "recipe repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Recipes owned by `owner`, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<RecipeSummary>, RecipeRepositoryError>;

    /// A single recipe if it exists and belongs to `owner`.
    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Insert a recipe and reconcile its labels in one unit of work.
    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError>;

    /// Apply `changes` to an owned recipe.
    ///
    /// Returns `None` when the recipe does not exist for `owner`.
    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Delete an owned recipe, returning whether a row was removed.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError>;
}
