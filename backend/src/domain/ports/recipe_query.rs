//! Driving port for reading recipes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, RecipeSummary, UserId};

/// Domain use-case port for recipe listings and detail views.
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// The caller's recipes, newest first.
    async fn list(&self, owner: &UserId) -> Result<Vec<RecipeSummary>, Error>;

    /// One of the caller's recipes.
    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error>;
}
