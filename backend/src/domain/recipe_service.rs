//! Recipe domain service.
//!
//! Implements the recipe driving ports over a [`RecipeRepository`]. Missing
//! and foreign recipes both surface as `not_found`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{RecipeCommand, RecipeQuery, RecipeRepository};
use crate::domain::{Error, Recipe, RecipeChanges, RecipeDraft, RecipeId, RecipeSummary, UserId};

/// Recipe service implementing [`RecipeCommand`] and [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeService<R> {
    recipes: Arc<R>,
}

impl<R> RecipeService<R> {
    /// Create a new service backed by `recipes`.
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }
}

fn recipe_not_found(id: RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

#[async_trait]
impl<R> RecipeQuery for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<RecipeSummary>, Error> {
        self.recipes
            .list_for_owner(owner)
            .await
            .map_err(Error::from)
    }

    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_for_owner(owner, id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| recipe_not_found(id))
    }
}

#[async_trait]
impl<R> RecipeCommand for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let recipe = self
            .recipes
            .create(owner, &draft)
            .await
            .map_err(Error::from)?;
        info!(
            recipe_id = %recipe.id(),
            owner = %owner,
            tags = recipe.tags().len(),
            ingredients = recipe.ingredients().len(),
            "recipe created"
        );
        Ok(recipe)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: RecipeChanges,
    ) -> Result<Recipe, Error> {
        self.recipes
            .update(owner, id, &changes)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| recipe_not_found(id))
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error> {
        let removed = self
            .recipes
            .delete(owner, id)
            .await
            .map_err(Error::from)?;
        if removed {
            info!(recipe_id = %id, owner = %owner, "recipe deleted");
            Ok(())
        } else {
            Err(recipe_not_found(id))
        }
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
