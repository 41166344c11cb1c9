//! In-memory [`RecipeRepository`].

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Label, LabelKind, LabelSelection, Recipe, RecipeChanges, RecipeDraft, RecipeId, RecipeSummary,
    UserId,
};

use super::MemoryStore;
use super::store::{State, StoredRecipe};

#[derive(Clone)]
pub struct MemoryRecipeRepository {
    store: Arc<MemoryStore>,
}

impl MemoryRecipeRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn reconcile(
    state: &mut State,
    kind: LabelKind,
    owner: &UserId,
    id: i64,
    selection: &LabelSelection,
) {
    let ids: BTreeSet<_> = state
        .labels_mut(kind)
        .get_or_create(owner, selection)
        .iter()
        .map(Label::id)
        .collect();
    if let Some(recipe) = state.recipes.get_mut(&id) {
        *recipe.label_ids_mut(kind) = ids;
    }
}

fn load(state: &State, id: i64) -> Option<Recipe> {
    let stored = state.recipes.get(&id)?;
    Some(Recipe::new(
        RecipeId::new(id),
        stored.owner.clone(),
        stored.fields.clone(),
        state.labels(LabelKind::Tag).resolve_ids(&stored.tags),
        state
            .labels(LabelKind::Ingredient)
            .resolve_ids(&stored.ingredients),
    ))
}

fn owned(state: &State, owner: &UserId, id: RecipeId) -> bool {
    state
        .recipes
        .get(&id.get())
        .is_some_and(|recipe| &recipe.owner == owner)
}

fn missing_after_write(id: i64) -> RecipeRepositoryError {
    RecipeRepositoryError::query(format!("recipe {id} vanished during write"))
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<RecipeSummary>, RecipeRepositoryError> {
        let state = self.store.lock();
        Ok(state
            .recipes
            .iter()
            .rev()
            .filter(|(_, recipe)| &recipe.owner == owner)
            .map(|(id, recipe)| RecipeSummary {
                id: RecipeId::new(*id),
                fields: recipe.fields.clone(),
            })
            .collect())
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.store.lock();
        if !owned(&state, owner, id) {
            return Ok(None);
        }
        Ok(load(&state, id.get()))
    }

    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let mut state = self.store.lock();
        let id = state.next_recipe_id();
        state.recipes.insert(
            id,
            StoredRecipe {
                owner: owner.clone(),
                fields: draft.fields.clone(),
                tags: BTreeSet::new(),
                ingredients: BTreeSet::new(),
            },
        );
        reconcile(&mut state, LabelKind::Tag, owner, id, &draft.tags);
        reconcile(&mut state, LabelKind::Ingredient, owner, id, &draft.ingredients);
        load(&state, id).ok_or_else(|| missing_after_write(id))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut state = self.store.lock();
        if !owned(&state, owner, id) {
            return Ok(None);
        }
        let raw = id.get();
        if let Some(recipe) = state.recipes.get_mut(&raw) {
            recipe.fields.apply(changes);
        }
        if let Some(selection) = changes.tags.selection() {
            reconcile(&mut state, LabelKind::Tag, owner, raw, selection);
        }
        if let Some(selection) = changes.ingredients.selection() {
            reconcile(&mut state, LabelKind::Ingredient, owner, raw, selection);
        }
        load(&state, raw)
            .map(Some)
            .ok_or_else(|| missing_after_write(raw))
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.store.lock();
        if !owned(&state, owner, id) {
            return Ok(false);
        }
        Ok(state.recipes.remove(&id.get()).is_some())
    }
}
