//! PostgreSQL-backed [`RecipeRepository`].
//!
//! Each write runs in one transaction: the recipe row, tag reconciliation and
//! ingredient reconciliation commit together or not at all.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Recipe, RecipeChanges, RecipeDraft, RecipeId, RecipeSummary, UserId,
};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::diesel_label_repository::{ingredient_store, tag_store};
use super::models::{NewRecipeRow, RecipeChangeset, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    match classify_diesel_error(error, "recipe repository") {
        DieselFailure::Connection(message) => RecipeRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint } => RecipeRepositoryError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
        DieselFailure::Query(message) => RecipeRepositoryError::query(message),
    }
}

async fn find_owned_row(
    conn: &mut AsyncPgConnection,
    owner: &UserId,
    id: RecipeId,
) -> QueryResult<Option<RecipeRow>> {
    recipes::table
        .filter(recipes::id.eq(id.get()))
        .filter(recipes::user_id.eq(*owner.as_uuid()))
        .select(RecipeRow::as_select())
        .first(conn)
        .await
        .optional()
}

async fn assemble(conn: &mut AsyncPgConnection, row: RecipeRow) -> QueryResult<Recipe> {
    let tags = tag_store::load_for_recipe(conn, row.id).await?;
    let ingredients = ingredient_store::load_for_recipe(conn, row.id).await?;
    let fields = row.fields()?;
    Ok(Recipe::new(
        RecipeId::new(row.id),
        UserId::from_uuid(row.user_id),
        fields,
        tags,
        ingredients,
    ))
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<RecipeSummary>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(*owner.as_uuid()))
            .select(RecipeRow::as_select())
            .order_by(recipes::id.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(RecipeRow::into_summary)
            .collect::<QueryResult<_>>()
            .map_err(map_diesel_error)
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                match find_owned_row(conn, owner, id).await? {
                    Some(row) => assemble(conn, row).await.map(Some),
                    None => Ok(None),
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let row: RecipeRow = diesel::insert_into(recipes::table)
                    .values(NewRecipeRow::new(owner, &draft.fields))
                    .returning(RecipeRow::as_returning())
                    .get_result(conn)
                    .await?;
                let tags = tag_store::get_or_create(conn, owner, &draft.tags).await?;
                tag_store::replace_links(conn, row.id, &tags).await?;
                let ingredients =
                    ingredient_store::get_or_create(conn, owner, &draft.ingredients).await?;
                ingredient_store::replace_links(conn, row.id, &ingredients).await?;
                assemble(conn, row).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let Some(mut row) = find_owned_row(conn, owner, id).await? else {
                    return Ok(None);
                };
                if changes.touches_fields() {
                    row = diesel::update(recipes::table.filter(recipes::id.eq(row.id)))
                        .set(RecipeChangeset::from(changes))
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await?;
                }
                if let Some(selection) = changes.tags.selection() {
                    let tags = tag_store::get_or_create(conn, owner, selection).await?;
                    tag_store::replace_links(conn, row.id, &tags).await?;
                }
                if let Some(selection) = changes.ingredients.selection() {
                    let ingredients =
                        ingredient_store::get_or_create(conn, owner, selection).await?;
                    ingredient_store::replace_links(conn, row.id, &ingredients).await?;
                }
                assemble(conn, row).await.map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            recipes::table
                .filter(recipes::id.eq(id.get()))
                .filter(recipes::user_id.eq(*owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
