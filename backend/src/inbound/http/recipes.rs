//! Recipe API handlers.
//!
//! ```text
//! GET    /api/v1/recipes
//! POST   /api/v1/recipes {"title":"Green curry","time_minutes":30,"price":"5.25"}
//! GET    /api/v1/recipes/{id}
//! PATCH  /api/v1/recipes/{id} {"tags":[{"name":"Thai"}]}
//! PUT    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Handlers take a [`Caller`] extractor, so anonymous requests are rejected
//! before the body is parsed and the domain only sees the caller's own recipes.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::{RecipeId, UpdateMode, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::{
    RecipeDetailResponse, RecipeRequest, RecipeSummaryResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::Caller;
use crate::inbound::http::state::HttpState;

/// List the caller's recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "Recipes", body = [RecipeSummaryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<RecipeSummaryResponse>>> {
    let summaries = state.recipe_queries.list(caller.id()).await?;
    Ok(web::Json(
        summaries.iter().map(RecipeSummaryResponse::from).collect(),
    ))
}

/// Create a recipe owned by the caller.
///
/// Tags and ingredients are matched by name against the caller's existing
/// labels; unknown names are created.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Created", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let recipe = state.recipes.create(caller.id(), draft).await?;
    Ok(HttpResponse::Created().json(RecipeDetailResponse::from(&recipe)))
}

/// Fetch one of the caller's recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let recipe = state
        .recipe_queries
        .get(caller.id(), RecipeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(RecipeDetailResponse::from(&recipe)))
}

async fn apply_update(
    state: &HttpState,
    owner: &UserId,
    id: i64,
    payload: RecipeRequest,
    mode: UpdateMode,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let changes = payload.into_changes(mode)?;
    let recipe = state
        .recipes
        .update(owner, RecipeId::new(id), changes)
        .await?;
    Ok(web::Json(RecipeDetailResponse::from(&recipe)))
}

/// Update only the fields present in the body.
///
/// A present `tags` or `ingredients` list replaces the association set; an
/// empty list clears it.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "partialUpdateRecipe"
)]
#[patch("/recipes/{id}")]
pub async fn partial_update_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    apply_update(
        &state,
        caller.id(),
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

/// Replace a recipe; `title`, `time_minutes` and `price` are required.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    apply_update(
        &state,
        caller.id(),
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Full,
    )
    .await
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .recipes
        .delete(caller.id(), RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
