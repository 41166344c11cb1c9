//! Tag and ingredient API handlers.
//!
//! ```text
//! GET /api/v1/tags
//! PATCH /api/v1/tags/{id} {"name":"Dinner"}
//! DELETE /api/v1/ingredients/{id}
//! ```
//!
//! Both collections share one implementation parameterised by [`LabelKind`];
//! the thin per-kind handlers exist so each route is documented on its own.

use actix_web::{HttpResponse, delete, get, patch, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LabelId, LabelKind, LabelName, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::LabelResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::Caller;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName, collected};

const NAME: FieldName = FieldName::new("name");

/// Body of label rename requests.
///
/// Example JSON: `{"name":"Dinner"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LabelRequest {
    #[schema(example = "Dinner")]
    pub name: Option<String>,
}

impl LabelRequest {
    fn into_name(self) -> Result<LabelName, Error> {
        let mut errors = FieldErrors::new();
        let name = errors
            .required(NAME, self.name)
            .and_then(|raw| errors.check(NAME.as_str(), LabelName::new(raw)));
        errors.finish()?;
        collected(name, NAME)
    }
}

async fn list_labels(
    kind: LabelKind,
    state: &HttpState,
    owner: &UserId,
) -> ApiResult<web::Json<Vec<LabelResponse>>> {
    let labels = state.labels.list(kind, owner).await?;
    Ok(web::Json(labels.iter().map(LabelResponse::from).collect()))
}

async fn rename_label(
    kind: LabelKind,
    state: &HttpState,
    owner: &UserId,
    id: i64,
    payload: LabelRequest,
) -> ApiResult<web::Json<LabelResponse>> {
    let name = payload.into_name()?;
    let label = state
        .labels
        .rename(kind, owner, LabelId::new(id), name)
        .await?;
    Ok(web::Json(LabelResponse::from(&label)))
}

async fn delete_label(
    kind: LabelKind,
    state: &HttpState,
    owner: &UserId,
    id: i64,
) -> ApiResult<HttpResponse> {
    state.labels.delete(kind, owner, LabelId::new(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the caller's tags, ordered by descending name.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Tags", body = [LabelResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<LabelResponse>>> {
    list_labels(LabelKind::Tag, &state, caller.id()).await
}

/// Rename one of the caller's tags.
#[utoipa::path(
    patch,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag identifier")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Renamed tag", body = LabelResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "renameTag"
)]
#[patch("/tags/{id}")]
pub async fn rename_tag(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    rename_label(
        LabelKind::Tag,
        &state,
        caller.id(),
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Replace one of the caller's tags; equivalent to a rename.
#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag identifier")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Renamed tag", body = LabelResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "replaceTag"
)]
#[put("/tags/{id}")]
pub async fn replace_tag(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    rename_label(
        LabelKind::Tag,
        &state,
        caller.id(),
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Delete one of the caller's tags and detach it from their recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "deleteTag"
)]
#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    delete_label(LabelKind::Tag, &state, caller.id(), path.into_inner()).await
}

/// List the caller's ingredients, ordered by descending name.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    responses(
        (status = 200, description = "Ingredients", body = [LabelResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<LabelResponse>>> {
    list_labels(LabelKind::Ingredient, &state, caller.id()).await
}

/// Rename one of the caller's ingredients.
#[utoipa::path(
    patch,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient identifier")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Renamed ingredient", body = LabelResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "renameIngredient"
)]
#[patch("/ingredients/{id}")]
pub async fn rename_ingredient(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    rename_label(
        LabelKind::Ingredient,
        &state,
        caller.id(),
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Replace one of the caller's ingredients; equivalent to a rename.
#[utoipa::path(
    put,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient identifier")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Renamed ingredient", body = LabelResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "replaceIngredient"
)]
#[put("/ingredients/{id}")]
pub async fn replace_ingredient(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    rename_label(
        LabelKind::Ingredient,
        &state,
        caller.id(),
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Delete one of the caller's ingredients and detach it from their recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "deleteIngredient"
)]
#[delete("/ingredients/{id}")]
pub async fn delete_ingredient(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    delete_label(LabelKind::Ingredient, &state, caller.id(), path.into_inner()).await
}
