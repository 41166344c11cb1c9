//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler plus the health probes, the
//! request and response DTOs, the error schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::labels::LabelRequest;
use crate::inbound::http::recipes_dto::{
    LabelInput, LabelResponse, RecipeDetailResponse, RecipeRequest, RecipeSummaryResponse,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FieldErrorSchema, ValidationDetailsSchema,
};
use crate::inbound::http::users::{CredentialsRequest, UserResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the recipe API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe API",
        description = "Per-user recipes with tags and ingredients behind session authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::partial_update_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::labels::list_tags,
        crate::inbound::http::labels::rename_tag,
        crate::inbound::http::labels::replace_tag,
        crate::inbound::http::labels::delete_tag,
        crate::inbound::http::labels::list_ingredients,
        crate::inbound::http::labels::rename_ingredient,
        crate::inbound::http::labels::replace_ingredient,
        crate::inbound::http::labels::delete_ingredient,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CredentialsRequest,
        UserResponse,
        RecipeRequest,
        LabelInput,
        RecipeSummaryResponse,
        RecipeDetailResponse,
        LabelRequest,
        LabelResponse,
        ErrorSchema,
        ErrorCodeSchema,
        ValidationDetailsSchema,
        FieldErrorSchema
    )),
    tags(
        (name = "users", description = "Registration, login and the current account"),
        (name = "recipes", description = "Recipes owned by the signed-in user"),
        (name = "tags", description = "The signed-in user's tags"),
        (name = "ingredients", description = "The signed-in user's ingredients"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn recipe_request_documents_every_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let request = schemas.get("RecipeRequest").expect("RecipeRequest schema");
        for field in [
            "title",
            "time_minutes",
            "price",
            "description",
            "link",
            "tags",
            "ingredients",
        ] {
            assert_object_schema_has_field(request, field);
        }
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/login")]
    #[case("/api/v1/logout")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/recipes")]
    #[case("/api/v1/recipes/{id}")]
    #[case("/api/v1/tags")]
    #[case("/api/v1/tags/{id}")]
    #[case("/api/v1/ingredients")]
    #[case("/api/v1/ingredients/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
