//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use serde_json::json;

use crate::domain::{LabelKind, LabelService, RecipeService, UserAccountService};
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    MemoryLabelRepository, MemoryRecipeRepository, MemoryStore, MemoryUserRepository,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state wired to a fresh in-memory store.
///
/// Password hashing uses the cheapest Argon2 parameters to keep tests fast.
pub fn memory_http_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let hasher = Argon2PasswordHasher::with_cost(1024, 1).expect("valid argon2 parameters");
    let recipes = Arc::new(RecipeService::new(Arc::new(MemoryRecipeRepository::new(
        store.clone(),
    ))));
    let labels = Arc::new(LabelService::new(
        Arc::new(MemoryLabelRepository::new(store.clone(), LabelKind::Tag)),
        Arc::new(MemoryLabelRepository::new(
            store.clone(),
            LabelKind::Ingredient,
        )),
    ));
    let accounts = Arc::new(UserAccountService::new(
        Arc::new(MemoryUserRepository::new(store)),
        Arc::new(hasher),
    ));
    HttpState {
        recipes: recipes.clone(),
        recipe_queries: recipes,
        labels,
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
    }
}

/// Extractor configuration shared by handler tests.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}

/// Register `email` and log in, returning the session cookie.
pub async fn register_and_login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let credentials = json!({ "email": email, "password": "testpass123" });
    let register = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(&credentials)
        .to_request();
    let response = test::call_service(app, register).await;
    assert!(response.status().is_success(), "registration succeeds");

    let login = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&credentials)
        .to_request();
    let response = test::call_service(app, login).await;
    assert!(response.status().is_success(), "login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
