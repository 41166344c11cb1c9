//! Shared HTTP harness for the recipe API integration suites.
//!
//! Each test gets a fresh in-memory store wired through the public adapters,
//! the production `/api/v1` route table and the trace middleware.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use recipe_api::Trace;
use recipe_api::domain::{LabelKind, LabelService, RecipeService, UserAccountService};
use recipe_api::inbound::http::api_services;
use recipe_api::inbound::http::state::HttpState;
use recipe_api::outbound::memory::{
    MemoryLabelRepository, MemoryRecipeRepository, MemoryStore, MemoryUserRepository,
};
use recipe_api::outbound::security::Argon2PasswordHasher;
use serde_json::{Value, json};

pub const PASSWORD: &str = "testpass123";

fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
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
    let hasher = Argon2PasswordHasher::with_cost(1024, 1).expect("valid argon2 parameters");
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

/// Application under test backed by a fresh in-memory store.
pub fn recipe_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(memory_state()))
        .wrap(Trace)
        .service(web::scope("/api/v1").wrap(session).configure(api_services))
}

/// Status and decoded JSON body (or `Null` for empty bodies).
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Send `body` as JSON to `uri`, attaching `cookie` when given.
pub async fn send<S, B>(
    app: &S,
    method: Method,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// Register `email` and return a logged-in session cookie.
pub async fn sign_in<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let credentials = json!({ "email": email, "password": PASSWORD });
    let registered = send(
        app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(credentials)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Create a recipe and return its JSON detail.
pub async fn create_recipe<S, B>(app: &S, cookie: &Cookie<'static>, payload: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(app, Method::POST, "/api/v1/recipes", Some(cookie), Some(payload)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body
}

/// Minimal valid recipe payload with `title`.
pub fn sample_recipe(title: &str) -> Value {
    json!({ "title": title, "time_minutes": 22, "price": "5.25" })
}

/// Names in a `[{id, name}]` array, in response order.
pub fn names(labels: &Value) -> Vec<String> {
    labels
        .as_array()
        .expect("label array")
        .iter()
        .filter_map(|label| label["name"].as_str().map(str::to_owned))
        .collect()
}
