//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users {"email":"cook@example.com","password":"testpass123"}
//! POST /api/v1/login {"email":"cook@example.com","password":"testpass123"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EmailAddress, Error, LoginCredentials, LoginValidationError, Password, Registration, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{Caller, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName, collected, field_error};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");

/// Credentials body shared by `POST /api/v1/users` and `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"cook@example.com","password":"testpass123"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "cook@example.com")]
    pub email: Option<String>,
    #[schema(example = "testpass123")]
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn into_registration(self) -> Result<Registration, Error> {
        let mut errors = FieldErrors::new();
        let email = errors
            .required(EMAIL, self.email)
            .and_then(|raw| errors.check(EMAIL.as_str(), EmailAddress::new(raw)));
        let password = errors
            .required(PASSWORD, self.password)
            .and_then(|raw| errors.check(PASSWORD.as_str(), Password::new(&raw)));
        errors.finish()?;
        Ok(Registration::new(
            collected(email, EMAIL)?,
            collected(password, PASSWORD)?,
        ))
    }

    fn into_credentials(self) -> Result<LoginCredentials, Error> {
        let mut errors = FieldErrors::new();
        let email = errors.required(EMAIL, self.email);
        let password = errors.required(PASSWORD, self.password);
        errors.finish()?;
        let (email, password) = (collected(email, EMAIL)?, collected(password, PASSWORD)?);

        LoginCredentials::try_from_parts(&email, &password).map_err(|error| {
            let field = match error {
                LoginValidationError::Email(_) => EMAIL,
                _ => PASSWORD,
            };
            field_error(field, error)
        })
    }
}

/// Public view of an account.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "cook@example.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Open a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let registration = payload.into_inner().into_registration()?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Authenticate user and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent
/// error schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = payload.into_inner().into_credentials()?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the authenticated user's account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.profile.fetch_profile(caller.id()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}
