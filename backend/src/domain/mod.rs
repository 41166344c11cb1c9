//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Adapters depend on this module; it depends on none of them.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserAccount, EmailAddress: account identity.
//! - Recipe, RecipeDraft, RecipeChanges: recipe aggregate and its commands.
//! - Label, LabelKind: tags and ingredients.
//! - plan_resolution: get-or-create planning for label names.

pub mod auth;
pub mod error;
pub mod label;
pub mod label_service;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod reconciliation;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{LoginCredentials, LoginValidationError, PASSWORD_MIN, Password, Registration};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::label::{LABEL_NAME_MAX, Label, LabelId, LabelKind, LabelName, LabelValidationError};
pub use self::label_service::LabelService;
pub use self::recipe::{
    LINK_MAX, PRICE_MAX_CENTS, Price, Recipe, RecipeChanges, RecipeDraft, RecipeFields, RecipeId,
    RecipeLink, RecipeSummary, RecipeTitle, RecipeValidationError, TITLE_MAX, TimeMinutes,
    UpdateMode,
};
pub use self::recipe_service::RecipeService;
pub use self::reconciliation::{LabelChange, LabelSelection, ResolutionPlan, plan_resolution};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId, TraceIdError};
pub use self::user::{
    EMAIL_MAX, EmailAddress, PasswordHash, User, UserAccount, UserId, UserValidationError,
};
pub use self::user_service::UserAccountService;

