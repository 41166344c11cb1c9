//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LabelCatalogue, LoginService, RecipeCommand, RecipeQuery, UserProfileQuery, UserRegistration,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use recipe_api::domain::{LabelService, RecipeService, UserAccountService};
/// use recipe_api::domain::LabelKind;
/// use recipe_api::inbound::http::state::HttpState;
/// use recipe_api::outbound::memory::{
///     MemoryLabelRepository, MemoryRecipeRepository, MemoryStore, MemoryUserRepository,
/// };
/// use recipe_api::outbound::security::Argon2PasswordHasher;
///
/// let store = Arc::new(MemoryStore::new());
/// let recipes = Arc::new(RecipeService::new(Arc::new(MemoryRecipeRepository::new(
///     store.clone(),
/// ))));
/// let labels = Arc::new(LabelService::new(
///     Arc::new(MemoryLabelRepository::new(store.clone(), LabelKind::Tag)),
///     Arc::new(MemoryLabelRepository::new(store.clone(), LabelKind::Ingredient)),
/// ));
/// let accounts = Arc::new(UserAccountService::new(
///     Arc::new(MemoryUserRepository::new(store)),
///     Arc::new(Argon2PasswordHasher::new()),
/// ));
/// let state = HttpState {
///     recipes: recipes.clone(),
///     recipe_queries: recipes,
///     labels,
///     login: accounts.clone(),
///     registration: accounts.clone(),
///     profile: accounts,
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipe_queries: Arc<dyn RecipeQuery>,
    pub labels: Arc<dyn LabelCatalogue>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
}
