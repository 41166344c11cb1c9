//! Builders wiring driven adapters into the HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use recipe_api::domain::ports::{LabelRepository, PasswordHasher, RecipeRepository, UserRepository};
use recipe_api::domain::{LabelKind, LabelService, RecipeService, UserAccountService};
use recipe_api::inbound::http::state::HttpState;
use recipe_api::outbound::memory::{
    MemoryLabelRepository, MemoryRecipeRepository, MemoryStore, MemoryUserRepository,
};
use recipe_api::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselTagRepository,
    DieselUserRepository,
};
use recipe_api::outbound::security::Argon2PasswordHasher;
use tracing::info;

use super::Storage;

/// Driven adapters the domain services are built from.
struct Repositories<R, T, I, U> {
    recipes: R,
    tags: T,
    ingredients: I,
    users: U,
}

fn assemble<R, T, I, U, H>(repos: Repositories<R, T, I, U>, hasher: H) -> HttpState
where
    R: RecipeRepository + 'static,
    T: LabelRepository + 'static,
    I: LabelRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let recipes = Arc::new(RecipeService::new(Arc::new(repos.recipes)));
    let labels = Arc::new(LabelService::new(
        Arc::new(repos.tags),
        Arc::new(repos.ingredients),
    ));
    let accounts = Arc::new(UserAccountService::new(
        Arc::new(repos.users),
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

fn memory_state(hasher: Argon2PasswordHasher) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    assemble(
        Repositories {
            recipes: MemoryRecipeRepository::new(store.clone()),
            tags: MemoryLabelRepository::new(store.clone(), LabelKind::Tag),
            ingredients: MemoryLabelRepository::new(store.clone(), LabelKind::Ingredient),
            users: MemoryUserRepository::new(store),
        },
        hasher,
    )
}

fn diesel_state(pool: &DbPool, hasher: Argon2PasswordHasher) -> HttpState {
    assemble(
        Repositories {
            recipes: DieselRecipeRepository::new(pool.clone()),
            tags: DieselTagRepository::new(pool.clone()),
            ingredients: DieselIngredientRepository::new(pool.clone()),
            users: DieselUserRepository::new(pool.clone()),
        },
        hasher,
    )
}

/// Build handler state over `storage`.
///
/// Each call with [`Storage::Memory`] starts from an empty store.
pub(crate) fn build_http_state(storage: &Storage) -> web::Data<HttpState> {
    let hasher = Argon2PasswordHasher::new();
    let state = match storage {
        Storage::Postgres(pool) => diesel_state(pool, hasher),
        Storage::Memory => memory_state(hasher),
    };
    info!(store = storage.name(), "repositories ready");
    web::Data::new(state)
}
