//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven ports backed by PostgreSQL through
//! `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   types; reconciliation decisions come from the domain planner.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) never leave this
//!   module.
//! - Every database error is mapped to the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use recipe_api::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::connect(&PoolConfig::new("postgres://localhost/recipes")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

mod diesel_helpers;
mod diesel_label_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod label_store_macros;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_label_repository::{DieselIngredientRepository, DieselTagRepository};
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};
