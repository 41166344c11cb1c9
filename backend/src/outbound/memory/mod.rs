//! In-process adapters for the driven ports.
//!
//! All repositories share one [`MemoryStore`] guarded by a single mutex, so
//! every operation, including a recipe write with both label reconciliations,
//! is applied atomically. Used when no database is configured and by tests.

mod label_repository;
mod recipe_repository;
mod store;
mod user_repository;

pub use label_repository::MemoryLabelRepository;
pub use recipe_repository::MemoryRecipeRepository;
pub use store::MemoryStore;
pub use user_repository::MemoryUserRepository;
