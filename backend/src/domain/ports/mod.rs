//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod label_catalogue;
mod label_repository;
mod password_hasher;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod user_repository;

pub use accounts::{LoginService, UserProfileQuery, UserRegistration};
pub use label_catalogue::LabelCatalogue;
#[cfg(test)]
pub use label_repository::MockLabelRepository;
pub use label_repository::{LabelRepository, LabelRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use recipe_command::RecipeCommand;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
