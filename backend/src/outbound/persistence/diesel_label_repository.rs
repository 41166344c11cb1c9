//! PostgreSQL-backed tag and ingredient repositories.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LabelRepository, LabelRepositoryError};
use crate::domain::{Label, LabelId, LabelKind, LabelName, UserId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::label_store_macros::diesel_label_store;
use super::models::{LabelRow, labels_from_rows};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

fn map_pool_error(error: PoolError) -> LabelRepositoryError {
    LabelRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    kind: LabelKind,
    error: diesel::result::Error,
    name: Option<&LabelName>,
) -> LabelRepositoryError {
    match classify_diesel_error(error, kind.noun()) {
        DieselFailure::Connection(message) => LabelRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint } => match name {
            Some(name) => LabelRepositoryError::duplicate_name(name.as_ref()),
            None => LabelRepositoryError::query(format!(
                "unexpected unique violation on {}",
                constraint.as_deref().unwrap_or("unknown constraint")
            )),
        },
        DieselFailure::Query(message) => LabelRepositoryError::query(message),
    }
}

diesel_label_store! {
    /// Diesel-backed tag repository.
    pub struct DieselTagRepository;
    kind: LabelKind::Tag,
    module: tag_store,
    table: tags,
    links: recipe_tags (tag_id),
}

diesel_label_store! {
    /// Diesel-backed ingredient repository.
    pub struct DieselIngredientRepository;
    kind: LabelKind::Ingredient,
    module: ingredient_store,
    table: ingredients,
    links: recipe_ingredients (ingredient_id),
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn unique_violation() -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        )
    }

    #[rstest]
    fn unique_violation_on_rename_is_duplicate_name() {
        let name = LabelName::new("Dinner").expect("valid name");
        assert_eq!(
            map_diesel_error(LabelKind::Tag, unique_violation(), Some(&name)),
            LabelRepositoryError::duplicate_name("Dinner")
        );
    }

    #[rstest]
    fn unique_violation_elsewhere_is_a_query_error() {
        let error = map_diesel_error(LabelKind::Ingredient, unique_violation(), None);
        assert!(matches!(error, LabelRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let error = map_pool_error(PoolError::Unavailable("timed out".into()));
        assert_eq!(error, LabelRepositoryError::connection("timed out"));
    }
}
