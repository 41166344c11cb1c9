//! Tag and ingredient domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LabelCatalogue, LabelRepository, LabelRepositoryError};
use crate::domain::{Error, Label, LabelId, LabelKind, LabelName, UserId};

/// Label service implementing [`LabelCatalogue`] over one repository per kind.
#[derive(Clone)]
pub struct LabelService<T, I> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T, I> LabelService<T, I> {
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }
}

impl<T, I> LabelService<T, I>
where
    T: LabelRepository,
    I: LabelRepository,
{
    fn repository(&self, kind: LabelKind) -> &dyn LabelRepository {
        match kind {
            LabelKind::Tag => self.tags.as_ref(),
            LabelKind::Ingredient => self.ingredients.as_ref(),
        }
    }
}

fn map_repository_error(kind: LabelKind, error: LabelRepositoryError) -> Error {
    Error::new(error.error_code(), format!("{kind} {error}"))
}

fn label_not_found(kind: LabelKind, id: LabelId) -> Error {
    Error::not_found(format!("{kind} {id} not found"))
}

#[async_trait]
impl<T, I> LabelCatalogue for LabelService<T, I>
where
    T: LabelRepository,
    I: LabelRepository,
{
    async fn list(&self, kind: LabelKind, owner: &UserId) -> Result<Vec<Label>, Error> {
        self.repository(kind)
            .list_for_owner(owner)
            .await
            .map_err(|error| map_repository_error(kind, error))
    }

    async fn rename(
        &self,
        kind: LabelKind,
        owner: &UserId,
        id: LabelId,
        name: LabelName,
    ) -> Result<Label, Error> {
        self.repository(kind)
            .rename(owner, id, &name)
            .await
            .map_err(|error| map_repository_error(kind, error))?
            .ok_or_else(|| label_not_found(kind, id))
    }

    async fn delete(&self, kind: LabelKind, owner: &UserId, id: LabelId) -> Result<(), Error> {
        let removed = self
            .repository(kind)
            .delete(owner, id)
            .await
            .map_err(|error| map_repository_error(kind, error))?;
        if !removed {
            return Err(label_not_found(kind, id));
        }
        info!(%kind, label_id = %id, owner = %owner, "label deleted");
        Ok(())
    }
}
