//! Driving port for browsing and maintaining tags and ingredients.

use async_trait::async_trait;

use crate::domain::{Error, Label, LabelId, LabelKind, LabelName, UserId};

/// Domain use-case port for per-user label collections.
#[async_trait]
pub trait LabelCatalogue: Send + Sync {
    /// The caller's labels of `kind`, ordered by descending name.
    async fn list(&self, kind: LabelKind, owner: &UserId) -> Result<Vec<Label>, Error>;

    /// Rename one of the caller's labels.
    async fn rename(
        &self,
        kind: LabelKind,
        owner: &UserId,
        id: LabelId,
        name: LabelName,
    ) -> Result<Label, Error>;

    /// Delete one of the caller's labels.
    async fn delete(&self, kind: LabelKind, owner: &UserId, id: LabelId) -> Result<(), Error>;
}
