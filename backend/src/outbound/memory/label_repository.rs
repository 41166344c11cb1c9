//! In-memory [`LabelRepository`] for one label kind.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LabelRepository, LabelRepositoryError};
use crate::domain::{Label, LabelId, LabelKind, LabelName, UserId};

use super::MemoryStore;

#[derive(Clone)]
pub struct MemoryLabelRepository {
    store: Arc<MemoryStore>,
    kind: LabelKind,
}

impl MemoryLabelRepository {
    pub fn new(store: Arc<MemoryStore>, kind: LabelKind) -> Self {
        Self { store, kind }
    }
}

#[async_trait]
impl LabelRepository for MemoryLabelRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Label>, LabelRepositoryError> {
        let state = self.store.lock();
        let mut labels: Vec<Label> = state.labels(self.kind).owned_by(owner).cloned().collect();
        labels.sort_by(|left, right| right.name().cmp(left.name()));
        Ok(labels)
    }

    async fn rename(
        &self,
        owner: &UserId,
        id: LabelId,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let mut state = self.store.lock();
        let table = state.labels_mut(self.kind);
        let Some(current) = table.rows.get(&id).filter(|label| label.owner() == owner) else {
            return Ok(None);
        };
        if table
            .find_by_name(owner, name)
            .is_some_and(|clash| clash.id() != id)
        {
            return Err(LabelRepositoryError::duplicate_name(name.as_ref()));
        }
        let renamed = current.renamed(name.clone());
        table.rows.insert(id, renamed.clone());
        Ok(Some(renamed))
    }

    async fn delete(&self, owner: &UserId, id: LabelId) -> Result<bool, LabelRepositoryError> {
        let mut state = self.store.lock();
        let table = state.labels_mut(self.kind);
        if !table
            .rows
            .get(&id)
            .is_some_and(|label| label.owner() == owner)
        {
            return Ok(false);
        }
        table.rows.remove(&id);
        let kind = self.kind;
        for recipe in state.recipes.values_mut() {
            recipe.label_ids_mut(kind).remove(&id);
        }
        Ok(true)
    }
}
