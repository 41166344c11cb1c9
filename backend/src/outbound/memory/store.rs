//! Shared state behind the in-memory repositories.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{
    Label, LabelId, LabelKind, LabelName, LabelSelection, RecipeFields, UserAccount, UserId,
    plan_resolution,
};

/// Process-local data store shared by the memory adapters.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, State> {
        // Writes never panic part-way, so poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Default)]
pub(super) struct State {
    pub(super) users: Vec<UserAccount>,
    pub(super) recipes: BTreeMap<i64, StoredRecipe>,
    pub(super) last_recipe_id: i64,
    pub(super) tags: LabelTable,
    pub(super) ingredients: LabelTable,
}

impl State {
    pub(super) fn labels(&self, kind: LabelKind) -> &LabelTable {
        match kind {
            LabelKind::Tag => &self.tags,
            LabelKind::Ingredient => &self.ingredients,
        }
    }

    pub(super) fn labels_mut(&mut self, kind: LabelKind) -> &mut LabelTable {
        match kind {
            LabelKind::Tag => &mut self.tags,
            LabelKind::Ingredient => &mut self.ingredients,
        }
    }

    pub(super) fn next_recipe_id(&mut self) -> i64 {
        self.last_recipe_id += 1;
        self.last_recipe_id
    }
}

pub(super) struct StoredRecipe {
    pub(super) owner: UserId,
    pub(super) fields: RecipeFields,
    pub(super) tags: BTreeSet<LabelId>,
    pub(super) ingredients: BTreeSet<LabelId>,
}

impl StoredRecipe {
    pub(super) fn label_ids_mut(&mut self, kind: LabelKind) -> &mut BTreeSet<LabelId> {
        match kind {
            LabelKind::Tag => &mut self.tags,
            LabelKind::Ingredient => &mut self.ingredients,
        }
    }
}

/// Rows of one label kind.
#[derive(Default)]
pub(super) struct LabelTable {
    pub(super) rows: BTreeMap<LabelId, Label>,
    last_id: i64,
}

impl LabelTable {
    pub(super) fn owned_by<'a>(&'a self, owner: &'a UserId) -> impl Iterator<Item = &'a Label> {
        self.rows.values().filter(move |label| label.owner() == owner)
    }

    pub(super) fn find_by_name<'a>(
        &'a self,
        owner: &'a UserId,
        name: &LabelName,
    ) -> Option<&'a Label> {
        self.owned_by(owner).find(|label| label.name() == name)
    }

    /// Resolve `selection` to rows owned by `owner`, inserting missing names.
    pub(super) fn get_or_create(
        &mut self,
        owner: &UserId,
        selection: &LabelSelection,
    ) -> Vec<Label> {
        let existing: Vec<Label> = self.owned_by(owner).cloned().collect();
        let plan = plan_resolution(&existing, selection);
        let created: Vec<Label> = plan
            .create()
            .iter()
            .map(|name| self.insert(owner, name.clone()))
            .collect();
        plan.resolve(created)
    }

    fn insert(&mut self, owner: &UserId, name: LabelName) -> Label {
        self.last_id += 1;
        let label = Label::new(LabelId::new(self.last_id), owner.clone(), name);
        self.rows.insert(label.id(), label.clone());
        label
    }

    pub(super) fn resolve_ids(&self, ids: &BTreeSet<LabelId>) -> Vec<Label> {
        ids.iter()
            .filter_map(|id| self.rows.get(id))
            .cloned()
            .collect()
    }
}
