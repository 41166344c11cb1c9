//! Resolution of requested tag and ingredient names into stored labels.
//!
//! A recipe write names its labels; each name must end up as exactly one row
//! per owner. [`plan_resolution`] decides which names reuse an existing row
//! and which must be created, and adapters execute the plan inside the same
//! transaction as the recipe write.

use std::collections::HashSet;

use super::label::{Label, LabelName};

/// Ordered, duplicate-free set of requested label names.
///
/// # Examples
/// ```
/// use recipe_api::domain::{LabelName, LabelSelection};
///
/// let names = ["Thai", "Dinner", "Thai"]
///     .into_iter()
///     .map(|raw| LabelName::new(raw).expect("valid name"));
/// let selection = LabelSelection::from_names(names);
/// let kept: Vec<&str> = selection.names().iter().map(AsRef::as_ref).collect();
/// assert_eq!(kept, ["Thai", "Dinner"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelection(Vec<LabelName>);

impl LabelSelection {
    /// Selection that clears the relation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collapse duplicates, keeping the first occurrence of each name.
    pub fn from_names(names: impl IntoIterator<Item = LabelName>) -> Self {
        let mut seen = HashSet::new();
        let unique = names
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Self(unique)
    }

    pub fn names(&self) -> &[LabelName] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Requested change to one label relation of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelChange {
    /// The field was absent; keep the current associations.
    #[default]
    Unchanged,
    /// Set the associations to exactly this selection (empty clears).
    Replace(LabelSelection),
}

impl LabelChange {
    /// Selection to apply, if the relation changes.
    pub fn selection(&self) -> Option<&LabelSelection> {
        match self {
            Self::Unchanged => None,
            Self::Replace(selection) => Some(selection),
        }
    }
}

/// Outcome of matching a selection against the owner's stored labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPlan {
    reuse: Vec<Label>,
    create: Vec<LabelName>,
}

impl ResolutionPlan {
    /// Stored labels that already carry a requested name.
    pub fn reuse(&self) -> &[Label] {
        &self.reuse
    }

    /// Names with no stored row yet, in request order.
    pub fn create(&self) -> &[LabelName] {
        &self.create
    }

    /// Combine reused rows with the rows created for [`Self::create`].
    ///
    /// The result is ordered by ascending id.
    pub fn resolve(self, created: impl IntoIterator<Item = Label>) -> Vec<Label> {
        let mut labels = self.reuse;
        labels.extend(created);
        labels.sort_by_key(Label::id);
        labels.dedup_by_key(|label| label.id());
        labels
    }
}

/// Split `selection` into names satisfied by `existing` rows and names that
/// need a new row.
///
/// `existing` may contain labels that were not requested; they are ignored.
pub fn plan_resolution(existing: &[Label], selection: &LabelSelection) -> ResolutionPlan {
    let mut plan = ResolutionPlan::default();
    for name in selection.names() {
        match existing.iter().find(|label| label.name() == name) {
            Some(label) => plan.reuse.push(label.clone()),
            None => plan.create.push(name.clone()),
        }
    }
    plan
}
