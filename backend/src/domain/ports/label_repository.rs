//! Port for tag and ingredient persistence.
//!
//! One adapter instance serves one [`LabelKind`](crate::domain::LabelKind).
//! Creation happens only through recipe writes; this port covers browsing and
//! maintenance of existing labels.

use async_trait::async_trait;

use crate::domain::{Label, LabelId, LabelName, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by label repository adapters.
    pub enum LabelRepositoryError {
        /// The store could not be reached.
        Connection { message: String } as ServiceUnavailable
            => "repository unavailable: {message}",
        /// The store answered with an error.
        Query { message: String } as InternalError => "repository query failed: {message}",
        /// The owner already has a label with this name.
        DuplicateName { name: String } as Conflict => "name already in use: {name}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// Labels owned by `owner`, ordered by descending name.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Label>, LabelRepositoryError>;

    /// Rename an owned label. Returns `None` when it does not exist for `owner`.
    async fn rename(
        &self,
        owner: &UserId,
        id: LabelId,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError>;

    /// Delete an owned label and its recipe associations.
    async fn delete(&self, owner: &UserId, id: LabelId) -> Result<bool, LabelRepositoryError>;
}
