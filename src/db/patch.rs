//! Partial-update envelope and the closed set of columns it may touch.

use async_trait::async_trait;
use itemdesk_schema::ItemChanges;
use sqlx::SqlitePool;

use crate::db::models::DbItem;
use crate::error::ItemdeskError;

/// Abstraction for applying a patch payload/envelope to the database.
#[async_trait]
pub trait DbPatchable {
    /// Applies the patch as one statement and returns the resulting row.
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<DbItem, ItemdeskError>;
}

/// Columns a partial update is allowed to set, besides `updated_at`.
///
/// Statement text is only ever built from these names; payload keys never reach SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    Title,
    Description,
    Status,
}

impl ItemColumn {
    /// Fixed order in which present fields are written.
    pub const UPDATABLE: [ItemColumn; 3] =
        [ItemColumn::Title, ItemColumn::Description, ItemColumn::Status];

    pub fn as_sql(self) -> &'static str {
        match self {
            ItemColumn::Title => "title",
            ItemColumn::Description => "description",
            ItemColumn::Status => "status",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemPatch {
    pub id: i64,
    pub changes: ItemChanges,
}

impl ItemPatch {
    pub fn new(id: i64, changes: ItemChanges) -> Self {
        Self { id, changes }
    }

    /// Columns this patch will set, in statement order.
    pub fn columns(&self) -> Vec<ItemColumn> {
        ItemColumn::UPDATABLE
            .into_iter()
            .filter(|column| match column {
                ItemColumn::Title => self.changes.title.is_some(),
                ItemColumn::Description => self.changes.description.is_some(),
                ItemColumn::Status => self.changes.status.is_some(),
            })
            .collect()
    }
}
