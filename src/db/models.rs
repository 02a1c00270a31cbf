use chrono::{DateTime, Utc};
use itemdesk_schema::{Item, ItemStatus};
use sqlx::FromRow;

use crate::error::ItemdeskError;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Stored as its wire name; guarded by a CHECK constraint.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbItem> for Item {
    type Error = ItemdeskError;

    fn try_from(row: DbItem) -> Result<Self, Self::Error> {
        let status = ItemStatus::from_name(&row.status).ok_or_else(|| {
            ItemdeskError::UnexpectedError(format!(
                "item {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;
        Ok(Item {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
