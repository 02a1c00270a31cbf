//! ItemPatch -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::db::models::DbItem;
use crate::db::patch::{DbPatchable, ItemColumn, ItemPatch};
use crate::db::schema::ITEM_COLUMNS;
use crate::error::ItemdeskError;

impl ItemPatch {
    /// `UPDATE items SET <present columns>, updated_at = MAX(created_at, ?) WHERE id = ? RETURNING <row>`.
    pub(crate) fn update_statement(&self, updated_at: DateTime<Utc>) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("UPDATE items SET ");
        {
            let mut assignments = qb.separated(", ");
            for column in ItemColumn::UPDATABLE {
                let value = match column {
                    ItemColumn::Title => self.changes.title.clone(),
                    ItemColumn::Description => self.changes.description.clone(),
                    ItemColumn::Status => self.changes.status.map(|s| s.as_str().to_string()),
                };
                if let Some(value) = value {
                    assignments.push(column.as_sql());
                    assignments.push_unseparated(" = ");
                    assignments.push_bind_unseparated(value);
                }
            }
            // Never behind created_at, even if the wall clock stepped back.
            assignments.push("updated_at = MAX(created_at, ");
            assignments.push_bind_unseparated(updated_at);
            assignments.push_unseparated(")");
        }
        qb.push(" WHERE id = ");
        qb.push_bind(self.id);
        qb.push(" RETURNING ");
        qb.push(ITEM_COLUMNS);
        qb
    }
}

#[async_trait]
impl DbPatchable for ItemPatch {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<DbItem, ItemdeskError> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM items WHERE id = ?")
            .bind(self.id)
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Err(ItemdeskError::not_found(self.id));
        }

        let updated_at = Utc::now();
        let columns = self.columns();
        let row = self
            .update_statement(updated_at)
            .build_query_as::<DbItem>()
            .fetch_optional(pool)
            .await?;

        debug!(
            id = self.id,
            updated_at = %updated_at,
            columns = ?columns,
            applied = row.is_some(),
            "db patch applied"
        );

        // The row can disappear between the check and the write.
        row.ok_or_else(|| ItemdeskError::not_found(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemdesk_schema::{ItemChanges, ItemStatus};

    fn sql_for(changes: ItemChanges) -> String {
        ItemPatch::new(1, changes)
            .update_statement(Utc::now())
            .sql()
            .to_string()
    }

    #[test]
    fn empty_patch_only_touches_updated_at() {
        assert_eq!(
            sql_for(ItemChanges::default()),
            format!(
                "UPDATE items SET updated_at = MAX(created_at, ?) WHERE id = ? RETURNING {ITEM_COLUMNS}"
            )
        );
    }

    #[test]
    fn present_fields_are_set_in_fixed_order() {
        let changes = ItemChanges {
            title: Some("t".to_string()),
            description: None,
            status: Some(ItemStatus::Pending),
        };
        assert_eq!(
            sql_for(changes),
            format!(
                "UPDATE items SET title = ?, status = ?, updated_at = MAX(created_at, ?) WHERE id = ? RETURNING {ITEM_COLUMNS}"
            )
        );
    }

    #[test]
    fn values_never_reach_statement_text() {
        let hostile = "x'; DROP TABLE items; --".to_string();
        let sql = sql_for(ItemChanges {
            title: Some(hostile.clone()),
            description: Some(hostile.clone()),
            status: None,
        });
        assert!(!sql.contains(&hostile));
        assert!(sql.starts_with("UPDATE items SET title = ?, description = ?, updated_at = MAX(created_at, ?)"));
    }

    #[test]
    fn columns_follow_present_fields() {
        let patch = ItemPatch::new(
            3,
            ItemChanges {
                description: Some(String::new()),
                ..Default::default()
            },
        );
        assert_eq!(patch.columns(), vec![ItemColumn::Description]);
        assert!(ItemPatch::new(3, ItemChanges::default()).columns().is_empty());
    }
}
