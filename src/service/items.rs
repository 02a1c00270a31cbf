//! CRUD and partial-update contracts for the `items` resource.
//!
//! Payloads are validated here, before anything is sent to the DB actor, so a rejected
//! request never produces a write.

use itemdesk_schema::{CreateItemRequest, Item, UpdateItemRequest};
use tracing::{debug, info};

use crate::db::{DbActorHandle, ItemPatch};
use crate::error::ItemdeskError;

/// Path ids that are not integers cannot name a stored row.
pub fn parse_item_id(raw: &str) -> Result<i64, ItemdeskError> {
    raw.parse::<i64>()
        .map_err(|_| ItemdeskError::not_found(raw))
}

#[derive(Clone)]
pub struct ItemService {
    db: DbActorHandle,
}

impl ItemService {
    pub fn new(db: DbActorHandle) -> Self {
        Self { db }
    }

    /// Every item, newest first.
    pub async fn list(&self) -> Result<Vec<Item>, ItemdeskError> {
        self.db
            .list()
            .await?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<Item, ItemdeskError> {
        self.db.get_by_id(id).await?.try_into()
    }

    pub async fn create(&self, req: CreateItemRequest) -> Result<Item, ItemdeskError> {
        let new_item = req.into_new_item()?;
        let item: Item = self.db.create(new_item).await?.try_into()?;
        info!(id = item.id, status = %item.status, "item created");
        Ok(item)
    }

    /// Applies only the fields present in `req`; an empty payload just refreshes `updated_at`.
    pub async fn update(&self, id: i64, req: UpdateItemRequest) -> Result<Item, ItemdeskError> {
        let changes = req.into_changes()?;
        if changes.is_empty() {
            debug!(id, "empty update payload, touching updated_at only");
        }
        let item: Item = self
            .db
            .patch(ItemPatch::new(id, changes))
            .await?
            .try_into()?;
        info!(id = item.id, "item updated");
        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ItemdeskError> {
        self.db.delete(id).await?;
        info!(id, "item deleted");
        Ok(())
    }

    /// Database clock, as seen through a trivial query.
    pub async fn ping(&self) -> Result<String, ItemdeskError> {
        self.db.ping().await
    }
}
