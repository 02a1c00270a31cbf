//! Typed client for the items HTTP API.

use crate::error::{ApiErrorBody, ItemdeskError};
use itemdesk_schema::{CreateItemRequest, DeleteItemResponse, Item, UpdateItemRequest};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub struct ItemsClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ItemsClient {
    pub fn new(base_url: Url) -> Result<Self, ItemdeskError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    fn items_url(&self) -> Result<Url, ItemdeskError> {
        Ok(self.base_url.join("items")?)
    }

    fn item_url(&self, id: i64) -> Result<Url, ItemdeskError> {
        Ok(self.base_url.join(&format!("items/{id}"))?)
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ItemdeskError> {
        let resp = self.http.get(self.items_url()?).send().await?;
        decode(resp).await
    }

    pub async fn get_item(&self, id: i64) -> Result<Item, ItemdeskError> {
        let resp = self.http.get(self.item_url(id)?).send().await?;
        decode(resp).await
    }

    pub async fn create_item(&self, req: &CreateItemRequest) -> Result<Item, ItemdeskError> {
        let resp = self.http.post(self.items_url()?).json(req).send().await?;
        decode(resp).await
    }

    pub async fn update_item(
        &self,
        id: i64,
        req: &UpdateItemRequest,
    ) -> Result<Item, ItemdeskError> {
        let resp = self.http.put(self.item_url(id)?).json(req).send().await?;
        decode(resp).await
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), ItemdeskError> {
        let resp = self.http.delete(self.item_url(id)?).send().await?;
        let DeleteItemResponse { success } = decode(resp).await?;
        if success {
            Ok(())
        } else {
            Err(ItemdeskError::UnexpectedError(format!(
                "server reported unsuccessful delete for item {id}"
            )))
        }
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ItemdeskError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.inner.message)
        .unwrap_or_else(|_| format!("request failed with status {status}"));
    Err(ItemdeskError::UpstreamStatus { status, message })
}
