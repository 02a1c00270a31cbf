use crate::error::ItemdeskError;
use crate::server::router::ItemdeskState;
use crate::service::parse_item_id;
use crate::utils::logging::debug_payload;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use itemdesk_schema::{CreateItemRequest, DeleteItemResponse, Item, UpdateItemRequest};

pub fn router() -> Router<ItemdeskState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// GET /items
async fn list_items(State(state): State<ItemdeskState>) -> Result<Json<Vec<Item>>, ItemdeskError> {
    Ok(Json(state.items.list().await?))
}

/// POST /items
async fn create_item(
    State(state): State<ItemdeskState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ItemdeskError> {
    let Json(req) = payload?;
    debug_payload("POST /items", None, &req);
    let item = state.items.create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items/{id}
async fn get_item(
    State(state): State<ItemdeskState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ItemdeskError> {
    let id = parse_item_id(&id)?;
    Ok(Json(state.items.get(id).await?))
}

/// PUT /items/{id}
///
/// Partial update: absent fields keep their stored values.
async fn update_item(
    State(state): State<ItemdeskState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<Item>, ItemdeskError> {
    let id = parse_item_id(&id)?;
    let Json(req) = payload?;
    debug_payload("PUT /items/{id}", Some(id), &req);
    Ok(Json(state.items.update(id, req).await?))
}

/// DELETE /items/{id}
async fn delete_item(
    State(state): State<ItemdeskState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteItemResponse>, ItemdeskError> {
    let id = parse_item_id(&id)?;
    state.items.delete(id).await?;
    Ok(Json(DeleteItemResponse { success: true }))
}
