use std::sync::Arc;

use action_utils::{
    ActionItem, Category, CreateItemRequest, ItemId, MessageResponse, TextError,
    UpdateItemRequest, validate_text,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::error::ApiError;
use crate::store::{ItemPatch, ItemStore, NewItem};

pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

pub async fn list_items<S: ItemStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ActionItem>>, ApiError> {
    let items = state.store.list().await.inspect_err(|e| {
        log::error!("Error listing items: {e}");
    })?;
    Ok(Json(items))
}

pub async fn create_item<S: ItemStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActionItem>), ApiError> {
    let Json(request) = payload?;
    let new_item = new_item_from(request)?;

    let item = state
        .store
        .insert(new_item)
        .await
        .map_err(|e| {
            log::error!("Error creating item: {e}");
            ApiError::from(e).as_bad_request()
        })?;
    log::info!("Created item {}", item.id);
    Ok((StatusCode::CREATED, Json(item)))
}

/// Responds with `null` when no item has this id.
pub async fn update_item<S: ItemStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<Option<ActionItem>>, ApiError> {
    let Json(request) = payload?;
    let patch = patch_from(request)?;
    let id = ItemId(id);

    let updated = state
        .store
        .update(&id, patch)
        .await
        .map_err(|e| {
            log::error!("Error updating item {id}: {e}");
            ApiError::from(e).as_bad_request()
        })?;
    if updated.is_none() {
        log::warn!("Update for unknown item {id}");
    }
    Ok(Json(updated))
}

/// Deleting an unknown id is acknowledged like any other delete.
pub async fn delete_item<S: ItemStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ItemId(id);
    let removed = state.store.delete(&id).await.inspect_err(|e| {
        log::error!("Error deleting item {id}: {e}");
    })?;
    if !removed {
        log::debug!("Delete for unknown item {id}");
    }
    Ok(Json(MessageResponse::new("Item deleted")))
}

fn new_item_from(request: CreateItemRequest) -> Result<NewItem, ApiError> {
    let text = request
        .text
        .as_deref()
        .ok_or(TextError::Missing)
        .and_then(validate_text)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(NewItem {
        text,
        category: Category::parse_lenient(request.category.as_deref()),
    })
}

// Unlike create, an explicit bad category on update is rejected.
fn patch_from(request: UpdateItemRequest) -> Result<ItemPatch, ApiError> {
    let text = request
        .text
        .as_deref()
        .map(validate_text)
        .transpose()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let category = request
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(ItemPatch {
        text,
        category,
        completed: request.completed,
    })
}
