use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateDeal, DealView, UpdateDeal};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_recent_deals).post(create_deal))
        .route("/:id", get(get_deal).put(update_deal).delete(delete_deal))
}

pub async fn fetch_recent_deals(
    State(state): State<AppState>,
) -> Result<Json<Vec<DealView>>, AppError> {
    info!("GET /deals - Fetching most recent deals");
    let deals = services::deal_service::fetch_recent(state.store.as_ref())
        .await
        .map_err(|e| {
            error!("Failed to fetch recent deals: {}", e);
            e
        })?;
    Ok(Json(deals.into_iter().map(DealView::from).collect()))
}

pub async fn create_deal(
    State(state): State<AppState>,
    Json(data): Json<CreateDeal>,
) -> Result<Json<DealView>, AppError> {
    info!("POST /deals - Creating deal for stock {}", data.stock_number);
    let deal = services::deal_service::create(state.store.as_ref(), data)
        .await
        .map_err(|e| {
            error!("Failed to create deal: {}", e);
            e
        })?;
    Ok(Json(deal.into()))
}

pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DealView>, AppError> {
    info!("GET /deals/{} - Fetching deal", id);
    let deal = services::deal_service::fetch_one(state.store.as_ref(), id)
        .await
        .map_err(|e| {
            error!("Failed to fetch deal {}: {}", id, e);
            e
        })?;
    Ok(Json(deal.into()))
}

pub async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateDeal>,
) -> Result<Json<DealView>, AppError> {
    info!("PUT /deals/{} - Updating deal", id);
    let deal = services::deal_service::update(state.store.as_ref(), id, data)
        .await
        .map_err(|e| {
            error!("Failed to update deal {}: {}", id, e);
            e
        })?;
    Ok(Json(deal.into()))
}

pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    info!("DELETE /deals/{} - Deleting deal", id);
    match services::deal_service::delete(state.store.as_ref(), id).await {
        Ok(_) => Ok(Json(())),
        Err(e) => {
            error!("Failed to delete deal {}: {}", id, e);
            Err(e)
        }
    }
}
