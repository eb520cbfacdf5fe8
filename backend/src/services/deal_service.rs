use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateDeal, Deal, UpdateDeal, NAME_MAX_LEN, STOCK_NUMBER_MAX_LEN};
use crate::store::DealStore;

/// Number of deals shown on the landing list.
pub const RECENT_DEALS_LIMIT: i64 = 5;

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

fn validate_deal(stock_number: &str, last_name: &str, first_name: &str) -> Result<(), AppError> {
    validate_text("Stock number", stock_number, STOCK_NUMBER_MAX_LEN)?;
    validate_text("Last name", last_name, NAME_MAX_LEN)?;
    validate_text("First name", first_name, NAME_MAX_LEN)
}

pub async fn create(store: &dyn DealStore, input: CreateDeal) -> Result<Deal, AppError> {
    validate_deal(&input.stock_number, &input.last_name, &input.first_name)?;
    store.insert(Deal::new(input)).await
}

pub async fn update(store: &dyn DealStore, id: Uuid, input: UpdateDeal) -> Result<Deal, AppError> {
    validate_deal(&input.stock_number, &input.last_name, &input.first_name)?;
    store
        .update(id, input)
        .await?
        .ok_or(AppError::NotFound("Deal not found".to_string()))
}

pub async fn fetch_recent(store: &dyn DealStore) -> Result<Vec<Deal>, AppError> {
    store.fetch_recent(RECENT_DEALS_LIMIT).await
}

pub async fn fetch_one(store: &dyn DealStore, id: Uuid) -> Result<Deal, AppError> {
    store
        .fetch_one(id)
        .await?
        .ok_or(AppError::NotFound("Deal not found".to_string()))
}

pub async fn delete(store: &dyn DealStore, id: Uuid) -> Result<u64, AppError> {
    match store.delete(id).await? {
        0 => Err(AppError::NotFound("Deal not found".to_string())),
        n => Ok(n),
    }
}
