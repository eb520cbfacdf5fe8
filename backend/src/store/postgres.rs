use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::DealStore;
use crate::db::deal_queries;
use crate::errors::AppError;
use crate::models::{Deal, ReportCriteria, ReportResult, UpdateDeal};
use crate::services::report_service;

#[derive(Clone)]
pub struct PgDealStore {
    pool: PgPool,
}

impl PgDealStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DealStore for PgDealStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, deal: Deal) -> Result<Deal, AppError> {
        Ok(deal_queries::insert(&self.pool, deal).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateDeal) -> Result<Option<Deal>, AppError> {
        Ok(deal_queries::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        Ok(deal_queries::delete(&self.pool, id).await?)
    }

    async fn fetch_one(&self, id: Uuid) -> Result<Option<Deal>, AppError> {
        Ok(deal_queries::fetch_one(&self.pool, id).await?)
    }

    async fn fetch_recent(&self, limit: i64) -> Result<Vec<Deal>, AppError> {
        Ok(deal_queries::fetch_recent(&self.pool, limit).await?)
    }

    async fn fetch_filtered(&self, criteria: &ReportCriteria) -> Result<Vec<Deal>, AppError> {
        Ok(deal_queries::fetch_filtered(&self.pool, criteria).await?)
    }

    // Aggregates in SQL instead of loading every matching row.
    async fn summarize(&self, criteria: &ReportCriteria) -> Result<ReportResult, AppError> {
        let row = deal_queries::fetch_summary(&self.pool, criteria).await?;
        Ok(report_service::from_aggregates(
            row.total_profit,
            row.total_deals,
            row.products_sold(),
        ))
    }
}
