use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Deal, ReportCriteria, ReportResult, UpdateDeal};
use crate::services::report_service;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryDealStore;
pub use postgres::PgDealStore;

/// Record store for deals.
#[async_trait]
pub trait DealStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn insert(&self, deal: Deal) -> Result<Deal, AppError>;

    /// Returns `None` when no deal has the given id.
    async fn update(&self, id: Uuid, input: UpdateDeal) -> Result<Option<Deal>, AppError>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: Uuid) -> Result<u64, AppError>;

    async fn fetch_one(&self, id: Uuid) -> Result<Option<Deal>, AppError>;

    /// Latest `limit` deals, newest `deal_date` first.
    async fn fetch_recent(&self, limit: i64) -> Result<Vec<Deal>, AppError>;

    async fn fetch_filtered(&self, criteria: &ReportCriteria) -> Result<Vec<Deal>, AppError>;

    async fn summarize(&self, criteria: &ReportCriteria) -> Result<ReportResult, AppError> {
        let deals = self.fetch_filtered(criteria).await?;
        Ok(report_service::summarize(&deals))
    }
}
