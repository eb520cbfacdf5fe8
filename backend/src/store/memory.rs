use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::DealStore;
use crate::errors::AppError;
use crate::models::{Deal, ReportCriteria, UpdateDeal};
use crate::services::report_service;

/// Process-local deal store. Deals are kept in insertion order.
#[derive(Default)]
pub struct InMemoryDealStore {
    deals: RwLock<Vec<Deal>>,
}

impl InMemoryDealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deals(deals: Vec<Deal>) -> Self {
        Self {
            deals: RwLock::new(deals),
        }
    }

    pub fn len(&self) -> usize {
        self.deals.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.read().is_empty()
    }
}

#[async_trait]
impl DealStore for InMemoryDealStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, deal: Deal) -> Result<Deal, AppError> {
        self.deals.write().push(deal.clone());
        Ok(deal)
    }

    async fn update(&self, id: Uuid, input: UpdateDeal) -> Result<Option<Deal>, AppError> {
        let mut deals = self.deals.write();
        Ok(deals.iter_mut().find(|d| d.id == id).map(|deal| {
            deal.apply(input);
            deal.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let mut deals = self.deals.write();
        let before = deals.len();
        deals.retain(|d| d.id != id);
        Ok((before - deals.len()) as u64)
    }

    async fn fetch_one(&self, id: Uuid) -> Result<Option<Deal>, AppError> {
        Ok(self.deals.read().iter().find(|d| d.id == id).cloned())
    }

    async fn fetch_recent(&self, limit: i64) -> Result<Vec<Deal>, AppError> {
        let mut recent = self.deals.read().clone();
        recent.sort_by(|a, b| b.deal_date.cmp(&a.deal_date));
        recent.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(recent)
    }

    async fn fetch_filtered(&self, criteria: &ReportCriteria) -> Result<Vec<Deal>, AppError> {
        Ok(report_service::filter_deals(&self.deals.read(), criteria))
    }
}
