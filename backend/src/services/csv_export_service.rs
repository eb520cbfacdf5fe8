use csv::WriterBuilder;
use tracing::info;

use crate::errors::AppError;
use crate::models::{Deal, ReportCriteria, DEAL_FIELDS};
use crate::store::DealStore;

pub const EXPORT_CONTENT_TYPE: &str = "text/csv";
pub const EXPORT_FILENAME: &str = "deals_report.csv";

/// Serializes deals as CSV: a header of the stored field names, then one row
/// per deal in the given order. The computed total is not exported.
pub fn write_deals_csv(deals: &[Deal]) -> Result<Vec<u8>, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(DEAL_FIELDS)?;
    for deal in deals {
        writer.serialize(deal)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(format!("Failed to flush CSV export: {}", e)))
}

pub async fn export_report(store: &dyn DealStore, criteria: &ReportCriteria) -> Result<Vec<u8>, AppError> {
    let deals = store.fetch_filtered(criteria).await?;
    info!("Exporting {} deals to {}", deals.len(), EXPORT_FILENAME);
    write_deals_csv(&deals)
}
