use tracing::info;

use crate::errors::AppError;
use crate::models::{Deal, ProductsSold, ReportCriteria, ReportResult};
use crate::store::DealStore;

/// Deals matching the date bounds and manager set, in input order.
pub fn filter_deals(deals: &[Deal], criteria: &ReportCriteria) -> Vec<Deal> {
    deals
        .iter()
        .filter(|deal| criteria.matches(deal))
        .cloned()
        .collect()
}

/// Average over a deal count; zero deals yields 0 rather than a division fault.
pub fn per_deal(total: f64, total_deals: i64) -> f64 {
    if total_deals > 0 {
        total / total_deals as f64
    } else {
        0.0
    }
}

/// Returns (total profit, deal count, PVR).
pub fn profit_summary(deals: &[Deal]) -> (f64, i64, f64) {
    let total_profit = deals.iter().map(Deal::total_profit).fold(0.0, |acc, p| acc + p);
    let total_deals = deals.len() as i64;
    (total_profit, total_deals, per_deal(total_profit, total_deals))
}

/// Returns per-product sold counts and PPD.
///
/// PPD divides the set-wide product count by the deal count, so a deal with
/// three products sold contributes three to the numerator.
pub fn products_summary(deals: &[Deal]) -> (ProductsSold, f64) {
    let sold = |amount: fn(&Deal) -> f64| deals.iter().filter(|d| amount(d) > 0.0).count() as i64;

    let products_sold = ProductsSold {
        vsc_sold: sold(|d| d.vsc),
        gap_sold: sold(|d| d.gap),
        tw_sold: sold(|d| d.tw),
        tricare_sold: sold(|d| d.tricare),
        key_sold: sold(|d| d.key),
    };
    let avg_products_sold = per_deal(products_sold.total() as f64, deals.len() as i64);
    (products_sold, avg_products_sold)
}

pub fn summarize(deals: &[Deal]) -> ReportResult {
    let (total_profit, total_deals, avg_profit_per_car) = profit_summary(deals);
    let (products_sold, avg_products_sold) = products_summary(deals);
    ReportResult {
        total_profit,
        total_deals,
        avg_profit_per_car,
        products_sold,
        avg_products_sold,
    }
}

/// Builds a result from totals that were aggregated elsewhere (e.g. in SQL).
pub fn from_aggregates(total_profit: f64, total_deals: i64, products_sold: ProductsSold) -> ReportResult {
    ReportResult {
        total_profit,
        total_deals,
        avg_profit_per_car: per_deal(total_profit, total_deals),
        products_sold,
        avg_products_sold: per_deal(products_sold.total() as f64, total_deals),
    }
}

pub async fn build_report(store: &dyn DealStore, criteria: &ReportCriteria) -> Result<ReportResult, AppError> {
    let result = store.summarize(criteria).await?;
    info!(
        "Report: {} deals, total profit {:.2}, PVR {:.2}, PPD {:.2}",
        result.total_deals, result.total_profit, result.avg_profit_per_car, result.avg_products_sold
    );
    Ok(result)
}
