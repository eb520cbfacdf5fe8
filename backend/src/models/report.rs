use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::deal::{Deal, Manager, UnknownManager};

/// Date range (inclusive) and manager set for a report run.
/// An absent bound or an empty manager set means no restriction on that axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub managers: Vec<Manager>,
}

impl ReportCriteria {
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(start) = self.start_date {
            if deal.deal_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if deal.deal_date > end {
                return false;
            }
        }
        self.managers.is_empty() || self.managers.contains(&deal.manager)
    }
}

// Number of deals on which each product was sold (any positive amount).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsSold {
    pub vsc_sold: i64,
    pub gap_sold: i64,
    pub tw_sold: i64,
    pub tricare_sold: i64,
    pub key_sold: i64,
}

impl ProductsSold {
    pub fn total(&self) -> i64 {
        self.vsc_sold + self.gap_sold + self.tw_sold + self.tricare_sold + self.key_sold
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub total_profit: f64,
    pub total_deals: i64,
    /// PVR
    pub avg_profit_per_car: f64,
    pub products_sold: ProductsSold,
    /// PPD
    pub avg_products_sold: f64,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub criteria: ReportCriteria,
    #[serde(flatten)]
    pub result: ReportResult,
}

/// Query string of the report endpoints. `managers` is a comma separated list of names.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub end_date: Option<NaiveDate>,
    pub managers: Option<String>,
}

// Date inputs left empty are submitted as `start_date=`; treat them as no bound.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl ReportQuery {
    pub fn into_criteria(self) -> Result<ReportCriteria, UnknownManager> {
        let mut managers = Vec::new();
        for name in self
            .managers
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let manager: Manager = name.parse()?;
            if !managers.contains(&manager) {
                managers.push(manager);
            }
        }

        Ok(ReportCriteria {
            start_date: self.start_date,
            end_date: self.end_date,
            managers,
        })
    }
}
