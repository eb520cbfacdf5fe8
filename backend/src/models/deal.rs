use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

pub const STOCK_NUMBER_MAX_LEN: usize = 8;
pub const NAME_MAX_LEN: usize = 20;

/// Stored columns of a deal, in declaration order. This is also the CSV header.
pub const DEAL_FIELDS: [&str; 13] = [
    "id",
    "deal_date",
    "stock_number",
    "last_name",
    "first_name",
    "financed",
    "reserve",
    "vsc",
    "gap",
    "tw",
    "tricare",
    "key",
    "manager",
];

// F&I manager credited with a deal. Stored as its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Manager {
    #[default]
    Victor,
    Kevin,
    Paul,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown manager: {0}")]
pub struct UnknownManager(pub String);

impl Manager {
    pub const ALL: [Manager; 3] = [Manager::Victor, Manager::Kevin, Manager::Paul];

    pub fn as_str(&self) -> &'static str {
        match self {
            Manager::Victor => "Victor",
            Manager::Kevin => "Kevin",
            Manager::Paul => "Paul",
        }
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Manager {
    type Err = UnknownManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Manager::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownManager(s.to_string()))
    }
}

impl TryFrom<String> for Manager {
    type Error = UnknownManager;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// One sold unit and the F&I profit booked on it.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Deal {
    pub id: Uuid,
    pub deal_date: NaiveDate,
    pub stock_number: String,
    pub last_name: String,
    pub first_name: String,
    pub financed: bool,
    pub reserve: f64,
    pub vsc: f64,
    pub gap: f64,
    pub tw: f64,
    pub tricare: f64,
    pub key: f64,
    #[sqlx(try_from = "String")]
    pub manager: Manager,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeal {
    #[serde(default)]
    pub deal_date: Option<NaiveDate>,
    pub stock_number: String,
    pub last_name: String,
    pub first_name: String,
    #[serde(default = "default_financed")]
    pub financed: bool,
    #[serde(default)]
    pub reserve: f64,
    #[serde(default)]
    pub vsc: f64,
    #[serde(default)]
    pub gap: f64,
    #[serde(default)]
    pub tw: f64,
    #[serde(default)]
    pub tricare: f64,
    #[serde(default)]
    pub key: f64,
    #[serde(default)]
    pub manager: Manager,
}

/// Full-record update. `deal_date` is fixed at creation and cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeal {
    pub stock_number: String,
    pub last_name: String,
    pub first_name: String,
    #[serde(default = "default_financed")]
    pub financed: bool,
    #[serde(default)]
    pub reserve: f64,
    #[serde(default)]
    pub vsc: f64,
    #[serde(default)]
    pub gap: f64,
    #[serde(default)]
    pub tw: f64,
    #[serde(default)]
    pub tricare: f64,
    #[serde(default)]
    pub key: f64,
    #[serde(default)]
    pub manager: Manager,
}

fn default_financed() -> bool {
    true
}

impl Deal {
    pub fn new(input: CreateDeal) -> Self {
        Self {
            id: Uuid::new_v4(),
            deal_date: input
                .deal_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            stock_number: input.stock_number,
            last_name: input.last_name,
            first_name: input.first_name,
            financed: input.financed,
            reserve: input.reserve,
            vsc: input.vsc,
            gap: input.gap,
            tw: input.tw,
            tricare: input.tricare,
            key: input.key,
            manager: input.manager,
        }
    }

    /// Gross F&I profit on the deal. Derived, never stored.
    pub fn total_profit(&self) -> f64 {
        self.reserve + self.vsc + self.gap + self.tw + self.tricare + self.key
    }

    pub fn apply(&mut self, input: UpdateDeal) {
        self.stock_number = input.stock_number;
        self.last_name = input.last_name;
        self.first_name = input.first_name;
        self.financed = input.financed;
        self.reserve = input.reserve;
        self.vsc = input.vsc;
        self.gap = input.gap;
        self.tw = input.tw;
        self.tricare = input.tricare;
        self.key = input.key;
        self.manager = input.manager;
    }
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stock_number)
    }
}

/// API shape of a deal: stored fields plus the computed total.
#[derive(Debug, Clone, Serialize)]
pub struct DealView {
    #[serde(flatten)]
    pub deal: Deal,
    pub total_profit: f64,
}

impl From<Deal> for DealView {
    fn from(deal: Deal) -> Self {
        let total_profit = deal.total_profit();
        Self { deal, total_profit }
    }
}
