mod deal;
mod report;

pub use deal::{
    CreateDeal, Deal, DealView, Manager, UnknownManager, UpdateDeal, DEAL_FIELDS, NAME_MAX_LEN,
    STOCK_NUMBER_MAX_LEN,
};
pub use report::{ProductsSold, ReportCriteria, ReportQuery, ReportResponse, ReportResult};
