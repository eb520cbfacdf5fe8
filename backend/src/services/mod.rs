pub mod csv_export_service;
pub mod deal_service;
pub mod report_service;
