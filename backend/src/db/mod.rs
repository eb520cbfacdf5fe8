pub mod deal_queries;
