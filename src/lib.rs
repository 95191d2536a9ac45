pub mod config;
pub mod dedup;
pub mod eligibility;
pub mod http_cache;
pub mod http_client;
pub mod market_report;
pub mod pipeline;
pub mod print;
pub mod report_export;
pub mod scoring;
pub mod shortlist;
pub mod stats;
pub mod stats_store;
pub mod understat_fetch;
