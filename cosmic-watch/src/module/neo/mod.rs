///! Near-earth object feed pipeline
///!
///! ## Main Components
///! - `NeoManager`: fetch lifecycle and the current snapshot
///! - `normalize_feed`: date-keyed raw feed to a flat record sequence
///! - `classify`: risk tier of a record
///! - `NeoTableView`: search and sort state of the table
///! - `write_report` / `export_to_dir`: CSV export

// ============ Raw Feed ============
mod types;
pub use types::*;

mod parser;
pub use parser::normalize_feed;

mod api_client;
pub use api_client::{FeedSource, NasaFeedClient};

// ============ Pipeline ============
mod risk;
pub use risk::{MEDIUM_RISK_DISTANCE_KM, classify, risk_tier_for};

mod sort;
pub use sort::{
    SortDirection, SortKey, SortState, collate_names, compare, filter_records, matches_query,
    sort_records, sorted,
};

mod view;
pub use view::NeoTableView;

mod export;
pub use export::{
    REPORT_HEADERS, REPORT_MIME_TYPE, export_to_dir, render_report, report_file_name, write_report,
};

mod stats;
pub use stats::FeedStats;

// ============ Core Manager ============
mod manager;
pub use manager::{FeedSnapshot, FeedState, FetchStatus, NeoManager};

#[cfg(test)]
mod fixtures;
