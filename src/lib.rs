pub mod api;
pub mod error;
pub mod ledger_fetcher;
pub mod models;
pub mod node_count;
pub mod parsers;
pub mod report;
pub mod utils;

pub use error::{Result, TelemetryError};
