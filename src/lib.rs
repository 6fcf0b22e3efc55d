pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod intake;
pub mod logging;
pub mod models;
pub mod report;
pub mod store;

pub use error::{CrmError, Result};
pub use store::RecordStore;
