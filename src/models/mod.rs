mod client_record;

pub use client_record::{today, ClientRecord, ClientType, DriverOption, COLUMNS, MAX_CREDIT_SCORE};
