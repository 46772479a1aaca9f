//! Common types used across the application.

pub mod units;

pub use units::{PING_PER_SQM, percent_to_ratio, sqm_to_ping};
