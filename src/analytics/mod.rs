//! Render analytics: the JSONL render log and the `blockify stats` report.

pub mod logger;
pub mod reporter;
