//! Request extractors enforcing access rules.
//!
//! - [`log_key::LogIngestKey`] -- Requires the shared log ingestion secret.

pub mod log_key;
