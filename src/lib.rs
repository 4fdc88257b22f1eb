//! Vehicle registration lookup over HTTP
//!
//! Fetches the public registry page for an RC number and returns the
//! labeled values found on it as a flat JSON record.

pub mod api;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod lookup;
pub mod models;
pub mod upstream;
