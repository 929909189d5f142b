//! Domain aggregates exposed by the leads client.

pub mod filter;
pub mod lead;
pub mod query;
pub mod types;
pub mod user;
