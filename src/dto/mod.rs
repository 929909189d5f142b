//! DTO modules that bridge the remote API with the presentation layer.

pub mod api;
pub mod leads;
