//! Runtime models of the console client.

pub mod config;
