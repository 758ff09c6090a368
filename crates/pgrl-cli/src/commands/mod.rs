//! CLI command modules

pub mod config;
pub mod discount;
pub mod preprocess;
pub mod seed;
