//! PGRL Core - error type, shared types, logging and env loading
//!
//! This crate provides the foundational pieces used across all PGRL crates.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod util;

pub use error::{PgrlError, Result};
pub use logging::{get_logger, init_tracing, Logger, LoggingConfig};
pub use types::*;
