//! # Application Layer
//!
//! Orchestration of provider calls and result persistence.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, ConfigurationError};
