//! # Infrastructure Layer
//!
//! Adapters for external systems.
//!
//! - [`providers`]: HTTP transport and third-party API integrations
//! - [`persistence`]: call log storage

pub mod persistence;
pub mod providers;
