//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! - [`ProviderName`]: closed set of provider identities
//! - [`LogId`]: identifier of a persisted call log record
//! - [`Timestamp`](timestamp::Timestamp): UTC point in time

pub mod ids;
pub mod provider_name;
pub mod timestamp;

pub use ids::LogId;
pub use provider_name::{ParseEnumError, ProviderName};
pub use timestamp::Timestamp;
