//! # Application Services
//!
//! Services that run providers and record their outcomes.
//!
//! - [`ProviderDispatcher`]: concurrent fan-out over the registered providers
//! - [`ExecutionWrapper`]: timing and outcome classification per call
//! - [`ResultSink`]: atomic batch persistence of call results

pub mod dispatcher;
pub mod execution;
pub mod result_sink;

pub use dispatcher::{DispatchConfig, ProviderDispatcher};
pub use execution::{ExecutionWrapper, classify};
pub use result_sink::ResultSink;
