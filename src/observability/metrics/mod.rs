//! # Metrics Module
//!
//! Prometheus metrics for monitoring the operator, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and text exposition
//! - `controller_metrics` - Reconciliations, errors, durations and requeues per kind
//! - `remote_metrics` - Better Stack API requests by method and outcome

pub mod controller_metrics;
pub mod registry;
pub mod remote_metrics;

pub use controller_metrics::*;
pub use registry::*;
pub use remote_metrics::*;
