//! # Controller
//!
//! Reconciliation of `Monitor`, `MonitorGroup` and `Heartbeat` resources
//! against Better Stack.
//!
//! - [`reconciler`] - the shared state machine and its cluster/remote seams
//! - [`request`] - spec to request payload mapping, one builder per kind
//! - [`credentials`] - API token resolution from Secrets
//! - [`conditions`] - condition types, reasons and the `set_condition` helper
//! - [`secret_index`] - Secret to dependent-resource fan-out
//! - [`backoff`] - Fibonacci backoff for hard reconcile errors
//! - [`server`] - metrics and probe endpoints

pub mod backoff;
pub mod conditions;
pub mod credentials;
mod error;
pub mod reconciler;
pub mod request;
pub mod secret_index;
pub mod server;

pub use error::Error;
