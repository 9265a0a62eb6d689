//! # Runtime
//!
//! Process wiring: initialization, the per-kind watch loop and the error
//! requeue policy.

pub mod error_policy;
pub mod initialization;
pub mod watch_loop;

pub use error_policy::*;
pub use initialization::*;
pub use watch_loop::*;
