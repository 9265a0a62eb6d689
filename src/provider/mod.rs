//! # Providers
//!
//! Clients for the remote services the operator projects resources into.
//!
//! - [`betterstack`] - Better Stack Uptime REST API (monitors, monitor groups,
//!   heartbeats, heartbeat groups)

pub mod betterstack;
