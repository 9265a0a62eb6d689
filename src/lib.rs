//! # Better Stack Operator
//!
//! A Kubernetes operator that keeps Better Stack Uptime in step with
//! `Monitor`, `MonitorGroup` and `Heartbeat` custom resources.
//!
//! ## Overview
//!
//! For every resource the operator:
//!
//! 1. **Guards deletion** with a finalizer so the remote entity is removed
//!    before the Kubernetes object goes away
//! 2. **Resolves credentials** from a Secret in the resource's namespace
//! 3. **Creates or updates** the remote entity through the Better Stack REST API
//! 4. **Reports status**: the remote id, observed generation and
//!    `CredentialsAvailable`/`Synced`/`Ready` conditions
//!
//! Secret changes re-reconcile every resource that references the Secret.
//! Metrics and health probes are served over HTTP.

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod provider;
pub mod runtime;

pub use crd::*;
