//! Application Layer - Relay
//!
//! Selection, circuit breaking, failover and rotation over the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Computes availability and ordering of providers (`domain_services`)
//! - Runs the per-request failover loop and rotation (`use_cases`)
//! - Declares the linkme slice capability adapters register into (`ports::registry`)
//! - Has no dependencies on infrastructure or HTTP frameworks
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `relay-domain`: entities, value objects and port traits
//! - Pure Rust libraries for async, serialization and logging

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::{HealthTracker, ProviderRegistry, UsageRecorder};
pub use ports::registry::{AdapterContext, AdapterRegistry, AdapterSettings};
pub use use_cases::{
    AdminService, OrchestrationEngine, OrchestrationSettings, ProviderView, RotationController,
};
