//! Domain Port Interfaces
//!
//! Contracts the orchestration core depends on. Outer layers implement them:
//! `relay-providers` supplies capability adapters, `relay-infrastructure`
//! supplies the repository and stores.

/// Capability adapter contract
pub mod adapter;
/// Provider repository contract
pub mod repository;
/// Credential and policy stores
pub mod stores;

pub use adapter::CapabilityAdapter;
pub use repository::{ProviderMutation, ProviderRepository, ProviderUpdate};
pub use stores::{CredentialStore, PolicyStore};
