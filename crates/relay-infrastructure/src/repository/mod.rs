//! Provider repository implementations

pub mod memory;

pub use memory::InMemoryProviderRepository;
