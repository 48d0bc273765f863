//! # Relay
//!
//! Adaptive multi-provider request orchestration. A caller asks for a
//! capability (`images`, `news`, `weather`, `pets`, `avatar-generation`);
//! Relay picks the least-loaded healthy provider, fails over on error,
//! counts usage per window and disables providers that keep failing.
//!
//! ## Example
//!
//! ```ignore
//! use relay::infrastructure::{ConfigLoader, init_app};
//!
//! let app = init_app(ConfigLoader::new().load()?).await?;
//! let result = app.engine.orchestrate(app.request("pets", Default::default())).await;
//! println!("{}", result.provider_used.unwrap_or_default());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Entities, value objects, port traits and errors
//! - `application` - Selection, circuit breaker, orchestration and admin use cases
//! - `infrastructure` - Configuration, logging, in-memory stores, composition root
//! - `providers` - Vendor adapters per capability
//! - `server` - Rocket HTTP API
//! - `cli` - Command line front end

/// Domain layer - core types and port traits
pub mod domain {
    pub use relay_domain::*;
}

/// Application layer - use cases and domain services
pub mod application {
    pub use relay_application::*;
}

/// Infrastructure layer - configuration, stores and bootstrap
pub mod infrastructure {
    pub use relay_infrastructure::*;
}

/// Vendor adapters
pub mod providers {
    pub use relay_providers::*;
}

/// HTTP API
pub mod server {
    pub use relay_server::*;
}

pub mod cli;

pub use cli::{Cli, Command, run};
pub use relay_domain::error::{Error, Result};
