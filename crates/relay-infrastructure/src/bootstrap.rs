//! Composition root
//!
//! Wires configuration, stores, adapters and use cases into an [`AppContext`]
//! shared by the HTTP server and the CLI.

use std::sync::Arc;

use relay_application::{
    AdapterContext, AdapterRegistry, AdapterSettings, AdminService, HealthTracker,
    OrchestrationEngine, ProviderRegistry, RotationController, UsageRecorder,
};
use relay_domain::error::Result;
use relay_domain::ports::{CredentialStore, PolicyStore, ProviderRepository};
use relay_domain::value_objects::{CategoryPolicy, CircuitBreakerPolicy, OrchestrationRequest, Payload};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::credentials::InMemoryCredentialStore;
use crate::policy::InMemoryPolicyStore;
use crate::repository::InMemoryProviderRepository;
use crate::seed::seed_providers;

/// Everything a surface (HTTP or CLI) needs to serve requests
#[derive(Clone)]
pub struct AppContext {
    /// Effective configuration
    pub config: Arc<AppConfig>,
    /// Provider storage
    pub repository: Arc<dyn ProviderRepository>,
    /// Secrets store
    pub credentials: Arc<dyn CredentialStore>,
    /// Category policy store
    pub policy: Arc<dyn PolicyStore>,
    /// Request orchestration
    pub engine: Arc<OrchestrationEngine>,
    /// Administrative operations
    pub admin: Arc<AdminService>,
}

impl AppContext {
    /// Request for `capability` carrying the configured defaults
    pub fn request(&self, capability: impl Into<String>, payload: Payload) -> OrchestrationRequest {
        self.config.orchestration.request(capability, payload)
    }

    /// Capabilities with a registered adapter
    pub fn capabilities(&self) -> Vec<String> {
        self.engine.adapters().capabilities()
    }
}

/// Build the application from configuration with every linked adapter
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let credentials: Arc<dyn CredentialStore> =
        Arc::new(InMemoryCredentialStore::from_config(&config.credentials));
    let context = AdapterContext::new(Arc::clone(&credentials))
        .with_settings(AdapterSettings::from(&config.http));
    let adapters = AdapterRegistry::from_entries(&context)?;
    init_app_with(config, credentials, adapters).await
}

/// Build the application with an explicit adapter registry
///
/// `credentials` must be the store the adapters in `adapters` read from.
pub async fn init_app_with(
    config: AppConfig,
    credentials: Arc<dyn CredentialStore>,
    adapters: AdapterRegistry,
) -> Result<AppContext> {
    let repository: Arc<dyn ProviderRepository> = Arc::new(InMemoryProviderRepository::new());
    let policy: Arc<dyn PolicyStore> = Arc::new(InMemoryPolicyStore::new(CategoryPolicy::default()));
    let breaker = CircuitBreakerPolicy::from(&config.circuit_breaker);

    seed_providers(repository.as_ref(), &config.providers).await?;

    let registry = ProviderRegistry::new(Arc::clone(&repository));
    let recorder = UsageRecorder::new(Arc::clone(&repository), breaker);
    let health = HealthTracker::new(Arc::clone(&credentials), breaker);
    let rotation = Arc::new(RotationController::new(registry.clone()));

    let adapters = Arc::new(adapters);
    for capability in adapters.capabilities() {
        if repository.list(&capability).await?.is_empty() {
            warn!(%capability, "Adapter registered without providers");
        }
    }
    info!(capabilities = ?adapters.capabilities(), "Capability adapters ready");

    let engine = OrchestrationEngine::new(
        registry.clone(),
        recorder.clone(),
        adapters,
        Arc::clone(&policy),
    )
    .with_settings(config.orchestration.settings());

    let admin = AdminService::new(
        registry,
        health,
        recorder,
        rotation,
        Arc::clone(&credentials),
        Arc::clone(&policy),
    );

    if config.admin.enabled && config.admin.key.is_none() {
        warn!("Admin API enabled without a key; admin requests will be rejected");
    }

    Ok(AppContext {
        config: Arc::new(config),
        repository,
        credentials,
        policy,
        engine: Arc::new(engine),
        admin: Arc::new(admin),
    })
}
