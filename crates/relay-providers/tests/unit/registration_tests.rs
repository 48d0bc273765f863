//! Link-time adapter registration

use relay_application::ports::registry::{AdapterContext, AdapterRegistry, list_capability_adapters};
use relay_domain::constants::{
    CAPABILITY_AVATAR_GENERATION, CAPABILITY_IMAGES, CAPABILITY_NEWS, CAPABILITY_PETS,
    CAPABILITY_WEATHER,
};
use relay_domain::ports::CapabilityAdapter;

use crate::support::TestCredentials;

// Force the adapters crate to be linked
use relay_providers as _;

#[test]
fn every_capability_registers_one_adapter() {
    let capabilities: Vec<_> = list_capability_adapters().into_iter().map(|(c, _)| c).collect();

    for expected in [
        CAPABILITY_AVATAR_GENERATION,
        CAPABILITY_IMAGES,
        CAPABILITY_NEWS,
        CAPABILITY_PETS,
        CAPABILITY_WEATHER,
    ] {
        assert_eq!(
            capabilities.iter().filter(|c| **c == expected).count(),
            1,
            "{expected}"
        );
    }
}

#[test]
fn registry_builds_from_registered_entries() {
    let context = AdapterContext::new(TestCredentials::with(&[]));
    let registry = AdapterRegistry::from_entries(&context).unwrap();

    assert_eq!(
        registry.get(CAPABILITY_WEATHER).map(|a| a.capability().to_string()),
        Some(CAPABILITY_WEATHER.to_string())
    );
    assert!(registry.get("teleportation").is_none());
}
