//! Category policy store

use std::sync::Arc;

use arc_swap::ArcSwap;
use relay_domain::ports::PolicyStore;
use relay_domain::value_objects::CategoryPolicy;

/// Lock-free policy snapshot, swapped whole on every change
#[derive(Debug, Default)]
pub struct InMemoryPolicyStore {
    current: ArcSwap<CategoryPolicy>,
}

impl InMemoryPolicyStore {
    /// Store starting from `policy`
    pub fn new(policy: CategoryPolicy) -> Self {
        Self {
            current: ArcSwap::from_pointee(policy),
        }
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn get(&self) -> CategoryPolicy {
        self.current.load().as_ref().clone()
    }

    fn set(&self, policy: CategoryPolicy) {
        self.current.store(Arc::new(policy));
    }

    fn update(&self, change: &dyn Fn(&mut CategoryPolicy)) -> CategoryPolicy {
        let mut updated = None;
        self.current.rcu(|current| {
            let mut next = CategoryPolicy::clone(current);
            change(&mut next);
            updated = Some(next.clone());
            next
        });
        updated.unwrap_or_else(|| self.get())
    }
}
