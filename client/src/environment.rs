//! Dependency container handed to the reducers.

use std::sync::Arc;

use eventbook_core::environment::Clock;

use crate::api::ApiClient;
use crate::storage::SessionStorage;

/// Everything the application reducers need from the outside world:
/// the backend API, durable session storage, and a clock. Generic so
/// tests swap in deterministic implementations.
pub struct ClientEnvironment<A, S, C>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    pub api: Arc<A>,
    pub storage: Arc<S>,
    pub clock: C,
}

impl<A, S, C> ClientEnvironment<A, S, C>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    pub fn new(api: A, storage: S, clock: C) -> Self {
        Self {
            api: Arc::new(api),
            storage: Arc::new(storage),
            clock,
        }
    }
}

// Manual impl: `api` and `storage` are shared handles, the clock must
// itself be cloneable.
impl<A, S, C> Clone for ClientEnvironment<A, S, C>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            storage: Arc::clone(&self.storage),
            clock: self.clock.clone(),
        }
    }
}
