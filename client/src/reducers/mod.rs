//! Application reducers.
//!
//! One reducer per feature, composed by [`AppReducer`], which owns the
//! whole state tree and dispatches each action to its feature reducer.

mod admin;
mod booking;
mod catalog;
mod routing;
mod selection;
mod session;

use std::marker::PhantomData;

use eventbook_core::environment::Clock;
use eventbook_core::reducer::Reducer;
use eventbook_core::{effect::Effect, effect::Effects, smallvec};

use crate::actions::AppAction;
use crate::api::ApiClient;
use crate::environment::ClientEnvironment;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// The application's root reducer.
///
/// Generic over the environment's trait implementations so tests run
/// it against mocks and production runs it against HTTP and real
/// storage.
#[derive(Debug)]
pub struct AppReducer<A, S, C> {
    _phantom: PhantomData<(A, S, C)>,
}

impl<A, S, C> AppReducer<A, S, C> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<A, S, C> Default for AppReducer<A, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, S, C> Clone for AppReducer<A, S, C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A, S, C> Reducer for AppReducer<A, S, C>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    type State = AppState;
    type Action = AppAction;
    type Environment = ClientEnvironment<A, S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AppAction::Session(action) => session::reduce(state, action, env),
            AppAction::Routing(action) => routing::reduce(state, action),
            AppAction::Selection(action) => selection::reduce(state, action),
            AppAction::Catalog(action) => catalog::reduce(state, action, env),
            AppAction::Booking(action) => booking::reduce(state, action, env),
            AppAction::Admin(action) => admin::reduce(state, action, env),
            AppAction::NoticeDismissed => {
                state.notice = None;
                smallvec![Effect::None]
            }
        }
    }
}
