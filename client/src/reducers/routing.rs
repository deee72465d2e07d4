//! Routing reducer: resolves the access guard on every navigation.

use eventbook_core::{effect::Effect, effect::Effects, smallvec};
use tracing::debug;

use crate::actions::{AppAction, RoutingAction};
use crate::routing::{LOGIN_PATH, RouteDecision, decide_route};
use crate::state::AppState;

pub(crate) fn reduce(state: &mut AppState, action: RoutingAction) -> Effects<AppAction> {
    match action {
        RoutingAction::NavigationRequested { path, requirement } => {
            state.routing.current_path = path;
            state.routing.requirement = requirement;
            resolve(state);
            smallvec![Effect::None]
        }
        RoutingAction::NavigationConsumed => {
            state.pending_navigation = None;
            smallvec![Effect::None]
        }
    }
}

/// Re-run the guard for the current path. Also called by the session
/// reducer whenever the session phase changes, so a restore or logout
/// immediately re-gates the route the user is sitting on.
pub(crate) fn resolve(state: &mut AppState) {
    let decision = decide_route(
        state.routing.requirement,
        &state.session.phase,
        &state.routing.current_path,
    );
    debug!(path = %state.routing.current_path, ?decision, "route resolved");
    match &decision {
        RouteDecision::RedirectToLogin { from } => {
            state.routing.return_to = Some(from.clone());
            state.pending_navigation = Some(LOGIN_PATH.to_string());
        }
        RouteDecision::Redirect { to } => {
            state.pending_navigation = Some(to.clone());
        }
        RouteDecision::Loading | RouteDecision::Render | RouteDecision::AccessDenied => {}
    }
    state.routing.decision = decision;
}
