//! Route access guard tests: gating, capture, and role redirects
//! driven through the full reducer.

#![allow(clippy::unwrap_used)] // Test code

mod support;

use eventbook_client::actions::{AppAction, RoutingAction, SessionAction};
use eventbook_client::reducers::AppReducer;
use eventbook_client::routing::{ATTENDEE_HOME, HOST_HOME, LOGIN_PATH, RouteDecision, RouteRequirement};
use eventbook_client::state::AppState;
use eventbook_testing::ReducerTest;

use support::{attendee, authed_state, host, session_for, test_env};

type TestReducer = AppReducer<
    eventbook_client::mocks::MockApiClient,
    eventbook_client::mocks::MemoryStorage,
    eventbook_testing::FixedClock,
>;

fn navigate(path: &str, requirement: RouteRequirement) -> AppAction {
    AppAction::Routing(RoutingAction::NavigationRequested {
        path: path.to_string(),
        requirement,
    })
}

#[test]
fn protected_route_waits_while_session_restores() {
    // Session phase is Loading until Restored arrives; the guard must
    // not bounce the user to login in that window.
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(AppState::default())
        .when_action(navigate("/my-bookings", RouteRequirement::RequiresAuth))
        .then_state(|state| {
            assert_eq!(state.routing.decision, RouteDecision::Loading);
            assert_eq!(state.pending_navigation, None);
            assert_eq!(state.routing.return_to, None);
        })
        .run();
}

#[test]
fn restore_completion_re_resolves_the_parked_route() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(AppState::default())
        .when_action(navigate("/my-bookings", RouteRequirement::RequiresAuth))
        .when_action(AppAction::Session(SessionAction::Restored(Some(
            session_for(attendee()),
        ))))
        .then_state(|state| {
            assert_eq!(state.routing.decision, RouteDecision::Render);
        })
        .run();
}

#[test]
fn anonymous_restore_bounces_the_parked_route_to_login() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(AppState::default())
        .when_action(navigate("/my-bookings", RouteRequirement::RequiresAuth))
        .when_action(AppAction::Session(SessionAction::Restored(None)))
        .then_state(|state| {
            assert_eq!(
                state.routing.decision,
                RouteDecision::RedirectToLogin {
                    from: "/my-bookings".to_string()
                }
            );
            assert_eq!(state.routing.return_to.as_deref(), Some("/my-bookings"));
            assert_eq!(state.pending_navigation.as_deref(), Some(LOGIN_PATH));
        })
        .run();
}

#[test]
fn attendee_is_denied_on_host_routes() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(attendee()))
        .when_action(navigate("/admin/dashboard", RouteRequirement::RequiresHost))
        .then_state(|state| {
            assert_eq!(state.routing.decision, RouteDecision::AccessDenied);
            // Denial renders in place, it does not navigate.
            assert_eq!(state.pending_navigation, None);
        })
        .run();
}

#[test]
fn host_renders_host_routes() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(host()))
        .when_action(navigate("/admin/dashboard", RouteRequirement::RequiresHost))
        .then_state(|state| {
            assert_eq!(state.routing.decision, RouteDecision::Render);
        })
        .run();
}

#[test]
fn signed_in_users_cannot_sit_on_the_auth_pages() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(attendee()))
        .when_action(navigate(LOGIN_PATH, RouteRequirement::PublicOnly))
        .then_state(|state| {
            assert_eq!(
                state.routing.decision,
                RouteDecision::Redirect {
                    to: ATTENDEE_HOME.to_string()
                }
            );
            assert_eq!(state.pending_navigation.as_deref(), Some(ATTENDEE_HOME));
        })
        .run();
}

#[test]
fn host_bounces_from_auth_pages_to_the_dashboard() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(host()))
        .when_action(navigate(LOGIN_PATH, RouteRequirement::PublicOnly))
        .then_state(|state| {
            assert_eq!(state.pending_navigation.as_deref(), Some(HOST_HOME));
        })
        .run();
}

#[test]
fn logout_re_gates_the_route_the_user_is_on() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(attendee()))
        .when_action(navigate("/my-bookings", RouteRequirement::RequiresAuth))
        .when_action(AppAction::Session(SessionAction::LogoutRequested))
        .then_state(|state| {
            assert!(matches!(
                state.routing.decision,
                RouteDecision::RedirectToLogin { .. }
            ));
            assert_eq!(state.pending_navigation.as_deref(), Some(LOGIN_PATH));
        })
        .run();
}

#[test]
fn navigation_consumed_clears_the_pending_target() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(attendee()))
        .when_action(navigate(LOGIN_PATH, RouteRequirement::PublicOnly))
        .when_action(AppAction::Routing(RoutingAction::NavigationConsumed))
        .then_state(|state| {
            assert_eq!(state.pending_navigation, None);
        })
        .run();
}

#[test]
fn public_routes_render_for_everyone() {
    for state in [AppState::default(), authed_state(attendee())] {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(navigate("/events/ev-1", RouteRequirement::Public))
            .then_state(|state| {
                assert_eq!(state.routing.decision, RouteDecision::Render);
            })
            .run();
    }
}
