//! Catalog cache tests: read-through fetching, deduplication, error
//! cells, and stale-driven re-fetches through the store.

#![allow(clippy::unwrap_used)] // Test code

mod support;

use std::time::Duration;

use eventbook_client::actions::{AppAction, CatalogAction, SessionAction};
use eventbook_client::error::ApiError;
use eventbook_client::mocks::ApiCall;
use eventbook_client::reducers::AppReducer;
use eventbook_client::state::AppState;
use eventbook_client::types::EventId;
use eventbook_runtime::Store;
use eventbook_testing::{ReducerTest, assertions};

use support::{attendee, authed_state, host, sample_booking, sample_event, test_env};

type TestReducer = AppReducer<
    eventbook_client::mocks::MockApiClient,
    eventbook_client::mocks::MemoryStorage,
    eventbook_testing::FixedClock,
>;

#[tokio::test]
async fn first_request_fetches_and_caches() {
    let env = test_env();
    let api = env.api.clone();
    api.script_events(Ok(vec![sample_event("ev-1")]));

    let store = Store::new(AppState::default(), TestReducer::new(), env);
    store
        .send_and_wait_for(
            AppAction::Catalog(CatalogAction::EventsRequested),
            |a| matches!(a, AppAction::Catalog(CatalogAction::EventsLoaded(_))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    store.settle(Duration::from_secs(1)).await.unwrap();

    store
        .state(|s| {
            assert!(!s.catalog.events.is_stale());
            assert_eq!(s.catalog.events.value().map(Vec::len), Some(1));
        })
        .await;

    // A second request against a fresh cell fetches nothing.
    store
        .send(AppAction::Catalog(CatalogAction::EventsRequested))
        .await
        .unwrap();
    store.settle(Duration::from_secs(1)).await.unwrap();
    let fetches = api
        .calls()
        .iter()
        .filter(|c| **c == ApiCall::FetchEvents)
        .count();
    assert_eq!(fetches, 1);
}

#[test]
fn duplicate_request_while_loading_is_dropped() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(AppState::default())
        .when_action(AppAction::Catalog(CatalogAction::EventsRequested))
        .when_action(AppAction::Catalog(CatalogAction::EventsRequested))
        .then_state(|state| assert!(state.catalog.events.is_loading()))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn fetch_failure_lands_in_the_error_cell() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(AppState::default())
        .when_action(AppAction::Catalog(CatalogAction::EventsRequested))
        .when_action(AppAction::Catalog(CatalogAction::EventsFailed(
            "Could not reach the server. Please try again.".to_string(),
        )))
        .then_state(|state| {
            assert!(!state.catalog.events.is_loading());
            assert!(state.catalog.events.error().is_some());
            // A retry is possible: the cell reports needing a fetch.
            assert!(state.catalog.events.needs_fetch());
        })
        .run();
}

#[test]
fn switching_event_detail_discards_the_previous_record() {
    let mut state = AppState::default();
    state.catalog.event_detail.set(sample_event("ev-1"));
    state.catalog.event_detail_id = Some(EventId::new("ev-1"));

    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(AppAction::Catalog(CatalogAction::EventDetailRequested(
            EventId::new("ev-2"),
        )))
        .then_state(|state| {
            // Old event must not flash up under the new id.
            assert_eq!(state.catalog.event_detail.value(), None);
            assert_eq!(state.catalog.event_detail_id, Some(EventId::new("ev-2")));
            assert!(state.catalog.event_detail.is_loading());
        })
        .then_effects(assertions::assert_has_future_effect)
        .run();
}

#[test]
fn bookings_fetch_requires_a_session() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(AppState::default())
        .when_action(AppAction::Session(SessionAction::Restored(None)))
        .when_action(AppAction::Catalog(CatalogAction::BookingsRequested))
        .then_state(|state| assert!(!state.catalog.bookings.is_loading()))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[tokio::test]
async fn host_dashboard_loads_every_booking() {
    let env = test_env();
    let api = env.api.clone();
    api.script_all_bookings(Ok(eventbook_client::types::BookingPage {
        bookings: vec![
            sample_booking("bk-1", &attendee(), &sample_event("ev-1")),
            sample_booking("bk-2", &host(), &sample_event("ev-1")),
        ],
        count: 2,
    }));

    let store = Store::new(authed_state(host()), TestReducer::new(), env);
    store
        .send_and_wait_for(
            AppAction::Catalog(CatalogAction::AllBookingsRequested),
            |a| matches!(a, AppAction::Catalog(CatalogAction::AllBookingsLoaded(_))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    store.settle(Duration::from_secs(1)).await.unwrap();

    store
        .state(|s| {
            assert_eq!(s.catalog.all_bookings.value().map(|p| p.count), Some(2));
        })
        .await;
    assert!(api.calls().contains(&ApiCall::FetchAllBookings));
}

#[test]
fn all_bookings_fetch_is_host_only() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(authed_state(attendee()))
        .when_action(AppAction::Catalog(CatalogAction::AllBookingsRequested))
        .then_state(|state| assert!(!state.catalog.all_bookings.is_loading()))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[tokio::test]
async fn stale_cell_refetches_on_next_request() {
    let env = test_env();
    let api = env.api.clone();
    api.script_events(Ok(vec![sample_event("ev-1")]));
    // Second fetch returns the post-mutation truth.
    let mut fewer = sample_event("ev-1");
    fewer.tickets[1].available_quantity = 35;
    api.script_events(Ok(vec![fewer]));

    let store = Store::new(AppState::default(), TestReducer::new(), env);
    store
        .send_and_wait_for(
            AppAction::Catalog(CatalogAction::EventsRequested),
            |a| matches!(a, AppAction::Catalog(CatalogAction::EventsLoaded(_))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    // A mutation elsewhere marks the partition stale.
    store
        .send(AppAction::Booking(
            eventbook_client::actions::BookingAction::Failed("rejected".to_string()),
        ))
        .await
        .unwrap();

    store
        .send_and_wait_for(
            AppAction::Catalog(CatalogAction::EventsRequested),
            |a| matches!(a, AppAction::Catalog(CatalogAction::EventsLoaded(_))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    store.settle(Duration::from_secs(1)).await.unwrap();

    store
        .state(|s| {
            let events = s.catalog.events.value().unwrap();
            assert_eq!(events[0].tickets[1].available_quantity, 35);
            assert!(!s.catalog.events.is_stale());
        })
        .await;
    let fetches = api
        .calls()
        .iter()
        .filter(|c| **c == ApiCall::FetchEvents)
        .count();
    assert_eq!(fetches, 2);
}

#[tokio::test]
async fn unauthorized_fetch_forces_logout() {
    let env = test_env();
    let api = env.api.clone();
    api.script_bookings(Err(ApiError::Server {
        status: 401,
        message: "Token expired".to_string(),
    }));

    let store = Store::new(authed_state(attendee()), TestReducer::new(), env);
    store
        .send_and_wait_for(
            AppAction::Catalog(CatalogAction::BookingsRequested),
            |a| matches!(a, AppAction::Session(SessionAction::TokenRejected)),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    store.settle(Duration::from_secs(1)).await.unwrap();

    store
        .state(|s| {
            assert!(!s.session.phase.is_authenticated());
            assert!(s.notice.is_some());
        })
        .await;
}
