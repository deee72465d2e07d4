//! Catalog reducer: read-through fetches for the cached partitions.
//!
//! Each partition follows the same triple: a `*Requested` action
//! starts a fetch only when the cell actually needs one, and the
//! effect feeds back `*Loaded` or `*Failed`.

use eventbook_core::environment::Clock;
use eventbook_core::{effect::Effect, effect::Effects, smallvec};

use crate::actions::{AppAction, CatalogAction, SessionAction};
use crate::api::ApiClient;
use crate::cache::Cached;
use crate::environment::ClientEnvironment;
use crate::error::ApiError;
use crate::reducers::selection::reconcile_tiers;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Map an API failure to its feedback action, routing token
/// rejections to the session reducer instead.
fn failed(err: &ApiError, fallback: impl FnOnce(String) -> CatalogAction) -> AppAction {
    if err.is_unauthorized() {
        AppAction::Session(SessionAction::TokenRejected)
    } else {
        AppAction::Catalog(fallback(err.user_message()))
    }
}

pub(crate) fn reduce<A, S, C>(
    state: &mut AppState,
    action: CatalogAction,
    env: &ClientEnvironment<A, S, C>,
) -> Effects<AppAction>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    let catalog = &mut state.catalog;
    match action {
        CatalogAction::EventsRequested => {
            if !catalog.events.needs_fetch() {
                return smallvec![Effect::None];
            }
            catalog.events.begin_load();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.fetch_events().await {
                    Ok(events) => AppAction::Catalog(CatalogAction::EventsLoaded(events)),
                    Err(e) => failed(&e, CatalogAction::EventsFailed),
                })
            })]
        }
        CatalogAction::EventsLoaded(events) => {
            catalog.events.set(events);
            smallvec![Effect::None]
        }
        CatalogAction::EventsFailed(message) => {
            catalog.events.fail(message);
            smallvec![Effect::None]
        }

        CatalogAction::EventDetailRequested(id) => {
            if catalog.event_detail_id.as_ref() != Some(&id) {
                // Different event: old detail must not flash up.
                catalog.event_detail = Cached::new();
                catalog.event_detail_id = Some(id.clone());
            }
            if !catalog.event_detail.needs_fetch() {
                return smallvec![Effect::None];
            }
            catalog.event_detail.begin_load();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.fetch_event(&id).await {
                    Ok(event) => AppAction::Catalog(CatalogAction::EventDetailLoaded(event)),
                    Err(e) => failed(&e, CatalogAction::EventDetailFailed),
                })
            })]
        }
        CatalogAction::EventDetailLoaded(event) => {
            // The picker always reflects the freshest availability.
            reconcile_tiers(&mut state.selection, event.tickets.clone());
            state.catalog.event_detail.set(event);
            smallvec![Effect::None]
        }
        CatalogAction::EventDetailFailed(message) => {
            catalog.event_detail.fail(message);
            smallvec![Effect::None]
        }

        CatalogAction::CategoriesRequested => {
            if !catalog.categories.needs_fetch() {
                return smallvec![Effect::None];
            }
            catalog.categories.begin_load();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.fetch_categories().await {
                    Ok(categories) => {
                        AppAction::Catalog(CatalogAction::CategoriesLoaded(categories))
                    }
                    Err(e) => failed(&e, CatalogAction::CategoriesFailed),
                })
            })]
        }
        CatalogAction::CategoriesLoaded(categories) => {
            catalog.categories.set(categories);
            smallvec![Effect::None]
        }
        CatalogAction::CategoriesFailed(message) => {
            catalog.categories.fail(message);
            smallvec![Effect::None]
        }

        CatalogAction::CategoriesWithEventsRequested => {
            if !catalog.categories_with_events.needs_fetch() {
                return smallvec![Effect::None];
            }
            catalog.categories_with_events.begin_load();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.fetch_categories_with_events().await {
                    Ok(groups) => {
                        AppAction::Catalog(CatalogAction::CategoriesWithEventsLoaded(groups))
                    }
                    Err(e) => failed(&e, CatalogAction::CategoriesWithEventsFailed),
                })
            })]
        }
        CatalogAction::CategoriesWithEventsLoaded(groups) => {
            catalog.categories_with_events.set(groups);
            smallvec![Effect::None]
        }
        CatalogAction::CategoriesWithEventsFailed(message) => {
            catalog.categories_with_events.fail(message);
            smallvec![Effect::None]
        }

        CatalogAction::BookingsRequested => {
            if !state.session.phase.is_authenticated() || !catalog.bookings.needs_fetch() {
                return smallvec![Effect::None];
            }
            catalog.bookings.begin_load();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.fetch_my_bookings().await {
                    Ok(page) => AppAction::Catalog(CatalogAction::BookingsLoaded(page)),
                    Err(e) => failed(&e, CatalogAction::BookingsFailed),
                })
            })]
        }
        CatalogAction::BookingsLoaded(page) => {
            catalog.bookings.set(page);
            smallvec![Effect::None]
        }
        CatalogAction::BookingsFailed(message) => {
            catalog.bookings.fail(message);
            smallvec![Effect::None]
        }

        CatalogAction::AllBookingsRequested => {
            // Host-only endpoint; attendees never see the dashboard
            // that reads it.
            let is_host = state.session.phase.user().is_some_and(|u| u.is_host);
            if !is_host || !state.catalog.all_bookings.needs_fetch() {
                return smallvec![Effect::None];
            }
            state.catalog.all_bookings.begin_load();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.fetch_all_bookings().await {
                    Ok(page) => AppAction::Catalog(CatalogAction::AllBookingsLoaded(page)),
                    Err(e) => failed(&e, CatalogAction::AllBookingsFailed),
                })
            })]
        }
        CatalogAction::AllBookingsLoaded(page) => {
            catalog.all_bookings.set(page);
            smallvec![Effect::None]
        }
        CatalogAction::AllBookingsFailed(message) => {
            catalog.all_bookings.fail(message);
            smallvec![Effect::None]
        }
    }
}
