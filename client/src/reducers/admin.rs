//! Admin reducer: category and event management, host-only.
//!
//! The route guard already gates the admin pages; the intent handlers
//! here additionally refuse to act without a host session, so a stray
//! action from a stale view cannot mutate anything.

use eventbook_core::environment::Clock;
use eventbook_core::{effect::Effect, effect::Effects, smallvec};
use tracing::info;

use crate::actions::{AdminAction, AppAction, SessionAction};
use crate::api::ApiClient;
use crate::cache::Partition;
use crate::environment::ClientEnvironment;
use crate::error::ApiError;
use crate::state::{AppState, CategoryDeletePhase, EventFormState, Notice};
use crate::storage::SessionStorage;
use crate::types::CreateCategoryRequest;

fn failed(err: &ApiError, fallback: impl FnOnce(String) -> AdminAction) -> AppAction {
    if err.is_unauthorized() {
        AppAction::Session(SessionAction::TokenRejected)
    } else {
        AppAction::Admin(fallback(err.user_message()))
    }
}

fn is_host(state: &AppState) -> bool {
    state.session.phase.user().is_some_and(|u| u.is_host)
}

#[allow(clippy::too_many_lines)] // One arm per admin operation
pub(crate) fn reduce<A, S, C>(
    state: &mut AppState,
    action: AdminAction,
    env: &ClientEnvironment<A, S, C>,
) -> Effects<AppAction>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    match action {
        // ═══════════════════════════════════════════════════════════
        // Categories
        // ═══════════════════════════════════════════════════════════
        AdminAction::CategoryCreateSubmitted { name } => {
            let name = name.trim().to_string();
            if !is_host(state) || name.is_empty() || state.admin.category_in_flight {
                return smallvec![Effect::None];
            }
            state.admin.category_in_flight = true;
            state.admin.error = None;
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(
                    match api.create_category(CreateCategoryRequest { name }).await {
                        Ok(category) => AppAction::Admin(AdminAction::CategoryCreated(category)),
                        Err(e) => failed(&e, AdminAction::CategoryCreateFailed),
                    },
                )
            })]
        }
        AdminAction::CategoryCreated(category) => {
            info!(category = %category.id, "category created");
            state.admin.category_in_flight = false;
            state.catalog.invalidate(Partition::Categories);
            state.catalog.invalidate(Partition::CategoriesWithEvents);
            state.notice = Some(Notice::success(format!("Category \"{}\" created.", category.name)));
            smallvec![Effect::None]
        }
        AdminAction::CategoryCreateFailed(message) => {
            state.admin.category_in_flight = false;
            state.admin.error = Some(message);
            smallvec![Effect::None]
        }

        AdminAction::CategoryDeleteRequested { id, has_events } => {
            if !is_host(state) || !matches!(state.admin.category_delete, CategoryDeletePhase::Idle)
            {
                return smallvec![Effect::None];
            }
            state.admin.category_delete = CategoryDeletePhase::Confirming {
                id,
                has_events,
                warned: false,
            };
            smallvec![Effect::None]
        }
        AdminAction::CategoryDeleteConfirmed => {
            let CategoryDeletePhase::Confirming {
                id,
                has_events,
                warned,
            } = state.admin.category_delete.clone()
            else {
                return smallvec![Effect::None];
            };
            // Deleting a category with events cascades; the first
            // confirm only surfaces that warning.
            if has_events && !warned {
                state.admin.category_delete = CategoryDeletePhase::Confirming {
                    id,
                    has_events,
                    warned: true,
                };
                return smallvec![Effect::None];
            }
            state.admin.category_delete = CategoryDeletePhase::InFlight {
                id: id.clone(),
                has_events,
            };
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.delete_category(&id).await {
                    Ok(()) => AppAction::Admin(AdminAction::CategoryDeleted(id)),
                    Err(e) => failed(&e, AdminAction::CategoryDeleteFailed),
                })
            })]
        }
        AdminAction::CategoryDeleteDismissed => {
            if !matches!(
                state.admin.category_delete,
                CategoryDeletePhase::InFlight { .. }
            ) {
                state.admin.category_delete = CategoryDeletePhase::Idle;
            }
            smallvec![Effect::None]
        }
        AdminAction::CategoryDeleted(id) => {
            info!(category = %id, "category deleted");
            let cascaded = matches!(
                state.admin.category_delete,
                CategoryDeletePhase::InFlight {
                    has_events: true,
                    ..
                }
            );
            state.admin.category_delete = CategoryDeletePhase::Idle;
            state.catalog.invalidate(Partition::Categories);
            state.catalog.invalidate(Partition::CategoriesWithEvents);
            if cascaded {
                // Its events went with it, taking their bookings.
                state.catalog.invalidate(Partition::Events);
                state.catalog.invalidate(Partition::Bookings);
            }
            state.notice = Some(Notice::success("Category deleted."));
            smallvec![Effect::None]
        }
        AdminAction::CategoryDeleteFailed(message) => {
            state.admin.category_delete = CategoryDeletePhase::Idle;
            state.notice = Some(Notice::error(message));
            smallvec![Effect::None]
        }

        // ═══════════════════════════════════════════════════════════
        // Event form
        // ═══════════════════════════════════════════════════════════
        AdminAction::EventFormOpened(event) => {
            state.admin.event_form = match event {
                Some(event) => EventFormState::for_event(&event),
                None => EventFormState::default(),
            };
            smallvec![Effect::None]
        }
        AdminAction::EventNameChanged(name) => {
            state.admin.event_form.name = name;
            smallvec![Effect::None]
        }
        AdminAction::EventDescriptionChanged(description) => {
            state.admin.event_form.description = description;
            smallvec![Effect::None]
        }
        AdminAction::EventCategoryChanged(category_name) => {
            state.admin.event_form.category_name = category_name;
            smallvec![Effect::None]
        }
        AdminAction::EventLocationChanged(location) => {
            state.admin.event_form.location = location;
            smallvec![Effect::None]
        }
        AdminAction::EventImageUrlChanged(image_url) => {
            state.admin.event_form.image_url = image_url;
            smallvec![Effect::None]
        }
        AdminAction::EventDateChanged(date) => {
            state.admin.event_form.date = Some(date);
            smallvec![Effect::None]
        }
        AdminAction::EventStartChanged(start) => {
            state.admin.event_form.start_time = Some(start);
            smallvec![Effect::None]
        }
        AdminAction::EventEndChanged(end) => {
            state.admin.event_form.end_time = Some(end);
            smallvec![Effect::None]
        }
        AdminAction::TierPriceChanged { tier_type, price } => {
            if price >= 0.0 {
                if let Some(row) = state.admin.event_form.tier_mut(tier_type) {
                    row.price = price;
                }
            }
            smallvec![Effect::None]
        }
        AdminAction::TierTotalChanged { tier_type, total } => {
            let creating = state.admin.event_form.editing.is_none();
            if let Some(row) = state.admin.event_form.tier_mut(tier_type) {
                row.total_quantity = total;
                if creating {
                    // A new event has sold nothing yet.
                    row.available_quantity = total;
                }
            }
            smallvec![Effect::None]
        }

        AdminAction::EventSubmitted => {
            if !is_host(state) || state.admin.event_form.in_flight {
                return smallvec![Effect::None];
            }
            let Some(payload) = state.admin.event_form.payload() else {
                state.admin.event_form.error =
                    Some("Please fill in all required fields and offer at least one ticket tier.".to_string());
                return smallvec![Effect::None];
            };
            state.admin.event_form.in_flight = true;
            state.admin.event_form.error = None;
            let editing = state.admin.event_form.editing.clone();
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                let result = match editing {
                    Some(id) => api.update_event(&id, payload).await,
                    None => api.create_event(payload).await,
                };
                Some(match result {
                    Ok(event) => AppAction::Admin(AdminAction::EventSaved(event)),
                    Err(e) => failed(&e, AdminAction::EventSaveFailed),
                })
            })]
        }
        AdminAction::EventSaved(event) => {
            info!(event = %event.id, "event saved");
            state.admin.event_form = EventFormState::default();
            state.catalog.invalidate(Partition::Events);
            state.catalog.invalidate(Partition::CategoriesWithEvents);
            state.notice = Some(Notice::success(format!("Event \"{}\" saved.", event.name)));
            state.pending_navigation = Some("/admin/dashboard".to_string());
            smallvec![Effect::None]
        }
        AdminAction::EventSaveFailed(message) => {
            state.admin.event_form.in_flight = false;
            state.admin.event_form.error = Some(message);
            smallvec![Effect::None]
        }

        AdminAction::EventDeleteRequested(id) => {
            if !is_host(state) || state.admin.event_delete_in_flight.is_some() {
                return smallvec![Effect::None];
            }
            state.admin.event_delete_in_flight = Some(id.clone());
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.delete_event(&id).await {
                    Ok(()) => AppAction::Admin(AdminAction::EventDeleted(id)),
                    Err(e) => failed(&e, AdminAction::EventDeleteFailed),
                })
            })]
        }
        AdminAction::EventDeleted(id) => {
            info!(event = %id, "event deleted");
            state.admin.event_delete_in_flight = None;
            state.catalog.invalidate(Partition::Events);
            state.catalog.invalidate(Partition::CategoriesWithEvents);
            // Bookings against a deleted event are gone with it.
            state.catalog.invalidate(Partition::Bookings);
            state.notice = Some(Notice::success("Event deleted."));
            smallvec![Effect::None]
        }
        AdminAction::EventDeleteFailed(message) => {
            state.admin.event_delete_in_flight = None;
            state.notice = Some(Notice::error(message));
            smallvec![Effect::None]
        }
    }
}
