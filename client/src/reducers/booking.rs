//! Booking lifecycle reducer: create with confirm dialog, cancel with
//! confirm dialog, and the cache invalidation both flows trigger.

use eventbook_core::environment::Clock;
use eventbook_core::{effect::Effect, effect::Effects, smallvec};
use tracing::info;

use crate::actions::{AppAction, BookingAction, SessionAction};
use crate::api::ApiClient;
use crate::cache::Partition;
use crate::environment::ClientEnvironment;
use crate::error::ApiError;
use crate::routing::LOGIN_PATH;
use crate::state::{AppState, BookingDraft, BookingPhase, CancelPhase, Notice};
use crate::storage::SessionStorage;
use crate::types::CreateBookingRequest;

fn failed(err: &ApiError, fallback: impl FnOnce(String) -> BookingAction) -> AppAction {
    if err.is_unauthorized() {
        AppAction::Session(SessionAction::TokenRejected)
    } else {
        AppAction::Booking(fallback(err.user_message()))
    }
}

pub(crate) fn reduce<A, S, C>(
    state: &mut AppState,
    action: BookingAction,
    env: &ClientEnvironment<A, S, C>,
) -> Effects<AppAction>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    match action {
        BookingAction::Initiated { event_id } => {
            if !state.session.phase.is_authenticated() {
                // Booking intent from a signed-out visitor: capture
                // where they were and send them to login.
                state.routing.return_to = Some(state.routing.current_path.clone());
                state.pending_navigation = Some(LOGIN_PATH.to_string());
                return smallvec![Effect::None];
            }
            let Some(tier) = state.selection.selected_tier() else {
                return smallvec![Effect::None];
            };
            state.booking.error = None;
            state.booking.phase = BookingPhase::Confirming(BookingDraft {
                event_id,
                tier_type: tier.tier_type,
                quantity: state.selection.quantity,
                unit_price: tier.price,
            });
            smallvec![Effect::None]
        }

        BookingAction::Confirmed => {
            let BookingPhase::Confirming(draft) = state.booking.phase.clone() else {
                return smallvec![Effect::None];
            };
            state.booking.error = None;
            state.booking.phase = BookingPhase::InFlight(draft.clone());
            let request = CreateBookingRequest {
                event_id: draft.event_id,
                ticket_type: draft.tier_type,
                quantity: draft.quantity,
            };
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.create_booking(request).await {
                    Ok(booking) => AppAction::Booking(BookingAction::Succeeded(booking)),
                    Err(e) => failed(&e, BookingAction::Failed),
                })
            })]
        }

        BookingAction::Dismissed => {
            if matches!(state.booking.phase, BookingPhase::Confirming(_)) {
                state.booking.phase = BookingPhase::Idle;
                state.booking.error = None;
            }
            smallvec![Effect::None]
        }

        BookingAction::Succeeded(booking) => {
            info!(booking = %booking.id, "booking confirmed");
            state.booking.phase = BookingPhase::Idle;
            state.booking.last_confirmed = Some(booking);
            // The server consumed inventory; every availability figure
            // we hold is now suspect.
            state.catalog.invalidate(Partition::Events);
            state.catalog.invalidate(Partition::Bookings);
            state.selection.clear();
            state.notice = Some(Notice::success("Booking confirmed!"));
            state.pending_navigation = Some("/my-bookings".to_string());
            smallvec![Effect::None]
        }

        BookingAction::Failed(message) => {
            // Keep the dialog open with the draft intact so the user
            // can retry or adjust; refresh availability underneath.
            if let BookingPhase::InFlight(draft) = state.booking.phase.clone() {
                state.booking.phase = BookingPhase::Confirming(draft);
            }
            state.booking.error = Some(message);
            state.catalog.invalidate(Partition::Events);
            smallvec![Effect::None]
        }

        BookingAction::CancelRequested(id) => {
            if matches!(state.booking.cancel, CancelPhase::Idle) {
                state.booking.cancel = CancelPhase::Confirming(id);
            }
            smallvec![Effect::None]
        }

        BookingAction::CancelConfirmed => {
            let CancelPhase::Confirming(id) = state.booking.cancel.clone() else {
                return smallvec![Effect::None];
            };
            state.booking.cancel = CancelPhase::InFlight(id.clone());
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.cancel_booking(&id).await {
                    Ok(booking) => AppAction::Booking(BookingAction::CancelSucceeded(booking)),
                    Err(e) => failed(&e, BookingAction::CancelFailed),
                })
            })]
        }

        BookingAction::CancelDismissed => {
            if matches!(state.booking.cancel, CancelPhase::Confirming(_)) {
                state.booking.cancel = CancelPhase::Idle;
            }
            smallvec![Effect::None]
        }

        BookingAction::CancelSucceeded(booking) => {
            info!(booking = %booking.id, status = ?booking.status, "booking cancelled");
            state.booking.cancel = CancelPhase::Idle;
            // Cancellation restored inventory server-side.
            state.catalog.invalidate(Partition::Events);
            state.catalog.invalidate(Partition::Bookings);
            state.notice = Some(Notice::success("Booking cancelled."));
            smallvec![Effect::None]
        }

        BookingAction::CancelFailed(message) => {
            state.booking.cancel = CancelPhase::Idle;
            state.notice = Some(Notice::error(message));
            smallvec![Effect::None]
        }
    }
}
