//! Session reducer: restore, login, signup, logout, forced logout.

use eventbook_core::environment::Clock;
use eventbook_core::{effect::Effect, effect::Effects, smallvec};
use tracing::{info, warn};

use crate::actions::{AppAction, SessionAction};
use crate::api::ApiClient;
use crate::environment::ClientEnvironment;
use crate::reducers::routing::resolve;
use crate::routing::{LOGIN_PATH, role_home};
use crate::state::{AppState, Notice, SessionPhase};
use crate::storage::{SessionStorage, clear_session, load_session, persist_session};
use crate::token::decode_token_claims;
use crate::types::Session;

pub(crate) fn reduce<A, S, C>(
    state: &mut AppState,
    action: SessionAction,
    env: &ClientEnvironment<A, S, C>,
) -> Effects<AppAction>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    match action {
        SessionAction::Bootstrap => {
            state.session.phase = SessionPhase::Loading;
            let storage = env.storage.clone();
            smallvec![Effect::future(async move {
                let restored = match load_session(&*storage) {
                    Ok(session) => session,
                    Err(e) => {
                        warn!(error = %e, "failed to read persisted session");
                        None
                    }
                };
                Some(AppAction::Session(SessionAction::Restored(restored)))
            })]
        }

        SessionAction::Restored(Some(session)) => {
            let expired = decode_token_claims(&session.token)
                .is_none_or(|claims| claims.is_expired(env.clock.now()));
            if expired {
                info!("persisted session token expired, discarding");
                state.session.phase = SessionPhase::Anonymous;
                resolve(state);
                let storage = env.storage.clone();
                smallvec![Effect::future(async move {
                    if let Err(e) = clear_session(&*storage) {
                        warn!(error = %e, "failed to clear expired session");
                    }
                    None
                })]
            } else {
                let token = session.token.clone();
                state.session.phase = SessionPhase::Authenticated(session);
                resolve(state);
                let api = env.api.clone();
                smallvec![Effect::future(async move {
                    api.set_token(Some(token));
                    None
                })]
            }
        }

        SessionAction::Restored(None) => {
            state.session.phase = SessionPhase::Anonymous;
            resolve(state);
            smallvec![Effect::None]
        }

        SessionAction::LoginSubmitted(request) => {
            if state.session.in_flight {
                return smallvec![Effect::None];
            }
            state.session.in_flight = true;
            state.session.error = None;
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.login(request).await {
                    Ok(response) => AppAction::Session(SessionAction::AuthSucceeded(Session {
                        token: response.token,
                        user: response.user,
                    })),
                    Err(e) => AppAction::Session(SessionAction::AuthFailed(e.user_message())),
                })
            })]
        }

        SessionAction::SignupSubmitted(request) => {
            if state.session.in_flight {
                return smallvec![Effect::None];
            }
            state.session.in_flight = true;
            state.session.error = None;
            let api = env.api.clone();
            smallvec![Effect::future(async move {
                Some(match api.signup(request).await {
                    Ok(response) => AppAction::Session(SessionAction::AuthSucceeded(Session {
                        token: response.token,
                        user: response.user,
                    })),
                    Err(e) => AppAction::Session(SessionAction::AuthFailed(e.user_message())),
                })
            })]
        }

        SessionAction::AuthSucceeded(session) => {
            info!(user = %session.user.id, "signed in");
            state.session.in_flight = false;
            state.session.error = None;
            // Bookings cached for a previous identity must not leak
            // into this one.
            state.catalog.bookings = crate::cache::Cached::new();
            state.catalog.all_bookings = crate::cache::Cached::new();
            state.pending_navigation = Some(
                state
                    .routing
                    .return_to
                    .take()
                    .unwrap_or_else(|| role_home(&session.user).to_string()),
            );
            state.notice = Some(Notice::success(format!(
                "Welcome back, {}!",
                session.user.name
            )));

            let token = session.token.clone();
            let persisted = session.clone();
            state.session.phase = SessionPhase::Authenticated(session);

            let api = env.api.clone();
            let storage = env.storage.clone();
            smallvec![Effect::future(async move {
                api.set_token(Some(token));
                if let Err(e) = persist_session(&*storage, &persisted) {
                    warn!(error = %e, "failed to persist session");
                }
                None
            })]
        }

        SessionAction::UserUpdated(user) => {
            let SessionPhase::Authenticated(session) = &mut state.session.phase else {
                return smallvec![Effect::None];
            };
            session.user = user;
            let persisted = session.clone();
            // Role may have changed; the current route must be re-gated.
            resolve(state);
            let storage = env.storage.clone();
            smallvec![Effect::future(async move {
                if let Err(e) = persist_session(&*storage, &persisted) {
                    warn!(error = %e, "failed to persist updated profile");
                }
                None
            })]
        }

        SessionAction::AuthFailed(message) => {
            state.session.in_flight = false;
            state.session.error = Some(message);
            smallvec![Effect::None]
        }

        SessionAction::LogoutRequested => {
            sign_out(state);
            state.pending_navigation = Some(LOGIN_PATH.to_string());
            forget_session_effects(env)
        }

        SessionAction::TokenRejected => {
            // Forced logout: remember where the user was so a fresh
            // login can send them back.
            warn!("server rejected bearer token, signing out");
            sign_out(state);
            state.routing.return_to = Some(state.routing.current_path.clone());
            state.pending_navigation = Some(LOGIN_PATH.to_string());
            state.notice = Some(Notice::error("Your session has expired. Please log in again."));
            forget_session_effects(env)
        }
    }
}

/// Drop the in-memory session and everything derived from it.
fn sign_out(state: &mut AppState) {
    state.session.phase = SessionPhase::Anonymous;
    state.session.in_flight = false;
    state.session.error = None;
    state.catalog.bookings = crate::cache::Cached::new();
    state.catalog.all_bookings = crate::cache::Cached::new();
    state.selection.clear();
    state.booking = crate::state::BookingState::default();
    state.admin = crate::state::AdminState::default();
    resolve(state);
}

fn forget_session_effects<A, S, C>(env: &ClientEnvironment<A, S, C>) -> Effects<AppAction>
where
    A: ApiClient,
    S: SessionStorage,
    C: Clock,
{
    let api = env.api.clone();
    let storage = env.storage.clone();
    smallvec![Effect::future(async move {
        api.set_token(None);
        if let Err(e) = clear_session(&*storage) {
            warn!(error = %e, "failed to clear persisted session");
        }
        None
    })]
}
