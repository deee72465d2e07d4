//! # Eventbook Client
//!
//! The event-booking application core: session management, route
//! access control, ticket selection, the booking lifecycle, and the
//! host admin flows, all expressed as reducers over one state tree.
//!
//! The functional core lives in [`reducers`] and [`state`]; the
//! imperative shell drives it through a store from `eventbook-runtime`
//! and performs the navigations the reducers request via
//! `AppState::pending_navigation`.
//!
//! ## Wiring
//!
//! ```ignore
//! use eventbook_client::{AppReducer, AppState, config::Config};
//! use eventbook_client::api::HttpApiClient;
//! use eventbook_client::environment::ClientEnvironment;
//! use eventbook_core::environment::SystemClock;
//! use eventbook_runtime::Store;
//!
//! let config = Config::from_env();
//! let env = ClientEnvironment::new(
//!     HttpApiClient::new(config.api.base_url),
//!     platform_storage(),
//!     SystemClock,
//! );
//! let store = Store::new(AppState::default(), AppReducer::new(), env);
//! ```

pub mod actions;
pub mod api;
pub mod cache;
pub mod config;
pub mod environment;
pub mod error;
pub mod reducers;
pub mod routing;
pub mod state;
pub mod storage;
pub mod timing;
pub mod token;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod mocks;

pub use actions::{
    AdminAction, AppAction, BookingAction, CatalogAction, RoutingAction, SelectionAction,
    SessionAction,
};
pub use environment::ClientEnvironment;
pub use error::{ApiError, ApiResult, StorageError};
pub use reducers::AppReducer;
pub use state::{AppState, SessionPhase};
