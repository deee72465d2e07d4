//! Actions: every input the application reducers process.
//!
//! Grouped by feature, wrapped in [`AppAction`]. Request/response
//! pairs follow one convention: a `*Submitted`/`*Requested` variant
//! carries user intent, and the effect feeds back a `*Succeeded`/
//! `*Loaded` or `*Failed` variant.

use chrono::{DateTime, Utc};

use crate::routing::RouteRequirement;
use crate::types::{
    Booking, BookingId, BookingPage, Category, CategoryId, CategoryWithEvents, Event, EventId,
    LoginRequest, Session, SignupRequest, TicketTier, TierType, User,
};

/// Session feature actions.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// App start: read the persisted session.
    Bootstrap,
    /// Result of the storage read. Expiry is checked by the reducer.
    Restored(Option<Session>),
    LoginSubmitted(LoginRequest),
    SignupSubmitted(SignupRequest),
    AuthSucceeded(Session),
    AuthFailed(String),
    /// Replace the profile of the signed-in user (e.g. after an edit).
    /// Ignored while not authenticated.
    UserUpdated(User),
    LogoutRequested,
    /// The server rejected the bearer token (expired or revoked).
    TokenRejected,
}

/// Routing feature actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingAction {
    /// The shell is navigating; resolve access for the target.
    NavigationRequested {
        path: String,
        requirement: RouteRequirement,
    },
    /// The shell performed the navigation in `pending_navigation`.
    NavigationConsumed,
}

/// Ticket selection actions.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionAction {
    /// The details page loaded this event's tiers.
    TiersLoaded(Vec<TicketTier>),
    TierSelected(TierType),
    Incremented,
    Decremented,
    /// Direct numeric entry. Out-of-range values are rejected, not
    /// clamped.
    QuantitySet(u32),
    Reset,
}

/// Catalog fetch actions: one requested/loaded/failed triple per
/// cached partition.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    EventsRequested,
    EventsLoaded(Vec<Event>),
    EventsFailed(String),
    EventDetailRequested(EventId),
    EventDetailLoaded(Event),
    EventDetailFailed(String),
    CategoriesRequested,
    CategoriesLoaded(Vec<Category>),
    CategoriesFailed(String),
    CategoriesWithEventsRequested,
    CategoriesWithEventsLoaded(Vec<CategoryWithEvents>),
    CategoriesWithEventsFailed(String),
    BookingsRequested,
    BookingsLoaded(BookingPage),
    BookingsFailed(String),
    /// Host dashboard view over every booking in the system.
    AllBookingsRequested,
    AllBookingsLoaded(BookingPage),
    AllBookingsFailed(String),
}

/// Booking lifecycle actions.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    /// "Book now" on the details page. Anonymous users are bounced to
    /// login instead of opening the confirm dialog.
    Initiated { event_id: EventId },
    /// Confirm dialog accepted; submit to the server.
    Confirmed,
    /// Confirm dialog dismissed; selection survives.
    Dismissed,
    Succeeded(Booking),
    Failed(String),
    CancelRequested(BookingId),
    CancelConfirmed,
    CancelDismissed,
    /// Carries the booking with its server-updated status.
    CancelSucceeded(Booking),
    CancelFailed(String),
}

/// Host-only admin actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    CategoryCreateSubmitted { name: String },
    CategoryCreated(Category),
    CategoryCreateFailed(String),
    /// Open the delete confirm for a category; `has_events` comes
    /// from the already-loaded categories-with-events view.
    CategoryDeleteRequested { id: CategoryId, has_events: bool },
    /// A confirm click. With `has_events` and no prior warning this
    /// only surfaces the warning; otherwise it deletes.
    CategoryDeleteConfirmed,
    CategoryDeleteDismissed,
    CategoryDeleted(CategoryId),
    CategoryDeleteFailed(String),
    /// Open the event form, blank or pre-filled for editing.
    EventFormOpened(Option<Event>),
    EventNameChanged(String),
    EventDescriptionChanged(String),
    EventCategoryChanged(String),
    EventLocationChanged(String),
    EventImageUrlChanged(Option<String>),
    EventDateChanged(DateTime<Utc>),
    EventStartChanged(DateTime<Utc>),
    EventEndChanged(DateTime<Utc>),
    TierPriceChanged { tier_type: TierType, price: f64 },
    /// In create mode this also syncs the tier's available count; in
    /// edit mode availability is left alone.
    TierTotalChanged { tier_type: TierType, total: u32 },
    EventSubmitted,
    EventSaved(Event),
    EventSaveFailed(String),
    EventDeleteRequested(EventId),
    EventDeleted(EventId),
    EventDeleteFailed(String),
}

/// The application action type fed to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Session(SessionAction),
    Routing(RoutingAction),
    Selection(SelectionAction),
    Catalog(CatalogAction),
    Booking(BookingAction),
    Admin(AdminAction),
    /// Dismiss the current banner.
    NoticeDismissed,
}
