//! Application state.
//!
//! One tree, owned by the store. Sub-states are grouped by feature and
//! each is driven by its own reducer; reducers communicate only through
//! actions and the shared tree.

use chrono::{DateTime, Utc};

use crate::cache::{Cached, Partition};
use crate::routing::{RouteDecision, RouteRequirement};
use crate::types::{
    Booking, BookingId, BookingPage, Category, CategoryId, CategoryWithEvents, Event, EventId,
    EventPayload, Session, TicketTier, TierType, User,
};

// ═══════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════

/// Authentication lifecycle. `Loading` covers the window between app
/// start and the storage read finishing; route guards render nothing
/// during it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Persisted session is still being restored.
    #[default]
    Loading,
    /// No session: signed out, or the restored token had expired.
    Anonymous,
    /// Signed in.
    Authenticated(Session),
}

impl SessionPhase {
    /// The active session, if signed in.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Session feature state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Where we are in the auth lifecycle.
    pub phase: SessionPhase,
    /// A login or signup request is in flight.
    pub in_flight: bool,
    /// Last auth error, shown on the auth forms.
    pub error: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Routing
// ═══════════════════════════════════════════════════════════════════════

/// Routing feature state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingState {
    /// Path the user is currently on (or heading to).
    pub current_path: String,
    /// Access requirement of that path.
    pub requirement: RouteRequirement,
    /// Latest guard decision for the current path.
    pub decision: RouteDecision,
    /// Where to send the user after a successful login. Captured when
    /// an anonymous visit to a protected route is bounced to login.
    pub return_to: Option<String>,
}

impl Default for RoutingState {
    fn default() -> Self {
        Self {
            current_path: "/".to_string(),
            requirement: RouteRequirement::Public,
            decision: RouteDecision::Render,
            return_to: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Ticket selection
// ═══════════════════════════════════════════════════════════════════════

/// Tier picker state on the event details page.
///
/// Invariants: a selection always has `1 <= quantity <=
/// available_quantity` of the selected tier; sold-out tiers are never
/// selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    /// Tiers of the event being viewed.
    pub tiers: Vec<TicketTier>,
    /// The chosen tier, if any.
    pub selected: Option<TierType>,
    /// Tickets to book. Meaningless unless `selected` is set.
    pub quantity: u32,
}

impl SelectionState {
    /// The full tier record behind the current selection.
    #[must_use]
    pub fn selected_tier(&self) -> Option<&TicketTier> {
        let selected = self.selected?;
        self.tiers.iter().find(|t| t.tier_type == selected)
    }

    /// Display-only price preview. The server recomputes the real
    /// total at booking time.
    #[must_use]
    pub fn total_price(&self) -> Option<f64> {
        self.selected_tier()
            .map(|tier| tier.price * f64::from(self.quantity))
    }

    /// Drop the selection, keeping the loaded tiers.
    pub fn clear(&mut self) {
        self.selected = None;
        self.quantity = 0;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Booking lifecycle
// ═══════════════════════════════════════════════════════════════════════

/// What the user is about to book. Price is carried for the confirm
/// dialog only; it is never sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub event_id: EventId,
    pub tier_type: TierType,
    pub quantity: u32,
    /// Unit price at selection time, for display.
    pub unit_price: f64,
}

impl BookingDraft {
    /// Display total for the confirm dialog.
    #[must_use]
    pub fn display_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Create-booking lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookingPhase {
    #[default]
    Idle,
    /// Confirm dialog is open.
    Confirming(BookingDraft),
    /// Request submitted, dialog locked.
    InFlight(BookingDraft),
}

/// Cancel-booking lifecycle, independent of the create flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CancelPhase {
    #[default]
    Idle,
    /// Cancel confirm dialog is open.
    Confirming(BookingId),
    /// Cancellation submitted.
    InFlight(BookingId),
}

/// Booking feature state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingState {
    pub phase: BookingPhase,
    pub cancel: CancelPhase,
    /// Last booking error, shown inside the confirm dialog.
    pub error: Option<String>,
    /// The booking returned by the last successful create.
    pub last_confirmed: Option<Booking>,
}

// ═══════════════════════════════════════════════════════════════════════
// Catalog cache
// ═══════════════════════════════════════════════════════════════════════

/// Server-derived collections, cached per partition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    pub events: Cached<Vec<Event>>,
    /// The event currently open on the details page.
    pub event_detail: Cached<Event>,
    /// Id the detail cell belongs to; a different id forces a fetch.
    pub event_detail_id: Option<EventId>,
    pub categories: Cached<Vec<Category>>,
    pub categories_with_events: Cached<Vec<CategoryWithEvents>>,
    pub bookings: Cached<BookingPage>,
    /// Host dashboard view: every booking in the system.
    pub all_bookings: Cached<BookingPage>,
}

impl CatalogState {
    /// Mark a partition stale. The `Events` partition covers both the
    /// list and the open detail record, since both carry availability
    /// figures the server may have changed; `Bookings` covers the
    /// user's list and the host-wide one.
    pub const fn invalidate(&mut self, partition: Partition) {
        match partition {
            Partition::Events => {
                self.events.invalidate();
                self.event_detail.invalidate();
            }
            Partition::Categories => self.categories.invalidate(),
            Partition::CategoriesWithEvents => self.categories_with_events.invalidate(),
            Partition::Bookings => {
                self.bookings.invalidate();
                self.all_bookings.invalidate();
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Admin
// ═══════════════════════════════════════════════════════════════════════

/// Category deletion runs through an explicit confirm; when the
/// category still has events the first confirm only surfaces a
/// warning and a second confirm is required.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryDeletePhase {
    #[default]
    Idle,
    Confirming {
        id: CategoryId,
        has_events: bool,
        /// The has-events warning has been shown; the next confirm
        /// actually deletes.
        warned: bool,
    },
    InFlight {
        id: CategoryId,
        has_events: bool,
    },
}

/// The create/edit event form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFormState {
    /// `Some` when editing an existing event, `None` when creating.
    pub editing: Option<EventId>,
    pub name: String,
    pub description: String,
    pub category_name: String,
    pub location: String,
    pub image_url: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Always three rows, one per tier type, in [`TierType::ALL`] order.
    pub tiers: Vec<TicketTier>,
    pub in_flight: bool,
    pub error: Option<String>,
}

impl Default for EventFormState {
    fn default() -> Self {
        Self {
            editing: None,
            name: String::new(),
            description: String::new(),
            category_name: String::new(),
            location: String::new(),
            image_url: None,
            date: None,
            start_time: None,
            end_time: None,
            tiers: TierType::ALL.map(TicketTier::empty).to_vec(),
            in_flight: false,
            error: None,
        }
    }
}

impl EventFormState {
    /// Pre-populate the form from an existing event. Availability
    /// figures come along untouched so an edit never resets them.
    #[must_use]
    pub fn for_event(event: &Event) -> Self {
        let mut tiers = TierType::ALL.map(TicketTier::empty).to_vec();
        for row in &mut tiers {
            if let Some(existing) = event.tier(row.tier_type) {
                *row = existing.clone();
            }
        }
        Self {
            editing: Some(event.id.clone()),
            name: event.name.clone(),
            description: event.description.clone(),
            category_name: event.category_name.clone(),
            location: event.location.clone(),
            image_url: event.image_url.clone(),
            date: Some(event.date),
            start_time: Some(event.start_time),
            end_time: Some(event.end_time),
            tiers,
            in_flight: false,
            error: None,
        }
    }

    /// Row for one tier type. The form always holds all three rows.
    pub fn tier_mut(&mut self, tier_type: TierType) -> Option<&mut TicketTier> {
        self.tiers.iter_mut().find(|t| t.tier_type == tier_type)
    }

    /// Whether all required fields are filled and at least one tier is
    /// actually offered.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.category_name.trim().is_empty()
            && !self.location.trim().is_empty()
            && self.date.is_some()
            && self.start_time.is_some()
            && self.end_time.is_some()
            && self.tiers.iter().any(TicketTier::is_offered)
    }

    /// Build the submission payload. Unoffered tier rows are dropped.
    /// Returns `None` when required fields are missing.
    #[must_use]
    pub fn payload(&self) -> Option<EventPayload> {
        if !self.is_submittable() {
            return None;
        }
        Some(EventPayload {
            category_name: self.category_name.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            date: self.date?,
            location: self.location.clone(),
            image_url: self.image_url.clone(),
            start_time: self.start_time?,
            end_time: self.end_time?,
            tickets: self
                .tiers
                .iter()
                .filter(|t| t.is_offered())
                .cloned()
                .collect(),
        })
    }
}

/// Admin feature state. Only reachable behind host-gated routes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminState {
    pub category_delete: CategoryDeletePhase,
    /// A category create/rename request is in flight.
    pub category_in_flight: bool,
    pub event_form: EventFormState,
    /// An event deletion in flight, keyed by id.
    pub event_delete_in_flight: Option<EventId>,
    pub error: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Notices & the tree
// ═══════════════════════════════════════════════════════════════════════

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// The whole application state tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub session: SessionState,
    pub routing: RoutingState,
    pub selection: SelectionState,
    pub booking: BookingState,
    pub catalog: CatalogState,
    pub admin: AdminState,
    /// Current transient banner, if any.
    pub notice: Option<Notice>,
    /// A navigation the shell should perform, set by reducers and
    /// consumed by the shell.
    pub pending_navigation: Option<String>,
}
