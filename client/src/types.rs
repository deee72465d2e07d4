//! Domain types for the booking client.
//!
//! These mirror the REST backend's models. The server owns every record;
//! the client holds read-through cached copies and never fabricates ids,
//! totals, or statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap a backend-issued identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Backend-issued user identifier.
    UserId
}
string_id! {
    /// Backend-issued event identifier.
    EventId
}
string_id! {
    /// Backend-issued booking identifier.
    BookingId
}
string_id! {
    /// Backend-issued category identifier.
    CategoryId
}

// ═══════════════════════════════════════════════════════════════════════
// Users & Sessions
// ═══════════════════════════════════════════════════════════════════════

/// A user profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Whether this user may create and manage events.
    pub is_host: bool,
}

/// An authenticated session: token and profile, always together.
///
/// The all-or-nothing invariant of the session store is enforced
/// structurally: there is no way to hold a token without a user or a
/// user without a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token attached to authenticated requests.
    pub token: String,
    /// The profile of the logged-in user.
    pub user: User,
}

// ═══════════════════════════════════════════════════════════════════════
// Ticket Tiers
// ═══════════════════════════════════════════════════════════════════════

/// A named ticket category with its own price and inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierType {
    /// VIP tier.
    #[serde(rename = "VIP")]
    Vip,
    /// Regular tier.
    Regular,
    /// Student tier.
    Student,
}

impl TierType {
    /// All tier types, in the order the backend (and the event form)
    /// lists them.
    pub const ALL: [Self; 3] = [Self::Vip, Self::Regular, Self::Student];

    /// Wire/display name of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vip => "VIP",
            Self::Regular => "Regular",
            Self::Student => "Student",
        }
    }
}

impl std::fmt::Display for TierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ticket tier of an event: price plus inventory counters.
///
/// Invariant (server-enforced): `available_quantity <= total_quantity`.
/// The client never recomputes availability locally; after a mutation it
/// re-fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketTier {
    /// Which tier this row describes.
    #[serde(rename = "type")]
    pub tier_type: TierType,
    /// Price per ticket.
    pub price: f64,
    /// Total tickets ever offered for this tier.
    pub total_quantity: u32,
    /// Tickets still available for purchase.
    pub available_quantity: u32,
}

impl TicketTier {
    /// A tier with zero quantity or zero price is treated as "not
    /// offered" and excluded from event submission.
    #[must_use]
    pub fn is_offered(&self) -> bool {
        self.total_quantity > 0 && self.price > 0.0
    }

    /// Whether this tier has no remaining inventory.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_quantity == 0
    }

    /// An all-zero row for the event form.
    #[must_use]
    pub const fn empty(tier_type: TierType) -> Self {
        Self {
            tier_type,
            price: 0.0,
            total_quantity: 0,
            available_quantity: 0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Events & Categories
// ═══════════════════════════════════════════════════════════════════════

/// A full event record as returned by `GET /events/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event id.
    pub id: EventId,
    /// The host who owns this event.
    pub host_id: UserId,
    /// Name of the category the event belongs to.
    pub category_name: String,
    /// Event title.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Calendar date of the event.
    pub date: DateTime<Utc>,
    /// Venue.
    pub location: String,
    /// Optional hosted image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Doors-open timestamp.
    pub start_time: DateTime<Utc>,
    /// End timestamp.
    pub end_time: DateTime<Utc>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Ticket tiers offered.
    pub tickets: Vec<TicketTier>,
}

impl Event {
    /// Look up a tier by type.
    #[must_use]
    pub fn tier(&self, tier_type: TierType) -> Option<&TicketTier> {
        self.tickets.iter().find(|t| t.tier_type == tier_type)
    }
}

/// Abridged event record returned by create/update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    /// Unique event id.
    pub id: EventId,
    /// Event title.
    pub name: String,
    /// The host who owns this event.
    pub host_id: UserId,
    /// Category name.
    pub category_name: String,
    /// Calendar date.
    pub date: DateTime<Utc>,
    /// Venue.
    pub location: String,
    /// Ticket tiers as persisted.
    pub tickets: Vec<TicketTier>,
}

/// An event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category id.
    pub id: CategoryId,
    /// Unique category name.
    pub name: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A category bundled with its events, from `GET /categories/with-events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithEvents {
    /// The category itself.
    pub category: Category,
    /// Events filed under it.
    pub events: Vec<Event>,
    /// Server-computed event count.
    pub event_count: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// Bookings
// ═══════════════════════════════════════════════════════════════════════

/// Booking lifecycle status. Owned by the server; the client only ever
/// observes transitions, it never sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, awaiting confirmation.
    Pending,
    /// Confirmed by the server.
    Confirmed,
    /// Cancelled; its inventory has been restored server-side.
    Cancelled,
}

/// A booking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking id.
    pub id: BookingId,
    /// The user who booked.
    pub user_id: UserId,
    /// The event booked.
    pub event_id: EventId,
    /// The tier booked.
    pub ticket_type: TierType,
    /// Number of tickets (always >= 1).
    pub quantity: u32,
    /// Amount charged, computed by the server.
    pub total_paid: f64,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Payment transaction reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Wire Payloads
// ═══════════════════════════════════════════════════════════════════════

/// Response of `POST /users/login` and `POST /users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Human-readable outcome message.
    pub message: String,
    /// The authenticated user's profile.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Body of `POST /users/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Body of `POST /users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Register as a host.
    pub is_host: bool,
}

/// Body of `POST /bookings/create`.
///
/// Deliberately carries no price: the server is authoritative for
/// `total_paid` and recomputes it from its own tier prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Event to book.
    pub event_id: EventId,
    /// Tier to book.
    pub ticket_type: TierType,
    /// Number of tickets.
    pub quantity: u32,
}

/// Response of `GET /bookings/user` and `GET /bookings/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPage {
    /// The bookings themselves.
    pub bookings: Vec<Booking>,
    /// Server-reported total.
    pub count: u32,
}

/// Body of `POST /events/create` and `PUT /events/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Category the event is filed under.
    pub category_name: String,
    /// Event title.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Calendar date.
    pub date: DateTime<Utc>,
    /// Venue.
    pub location: String,
    /// Optional hosted image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Doors-open timestamp.
    pub start_time: DateTime<Utc>,
    /// End timestamp.
    pub end_time: DateTime<Utc>,
    /// Offered tiers only (zero-quantity / zero-price rows are dropped
    /// before submission).
    pub tickets: Vec<TicketTier>,
}

/// Body of `POST /categories/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    /// Unique category name.
    pub name: String,
}
