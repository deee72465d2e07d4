//! Shared fixtures for the integration tests.

#![allow(clippy::unwrap_used)] // Test code
#![allow(dead_code)] // Each test binary uses a subset of the fixtures

use chrono::{DateTime, TimeZone, Utc};
use eventbook_client::environment::ClientEnvironment;
use eventbook_client::mocks::{MemoryStorage, MockApiClient};
use eventbook_client::state::{AppState, SessionState, SessionPhase};
use eventbook_client::token::encode_unsigned_token;
use eventbook_client::types::{
    AuthResponse, Booking, BookingStatus, Category, CategoryId, Event, EventId, Session,
    TicketTier, TierType, User, UserId,
};
use eventbook_testing::FixedClock;

/// The instant every test clock starts at.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

pub fn attendee() -> User {
    User {
        id: UserId::new("user-1"),
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        is_host: false,
    }
}

pub fn host() -> User {
    User {
        id: UserId::new("host-1"),
        name: "Hugo".to_string(),
        email: "hugo@example.com".to_string(),
        is_host: true,
    }
}

/// A token that expires one hour after [`fixed_now`].
pub fn fresh_token(user: &User) -> String {
    encode_unsigned_token(fixed_now().timestamp() + 3600, Some(user.id.as_str()))
}

/// A token that expired one hour before [`fixed_now`].
pub fn expired_token(user: &User) -> String {
    encode_unsigned_token(fixed_now().timestamp() - 3600, Some(user.id.as_str()))
}

pub fn session_for(user: User) -> Session {
    let token = fresh_token(&user);
    Session { token, user }
}

pub fn auth_response_for(user: User) -> AuthResponse {
    AuthResponse {
        message: "Login successful".to_string(),
        token: fresh_token(&user),
        user,
    }
}

pub fn tier(tier_type: TierType, price: f64, total: u32, available: u32) -> TicketTier {
    TicketTier {
        tier_type,
        price,
        total_quantity: total,
        available_quantity: available,
    }
}

pub fn event_with_tiers(id: &str, tiers: Vec<TicketTier>) -> Event {
    let start = fixed_now() + chrono::Duration::days(14);
    Event {
        id: EventId::new(id),
        host_id: host().id,
        category_name: "Music".to_string(),
        name: "Quartet Night".to_string(),
        description: "An evening of strings".to_string(),
        date: start,
        location: "Hall A".to_string(),
        image_url: None,
        start_time: start,
        end_time: start + chrono::Duration::hours(3),
        created_at: fixed_now() - chrono::Duration::days(30),
        tickets: tiers,
    }
}

pub fn sample_event(id: &str) -> Event {
    event_with_tiers(
        id,
        vec![
            tier(TierType::Vip, 120.0, 20, 5),
            tier(TierType::Regular, 40.0, 100, 37),
            tier(TierType::Student, 15.0, 50, 0),
        ],
    )
}

pub fn sample_category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        created_at: fixed_now() - chrono::Duration::days(60),
    }
}

pub fn sample_booking(id: &str, user: &User, event: &Event) -> Booking {
    Booking {
        id: eventbook_client::types::BookingId::new(id),
        user_id: user.id.clone(),
        event_id: event.id.clone(),
        ticket_type: TierType::Regular,
        quantity: 2,
        total_paid: 80.0,
        status: BookingStatus::Confirmed,
        transaction_id: None,
        booked_at: fixed_now(),
    }
}

pub type TestEnv = ClientEnvironment<MockApiClient, MemoryStorage, FixedClock>;

pub fn test_env() -> TestEnv {
    ClientEnvironment::new(
        MockApiClient::new(),
        MemoryStorage::new(),
        FixedClock::new(fixed_now()),
    )
}

/// A state tree with an authenticated session already in place.
pub fn authed_state(user: User) -> AppState {
    AppState {
        session: SessionState {
            phase: SessionPhase::Authenticated(session_for(user)),
            in_flight: false,
            error: None,
        },
        ..AppState::default()
    }
}
