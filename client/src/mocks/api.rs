//! Scripted API client for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    AuthResponse, Booking, BookingId, BookingPage, Category, CategoryId, CategoryWithEvents,
    CreateBookingRequest, CreateCategoryRequest, Event, EventId, EventPayload, LoginRequest,
    SignupRequest,
};

/// One recorded call, with the payload the client sent. Tests assert
/// on these to pin down exactly what went over the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SetToken(Option<String>),
    Login(LoginRequest),
    Signup(SignupRequest),
    FetchEvents,
    FetchEvent(EventId),
    FetchCategories,
    FetchCategoriesWithEvents,
    FetchMyBookings,
    FetchAllBookings,
    CreateBooking(CreateBookingRequest),
    CancelBooking(BookingId),
    CreateEvent(EventPayload),
    UpdateEvent(EventId, EventPayload),
    DeleteEvent(EventId),
    CreateCategory(CreateCategoryRequest),
    DeleteCategory(CategoryId),
}

fn unscripted<T>() -> ApiResult<T> {
    Err(ApiError::Network("no scripted response".to_string()))
}

fn pop<T>(queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
    queue
        .lock()
        .ok()
        .and_then(|mut q| q.pop_front())
        .unwrap_or_else(unscripted)
}

fn push<T>(queue: &Mutex<VecDeque<ApiResult<T>>>, result: ApiResult<T>) {
    if let Ok(mut q) = queue.lock() {
        q.push_back(result);
    }
}

/// An [`ApiClient`] whose responses are scripted per endpoint, in
/// FIFO order. Unscripted calls fail with a network error.
#[derive(Debug, Default)]
pub struct MockApiClient {
    calls: Mutex<Vec<ApiCall>>,
    login: Mutex<VecDeque<ApiResult<AuthResponse>>>,
    signup: Mutex<VecDeque<ApiResult<AuthResponse>>>,
    events: Mutex<VecDeque<ApiResult<Vec<Event>>>>,
    event: Mutex<VecDeque<ApiResult<Event>>>,
    categories: Mutex<VecDeque<ApiResult<Vec<Category>>>>,
    categories_with_events: Mutex<VecDeque<ApiResult<Vec<CategoryWithEvents>>>>,
    bookings: Mutex<VecDeque<ApiResult<BookingPage>>>,
    all_bookings: Mutex<VecDeque<ApiResult<BookingPage>>>,
    create_booking: Mutex<VecDeque<ApiResult<Booking>>>,
    cancel_booking: Mutex<VecDeque<ApiResult<Booking>>>,
    save_event: Mutex<VecDeque<ApiResult<Event>>>,
    delete_event: Mutex<VecDeque<ApiResult<()>>>,
    save_category: Mutex<VecDeque<ApiResult<Category>>>,
    delete_category: Mutex<VecDeque<ApiResult<()>>>,
}

impl MockApiClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything this client was asked to do, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// The token most recently installed via `set_token`.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.calls().iter().rev().find_map(|call| match call {
            ApiCall::SetToken(token) => Some(token.clone()),
            _ => None,
        })?
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    pub fn script_login(&self, result: ApiResult<AuthResponse>) {
        push(&self.login, result);
    }

    pub fn script_signup(&self, result: ApiResult<AuthResponse>) {
        push(&self.signup, result);
    }

    pub fn script_events(&self, result: ApiResult<Vec<Event>>) {
        push(&self.events, result);
    }

    pub fn script_event(&self, result: ApiResult<Event>) {
        push(&self.event, result);
    }

    pub fn script_categories(&self, result: ApiResult<Vec<Category>>) {
        push(&self.categories, result);
    }

    pub fn script_categories_with_events(&self, result: ApiResult<Vec<CategoryWithEvents>>) {
        push(&self.categories_with_events, result);
    }

    pub fn script_bookings(&self, result: ApiResult<BookingPage>) {
        push(&self.bookings, result);
    }

    pub fn script_all_bookings(&self, result: ApiResult<BookingPage>) {
        push(&self.all_bookings, result);
    }

    pub fn script_create_booking(&self, result: ApiResult<Booking>) {
        push(&self.create_booking, result);
    }

    pub fn script_cancel_booking(&self, result: ApiResult<Booking>) {
        push(&self.cancel_booking, result);
    }

    pub fn script_save_event(&self, result: ApiResult<Event>) {
        push(&self.save_event, result);
    }

    pub fn script_delete_event(&self, result: ApiResult<()>) {
        push(&self.delete_event, result);
    }

    pub fn script_save_category(&self, result: ApiResult<Category>) {
        push(&self.save_category, result);
    }

    pub fn script_delete_category(&self, result: ApiResult<()>) {
        push(&self.delete_category, result);
    }
}

impl ApiClient for MockApiClient {
    fn set_token(&self, token: Option<String>) {
        self.record(ApiCall::SetToken(token));
    }

    async fn login(&self, request: LoginRequest) -> ApiResult<AuthResponse> {
        self.record(ApiCall::Login(request));
        pop(&self.login)
    }

    async fn signup(&self, request: SignupRequest) -> ApiResult<AuthResponse> {
        self.record(ApiCall::Signup(request));
        pop(&self.signup)
    }

    async fn fetch_events(&self) -> ApiResult<Vec<Event>> {
        self.record(ApiCall::FetchEvents);
        pop(&self.events)
    }

    async fn fetch_event(&self, id: &EventId) -> ApiResult<Event> {
        self.record(ApiCall::FetchEvent(id.clone()));
        pop(&self.event)
    }

    async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        self.record(ApiCall::FetchCategories);
        pop(&self.categories)
    }

    async fn fetch_categories_with_events(&self) -> ApiResult<Vec<CategoryWithEvents>> {
        self.record(ApiCall::FetchCategoriesWithEvents);
        pop(&self.categories_with_events)
    }

    async fn fetch_my_bookings(&self) -> ApiResult<BookingPage> {
        self.record(ApiCall::FetchMyBookings);
        pop(&self.bookings)
    }

    async fn fetch_all_bookings(&self) -> ApiResult<BookingPage> {
        self.record(ApiCall::FetchAllBookings);
        pop(&self.all_bookings)
    }

    async fn create_booking(&self, request: CreateBookingRequest) -> ApiResult<Booking> {
        self.record(ApiCall::CreateBooking(request));
        pop(&self.create_booking)
    }

    async fn cancel_booking(&self, id: &BookingId) -> ApiResult<Booking> {
        self.record(ApiCall::CancelBooking(id.clone()));
        pop(&self.cancel_booking)
    }

    async fn create_event(&self, payload: EventPayload) -> ApiResult<Event> {
        self.record(ApiCall::CreateEvent(payload));
        pop(&self.save_event)
    }

    async fn update_event(&self, id: &EventId, payload: EventPayload) -> ApiResult<Event> {
        self.record(ApiCall::UpdateEvent(id.clone(), payload));
        pop(&self.save_event)
    }

    async fn delete_event(&self, id: &EventId) -> ApiResult<()> {
        self.record(ApiCall::DeleteEvent(id.clone()));
        pop(&self.delete_event)
    }

    async fn create_category(&self, request: CreateCategoryRequest) -> ApiResult<Category> {
        self.record(ApiCall::CreateCategory(request));
        pop(&self.save_category)
    }

    async fn delete_category(&self, id: &CategoryId) -> ApiResult<()> {
        self.record(ApiCall::DeleteCategory(id.clone()));
        pop(&self.delete_category)
    }
}
