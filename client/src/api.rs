//! HTTP boundary to the booking backend.
//!
//! The reducers only see the [`ApiClient`] trait; [`HttpApiClient`] is
//! the production implementation over `reqwest`. Server error bodies
//! carry a `message` field which is surfaced verbatim so views can
//! show the server's own wording.

use std::future::Future;
use std::sync::{Arc, Mutex};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::types::{
    AuthResponse, Booking, BookingId, BookingPage, Category, CategoryId, CategoryWithEvents,
    CreateBookingRequest, CreateCategoryRequest, Event, EventId, EventPayload, LoginRequest,
    SignupRequest,
};

/// Client-side view of the backend API. One method per endpoint the
/// application calls; every call is authenticated with the bearer
/// token previously installed via [`ApiClient::set_token`].
pub trait ApiClient: Send + Sync + 'static {
    /// Install (or clear) the bearer token attached to subsequent
    /// requests.
    fn set_token(&self, token: Option<String>);

    fn login(&self, request: LoginRequest) -> impl Future<Output = ApiResult<AuthResponse>> + Send;

    fn signup(&self, request: SignupRequest)
    -> impl Future<Output = ApiResult<AuthResponse>> + Send;

    fn fetch_events(&self) -> impl Future<Output = ApiResult<Vec<Event>>> + Send;

    fn fetch_event(&self, id: &EventId) -> impl Future<Output = ApiResult<Event>> + Send;

    fn fetch_categories(&self) -> impl Future<Output = ApiResult<Vec<Category>>> + Send;

    fn fetch_categories_with_events(
        &self,
    ) -> impl Future<Output = ApiResult<Vec<CategoryWithEvents>>> + Send;

    fn fetch_my_bookings(&self) -> impl Future<Output = ApiResult<BookingPage>> + Send;

    /// Host-only view over every booking in the system.
    fn fetch_all_bookings(&self) -> impl Future<Output = ApiResult<BookingPage>> + Send;

    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> impl Future<Output = ApiResult<Booking>> + Send;

    /// Cancels via `PUT /bookings/{id}/cancel` and returns the booking
    /// with its updated status.
    fn cancel_booking(&self, id: &BookingId) -> impl Future<Output = ApiResult<Booking>> + Send;

    fn create_event(&self, payload: EventPayload) -> impl Future<Output = ApiResult<Event>> + Send;

    fn update_event(
        &self,
        id: &EventId,
        payload: EventPayload,
    ) -> impl Future<Output = ApiResult<Event>> + Send;

    fn delete_event(&self, id: &EventId) -> impl Future<Output = ApiResult<()>> + Send;

    fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> impl Future<Output = ApiResult<Category>> + Send;

    fn delete_category(&self, id: &CategoryId) -> impl Future<Output = ApiResult<()>> + Send;
}

/// Shape of the backend's error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Production client over HTTP.
#[derive(Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
    token: Arc<Mutex<Option<String>>>,
}

impl HttpApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: Arc::new(Mutex::new(None)),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.base_url));
        let token = self.token.lock().map(|guard| guard.clone());
        if let Ok(Some(token)) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Err(Self::server_error(status, response).await)
        }
    }

    async fn execute_unit(builder: RequestBuilder) -> ApiResult<()> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::server_error(status, response).await)
        }
    }

    async fn server_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        debug!(status = status.as_u16(), %message, "api request rejected");
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

impl ApiClient for HttpApiClient {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    async fn login(&self, request: LoginRequest) -> ApiResult<AuthResponse> {
        Self::execute(self.request(Method::POST, "/users/login").json(&request)).await
    }

    async fn signup(&self, request: SignupRequest) -> ApiResult<AuthResponse> {
        Self::execute(self.request(Method::POST, "/users/register").json(&request)).await
    }

    async fn fetch_events(&self) -> ApiResult<Vec<Event>> {
        Self::execute(self.request(Method::GET, "/events/all")).await
    }

    async fn fetch_event(&self, id: &EventId) -> ApiResult<Event> {
        Self::execute(self.request(Method::GET, &format!("/events/{id}"))).await
    }

    async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        Self::execute(self.request(Method::GET, "/categories")).await
    }

    async fn fetch_categories_with_events(&self) -> ApiResult<Vec<CategoryWithEvents>> {
        Self::execute(self.request(Method::GET, "/categories/with-events")).await
    }

    async fn fetch_my_bookings(&self) -> ApiResult<BookingPage> {
        Self::execute(self.request(Method::GET, "/bookings/user")).await
    }

    async fn fetch_all_bookings(&self) -> ApiResult<BookingPage> {
        Self::execute(self.request(Method::GET, "/bookings/all")).await
    }

    async fn create_booking(&self, request: CreateBookingRequest) -> ApiResult<Booking> {
        Self::execute(self.request(Method::POST, "/bookings/create").json(&request)).await
    }

    async fn cancel_booking(&self, id: &BookingId) -> ApiResult<Booking> {
        Self::execute(self.request(Method::PUT, &format!("/bookings/{id}/cancel"))).await
    }

    async fn create_event(&self, payload: EventPayload) -> ApiResult<Event> {
        Self::execute(self.request(Method::POST, "/events/create").json(&payload)).await
    }

    async fn update_event(&self, id: &EventId, payload: EventPayload) -> ApiResult<Event> {
        Self::execute(
            self.request(Method::PUT, &format!("/events/{id}"))
                .json(&payload),
        )
        .await
    }

    async fn delete_event(&self, id: &EventId) -> ApiResult<()> {
        Self::execute_unit(self.request(Method::DELETE, &format!("/events/{id}"))).await
    }

    async fn create_category(&self, request: CreateCategoryRequest) -> ApiResult<Category> {
        Self::execute(self.request(Method::POST, "/categories/create").json(&request)).await
    }

    async fn delete_category(&self, id: &CategoryId) -> ApiResult<()> {
        Self::execute_unit(self.request(Method::DELETE, &format!("/categories/{id}"))).await
    }
}
