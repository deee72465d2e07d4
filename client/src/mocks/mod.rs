//! Mock implementations of the environment traits.
//!
//! Only compiled with the `test-utils` feature; used by the reducer
//! and store tests in this workspace.

mod api;
mod storage;

pub use api::{ApiCall, MockApiClient};
pub use storage::MemoryStorage;
