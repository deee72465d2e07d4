//! # Eventbook Testing
//!
//! Testing utilities and helpers for the Eventbook client architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Assertion helpers for reducers
//! - A fluent Given-When-Then reducer test harness
//!
//! ## Example
//!
//! ```ignore
//! use eventbook_testing::ReducerTest;
//!
//! ReducerTest::new(SelectionReducer)
//!     .with_env(test_environment())
//!     .given_state(SelectionState::default())
//!     .when_action(SelectionAction::IncrementQuantity)
//!     .then_state(|state| assert_eq!(state.quantity, 2))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use eventbook_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible. The
    /// time can be advanced explicitly to simulate the passage of time
    /// (e.g. a token expiring between sessions).
    ///
    /// # Example
    ///
    /// ```
    /// use eventbook_testing::mocks::FixedClock;
    /// use eventbook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FixedClock {
        /// Create a clock pinned to the given instant.
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (test-only code).
        #[allow(clippy::unwrap_used)]
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap();
            *time += by;
        }
    }

    impl Clock for FixedClock {
        #[allow(clippy::unwrap_used)]
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap()
        }
    }
}

pub use mocks::FixedClock;
