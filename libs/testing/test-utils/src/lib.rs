//! Shared test utilities for the inventory workspace
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true }
//! ```
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore] // Requires Docker
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let config = mongo.config(&builder.database_name());
//!     let item_id = builder.item_id("main");
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving every value from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_add_item");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Item identifier unique to this test.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.item_id("a1"), "item-7-a1");
    /// ```
    pub fn item_id(&self, suffix: &str) -> String {
        format!("item-{}-{}", self.seed, suffix)
    }

    /// Database name for per-test isolation inside a shared MongoDB.
    ///
    /// MongoDB caps database names at 64 bytes and forbids `.`, so this stays short.
    pub fn database_name(&self) -> String {
        format!("test_{:x}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that two collections hold the same elements, ignoring order.
    pub fn assert_same_elements<T>(actual: &[T], expected: &[T], context: &str)
    where
        T: PartialEq + std::fmt::Debug,
    {
        assert_eq!(
            actual.len(),
            expected.len(),
            "{}: expected {} elements, got {}: {:?}",
            context,
            expected.len(),
            actual.len(),
            actual
        );
        for item in expected {
            assert!(
                actual.contains(item),
                "{}: missing {:?} in {:?}",
                context,
                item,
                actual
            );
        }
    }
}
