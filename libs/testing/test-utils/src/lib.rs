//! Shared test utilities for the webshop crates.
//!
//! - [`TestDatabase`]: migrated SQLite in memory, or PostgreSQL in a container
//! - [`TestDataBuilder`]: deterministic names derived from the test name
//! - [`assertions`]: small assertion helpers
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::in_memory().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let name = builder.product_name("keyboard");
//! }
//! ```

mod database;

pub use database::TestDatabase;

/// Deterministic test data, seeded from the test name.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `"test-{prefix}-{seed}-{suffix}"`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(7).name("product", "main");
    /// assert_eq!(name, "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A product name that always fits the 100-character limit.
    pub fn product_name(&self, suffix: &str) -> String {
        let mut name = self.name("product", suffix);
        name.truncate(100);
        name
    }
}

pub mod assertions {
    /// Unwrap an `Option`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `haystack` contains every needle, in any order.
    pub fn assert_contains_all(haystack: &[String], needles: &[&str], context: &str) {
        for needle in needles {
            assert!(
                haystack.iter().any(|h| h == needle),
                "{}: expected {:?} in {:?}",
                context,
                needle,
                haystack
            );
        }
    }
}
