//! End-to-end test support for LeetRepeat
//!
//! - [`harness`]: isolated on-disk databases
//! - [`mocks`]: problem fixtures and scenarios

pub mod harness {
    mod db_manager;

    pub use db_manager::TestDatabaseManager;
}

pub mod mocks {
    mod fixtures;

    pub use fixtures::{fixed_now, ProblemFixture, TestDataFactory, SAMPLE_SLUGS};
}
