//! Shared helpers for integration tests

pub mod telegram_mock;
pub mod test_data;
