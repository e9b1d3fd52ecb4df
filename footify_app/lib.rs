pub mod config;
pub mod durable;
pub mod repository;
pub mod roster;
pub mod sample;
pub mod search;
pub mod store;
pub mod subscribers;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
