//! Testing utilities and mock implementations.
//!
//! `MockArrApi` stands in for a live *Arr service so configurator and
//! driver behavior can be tested without real infrastructure.

mod mock_api;

pub use mock_api::MockArrApi;
