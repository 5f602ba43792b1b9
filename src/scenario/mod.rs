//! Repository lifecycle scenarios expressed as typed step functions.

pub mod context;
pub mod error;
pub mod lifecycle;
pub mod steps;

pub use context::Scenario;
pub use lifecycle::run_lifecycle;
