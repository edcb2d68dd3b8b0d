//! Service Module
//!
//! Business logic layer for the relay.
//! Services sit between the HTTP adapter and the submission client.

pub mod relay;

// Re-export for convenience
pub use relay as relay_service;
