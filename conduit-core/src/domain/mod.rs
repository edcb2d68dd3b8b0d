//! Core domain types
//!
//! This module contains the domain structures shared by the relay server,
//! the HTTP clients and the CLI.

pub mod credentials;
pub mod submission;
