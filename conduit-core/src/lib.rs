//! Conduit Core
//!
//! Core types and abstractions for the Conduit submission relay.
//!
//! This crate contains:
//! - Domain types: the submission request/result records and credentials
//! - Codec: plain/base64 payload transforms
//! - DTOs: Data transfer objects for the relay API and the job server wire format

pub mod codec;
pub mod domain;
pub mod dto;
