//! Data Transfer Objects
//!
//! This module contains DTOs exchanged over HTTP: the relay's own JSON
//! envelope (`submit`) and the job server's submission wire format
//! (`job_server`).

pub mod job_server;
pub mod submit;
