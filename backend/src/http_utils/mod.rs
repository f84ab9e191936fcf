//! Outbound HTTP plumbing.

pub mod query_service;
