//! Shared helpers for session integration tests.

pub mod broker;
