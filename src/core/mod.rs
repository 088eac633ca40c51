//! Core business logic for JWT operations.
//!
//! This module contains the domain logic separated from CLI concerns.
//! All types and functions here are testable without the CLI layer, and
//! none of them read the wall clock: callers pass `now` explicitly.

pub mod algorithm;
pub mod claims;
pub mod decoder;
pub mod provider;
pub mod secret;
pub mod status;
pub mod ticker;
pub mod time_travel;
pub mod timeline;
