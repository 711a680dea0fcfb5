//! STUD Core - Shared types library.
//!
//! This crate provides common types used across the STUD backend:
//! - `server` - JSON API for study processing and user records
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no
//! database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`validation`] - Flattened, field-level validation failures

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::ValidationErrors;
