//! Business logic services.
//!
//! - [`study`] - Mock study-material generator

pub mod study;
