//! Domain models for the STUD server.
//!
//! - [`study`] - Study-processing requests and mock responses
//! - [`user`] - User records and creation payloads

pub mod study;
pub mod user;

pub use study::{StudyAction, StudyData, StudyRequest, StudyResponse};
pub use user::{NewUser, UserRecord};
