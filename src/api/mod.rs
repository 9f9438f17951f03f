//! REST API client for the FoodCourt backend.
//!
//! The backend gateway speaks JSON over HTTP and authenticates every call
//! past login/registration with a JWT bearer token. Error bodies carry a
//! single `error` (or `message`) field which is surfaced to the user
//! verbatim.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
