//! API data models
//!
//! This module contains the request payloads sent to the backend and the
//! optional typed views of its responses.

pub mod request;
pub mod response;
