//! Core client modules
//!
//! This module contains configuration, constants, logging, the error
//! taxonomy, response classification, the transport and the client itself.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod response;
pub mod transport;
