//! Core application modules
//!
//! This module contains configuration, constants, logging, and client
//! functionality.

pub mod client;
pub mod config;
pub mod constants;
pub mod logging;
