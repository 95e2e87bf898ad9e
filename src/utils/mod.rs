//! Utility modules for common functionality
//!
//! This module provides logging, progress reporting and text encoding
//! helpers used throughout the application.

pub mod logger;
pub(crate) mod progress;
pub mod encoding_utils;
