//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the extractor:
//! - Math types shared by the shape reconstructors
//! - Logging setup

pub mod math;
pub mod logging;
