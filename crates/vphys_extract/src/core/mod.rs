//! Core extractor functionality
//!
//! Holds the unified configuration types used by the batch driver and the
//! command-line front end.

pub mod config;
