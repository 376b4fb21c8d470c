//! # VPhys Extract
//!
//! Pulls physics-collision geometry out of compiled physics documents (KV3
//! text) and writes it as flat triangle buffers.
//!
//! ## Pipeline
//!
//! - **Collision filter**: resolves which collision-attribute indices carry the
//!   `default` group
//! - **Hulls**: convex hulls stored as half-edge topology, fan-triangulated per face
//! - **Meshes**: indexed triangle lists, bounds-checked per triple
//! - **Export**: every accepted triangle as nine little-endian `f32` values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vphys_extract::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractorConfig::default();
//!     let report = Extractor::new(config).run()?;
//!     println!("{} document(s) written", report.written);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core configuration
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod physics;
pub mod export;

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{Extractor, EngineError, DocumentReport, BatchReport, ExtractionSummary};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        Extractor, EngineError, DocumentReport, BatchReport, ExtractionSummary,
        foundation::math::Vec3,
        assets::{KeyedDocument, Kv3Document, ByteArrayDecoder},
        physics::{CollisionFilter, Triangle, Edge, Hull, CollisionMesh},
        export::{GeometryAggregator, read_tri_file},
        core::config::{ExtractorConfig, PathsConfig, LoggingConfig},
        config::Config,
    };
}
