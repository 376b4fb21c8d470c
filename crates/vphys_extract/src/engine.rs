//! Extraction driver
//!
//! Runs the per-document pipeline (collision filter, hulls, meshes, export)
//! over every document in the input directory. Documents are independent:
//! a document that cannot be read, parsed or written is reported and the
//! batch moves on.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    assets::{KeyedDocument, Kv3Document, Kv3Error},
    config::ConfigError,
    core::config::ExtractorConfig,
    export::{ExportError, GeometryAggregator},
    physics::{CollisionFilter, CollisionMesh, Hull, ShapeEntries, ShapeKind},
};

/// Batch driver errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration rejected before the run started
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input or output directory could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        /// Directory being created
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Input directory could not be listed
    #[error("Failed to list directory {}: {source}", .path.display())]
    ReadDirectory {
        /// Directory being listed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Document file could not be read
    #[error("Failed to read document {}: {source}", .path.display())]
    ReadDocument {
        /// Document path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Document text is not valid KV3
    #[error("Failed to parse document {}: {source}", .path.display())]
    ParseDocument {
        /// Document path
        path: PathBuf,
        /// Parser error
        source: Kv3Error,
    },

    /// Triangle buffer could not be written
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Shape and triangle counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Entries in the hull array
    pub hulls_total: usize,
    /// Hulls in the default group that decoded and were triangulated
    pub hulls_used: usize,
    /// Entries in the mesh array
    pub meshes_total: usize,
    /// Meshes in the default group that decoded and were extracted
    pub meshes_used: usize,
    /// Triangles collected
    pub triangles: usize,
    /// Triangles dropped for out-of-range indices
    pub dropped_triangles: usize,
    /// Hull faces cut short by the step bound or a bad edge index
    pub truncated_faces: usize,
}

/// Outcome of processing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Input document
    pub source: PathBuf,
    /// What was found in it
    pub summary: ExtractionSummary,
    /// Written triangle buffer, `None` when there were no triangles
    pub output: Option<PathBuf>,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents found in the input directory
    pub documents: usize,
    /// Documents that produced a triangle buffer
    pub written: usize,
    /// Documents with no qualifying triangles
    pub skipped_empty: usize,
    /// Documents that failed to read, parse or write
    pub failed: usize,
    /// Triangles written across all documents
    pub triangles: usize,
}

/// Batch extractor
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor for the given configuration
    pub const fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Collect every qualifying triangle of `document`.
    ///
    /// Hulls come first, then meshes, each in array order.
    pub fn extract<D: KeyedDocument + ?Sized>(
        document: &D,
    ) -> (GeometryAggregator, ExtractionSummary) {
        let filter = CollisionFilter::from_document(document);
        if filter.is_empty() {
            log::debug!("No collision attribute uses the default group");
        }

        let mut aggregator = GeometryAggregator::new();
        let mut summary = ExtractionSummary::default();

        for entry in ShapeEntries::new(document, ShapeKind::Hull) {
            summary.hulls_total += 1;
            if !entry.collision_index.is_some_and(|index| filter.contains(index)) {
                continue;
            }

            match Hull::from_document(document, &entry) {
                Ok(hull) => {
                    let stats = hull.triangulate(aggregator.triangles_mut());
                    if stats.overrun_faces > 0 {
                        log::warn!(
                            "{}: {} face(s) exceeded the edge walk limit",
                            entry.path,
                            stats.overrun_faces
                        );
                    }
                    summary.hulls_used += 1;
                    summary.dropped_triangles += stats.dropped_triangles;
                    summary.truncated_faces += stats.overrun_faces + stats.broken_faces;
                }
                Err(skip) => log::debug!("{}: skipped hull ({:?})", entry.path, skip),
            }
        }

        for entry in ShapeEntries::new(document, ShapeKind::Mesh) {
            summary.meshes_total += 1;
            if !entry.collision_index.is_some_and(|index| filter.contains(index)) {
                continue;
            }

            match CollisionMesh::from_document(document, &entry) {
                Ok(mesh) => {
                    let stats = mesh.extract(aggregator.triangles_mut());
                    summary.meshes_used += 1;
                    summary.dropped_triangles += stats.dropped_triangles;
                }
                Err(skip) => log::debug!("{}: skipped mesh ({:?})", entry.path, skip),
            }
        }

        summary.triangles = aggregator.len();
        (aggregator, summary)
    }

    /// Read, parse and extract one document, writing its triangle buffer
    pub fn process_file(&self, path: &Path) -> Result<DocumentReport, EngineError> {
        let bytes = std::fs::read(path).map_err(|source| EngineError::ReadDocument {
            path: path.to_path_buf(),
            source,
        })?;
        // stray non-UTF-8 bytes only ever sit inside string values
        let text = String::from_utf8_lossy(&bytes);
        let document = Kv3Document::parse(&text).map_err(|source| EngineError::ParseDocument {
            path: path.to_path_buf(),
            source,
        })?;

        let (aggregator, summary) = Self::extract(&document);
        let name = path.display();
        log::info!(
            "{}: hulls {} total, {} with default collision",
            name,
            summary.hulls_total,
            summary.hulls_used
        );
        log::info!(
            "{}: meshes {} total, {} with default collision",
            name,
            summary.meshes_total,
            summary.meshes_used
        );
        log::info!("{}: {} triangle(s) found", name, summary.triangles);
        if summary.dropped_triangles > 0 {
            log::warn!(
                "{}: dropped {} triangle(s) with out-of-range indices",
                name,
                summary.dropped_triangles
            );
        }

        let output_path = self.config.paths.output_path_for(path);
        let output = match aggregator.write_to(&output_path)? {
            Some(bytes) => {
                log::info!(
                    "Processed {} -> {} ({} bytes)",
                    name,
                    output_path.display(),
                    bytes
                );
                Some(output_path)
            }
            None => {
                log::info!("{}: no triangles found, skipping file write", path.display());
                None
            }
        };

        Ok(DocumentReport {
            source: path.to_path_buf(),
            summary,
            output,
        })
    }

    /// Process every document in the input directory.
    ///
    /// Only configuration and directory setup failures abort the run.
    pub fn run(&self) -> Result<BatchReport, EngineError> {
        self.config.validate()?;
        self.prepare_directories()?;

        let documents = self.collect_documents()?;
        let mut report = BatchReport {
            documents: documents.len(),
            ..Default::default()
        };

        for path in &documents {
            match self.process_file(path) {
                Ok(document) if document.output.is_some() => {
                    report.written += 1;
                    report.triangles += document.summary.triangles;
                }
                Ok(_) => report.skipped_empty += 1,
                Err(e) => {
                    log::error!("{}", e);
                    report.failed += 1;
                }
            }
        }

        log::info!(
            "Done: {} document(s), {} written, {} without triangles, {} failed",
            report.documents,
            report.written,
            report.skipped_empty,
            report.failed
        );
        Ok(report)
    }

    fn prepare_directories(&self) -> Result<(), EngineError> {
        let paths = &self.config.paths;

        if !paths.input_dir.exists() {
            create_dir(&paths.input_dir)?;
            log::info!(
                "Created input directory {}. Place your .{} files there.",
                paths.input_dir.display(),
                paths.input_extension
            );
        }
        if !paths.output_dir.exists() {
            create_dir(&paths.output_dir)?;
        }
        Ok(())
    }

    fn collect_documents(&self) -> Result<Vec<PathBuf>, EngineError> {
        let input_dir = &self.config.paths.input_dir;
        let read_error = |source| EngineError::ReadDirectory {
            path: input_dir.clone(),
            source,
        };

        let mut documents = Vec::new();
        for entry in std::fs::read_dir(input_dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && self.config.paths.is_input_document(&path) {
                documents.push(path);
            }
        }

        documents.sort();
        log::debug!("Found {} document(s) in {}", documents.len(), input_dir.display());
        Ok(documents)
    }
}

fn create_dir(path: &Path) -> Result<(), EngineError> {
    std::fs::create_dir_all(path).map_err(|source| EngineError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })
}
