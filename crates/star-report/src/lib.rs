//! Star Report - Static HTML reports for RDF-star test-suite manifests.
//!
//! This crate turns the JSON manifest documents decoded by [`star_manifest`]
//! into static HTML pages. Each manifest renders to an HTML file beside its
//! source, and included child manifests are rendered recursively,
//! depth-first, so one invocation on a top-level manifest reports the whole
//! suite tree.
//!
//! # Modules
//!
//! - [`html`]: A minimal string-building HTML writer with a single escaping
//!   function applied at every text-insertion point, plus the fixed style
//!   block embedded in every page.
//! - [`render`]: The manifest renderer: page layout, recursive include
//!   handling, file-block embedding, expectation and result rendering.

#![deny(unsafe_code)]

pub mod html;
pub mod render;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort rendering of a page.
///
/// Recoverable conditions (unparseable manifests, unreadable referenced
/// files) never surface here; they degrade to logged diagnostics inside the
/// renderer.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A data-contract violation in the manifest (malformed action record).
    #[error(transparent)]
    Manifest(#[from] star_manifest::ManifestError),

    /// The output HTML file could not be written.
    #[error("failed to write report {}: {source}", path.display())]
    WriteFailed {
        /// The output path that could not be written.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
