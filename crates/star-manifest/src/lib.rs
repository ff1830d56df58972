//! Star Manifest - Typed model for RDF-star test-suite manifest documents.
//!
//! This crate decodes the JSON manifest documents that describe the RDF-star
//! conformance test suites into a tolerant, typed representation, and derives
//! the per-test facts (identifier, display name, approval status, expectation
//! sentence) the report renderer needs.
//!
//! # Modules
//!
//! - [`manifest`]: Serde data model for manifest documents. Every optional
//!   field is an explicit `Option` or defaulted collection, so a structurally
//!   invalid document is rejected at decode time instead of failing deep
//!   inside rendering.
//! - [`entry`]: Derived per-entry facts and the fixed vocabulary lookups
//!   (approval normalization, type labels, expectation sentences).

#![deny(unsafe_code)]

pub mod entry;
pub mod manifest;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while interpreting a decoded manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// A structured action record lacks the required field pairing. This is a
    /// data-contract violation, not an expected condition for well-formed
    /// manifests.
    #[error("entry {entry} has a malformed action: a structured action must pair 'query' or 'request' with 'data'")]
    MalformedAction { entry: String },
}
