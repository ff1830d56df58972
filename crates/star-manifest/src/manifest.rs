//! Serde data model for RDF-star test-suite manifest documents.
//!
//! A manifest is a JSON document describing one test suite (or sub-suite). It
//! carries display metadata, an optional list of included child manifests,
//! and an optional list of [`TestEntry`] records. Decoding is deliberately
//! tolerant: every field the schema treats as optional is an `Option` or a
//! defaulted collection, and loosely-shaped fields (`@type`, `action`,
//! `result`) decode through untagged enums covering every shape the suites
//! actually use.
//!
//! A document that is not a JSON object, or whose fields have structurally
//! invalid shapes, fails to decode as a whole. The renderer treats that as a
//! recoverable, per-manifest condition.
//!
//! # Example
//!
//! ```
//! use star_manifest::manifest::{Action, Manifest};
//!
//! let manifest: Manifest = serde_json::from_str(
//!     r##"{
//!         "label": {"en": "Turtle syntax tests"},
//!         "entries": [
//!             {"@id": "#t1", "@type": "PositiveSyntaxTest", "action": "t1.ttl"}
//!         ]
//!     }"##,
//! )
//! .unwrap();
//!
//! assert_eq!(manifest.english_label(), "Turtle syntax tests");
//! assert!(matches!(manifest.entries[0].action, Action::Path(_)));
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ManifestError;

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// One manifest document: suite metadata plus included manifests and test
/// entries.
///
/// A manifest with neither `include` nor `entries` is valid and renders a
/// mostly empty page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Display label keyed by language tag. The report uses `"en"`.
    pub label: BTreeMap<String, String>,
    /// Contributors, in document order.
    pub creator: Vec<Contributor>,
    /// Issue date, rendered verbatim.
    pub issued: Option<String>,
    /// Last-modified date, rendered verbatim.
    pub modified: Option<String>,
    /// Free-text description of the suite.
    pub comment: Option<String>,
    /// Relative paths to child manifest documents, in document order.
    pub include: Vec<String>,
    /// Test entries, in document order.
    pub entries: Vec<TestEntry>,
    /// Either an absolute URL or a relative path to a plain-text file with
    /// more information about the suite.
    #[serde(rename = "seeAlso")]
    pub see_also: Option<String>,
}

impl Manifest {
    /// The English display label, or the empty string when absent.
    pub fn english_label(&self) -> &str {
        self.label.get("en").map(String::as_str).unwrap_or("")
    }
}

/// A contributor record exposing a display name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contributor {
    /// The contributor's display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// TestEntry
// ---------------------------------------------------------------------------

/// One test case within a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct TestEntry {
    /// Test identifier. When absent or not a short-form `#...` reference, a
    /// synthetic identifier is derived from the manifest file name and the
    /// entry's position (see [`EntryFacts::derive`](crate::entry::EntryFacts::derive)).
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    /// Type tag or ordered set of type tags classifying the test.
    #[serde(rename = "@type", default)]
    pub kind: TypeTags,
    /// Display name. Defaults to the identifier minus its leading `#`.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw approval status; normalized case-insensitively, with unrecognized
    /// values falling back to "proposed".
    #[serde(default)]
    pub approval: Option<String>,
    /// Free-text description of the test.
    #[serde(default)]
    pub comment: Option<String>,
    /// Entailment regime under which the test is evaluated.
    #[serde(rename = "entailmentRegime", default)]
    pub entailment_regime: Option<String>,
    /// Datatype IRIs the entailment test recognizes.
    #[serde(rename = "recognizedDatatypes", default)]
    pub recognized_datatypes: Vec<String>,
    /// Datatype IRIs the entailment test does not recognize.
    #[serde(rename = "unrecognizedDatatypes", default)]
    pub unrecognized_datatypes: Vec<String>,
    /// The input artifact(s) the test exercises.
    pub action: Action,
    /// The expected-output artifact, a boolean flag, or absent.
    #[serde(default)]
    pub result: Option<ResultSpec>,
}

// ---------------------------------------------------------------------------
// TypeTags
// ---------------------------------------------------------------------------

/// The `@type` field: a single tag or an ordered set of tags.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeTags {
    /// A single type tag.
    One(String),
    /// An ordered set of type tags.
    Many(Vec<String>),
}

impl TypeTags {
    /// The tags as a slice, in document order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            TypeTags::One(tag) => std::slice::from_ref(tag),
            TypeTags::Many(tags) => tags,
        }
    }

    /// Iterate the tags as string slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.as_slice().iter().map(String::as_str)
    }

    /// True when no tags are present.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Default for TypeTags {
    fn default() -> Self {
        TypeTags::Many(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// The `action` field: a plain file reference, or a structured record
/// pairing a query/request document with a data document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Action {
    /// A single relative file path.
    Path(String),
    /// A structured record; validated by [`Action::parts`].
    Record(ActionRecord),
}

/// The structured form of an [`Action`]. Field presence is validated by
/// [`Action::parts`], not at decode time, so the violation can name the
/// offending entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionRecord {
    /// Relative path to a query document.
    pub query: Option<String>,
    /// Relative path to a protocol request document.
    pub request: Option<String>,
    /// Relative path to the data document the query/request runs against.
    pub data: Option<String>,
}

/// Which kind of primary document a paired action carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairedKind {
    /// A query document.
    Query,
    /// A protocol request document.
    Request,
}

impl PairedKind {
    /// The block title used when rendering the primary document.
    pub fn title(&self) -> &'static str {
        match self {
            PairedKind::Query => "Query",
            PairedKind::Request => "Request",
        }
    }
}

/// A validated view of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionParts<'a> {
    /// A single file reference.
    Single(&'a str),
    /// A query or request document paired with a data document.
    Paired {
        /// Whether the primary document is a query or a request.
        kind: PairedKind,
        /// Relative path to the primary document.
        source: &'a str,
        /// Relative path to the data document.
        data: &'a str,
    },
}

impl Action {
    /// Validate the action and return its parts.
    ///
    /// A structured record must pair `query` with `data` or `request` with
    /// `data`; anything else is a [`ManifestError::MalformedAction`] naming
    /// `entry`. This is unrecoverable for the page being rendered.
    pub fn parts<'a>(&'a self, entry: &str) -> Result<ActionParts<'a>, ManifestError> {
        match self {
            Action::Path(path) => Ok(ActionParts::Single(path)),
            Action::Record(record) => {
                if let (Some(query), Some(data)) = (&record.query, &record.data) {
                    Ok(ActionParts::Paired {
                        kind: PairedKind::Query,
                        source: query,
                        data,
                    })
                } else if let (Some(request), Some(data)) = (&record.request, &record.data) {
                    Ok(ActionParts::Paired {
                        kind: PairedKind::Request,
                        source: request,
                        data,
                    })
                } else {
                    Err(ManifestError::MalformedAction {
                        entry: entry.to_owned(),
                    })
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ResultSpec
// ---------------------------------------------------------------------------

/// The `result` field: a boolean flag, a relative file path, or a mapping
/// whose first value (in document order) is the effective result.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultSpec {
    /// A boolean literal. `false` means the test must produce no result
    /// (a contradiction).
    Flag(bool),
    /// A relative path to an expected-output document.
    Path(String),
    /// A mapping (e.g. keyed by entailment regime). Only the first value in
    /// document order is used; `serde_json`'s `preserve_order` feature keeps
    /// that order observable.
    Mapping(serde_json::Map<String, serde_json::Value>),
}

/// The resolved meaning of a [`ResultSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveResult<'a> {
    /// The test must produce no result.
    Contradiction,
    /// An expected-output document to embed.
    File(&'a str),
    /// Nothing to show.
    Nothing,
}

impl ResultSpec {
    /// Resolve the effective result per the rendering rules.
    pub fn effective(&self) -> EffectiveResult<'_> {
        match self {
            ResultSpec::Flag(false) => EffectiveResult::Contradiction,
            ResultSpec::Flag(true) => EffectiveResult::Nothing,
            ResultSpec::Path(path) if !path.is_empty() => EffectiveResult::File(path),
            ResultSpec::Path(_) => EffectiveResult::Nothing,
            ResultSpec::Mapping(map) => match map.values().next() {
                Some(serde_json::Value::Bool(false)) => EffectiveResult::Contradiction,
                Some(serde_json::Value::String(path)) if !path.is_empty() => {
                    EffectiveResult::File(path)
                }
                _ => EffectiveResult::Nothing,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManifestError;

    // -- 1. Full manifest decodes with every field -------------------------

    #[test]
    fn full_manifest_decodes() {
        let manifest: Manifest = serde_json::from_str(
            r##"{
                "@id": "",
                "label": {"en": "TriG evaluation tests", "fr": "Tests TriG"},
                "creator": [{"name": "Alice"}, {"name": "Bob"}],
                "issued": "2021-06-21",
                "modified": "2021-07-18",
                "comment": "Evaluation tests for TriG.",
                "include": ["sub/manifest.jsonld"],
                "seeAlso": "README",
                "entries": [
                    {
                        "@id": "#trig-eval-01",
                        "@type": ["EvalTest"],
                        "name": "subject quoted triple",
                        "approval": "Approved",
                        "action": "trig-eval-01.trig",
                        "result": "trig-eval-01.nq"
                    }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(manifest.english_label(), "TriG evaluation tests");
        assert_eq!(manifest.creator.len(), 2);
        assert_eq!(manifest.creator[0].name, "Alice");
        assert_eq!(manifest.issued.as_deref(), Some("2021-06-21"));
        assert_eq!(manifest.include, vec!["sub/manifest.jsonld"]);
        assert_eq!(manifest.see_also.as_deref(), Some("README"));
        assert_eq!(manifest.entries.len(), 1);
    }

    // -- 2. Empty object decodes to defaults -------------------------------

    #[test]
    fn empty_object_decodes_to_defaults() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest.english_label(), "");
        assert!(manifest.creator.is_empty());
        assert!(manifest.include.is_empty());
        assert!(manifest.entries.is_empty());
        assert!(manifest.see_also.is_none());
    }

    // -- 3. Non-object documents fail to decode ----------------------------

    #[test]
    fn non_object_documents_fail() {
        assert!(serde_json::from_str::<Manifest>("[]").is_err());
        assert!(serde_json::from_str::<Manifest>("\"manifest\"").is_err());
        assert!(serde_json::from_str::<Manifest>("not json at all").is_err());
    }

    // -- 4. Type tags decode as string or list -----------------------------

    #[test]
    fn type_tags_decode_both_shapes() {
        let one: TypeTags = serde_json::from_str("\"PositiveSyntaxTest\"").unwrap();
        assert_eq!(one.as_slice(), ["PositiveSyntaxTest"]);

        let many: TypeTags =
            serde_json::from_str(r#"["PositiveEntailmentTest", "EvalTest"]"#).unwrap();
        assert_eq!(many.as_slice(), ["PositiveEntailmentTest", "EvalTest"]);

        assert!(TypeTags::default().is_empty());
    }

    // -- 5. Action decodes as path or record -------------------------------

    #[test]
    fn action_decodes_both_shapes() {
        let plain: Action = serde_json::from_str("\"syntax-01.ttl\"").unwrap();
        assert_eq!(plain.parts("#t").unwrap(), ActionParts::Single("syntax-01.ttl"));

        let paired: Action =
            serde_json::from_str(r#"{"query": "q.rq", "data": "d.ttl"}"#).unwrap();
        assert_eq!(
            paired.parts("#t").unwrap(),
            ActionParts::Paired {
                kind: PairedKind::Query,
                source: "q.rq",
                data: "d.ttl",
            }
        );
    }

    // -- 6. Request/data pairing is accepted -------------------------------

    #[test]
    fn request_data_pairing_accepted() {
        let action: Action =
            serde_json::from_str(r#"{"request": "update.ru", "data": "d.trig"}"#).unwrap();
        let parts = action.parts("#t").unwrap();
        assert_eq!(
            parts,
            ActionParts::Paired {
                kind: PairedKind::Request,
                source: "update.ru",
                data: "d.trig",
            }
        );
    }

    // -- 7. Malformed action records are a contract violation --------------

    #[test]
    fn malformed_action_record_rejected() {
        // Missing both pairings entirely.
        let empty: Action = serde_json::from_str("{}").unwrap();
        let err = empty.parts("#broken").unwrap_err();
        assert!(matches!(err, ManifestError::MalformedAction { ref entry } if entry == "#broken"));

        // Query without data.
        let query_only: Action = serde_json::from_str(r#"{"query": "q.rq"}"#).unwrap();
        assert!(query_only.parts("#broken").is_err());

        // Data without query or request.
        let data_only: Action = serde_json::from_str(r#"{"data": "d.ttl"}"#).unwrap();
        assert!(data_only.parts("#broken").is_err());
    }

    // -- 8. Result resolution ----------------------------------------------

    #[test]
    fn result_resolution() {
        let flag: ResultSpec = serde_json::from_str("false").unwrap();
        assert_eq!(flag.effective(), EffectiveResult::Contradiction);

        let passed: ResultSpec = serde_json::from_str("true").unwrap();
        assert_eq!(passed.effective(), EffectiveResult::Nothing);

        let path: ResultSpec = serde_json::from_str("\"eval-01.nq\"").unwrap();
        assert_eq!(path.effective(), EffectiveResult::File("eval-01.nq"));

        let empty: ResultSpec = serde_json::from_str("\"\"").unwrap();
        assert_eq!(empty.effective(), EffectiveResult::Nothing);
    }

    // -- 9. Result mapping takes its first value in document order ---------

    #[test]
    fn result_mapping_takes_first_value() {
        let mapping: ResultSpec =
            serde_json::from_str(r#"{"simple": "out.srx", "RDFS": "other.srx"}"#).unwrap();
        assert_eq!(mapping.effective(), EffectiveResult::File("out.srx"));

        // Key order is document order, not alphabetical: "z" sorts after
        // "RDFS" but comes first in the document.
        let reordered: ResultSpec =
            serde_json::from_str(r#"{"z-regime": false, "RDFS": "other.srx"}"#).unwrap();
        assert_eq!(reordered.effective(), EffectiveResult::Contradiction);

        let empty: ResultSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.effective(), EffectiveResult::Nothing);
    }

    // -- 10. Entry decodes with entailment metadata ------------------------

    #[test]
    fn entry_decodes_entailment_metadata() {
        let entry: TestEntry = serde_json::from_str(
            r##"{
                "@id": "#ent-01",
                "@type": "PositiveEntailmentTest",
                "approval": "Proposed",
                "entailmentRegime": "simple",
                "recognizedDatatypes": ["xsd:string"],
                "unrecognizedDatatypes": [],
                "action": "ent-01.ttl",
                "result": false
            }"##,
        )
        .unwrap();

        assert_eq!(entry.id.as_deref(), Some("#ent-01"));
        assert_eq!(entry.entailment_regime.as_deref(), Some("simple"));
        assert_eq!(entry.recognized_datatypes, vec!["xsd:string"]);
        assert!(entry.unrecognized_datatypes.is_empty());
        assert!(matches!(entry.result, Some(ResultSpec::Flag(false))));
    }
}
