//! Derived per-entry facts and fixed vocabulary lookups.
//!
//! The renderer walks the entry list twice (once for the index, once for the
//! detail sections). [`EntryFacts`] captures everything both passes need --
//! resolved identifier, display name, normalized approval status -- computed
//! once per entry up front and threaded through explicitly, so neither pass
//! recomputes it and the source record stays untouched.

use std::fmt;

use crate::manifest::{TestEntry, TypeTags};

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

/// Normalized approval status of a test entry.
///
/// Raw values are compared case-insensitively on their local part (any
/// vocabulary prefix up to a `:` is ignored). Anything that is not
/// `approved` or `rejected` -- including the `notclassified` placeholder and
/// an absent value -- normalizes to [`Approval::Proposed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    /// The working group approved the test.
    Approved,
    /// The test is proposed (or its status is unknown).
    Proposed,
    /// The working group rejected the test.
    Rejected,
}

impl Approval {
    /// Normalize a raw approval value.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Approval::Proposed;
        };
        let local = raw.rsplit(':').next().unwrap_or(raw);
        if local.eq_ignore_ascii_case("approved") {
            Approval::Approved
        } else if local.eq_ignore_ascii_case("rejected") {
            Approval::Rejected
        } else {
            Approval::Proposed
        }
    }

    /// The lowercase form used for CSS classes and prose.
    pub fn as_str(&self) -> &'static str {
        match self {
            Approval::Approved => "approved",
            Approval::Proposed => "proposed",
            Approval::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntryFacts
// ---------------------------------------------------------------------------

/// Facts derived once per entry and shared by the index and detail passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFacts {
    /// The resolved identifier, always with a leading `#`.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The normalized approval status.
    pub status: Approval,
}

impl EntryFacts {
    /// Derive the facts for `entry` at zero-based position `index` within the
    /// manifest file named `manifest_file_name`.
    ///
    /// The identifier is the entry's `@id` when that is a short-form `#...`
    /// reference; otherwise the synthetic
    /// `#<manifest-file-name>_entry<index>`. The display name is the entry's
    /// `name` when present, else the identifier minus its leading `#`.
    pub fn derive(entry: &TestEntry, manifest_file_name: &str, index: usize) -> Self {
        let id = match &entry.id {
            Some(id) if id.starts_with('#') => id.clone(),
            _ => format!("#{manifest_file_name}_entry{index}"),
        };
        let name = match &entry.name {
            Some(name) => name.clone(),
            None => id.trim_start_matches('#').to_owned(),
        };
        let status = Approval::normalize(entry.approval.as_deref());
        Self { id, name, status }
    }

    /// The identifier without its leading `#`, usable as an HTML anchor.
    pub fn anchor(&self) -> &str {
        self.id.trim_start_matches('#')
    }
}

// ---------------------------------------------------------------------------
// Vocabulary lookups
// ---------------------------------------------------------------------------

/// Human-readable label for a type tag.
///
/// Two entailment-test tags map to prose; every other tag passes through
/// unchanged. The lookup matches on the tag's local part so prefixed forms
/// (`rdft:PositiveEntailmentTest`) resolve too.
pub fn type_label(tag: &str) -> &str {
    let local = tag.rsplit(':').next().unwrap_or(tag);
    match local {
        "PositiveEntailmentTest" => "Positive Entailment Test",
        "NegativeEntailmentTest" => "Negative Entailment Test",
        _ => tag,
    }
}

/// The fixed English expectation sentence for an entry's type tags.
///
/// Entailment and syntax tests have dedicated sentences; any other tag
/// carrying a negative marker reads "MUST NOT result into"; everything else
/// defaults to "MUST result into".
pub fn expectation(tags: &TypeTags) -> &'static str {
    for tag in tags.iter() {
        if tag.contains("PositiveEntailment") {
            return "MUST entail";
        }
        if tag.contains("NegativeEntailment") {
            return "MUST NOT entail";
        }
        if tag.contains("PositiveSyntax") {
            return "MUST be accepted";
        }
        if tag.contains("NegativeSyntax") {
            return "MUST be rejected";
        }
    }
    if tags.iter().any(|tag| tag.contains("Negative")) {
        "MUST NOT result into"
    } else {
        "MUST result into"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
