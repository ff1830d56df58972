//! The manifest renderer.
//!
//! [`render`] loads one JSON manifest, writes its HTML counterpart beside the
//! source file, and recursively renders every manifest it includes
//! (depth-first: each child page is fully written before the parent's list
//! item linking to it is emitted). A manifest that cannot be read or parsed
//! is logged and skipped; sibling renderings are unaffected. A referenced
//! file that cannot be read degrades to an inline diagnostic. A structured
//! action record that lacks its required field pairing is a data-contract
//! violation and aborts the page.
//!
//! Output is deterministic: a fixed manifest tree plus fixed file-system
//! contents renders to byte-identical pages on every run.

use std::fs;
use std::path::Path;

use star_manifest::entry::{expectation, type_label, EntryFacts};
use star_manifest::manifest::{ActionParts, EffectiveResult, Manifest, TestEntry};

use crate::html::{escape, Html, STYLE};
use crate::ReportError;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Render the manifest at `path` to an HTML file with the same base name,
/// and recursively render every included manifest.
///
/// Returns `Ok(())` without writing anything when the document cannot be
/// read or parsed as a manifest object (logged, recoverable). Returns an
/// error only for data-contract violations and output write failures.
pub fn render(path: &Path) -> Result<(), ReportError> {
    let Some(manifest) = load(path) else {
        return Ok(());
    };

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Derived facts feed both the index pass and the detail pass.
    let facts: Vec<EntryFacts> = manifest
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| EntryFacts::derive(entry, &file_name, index))
        .collect();

    let mut w = Html::new();
    header(&mut w, &manifest);
    properties(&mut w, &manifest, &file_name);
    includes(&mut w, &manifest, dir)?;
    entry_index(&mut w, &facts);
    about(&mut w, &manifest, dir);
    for (entry, facts) in manifest.entries.iter().zip(&facts) {
        entry_detail(&mut w, entry, facts, dir)?;
    }
    w.push("</body>\n</html>\n");

    let out_path = path.with_extension("html");
    fs::write(&out_path, w.finish()).map_err(|source| ReportError::WriteFailed {
        path: out_path.clone(),
        source,
    })?;
    tracing::debug!(path = %out_path.display(), "wrote report");
    Ok(())
}

/// Read and decode one manifest document. Both read and parse failures are
/// recoverable and scoped to this path.
fn load(path: &Path) -> Option<Manifest> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "don't know how to parse {}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::warn!(error = %e, "don't know how to parse {}", path.display());
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

/// Document shell, title, level-1 heading, and the optional suite comment.
fn header(w: &mut Html, manifest: &Manifest) {
    let label = manifest.english_label();
    w.push("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
    w.push(STYLE);
    w.push("</style>\n<title>");
    w.text(label);
    w.push("</title>\n</head>\n<body>\n<h1>");
    w.text(label);
    w.push("</h1>\n");
    if let Some(comment) = &manifest.comment {
        w.push("<p>");
        w.text(comment);
        w.push("</p>\n");
    }
}

/// Suite properties: source link, creators, dates, see-also link.
fn properties(w: &mut Html, manifest: &Manifest, file_name: &str) {
    w.push("<table class=\"props\">\n");
    let source = escape(file_name);
    w.push(&format!(
        "<tr><th>source</th><td><a href=\"{source}\">{source}</a></td></tr>\n"
    ));
    for creator in &manifest.creator {
        w.push("<tr><th>creator</th><td>");
        w.text(&creator.name);
        w.push("</td></tr>\n");
    }
    if let Some(issued) = &manifest.issued {
        w.push("<tr><th>issued</th><td>");
        w.text(issued);
        w.push("</td></tr>\n");
    }
    if let Some(modified) = &manifest.modified {
        w.push("<tr><th>modified</th><td>");
        w.text(modified);
        w.push("</td></tr>\n");
    }
    if let Some(see_also) = &manifest.see_also {
        let href = escape(see_also);
        w.push(&format!(
            "<tr><th>see also</th><td><a href=\"{href}\">{href}</a></td></tr>\n"
        ));
    }
    w.push("</table>\n");
}

/// Included child manifests: each is rendered recursively before its list
/// item (linking to the child's HTML counterpart) is emitted.
fn includes(w: &mut Html, manifest: &Manifest, dir: &Path) -> Result<(), ReportError> {
    if manifest.include.is_empty() {
        return Ok(());
    }
    w.push("<h2>Includes</h2>\n<ul>\n");
    for reference in &manifest.include {
        render(&dir.join(reference))?;
        let href = Path::new(reference)
            .with_extension("html")
            .to_string_lossy()
            .into_owned();
        let display = Path::new(reference)
            .with_extension("")
            .to_string_lossy()
            .into_owned();
        w.push(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape(&href),
            escape(&display)
        ));
    }
    w.push("</ul>\n");
    Ok(())
}

/// Index of test entries, each item carrying its approval status as a CSS
/// class and linking to the detail section.
fn entry_index(w: &mut Html, facts: &[EntryFacts]) {
    if facts.is_empty() {
        return;
    }
    w.push("<h2>Tests</h2>\n<ul class=\"tests\">\n");
    for f in facts {
        w.push(&format!(
            "<li class=\"{}\"><a href=\"#{}\">{}</a></li>\n",
            f.status,
            escape(f.anchor()),
            escape(&f.name)
        ));
    }
    w.push("</ul>\n");
}

/// About-this-suite block. An absolute URL renders as a link; a relative
/// path renders its raw text content verbatim -- intentionally unescaped, the
/// file is assumed to be plain text or pre-escaped.
fn about(w: &mut Html, manifest: &Manifest, dir: &Path) {
    let Some(see_also) = &manifest.see_also else {
        return;
    };
    w.push("<h2>About this test suite</h2>\n");
    if see_also.starts_with("http://") || see_also.starts_with("https://") {
        let href = escape(see_also);
        w.push(&format!("<p><a href=\"{href}\">{href}</a></p>\n"));
    } else {
        w.push("<pre>\n");
        let full = dir.join(see_also);
        match fs::read_to_string(&full) {
            Ok(text) => w.push(&text),
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "problem rendering file");
                w.push(&escape(&format!("(problem rendering file) {e}")));
            }
        }
        w.push("</pre>\n");
    }
}

// ---------------------------------------------------------------------------
// Entry detail
// ---------------------------------------------------------------------------

/// One self-contained detail section per entry: heading with permalink,
/// optional comment, properties table, action block(s), expectation
/// sentence, and result block.
fn entry_detail(
    w: &mut Html,
    entry: &TestEntry,
    facts: &EntryFacts,
    dir: &Path,
) -> Result<(), ReportError> {
    let mut classes = format!("entry {}", facts.status);
    for tag in entry.kind.iter() {
        classes.push(' ');
        classes.push_str(tag);
    }
    w.push(&format!(
        "<section id=\"{}\" class=\"{}\">\n",
        escape(facts.anchor()),
        escape(&classes)
    ));
    w.push("<h2>");
    w.text(&facts.name);
    w.push(&format!(
        " <a class=\"permalink\" href=\"#{}\">&sect;</a></h2>\n",
        escape(facts.anchor())
    ));
    if let Some(comment) = &entry.comment {
        w.push("<p>");
        w.text(comment);
        w.push("</p>\n");
    }

    w.push("<table class=\"props\">\n");
    w.push(&format!(
        "<tr><th>status</th><td>{}</td></tr>\n",
        facts.status
    ));
    let types = entry
        .kind
        .iter()
        .map(type_label)
        .collect::<Vec<_>>()
        .join(" ");
    w.push("<tr><th>type</th><td>");
    w.text(&types);
    w.push("</td></tr>\n");
    if let Some(regime) = &entry.entailment_regime {
        w.push("<tr><th>entailment regime</th><td>");
        w.text(regime);
        w.push("</td></tr>\n");
    }
    if !entry.recognized_datatypes.is_empty() {
        w.push("<tr><th>recognized datatypes</th><td>");
        w.text(&entry.recognized_datatypes.join(" "));
        w.push("</td></tr>\n");
    }
    if !entry.unrecognized_datatypes.is_empty() {
        w.push("<tr><th>unrecognized datatypes</th><td>");
        w.text(&entry.unrecognized_datatypes.join(" "));
        w.push("</td></tr>\n");
    }
    w.push("</table>\n");

    match entry.action.parts(&facts.id)? {
        ActionParts::Single(path) => file_block(w, "Action", path, dir),
        ActionParts::Paired { kind, source, data } => {
            file_block(w, kind.title(), source, dir);
            file_block(w, "Data", data, dir);
        }
    }

    w.push(&format!(
        "<p class=\"expect\">{}</p>\n",
        expectation(&entry.kind)
    ));

    if let Some(result) = &entry.result {
        match result.effective() {
            EffectiveResult::Contradiction => {
                w.push("<p class=\"result\">a contradiction</p>\n");
            }
            EffectiveResult::File(path) => file_block(w, "Result", path, dir),
            EffectiveResult::Nothing => {}
        }
    }

    w.push("</section>\n");
    Ok(())
}

/// A linked, escaped, verbatim file block: a link line naming the relative
/// path, then the file's content inside `<pre>`. A read failure degrades to
/// an inline diagnostic (also logged) and the block still closes.
fn file_block(w: &mut Html, title: &str, reference: &str, dir: &Path) {
    let href = escape(reference);
    w.push(&format!(
        "<p class=\"file\">{}: <a href=\"{href}\">{href}</a></p>\n",
        escape(title)
    ));
    w.push("<pre>");
    let full = dir.join(reference);
    match fs::read_to_string(&full) {
        Ok(text) => w.push(&escape(&text)),
        Err(e) => {
            tracing::warn!(path = %full.display(), error = %e, "problem rendering file");
            w.push(&escape(&format!("(problem rendering file) {e}")));
        }
    }
    w.push("</pre>\n");
}
