//! Render the eight top-level RDF-star test-suite manifests to HTML.
//!
//! No flags, no configuration: each fixed entry point is rendered in turn,
//! and included sub-manifests are rendered recursively. `RUST_LOG` filters
//! the diagnostic stream only.

use std::path::Path;

use star_report::render::render;

/// The fixed top-level manifests: the four suite families with their syntax
/// and evaluation phases, plus the semantics manifest.
const TOP_LEVEL_MANIFESTS: [&str; 8] = [
    "tests/turtle/syntax/manifest.jsonld",
    "tests/turtle/eval/manifest.jsonld",
    "tests/trig/syntax/manifest.jsonld",
    "tests/trig/eval/manifest.jsonld",
    "tests/nt/syntax/manifest.jsonld",
    "tests/sparql/syntax/manifest.jsonld",
    "tests/sparql/eval/manifest.jsonld",
    "tests/semantics/manifest.jsonld",
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Each top-level rendering is independent; an unparseable manifest is
    // logged and skipped inside `render`. Only contract violations and
    // write failures abort the run.
    for path in TOP_LEVEL_MANIFESTS {
        render(Path::new(path))?;
    }
    Ok(())
}
