//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sqlcleaver::output::renderer::{RenderOptions, Renderer};
use sqlcleaver::output::reporter::Reporter;
use sqlcleaver::parser::dialect;
use sqlcleaver::parser::segmenter::{self, Segmenter};
use sqlparser::ast::Statement;

/// Parse `sql` under the given dialect, dropping failed chunks silently.
pub fn statements(sql: &str, dialect_name: &str) -> Vec<Statement> {
    let dialect = dialect::resolve(dialect_name).expect("dialect should resolve");
    let outcomes = Segmenter::new(&*dialect)
        .segment(sql)
        .expect("segmentation should succeed");
    segmenter::collect_parsed(outcomes, &Reporter::silent())
}

/// A compact, unquoted renderer for the given output dialect.
pub fn compact_renderer(dialect_name: &str) -> Renderer {
    Renderer::new(&RenderOptions::compact(dialect_name)).expect("renderer should build")
}

/// A pretty, quoted renderer for the given output dialect.
pub fn display_renderer(dialect_name: &str) -> Renderer {
    Renderer::new(&RenderOptions::display(dialect_name)).expect("renderer should build")
}

/// A unique, not-yet-existing path under the system temp directory.
pub fn unique_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{nanos}"))
}
