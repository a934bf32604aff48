use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use sqlparser::ast::Statement;

use crate::classifier;
use crate::error::Error;
use crate::output::renderer::Renderer;
use crate::output::reporter::Reporter;

/// Per-section statement count returned by [`Splitter::split`].
#[derive(Debug, PartialEq, Eq)]
pub struct SectionReport {
    /// 1-based section number, in encounter order.
    pub section: usize,
    /// Classification key the section was grouped under.
    pub table: String,
    /// Number of statements routed into the section.
    pub statements: usize,
}

/// Routes an ordered statement sequence into per-table section files.
///
/// Consecutive statements sharing a classification key form a section, and
/// each section is written to `NNNN_<key>.sql` under the output directory.
/// The section number increments exactly when the key changes from the
/// previous statement; a key reappearing after an interruption starts a new,
/// higher-numbered section rather than merging back into an earlier one.
///
/// A file is truncated the first time this call writes to it and appended to
/// afterwards, so a re-run over the same directory always starts clean. The
/// tracking set and open files are scoped to a single [`Splitter::split`]
/// call.
pub struct Splitter<'a> {
    output_directory: PathBuf,
    renderer: Renderer,
    reporter: &'a Reporter,
}

impl<'a> Splitter<'a> {
    /// Create a splitter writing into `output_directory`.
    pub fn new(
        output_directory: impl Into<PathBuf>,
        renderer: Renderer,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            output_directory: output_directory.into(),
            renderer,
            reporter,
        }
    }

    /// Write every statement to its section file, appending a terminator and
    /// newline to each. Returns per-section statement counts for reporting.
    pub fn split(&self, statements: &[Statement]) -> Result<Vec<SectionReport>, Error> {
        fs::create_dir_all(&self.output_directory)?;

        let mut touched: HashSet<PathBuf> = HashSet::new();
        let mut reports: Vec<SectionReport> = Vec::new();
        let mut section = 0usize;
        let mut count = 0usize;
        let mut last_key: Option<String> = None;

        for statement in statements {
            let key = classifier::classify(statement);
            match &last_key {
                None => section = 1,
                Some(last) if *last != key => {
                    self.reporter.note(&format!("{count} statements"));
                    reports.push(SectionReport {
                        section,
                        table: last.clone(),
                        statements: count,
                    });
                    section += 1;
                    count = 0;
                }
                Some(_) => {}
            }

            let path = self
                .output_directory
                .join(format!("{section:04}_{}.sql", file_safe_key(&key)));
            let mut file = self.open_section_file(&path, &mut touched)?;
            writeln!(file, "{};", self.renderer.render(statement))?;

            count += 1;
            last_key = Some(key);
        }

        if let Some(last) = last_key {
            self.reporter.note(&format!("{count} statements"));
            reports.push(SectionReport {
                section,
                table: last,
                statements: count,
            });
        }

        Ok(reports)
    }

    fn open_section_file(
        &self,
        path: &Path,
        touched: &mut HashSet<PathBuf>,
    ) -> Result<File, Error> {
        if touched.insert(path.to_path_buf()) {
            self.reporter
                .note(&format!("writing to {}", path.display()));
            Ok(File::create(path)?)
        } else {
            Ok(OpenOptions::new().append(true).open(path)?)
        }
    }
}

/// Make a classification key safe to embed in a file name.
///
/// Table names can carry quoting, separators, or traversal characters;
/// anything outside `[A-Za-z0-9_.-]` becomes `_`.
fn file_safe_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
