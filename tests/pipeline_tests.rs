//! Whole-pipeline tests: segment a dump with defects, then transform it.

use std::fs;

use sqlcleaver::output::reporter::Reporter;
use sqlcleaver::output::splitter::Splitter;
use sqlcleaver::parser::dialect;
use sqlcleaver::parser::segmenter::{Segmenter, collect_parsed};
use sqlcleaver::transform::Transform;
use sqlcleaver::transform::grep::Grep;

mod support;

const DUMP: &str = "\
CREATE TABLE table1 (id INT);\n\
INSERT INTO table1 VALUES (1);\n\
this chunk is not valid sql;\n\
CREATE TABLE table2 (id INT);\n\
SELECT * FROM table1;\n";

#[test]
fn defective_chunk_does_not_derail_split() {
    let dir = support::unique_path("sqlcleaver_pipeline_split");
    let reporter = Reporter::memory();

    let mysql = dialect::resolve("mysql").expect("dialect should resolve");
    let outcomes = Segmenter::new(&*mysql)
        .segment(DUMP)
        .expect("segmentation should succeed");
    assert_eq!(outcomes.len(), 5);

    let statements = collect_parsed(outcomes, &reporter);
    assert_eq!(statements.len(), 4);
    assert_eq!(reporter.lines().len(), 1, "one warning for the bad chunk");

    let splitter = Splitter::new(&dir, support::compact_renderer("mysql"), &reporter);
    let reports = splitter.split(&statements).expect("split should succeed");

    // table1 runs, is interrupted by table2, then reappears as a new section.
    let tables: Vec<&str> = reports.iter().map(|report| report.table.as_str()).collect();
    assert_eq!(tables, ["table1", "table2", "table1"]);
    assert!(dir.join("0003_table1.sql").exists());

    fs::remove_dir_all(&dir).expect("cleanup should succeed");
}

#[test]
fn defective_chunk_does_not_derail_grep() {
    let statements = support::statements(DUMP, "mysql");
    let grep = Grep::new("table1", false, support::display_renderer("mysql"));
    let output = grep.apply(statements);

    assert!(output.contains("table1"));
    assert!(!output.contains("table2"));
    assert!(!output.contains("not valid"));
}

#[test]
fn fully_defective_input_produces_empty_output() {
    let statements = support::statements("garbage one; garbage two;", "mysql");
    assert!(statements.is_empty());

    let grep = Grep::new("anything", false, support::display_renderer("mysql"));
    assert_eq!(grep.apply(statements), "");
}
