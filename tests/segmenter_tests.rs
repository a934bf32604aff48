use sqlcleaver::output::reporter::Reporter;
use sqlcleaver::parser::dialect;
use sqlcleaver::parser::segmenter::{ParseOutcome, Segmenter, collect_parsed};

fn segment(sql: &str) -> Vec<ParseOutcome> {
    let dialect = dialect::resolve("mysql").expect("dialect should resolve");
    Segmenter::new(&*dialect)
        .segment(sql)
        .expect("segmentation should succeed")
}

#[test]
fn segmentation_preserves_source_order() {
    let outcomes = segment("SELECT * from table1; SELECT * FROM table2; SELECT id FROM table1;");
    assert_eq!(outcomes.len(), 3);

    let tables: Vec<String> = outcomes
        .iter()
        .map(|outcome| match outcome {
            ParseOutcome::Parsed(statement) => {
                sqlcleaver::classifier::classify(statement)
            }
            ParseOutcome::Failed { reason, .. } => panic!("unexpected failure: {reason}"),
        })
        .collect();
    assert_eq!(tables, ["table1", "table2", "table1"]);
}

#[test]
fn input_without_terminator_is_one_chunk() {
    let outcomes = segment("SELECT * FROM table1");
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], ParseOutcome::Parsed(_)));
}

#[test]
fn trailing_terminator_adds_no_empty_outcome() {
    let outcomes = segment("SELECT 1;");
    assert_eq!(outcomes.len(), 1);
}

#[test]
fn consecutive_terminators_add_no_empty_outcomes() {
    let outcomes = segment("SELECT 1;;SELECT 2;");
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, ParseOutcome::Parsed(_))));
}

#[test]
fn empty_input_yields_no_outcomes() {
    assert!(segment("").is_empty());
}

#[test]
fn malformed_chunk_is_isolated() {
    let outcomes = segment("SELECT * FROM t1; THIS IS NOT SQL; SELECT * FROM t2;");
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], ParseOutcome::Parsed(_)));
    assert!(matches!(outcomes[2], ParseOutcome::Parsed(_)));

    match &outcomes[1] {
        ParseOutcome::Failed { reason, text } => {
            assert!(!reason.is_empty());
            assert!(text.contains("THIS IS NOT SQL"), "chunk text was: {text}");
        }
        ParseOutcome::Parsed(statement) => panic!("garbage parsed as {statement}"),
    }
}

#[test]
fn collect_parsed_reports_and_drops_failures() {
    let outcomes = segment("SELECT * FROM t1; %%%garbage%%%; SELECT * FROM t2;");
    let reporter = Reporter::memory();
    let statements = collect_parsed(outcomes, &reporter);

    assert_eq!(statements.len(), 2);
    let warnings = reporter.lines();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("!!"), "warning was: {}", warnings[0]);
}

#[test]
fn all_chunks_failing_still_yields_a_result() {
    let outcomes = segment("not sql at all; nor is this;");
    assert_eq!(outcomes.len(), 2);
    let statements = collect_parsed(outcomes, &Reporter::silent());
    assert!(statements.is_empty());
}
