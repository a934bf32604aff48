use sqlparser::ast::Statement;
use sqlparser::dialect::Dialect;
use sqlparser::parser::Parser;

use crate::output::reporter::Reporter;

/// `DROP TABLE IF EXISTS` guard injection.
pub mod drop_guard;
/// Substring filtering of rendered statements.
pub mod grep;
/// Field listing in CSV or JSONL form.
pub mod list_fields;
/// Reformatting of every statement.
pub mod pretty_print;
/// Consistent table renaming.
pub mod rename;
/// `TRUNCATE TABLE` guard injection.
pub mod truncate_guard;

/// A single pass over the ordered statement sequence, producing output text.
///
/// Transforms share no base state: the renderer, dialect, and reporter a
/// transform needs are passed in explicitly at construction, and all
/// per-run state lives inside one `apply` call.
pub trait Transform {
    /// Consume the statements in source order and produce the final text.
    fn apply(&self, statements: Vec<Statement>) -> String;
}

/// Parse one synthesized statement (a guard) under the source dialect.
///
/// Synthesis failures are reported and yield `None`; the surrounding
/// transform carries on with the untouched input statement.
pub(crate) fn synthesize_statement(
    dialect: &dyn Dialect,
    sql: &str,
    reporter: &Reporter,
) -> Option<Statement> {
    match Parser::new(dialect)
        .try_with_sql(sql)
        .and_then(|mut parser| parser.parse_statement())
    {
        Ok(statement) => Some(statement),
        Err(reason) => {
            reporter.warn(&format!("could not synthesize guard `{sql}`: {reason}"));
            None
        }
    }
}
