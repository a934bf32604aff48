use std::collections::HashSet;

use sqlparser::ast::Statement;
use sqlparser::dialect::Dialect;

use crate::classifier;
use crate::error::Error;
use crate::output::renderer::Renderer;
use crate::output::reporter::Reporter;
use crate::parser::dialect;
use crate::transform::{self, Transform};

/// Injects one `TRUNCATE TABLE` guard before the first insert into each
/// table.
///
/// At most one guard is emitted per table per run; later inserts into the
/// same table pass through bare, and everything that is not an insert passes
/// through unchanged, in original order.
pub struct TruncateGuard<'a> {
    dialect: Box<dyn Dialect>,
    renderer: Renderer,
    reporter: &'a Reporter,
}

impl<'a> TruncateGuard<'a> {
    /// Guards are synthesized by parsing under `source_dialect`.
    pub fn new(
        source_dialect: &str,
        renderer: Renderer,
        reporter: &'a Reporter,
    ) -> Result<Self, Error> {
        Ok(Self {
            dialect: dialect::resolve(source_dialect)?,
            renderer,
            reporter,
        })
    }
}

impl Transform for TruncateGuard<'_> {
    fn apply(&self, statements: Vec<Statement>) -> String {
        let mut truncated: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        for statement in &statements {
            if let Statement::Insert(insert) = statement {
                if let Some(table) = classifier::insert_target(insert) {
                    let table = table.to_string();
                    if !truncated.contains(&table) {
                        if let Some(guard) = transform::synthesize_statement(
                            &*self.dialect,
                            &format!("TRUNCATE TABLE {table}"),
                            self.reporter,
                        ) {
                            out.push(format!("{};", self.renderer.render(&guard)));
                        }
                        truncated.insert(table);
                    }
                }
            }
            out.push(format!("{};", self.renderer.render(statement)));
        }
        out.join("\n")
    }
}
