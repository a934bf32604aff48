use sqlparser::ast::Statement;
use sqlparser::dialect::Dialect;

use crate::error::Error;
use crate::output::renderer::Renderer;
use crate::output::reporter::Reporter;
use crate::parser::dialect;
use crate::transform::{self, Transform};

/// Injects a `DROP TABLE IF EXISTS` guard before every `CREATE TABLE`.
///
/// Unlike the truncate guard there is no deduplication: every create gets
/// its own guard, in source order.
pub struct DropGuard<'a> {
    dialect: Box<dyn Dialect>,
    renderer: Renderer,
    reporter: &'a Reporter,
}

impl<'a> DropGuard<'a> {
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

impl Transform for DropGuard<'_> {
    fn apply(&self, statements: Vec<Statement>) -> String {
        let mut out = Vec::new();
        for statement in &statements {
            if let Statement::CreateTable(create) = statement {
                if let Some(guard) = transform::synthesize_statement(
                    &*self.dialect,
                    &format!("DROP TABLE IF EXISTS {}", create.name),
                    self.reporter,
                ) {
                    out.push(format!("{};", self.renderer.render(&guard)));
                }
            }
            out.push(format!("{};", self.renderer.render(statement)));
        }
        out.join("\n")
    }
}
