use std::ops::ControlFlow;

use sqlparser::ast::{Expr, Ident, ObjectName, ObjectNamePart, Statement, VisitMut, VisitorMut};
use sqlparser::dialect::Dialect;

use crate::error::Error;
use crate::parser::dialect;

/// Rendering configuration, resolved once at the command boundary.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Dialect whose conventions drive identifier quoting in the output.
    pub output_dialect: String,
    /// Indent and line-break statements instead of emitting compact single
    /// lines.
    pub pretty: bool,
    /// Add quotes to every identifier reachable in the statement tree.
    pub quote_identifiers: bool,
}

impl RenderOptions {
    /// Compact, unquoted output, as used for section files and injected
    /// statements.
    pub fn compact(output_dialect: &str) -> Self {
        Self {
            output_dialect: output_dialect.to_string(),
            pretty: false,
            quote_identifiers: false,
        }
    }

    /// Pretty, quoted output for human consumption.
    pub fn display(output_dialect: &str) -> Self {
        Self {
            output_dialect: output_dialect.to_string(),
            pretty: true,
            quote_identifiers: true,
        }
    }
}

/// Renders parsed statements back to SQL text.
///
/// Text generation is delegated to the SQL front end, which emits canonical
/// SQL; the configured output dialect decides the identifier quote character,
/// so the same-dialect and cross-dialect paths are uniform.
pub struct Renderer {
    dialect: Box<dyn Dialect>,
    pretty: bool,
    quote_identifiers: bool,
}

impl Renderer {
    /// Build a renderer, resolving the output dialect name.
    pub fn new(options: &RenderOptions) -> Result<Self, Error> {
        Ok(Self {
            dialect: dialect::resolve(&options.output_dialect)?,
            pretty: options.pretty,
            quote_identifiers: options.quote_identifiers,
        })
    }

    /// Render one statement, without a trailing terminator.
    pub fn render(&self, statement: &Statement) -> String {
        if self.quote_identifiers {
            let mut quoted = statement.clone();
            let _ = quoted.visit(&mut IdentifierQuoter {
                dialect: &*self.dialect,
            });
            self.text(&quoted)
        } else {
            self.text(statement)
        }
    }

    fn text(&self, statement: &Statement) -> String {
        if self.pretty {
            format!("{statement:#}")
        } else {
            statement.to_string()
        }
    }
}

/// Adds the output dialect's quote character to every unquoted identifier
/// reachable through relations and expressions. Already-quoted identifiers
/// keep their original style.
struct IdentifierQuoter<'a> {
    dialect: &'a dyn Dialect,
}

impl IdentifierQuoter<'_> {
    fn quote(&self, ident: &mut Ident) {
        if ident.quote_style.is_none() {
            ident.quote_style = Some(
                self.dialect
                    .identifier_quote_style(&ident.value)
                    .unwrap_or('"'),
            );
        }
    }
}

impl VisitorMut for IdentifierQuoter<'_> {
    type Break = ();

    fn post_visit_relation(&mut self, relation: &mut ObjectName) -> ControlFlow<()> {
        for part in &mut relation.0 {
            if let ObjectNamePart::Identifier(ident) = part {
                self.quote(ident);
            }
        }
        ControlFlow::Continue(())
    }

    fn post_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<()> {
        match expr {
            Expr::Identifier(ident) => self.quote(ident),
            Expr::CompoundIdentifier(parts) => {
                for ident in parts {
                    self.quote(ident);
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }
}
