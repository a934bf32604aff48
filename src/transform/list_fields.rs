use std::str::FromStr;

use serde::Serialize;
use sqlparser::ast::{Expr, Query, Select, SelectItem, SetExpr, Statement, TableFactor};

use crate::classifier;
use crate::transform::Transform;

/// Output encodings for the field listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// `field_name,table_name` rows under a header, CRLF terminated.
    Csv,
    /// One JSON object per line.
    Jsonl,
}

impl FromStr for FieldFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "jsonl" => Ok(Self::Jsonl),
            other => Err(format!(
                "unknown output format `{other}` (expected csv or jsonl)"
            )),
        }
    }
}

/// A column reference surfaced by [`ListFields`].
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldRef {
    /// Column name as written.
    pub field_name: String,
    /// Table the column belongs to, when one can be determined.
    pub table_name: String,
}

/// Lists `(field, table)` pairs referenced by the input, in source order.
///
/// Select projections contribute their columns — unqualified columns are
/// attributed to the first `FROM` table, qualified columns to their
/// qualifier — and `CREATE TABLE` statements contribute their column
/// definitions.
pub struct ListFields {
    format: FieldFormat,
}

impl ListFields {
    /// List fields in the given output format.
    pub fn new(format: FieldFormat) -> Self {
        Self { format }
    }

    fn render(&self, fields: &[FieldRef]) -> String {
        match self.format {
            FieldFormat::Csv => {
                let mut out = String::from("field_name,table_name\r\n");
                for field in fields {
                    out.push_str(&field.field_name);
                    out.push(',');
                    out.push_str(&field.table_name);
                    out.push_str("\r\n");
                }
                out
            }
            FieldFormat::Jsonl => fields
                .iter()
                .map(|field| {
                    serde_json::to_string(field).expect("field pair serializes to JSON")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Transform for ListFields {
    fn apply(&self, statements: Vec<Statement>) -> String {
        self.render(&collect_fields(&statements))
    }
}

fn collect_fields(statements: &[Statement]) -> Vec<FieldRef> {
    let mut fields = Vec::new();
    for statement in statements {
        match statement {
            Statement::CreateTable(create) => {
                let table = classifier::bare_name(&create.name).unwrap_or_default();
                for column in &create.columns {
                    fields.push(FieldRef {
                        field_name: column.name.value.clone(),
                        table_name: table.clone(),
                    });
                }
            }
            Statement::Query(query) => collect_query_fields(query, &mut fields),
            _ => {}
        }
    }
    fields
}

fn collect_query_fields(query: &Query, fields: &mut Vec<FieldRef>) {
    let SetExpr::Select(select) = query.body.as_ref() else {
        return;
    };
    let default_table = first_from_table(select);
    for item in &select.projection {
        let expr = match item {
            SelectItem::UnnamedExpr(expr) => expr,
            SelectItem::ExprWithAlias { expr, .. } => expr,
            _ => continue,
        };
        match expr {
            Expr::Identifier(ident) => fields.push(FieldRef {
                field_name: ident.value.clone(),
                table_name: default_table.clone(),
            }),
            Expr::CompoundIdentifier(parts) if parts.len() >= 2 => fields.push(FieldRef {
                field_name: parts[parts.len() - 1].value.clone(),
                table_name: parts[parts.len() - 2].value.clone(),
            }),
            _ => {}
        }
    }
}

fn first_from_table(select: &Select) -> String {
    select
        .from
        .first()
        .map(|table| match &table.relation {
            TableFactor::Table { name, .. } => classifier::bare_name(name).unwrap_or_default(),
            _ => String::new(),
        })
        .unwrap_or_default()
}
