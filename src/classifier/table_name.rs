use std::ops::ControlFlow;

use sqlparser::ast::{
    Insert, ObjectName, ObjectNamePart, Statement, TableObject, visit_relations,
};

/// Classification key for statements that reference no table at all.
pub const FALLBACK_KEY: &str = "general";

/// Classify a statement by the table it primarily concerns.
///
/// Returns the bare name of the first table reference found in a pre-order
/// walk of the statement tree, or [`FALLBACK_KEY`] when there is none. A
/// statement touching several tables is keyed by the first one only; this
/// drives output grouping, not schema validation.
pub fn classify(statement: &Statement) -> String {
    first_table_reference(statement).unwrap_or_else(|| FALLBACK_KEY.to_string())
}

/// The bare (unqualified) name of the first table referenced by `statement`.
pub fn first_table_reference(statement: &Statement) -> Option<String> {
    // Inserts, creates, drops, and truncates name their target on the
    // statement head.
    let direct = match statement {
        Statement::Insert(insert) => insert_target(insert).and_then(bare_name),
        Statement::CreateTable(create) => bare_name(&create.name),
        Statement::Drop { names, .. } => names.first().and_then(bare_name),
        Statement::Truncate { table_names, .. } => table_names
            .first()
            .and_then(|target| bare_name(&target.name)),
        _ => None,
    };
    if direct.is_some() {
        return direct;
    }

    match visit_relations(statement, |relation| match bare_name(relation) {
        Some(name) => ControlFlow::Break(name),
        None => ControlFlow::Continue(()),
    }) {
        ControlFlow::Break(name) => Some(name),
        ControlFlow::Continue(()) => None,
    }
}

/// The rightmost identifier of a possibly schema-qualified object name.
pub fn bare_name(name: &ObjectName) -> Option<String> {
    name.0.last().map(|part| match part {
        ObjectNamePart::Identifier(ident) => ident.value.clone(),
        ObjectNamePart::Function(func) => func.name.value.clone(),
    })
}

/// The target table of an insert, when it is a plain table name.
pub fn insert_target(insert: &Insert) -> Option<&ObjectName> {
    match &insert.table {
        TableObject::TableName(name) => Some(name),
        _ => None,
    }
}
