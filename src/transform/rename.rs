use std::ops::ControlFlow;

use regex::Regex;
use sqlparser::ast::{
    Expr, Ident, ObjectNamePart, Statement, visit_expressions_mut, visit_relations_mut,
};

use crate::error::Error;
use crate::output::renderer::Renderer;
use crate::transform::Transform;

/// A table rename: a pattern matched against bare identifier names and a
/// replacement template with `$1`-style capture references.
#[derive(Debug)]
pub struct RenameRule {
    pattern: Regex,
    replacement: String,
}

impl RenameRule {
    /// Compile a rule; an invalid pattern is a configuration error.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// Apply the rule to a bare identifier; `None` when nothing matched.
    ///
    /// A pure function of the input string: two occurrences of the same
    /// original name always map to the same new name, which is what keeps
    /// joins and qualified references consistent after a rename.
    pub fn apply(&self, name: &str) -> Option<String> {
        let replaced = self.pattern.replace_all(name, self.replacement.as_str());
        if replaced == name {
            None
        } else {
            Some(replaced.into_owned())
        }
    }
}

/// Rename every table reference and column-table qualifier in `statement`.
///
/// Table references are renamed on their bare name, preserving any schema
/// qualifier. Column references carrying a table qualifier have that
/// qualifier rewritten through the identical rule, so a table renamed in
/// `FROM` keeps matching its qualified columns. No other node is touched.
pub fn rewrite(statement: &mut Statement, rule: &RenameRule) {
    let _ = visit_relations_mut(statement, |relation| {
        if let Some(ObjectNamePart::Identifier(ident)) = relation.0.last_mut() {
            if let Some(renamed) = rule.apply(&ident.value) {
                *ident = Ident::new(renamed);
            }
        }
        ControlFlow::<()>::Continue(())
    });

    let _ = visit_expressions_mut(statement, |expr| {
        if let Expr::CompoundIdentifier(parts) = expr {
            // The identifier right before the column is the table qualifier.
            if parts.len() >= 2 {
                let qualifier = parts.len() - 2;
                if let Some(renamed) = rule.apply(&parts[qualifier].value) {
                    parts[qualifier] = Ident::new(renamed);
                }
            }
        }
        ControlFlow::<()>::Continue(())
    });
}

/// Applies a [`RenameRule`] to every statement and re-renders it.
pub struct TableNameReplace {
    rule: RenameRule,
    renderer: Renderer,
}

impl TableNameReplace {
    /// Rename through `rule`, rendering with `renderer`.
    pub fn new(rule: RenameRule, renderer: Renderer) -> Self {
        Self { rule, renderer }
    }
}

impl Transform for TableNameReplace {
    fn apply(&self, mut statements: Vec<Statement>) -> String {
        let mut out = Vec::new();
        for statement in &mut statements {
            rewrite(statement, &self.rule);
            out.push(format!("{};", self.renderer.render(statement)));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, replacement: &str) -> RenameRule {
        RenameRule::new(pattern, replacement).expect("test pattern should compile")
    }

    #[test]
    fn apply_substitutes_capture_groups() {
        let rule = rule(r"^table(\d+)$", "new_table$1");
        assert_eq!(rule.apply("table1"), Some("new_table1".to_string()));
        assert_eq!(rule.apply("table22"), Some("new_table22".to_string()));
    }

    #[test]
    fn apply_returns_none_when_unmatched() {
        let rule = rule(r"^table(\d+)$", "new_table$1");
        assert_eq!(rule.apply("users"), None);
        assert_eq!(rule.apply("table"), None);
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let err = RenameRule::new("(", "x").expect_err("unbalanced paren should fail");
        assert!(err.to_string().starts_with("invalid table name pattern"));
    }
}
