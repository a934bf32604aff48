use sqlparser::ast::Statement;

use crate::output::renderer::Renderer;
use crate::transform::Transform;

/// Keeps or drops statements by substring match on their rendered text.
///
/// Matching happens on the generated text, not on the tree, so case and
/// formatting are whatever the renderer produced. With `invert` set, only
/// non-matching statements are kept.
pub struct Grep {
    pattern: String,
    invert: bool,
    renderer: Renderer,
}

impl Grep {
    /// Filter by `pattern`, keeping matches (or non-matches with `invert`).
    pub fn new(pattern: impl Into<String>, invert: bool, renderer: Renderer) -> Self {
        Self {
            pattern: pattern.into(),
            invert,
            renderer,
        }
    }
}

impl Transform for Grep {
    fn apply(&self, statements: Vec<Statement>) -> String {
        let mut kept = Vec::new();
        for statement in &statements {
            let text = self.renderer.render(statement);
            if text.contains(&self.pattern) != self.invert {
                kept.push(format!("{text};"));
            }
        }
        kept.join("\n")
    }
}
