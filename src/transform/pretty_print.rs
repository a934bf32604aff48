use sqlparser::ast::Statement;

use crate::output::renderer::Renderer;
use crate::transform::Transform;

/// Re-renders every statement through the configured renderer.
///
/// Statements whose rendering is empty after trimming are dropped; every
/// kept unit is terminated with `;` and units are separated by a blank line.
pub struct PrettyPrint {
    renderer: Renderer,
}

impl PrettyPrint {
    /// Pretty-print through the given renderer.
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }
}

impl Transform for PrettyPrint {
    fn apply(&self, statements: Vec<Statement>) -> String {
        let mut rendered = Vec::new();
        for statement in &statements {
            let text = self.renderer.render(statement);
            if text.trim().is_empty() {
                continue;
            }
            rendered.push(format!("{text};"));
        }
        rendered.join("\n\n")
    }
}
