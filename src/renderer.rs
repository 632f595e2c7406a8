//! Template rendering engine.
//! Substitutes configuration values into template text with MiniJinja.
use crate::error::{Error, Result};
use minijinja::Environment;

/// Trait for template rendering engines.
///
/// Implementations are shared across the threads rendering one group, hence `Sync`.
pub trait TemplateRenderer: Sync {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer that keeps the trailing newline of templates,
    /// so rendered files end exactly like their sources.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template does not parse or fails to render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template_owned("temp", template.to_string()).map_err(Error::MinijinjaError)?;

        let tmpl = env.get_template("temp").map_err(Error::MinijinjaError)?;

        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_trailing_newline() {
        let engine = MiniJinjaRenderer::new();
        let context = serde_json::json!({ "appName": "demo" });
        assert_eq!(engine.render("name: {{ appName }}\n", &context).unwrap(), "name: demo\n");
    }
}
