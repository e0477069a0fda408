use crate::error::GeneratorError;

/// Renders a named template with a JSON context.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, GeneratorError>;
}
