use crate::error::{Error, Result};
use crate::renderer::minijinja::{HtmlTemplates, TextTemplates};
use crate::template::TemplateMode;
use std::io::Write;

/// A parsed set of named templates.
///
/// Implemented by [`HtmlTemplates`] and [`TextTemplates`]; use
/// [`Templater::as_html`] / [`Templater::as_text`] to reach the concrete
/// backend.
pub trait Templater: Send + Sync {
    /// Renders the default template (the first file parsed) into `w`.
    ///
    /// # Arguments
    /// * `w` - Sink for the rendered output
    /// * `context` - Data the template reads its fields from
    ///
    /// # Returns
    /// * `Result<()>` - `Error::Render` when the context does not satisfy the template
    fn execute(&self, w: &mut dyn Write, context: &serde_json::Value) -> Result<()>;

    /// Renders the template registered under `name` into `w`.
    ///
    /// # Arguments
    /// * `w` - Sink for the rendered output
    /// * `name` - File name the template was parsed from, e.g. `greet.tmpl`
    /// * `context` - Data the template reads its fields from
    ///
    /// # Returns
    /// * `Result<()>` - `Error::TemplateNotFound` for an unknown name,
    ///   `Error::Render` when rendering fails
    fn execute_template(
        &self,
        w: &mut dyn Write,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<()>;

    /// Names of all templates in parse order.
    fn template_names(&self) -> &[String];

    /// Name of the template [`Templater::execute`] renders.
    fn default_name(&self) -> Option<&str> {
        self.template_names().first().map(String::as_str)
    }

    fn mode(&self) -> TemplateMode;

    fn as_html(&self) -> Option<&HtmlTemplates> {
        None
    }

    fn as_text(&self) -> Option<&TextTemplates> {
        None
    }

    /// Renders the default template into a string.
    fn render(&self, context: &serde_json::Value) -> Result<String> {
        let mut buf = Vec::new();
        self.execute(&mut buf, context)?;
        into_string(buf)
    }

    /// Renders the named template into a string.
    fn render_template(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        let mut buf = Vec::new();
        self.execute_template(&mut buf, name, context)?;
        into_string(buf)
    }
}

fn into_string(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|e| Error::Other(e.into()))
}
