//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is on, so values taken
//! from posts and queries are inserted as plain context values; rendered
//! markdown goes through the `safe` filter.

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer over the embedded templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all page templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("layout.html")),
            ("blog.html", include_str!("blog.html")),
            ("post.html", include_str!("post.html")),
            ("not_found.html", include_str!("not_found.html")),
            ("login.html", include_str!("login.html")),
            ("write.html", include_str!("write.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}
