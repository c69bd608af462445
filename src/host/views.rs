use color_eyre::eyre::Result;
use handlebars::{handlebars_helper, Handlebars};

use crate::widget::{ViewModel, GOOGLE_MAP_TEMPLATE};

/// Host template renderer
pub trait ViewRenderer: Send + Sync {
    fn render_view(&self, template: &str, model: &ViewModel) -> Result<String>;
}

// Percent-encodes a value for use inside a URL query
handlebars_helper!(url_encode: |value: str| {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>()
});

/// Handlebars registry holding the widget templates
pub struct HandlebarsViews {
    registry: Handlebars<'static>,
}

impl HandlebarsViews {
    /// Registry with the Google map template registered under [`GOOGLE_MAP_TEMPLATE`]
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("url_encode", Box::new(url_encode));
        registry.register_template_string(
            GOOGLE_MAP_TEMPLATE,
            include_str!("../../templates/google_map_widget.html.hbs"),
        )?;
        Ok(Self { registry })
    }

    /// Registers or replaces a template
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        self.registry.register_template_string(name, source)?;
        Ok(())
    }
}

impl ViewRenderer for HandlebarsViews {
    fn render_view(&self, template: &str, model: &ViewModel) -> Result<String> {
        Ok(self.registry.render(template, model)?)
    }
}
