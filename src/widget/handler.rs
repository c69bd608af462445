use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    time::Duration,
};

use thiserror::Error;

use super::{ComponentViewModel, ViewModel, WidgetProperties, GOOGLE_MAP_TEMPLATE};
use crate::host::{
    config::ConfigLookup,
    event_log::{ErrorLogger, LoggingPolicy},
    views::ViewRenderer,
};

/// Configuration key holding the Google Maps API key
pub const API_KEY_SETTING: &str = "GoogleMapsApiKey";

pub const LOG_SOURCE: &str = "Google Map Widget";
pub const LOG_OPERATION: &str = "Load";
/// Repeated load errors are written at most once per window
pub const LOG_COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Widget properties were not provided or are null.")]
    MissingInput,
    #[error("{0}")]
    Unexpected(String),
}

impl From<color_eyre::Report> for RenderError {
    fn from(value: color_eyre::Report) -> Self {
        RenderError::Unexpected(value.to_string())
    }
}

/// What the host page receives from the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    View(String),
    Empty,
}

impl RenderOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutput::Empty)
    }

    pub fn into_html(self) -> String {
        match self {
            RenderOutput::View(html) => html,
            RenderOutput::Empty => String::new(),
        }
    }
}

/// Maps author properties and host configuration onto the template's view model
pub fn build_view_model(
    properties: &WidgetProperties,
    config: &dyn ConfigLookup,
) -> Result<ViewModel, RenderError> {
    Ok(ViewModel {
        is_visible: properties.is_visible,
        latitude: properties.latitude.clone().unwrap_or_default(),
        longitude: properties.longitude.clone().unwrap_or_default(),
        api_key: config.value(API_KEY_SETTING)?.unwrap_or_default(),
        css_class: properties.css_class_name.clone(),
    })
}

/// Renders the widget once with the given host services
pub fn render(
    input: Option<&ComponentViewModel<WidgetProperties>>,
    config: &dyn ConfigLookup,
    logger: &dyn ErrorLogger,
    views: &dyn ViewRenderer,
) -> RenderOutput {
    GoogleMapWidget::new(config, logger, views).invoke(input)
}

/// The Google map widget bound to the host services it renders with.
///
/// Rendering never fails from the caller's point of view: every error, including a panic
/// inside a host service, is written to the event log and the widget renders nothing.
pub struct GoogleMapWidget<'a> {
    config: &'a dyn ConfigLookup,
    logger: &'a dyn ErrorLogger,
    views: &'a dyn ViewRenderer,
}

impl<'a> GoogleMapWidget<'a> {
    pub fn new(
        config: &'a dyn ConfigLookup,
        logger: &'a dyn ErrorLogger,
        views: &'a dyn ViewRenderer,
    ) -> Self {
        Self {
            config,
            logger,
            views,
        }
    }

    pub fn invoke(&self, input: Option<&ComponentViewModel<WidgetProperties>>) -> RenderOutput {
        match self.render_guarded(input) {
            Ok(html) => RenderOutput::View(html),
            Err(err) => {
                self.log_load_error(&err.to_string());
                RenderOutput::Empty
            }
        }
    }

    /// Builds the view model and renders the template, surfacing any failure
    pub fn try_render(&self, properties: &WidgetProperties) -> Result<String, RenderError> {
        let view_model = build_view_model(properties, self.config)?;
        Ok(self.views.render_view(GOOGLE_MAP_TEMPLATE, &view_model)?)
    }

    fn render_guarded(
        &self,
        input: Option<&ComponentViewModel<WidgetProperties>>,
    ) -> Result<String, RenderError> {
        let properties = input
            .and_then(|envelope| envelope.properties.as_ref())
            .ok_or(RenderError::MissingInput)?;
        panic::catch_unwind(AssertUnwindSafe(|| self.try_render(properties)))
            .unwrap_or_else(|payload| Err(RenderError::Unexpected(panic_message(payload.as_ref()))))
    }

    // A panicking event log is dropped; the widget still renders nothing
    fn log_load_error(&self, description: &str) {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            self.logger.log_error(
                LOG_SOURCE,
                LOG_OPERATION,
                description,
                LoggingPolicy::with_cooldown(LOG_COOLDOWN),
            )
        }));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
