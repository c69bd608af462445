//! Host services the widget is rendered with: configuration, event log and templates.

pub mod config;
pub mod event_log;
pub mod views;

use color_eyre::eyre::Result;
use tracing::info;

use crate::{settings::ServerSettings, widget::GoogleMapWidget};
use config::{ConfigLookup, EnvConfiguration, JsonConfiguration, LayeredConfiguration};
use event_log::{ErrorLogger, TracingEventLog};
use views::{HandlebarsViews, ViewRenderer};

/// Prefix of environment variables that override host configuration
pub const ENV_CONFIG_PREFIX: &str = "GOOGLE_MAP_WIDGET_";

pub struct WidgetHost {
    config: Box<dyn ConfigLookup>,
    event_log: Box<dyn ErrorLogger>,
    views: Box<dyn ViewRenderer>,
}

impl WidgetHost {
    pub fn new(
        config: impl ConfigLookup + 'static,
        event_log: impl ErrorLogger + 'static,
        views: impl ViewRenderer + 'static,
    ) -> Self {
        Self {
            config: Box::new(config),
            event_log: Box::new(event_log),
            views: Box::new(views),
        }
    }

    /// Settings file (when configured) overlaid with prefixed environment variables
    pub fn from_settings(settings: &ServerSettings) -> Result<Self> {
        Self::from_settings_with(settings, EnvConfiguration::with_prefix(ENV_CONFIG_PREFIX))
    }

    /// Settings file (when configured) overlaid with `overrides`
    pub fn from_settings_with(
        settings: &ServerSettings,
        overrides: impl ConfigLookup + 'static,
    ) -> Result<Self> {
        let mut config = LayeredConfiguration::new();
        if let Some(path) = &settings.settings_path {
            info!("Loading host configuration from {}", path.display());
            config = config.layer(JsonConfiguration::from_file(path)?);
        }
        config = config.layer(overrides);
        Ok(Self::new(config, TracingEventLog::new(), HandlebarsViews::new()?))
    }

    pub fn google_map_widget(&self) -> GoogleMapWidget<'_> {
        GoogleMapWidget::new(&*self.config, &*self.event_log, &*self.views)
    }
}
