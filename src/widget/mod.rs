mod handler;
mod properties;
mod view_model;

use serde::Serialize;

pub use handler::{
    build_view_model, render, GoogleMapWidget, RenderError, RenderOutput, API_KEY_SETTING,
    LOG_COOLDOWN, LOG_OPERATION, LOG_SOURCE,
};
pub use properties::{
    ComponentViewModel, FieldKind, PropertyField, WidgetProperties, DEFAULT_CSS_CLASS,
    PROPERTY_SCHEMA,
};
pub use view_model::ViewModel;

/// Template identity the widget renders with
pub const GOOGLE_MAP_TEMPLATE: &str = "widgets/google-map";

/// How the widget is presented in the page builder's widget list
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRegistration {
    pub identifier: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon_class: &'static str,
    pub allow_cache: bool,
    pub properties: &'static [PropertyField],
}

pub const GOOGLE_MAP_REGISTRATION: WidgetRegistration = WidgetRegistration {
    identifier: "DotStark.XBK.Widget.GoogleMap",
    name: "Google Map",
    description: "Show google map by latitude and longitude value using google API key.",
    icon_class: "icon-map-marker",
    allow_cache: true,
    properties: &PROPERTY_SCHEMA,
};
