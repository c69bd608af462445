use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};

pub const DEFAULT_CSS_CLASS: &str = "googlemap";

/// Envelope the host invokes a widget with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ComponentViewModel<P> {
    #[serde(default)]
    pub properties: Option<P>,
}

impl<P> ComponentViewModel<P> {
    pub fn new(properties: P) -> Self {
        Self {
            properties: Some(properties),
        }
    }

    pub fn empty() -> Self {
        Self { properties: None }
    }
}

/// Properties an author configures on a widget instance
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WidgetProperties {
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default, deserialize_with = "coordinate")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "coordinate")]
    pub longitude: Option<String>,
    #[serde(default = "default_css_class")]
    pub css_class_name: String,
}

impl Default for WidgetProperties {
    fn default() -> Self {
        Self {
            is_visible: default_visible(),
            latitude: None,
            longitude: None,
            css_class_name: default_css_class(),
        }
    }
}

impl WidgetProperties {
    pub fn at(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            ..Default::default()
        }
    }
}

fn default_visible() -> bool {
    true
}

fn default_css_class() -> String {
    DEFAULT_CSS_CLASS.to_owned()
}

/// Accepts a coordinate as text or a number, keeping its textual form
fn coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CoordinateVisitor;

    impl<'de> Visitor<'de> for CoordinateVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a coordinate string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(CoordinateVisitor)
}

/// Kind of editor a property is authored with
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Boolean,
    Text,
}

/// One entry of the property schema shown to content authors
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

/// Property schema in display order
pub const PROPERTY_SCHEMA: [PropertyField; 4] = [
    PropertyField {
        name: "IsVisible",
        kind: FieldKind::Boolean,
        required: false,
        default: Some("true"),
    },
    PropertyField {
        name: "Latitude",
        kind: FieldKind::Text,
        required: true,
        default: None,
    },
    PropertyField {
        name: "Longitude",
        kind: FieldKind::Text,
        required: true,
        default: None,
    },
    PropertyField {
        name: "CssClassName",
        kind: FieldKind::Text,
        required: false,
        default: Some(DEFAULT_CSS_CLASS),
    },
];
