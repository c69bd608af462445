use serde::{Deserialize, Serialize};

/// What the Google map template is rendered with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewModel {
    pub is_visible: bool,
    pub latitude: String,
    pub longitude: String,
    pub api_key: String,
    /// CSS classes added to the containing div
    pub css_class: String,
}
