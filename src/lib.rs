//! Google map widget: renders an embedded Google map from author configured coordinates.

pub mod host;
pub mod net;
pub mod settings;
pub mod widget;

#[cfg(test)]
mod testing;
