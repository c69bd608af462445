use std::{net::SocketAddr, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr};

pub const BIND_VAR: &str = "GOOGLE_MAP_WIDGET_BIND";
pub const SETTINGS_VAR: &str = "GOOGLE_MAP_WIDGET_SETTINGS";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Settings of the standalone widget host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_address: SocketAddr,
    /// `appsettings.json` style host configuration
    pub settings_path: Option<PathBuf>,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind_address = bind
            .parse()
            .wrap_err_with(|| format!("{BIND_VAR} is not a socket address: {bind}"))?;
        let settings_path = lookup(SETTINGS_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            bind_address,
            settings_path,
        })
    }
}
