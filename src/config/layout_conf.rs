use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Geometry used to derive how many rows fit on one table page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical space taken by header, filters and pager, in px.
    pub reserved_chrome: i64,
    pub row_height: i64,
    /// Usable height never drops below this before dividing.
    pub min_usable: i64,
    pub min_rows: usize,
    pub max_rows: usize,
    /// Viewport assumed when none is supplied.
    pub viewport_height: i64,
}

impl LayoutConfig {
    /// Reads `TABLE_VIEWPORT_HEIGHT`; every other value is fixed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("TABLE_VIEWPORT_HEIGHT") {
            config.viewport_height = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::ParseError(format!("TABLE_VIEWPORT_HEIGHT: {raw}")))?;
        }
        debug!(viewport_height = config.viewport_height, "Layout configuration loaded");
        Ok(config)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reserved_chrome: 300,
            row_height: 56,
            min_usable: 320,
            min_rows: 10,
            max_rows: 15,
            viewport_height: 900,
        }
    }
}
