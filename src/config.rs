use js_sys::Reflect;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::domain::logging::LogLevel;

const BASE_URL_KEY: &str = "API_BASE_URL";
const LOG_LEVEL_KEY: &str = "DASHBOARD_LOG_LEVEL";

/// Runtime settings injected by the hosting page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend origin; empty means same origin.
    pub api_base_url: String,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            log_level: LogLevel::Info,
        }
    }
}

impl DashboardConfig {
    /// Read `window.API_BASE_URL` and `window.DASHBOARD_LOG_LEVEL`.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let read = |key: &str| {
            Reflect::get(&window, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_string())
        };
        Self::from_values(read(BASE_URL_KEY), read(LOG_LEVEL_KEY))
    }

    /// Build from raw globals; blanks and unknown levels fall back to defaults.
    pub fn from_values(base_url: Option<String>, log_level: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.api_base_url),
            log_level: log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(defaults.log_level),
        }
    }
}

static CONFIG: OnceCell<DashboardConfig> = OnceCell::new();

/// Install the process-wide config. Later calls are ignored.
pub fn init_config(config: DashboardConfig) -> &'static DashboardConfig {
    CONFIG.get_or_init(|| config)
}

pub fn config() -> &'static DashboardConfig {
    CONFIG.get_or_init(DashboardConfig::default)
}
