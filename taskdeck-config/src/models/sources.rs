use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{non_empty_var, parse_csv_var, parse_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub client: FileClientConfig,
    #[serde(default)]
    pub carousel: FileCarouselConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCarouselConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub api_url: Option<String>,
    pub client_timeout_secs: Option<u64>,
    pub card_width: Option<f64>,
    pub load_threshold: Option<f64>,
    pub page_size: Option<u32>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var("TASKDECK_CONFIG").map(PathBuf::from),
            server_host: non_empty_var("TASKDECK_SERVER_HOST"),
            server_port: parse_var("TASKDECK_SERVER_PORT"),
            cors_allowed_origins: parse_csv_var("TASKDECK_CORS_ALLOWED_ORIGINS"),
            api_url: non_empty_var("TASKDECK_API_URL"),
            client_timeout_secs: parse_var("TASKDECK_CLIENT_TIMEOUT_SECS"),
            card_width: parse_var("TASKDECK_CARD_WIDTH"),
            load_threshold: parse_var("TASKDECK_LOAD_THRESHOLD"),
            page_size: parse_var("TASKDECK_PAGE_SIZE"),
        }
    }
}
