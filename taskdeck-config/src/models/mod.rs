pub mod sources;

use std::path::PathBuf;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 4000;
pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;
/// Card footprint along the scroll axis: 300px card plus 20px gap.
pub const DEFAULT_CARD_WIDTH: f64 = 320.0;
/// Two cards from either wrap boundary.
pub const DEFAULT_LOAD_THRESHOLD: f64 = 640.0;
/// Page size used when a list request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fully resolved configuration shared by the server and the client.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub client: ClientConfig,
    pub carousel: CarouselSettings,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Empty means "allow any origin".
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
        }
    }
}

/// Carousel geometry and paging knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub card_width: f64,
    pub load_threshold: f64,
    pub page_size: u32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            load_threshold: DEFAULT_LOAD_THRESHOLD,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Where the configuration came from, for startup logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
