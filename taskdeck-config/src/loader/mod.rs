pub mod error;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};

use crate::{
    models::{
        CarouselSettings, ClientConfig, Config, ConfigMetadata, CorsConfig, ServerConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("taskdeck.toml"),
        PathBuf::from("config/taskdeck.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Resolves a [`Config`] from (lowest to highest precedence) built-in
/// defaults, a TOML file, and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then read the process environment and compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let env_config = EnvConfig::gather();
        self.load_with_env(env_config, env_file_loaded)
    }

    /// Compose from an explicit environment snapshot. `load` delegates here;
    /// tests call it directly to avoid mutating the process environment.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No taskdeck.toml detected; using defaults and environment variables",
                "Create taskdeck.toml or set TASKDECK_CONFIG to customise settings",
            );
        }

        let config = compose_config(
            file_config.unwrap_or_default(),
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        );

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true),
            None => dotenvy::dotenv().map(|_| true),
        };
        match loaded {
            Ok(loaded) => Ok(loaded),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = if let Some(explicit) = &self.options.config_path {
            (Some(explicit.clone()), true)
        } else if let Some(from_env) = &env_config.config_path {
            (Some(from_env.clone()), true)
        } else {
            (
                DEFAULT_CONFIG_LOCATIONS
                    .iter()
                    .find(|candidate| candidate.exists())
                    .cloned(),
                false,
            )
        };

        let Some(path) = path else {
            return Ok((None, None));
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "configuration file parsed");
        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(file: FileConfig, env: EnvConfig, metadata: ConfigMetadata) -> Config {
    let FileConfig {
        server: file_server,
        cors: file_cors,
        client: file_client,
        carousel: file_carousel,
    } = file;

    let server_defaults = ServerConfig::default();
    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or(server_defaults.host),
        port: env
            .server_port
            .or(file_server.port)
            .unwrap_or(server_defaults.port),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_else(|| CorsConfig::default().allowed_origins),
    };

    let client_defaults = ClientConfig::default();
    let client = ClientConfig {
        base_url: env
            .api_url
            .or(file_client.base_url)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(client_defaults.base_url),
        timeout_secs: env
            .client_timeout_secs
            .or(file_client.timeout_secs)
            .unwrap_or(client_defaults.timeout_secs),
    };

    let carousel_defaults = CarouselSettings::default();
    let carousel = CarouselSettings {
        card_width: env
            .card_width
            .or(file_carousel.card_width)
            .unwrap_or(carousel_defaults.card_width),
        load_threshold: env
            .load_threshold
            .or(file_carousel.load_threshold)
            .unwrap_or(carousel_defaults.load_threshold),
        page_size: env
            .page_size
            .or(file_carousel.page_size)
            .unwrap_or(carousel_defaults.page_size),
    };

    Config {
        server,
        cors,
        client,
        carousel,
        metadata,
    }
}
