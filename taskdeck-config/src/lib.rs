//! Shared configuration library for taskdeck.
//!
//! Both the `taskdeck-server` and `taskdeck` binaries load their settings
//! through [`ConfigLoader`], so defaults, environment variable names and guard
//! rails live in one place.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    CarouselSettings, ClientConfig, Config, ConfigMetadata, CorsConfig, ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
