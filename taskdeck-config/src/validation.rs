use thiserror::Error;
use url::Url;

use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

/// Non-fatal findings surfaced at startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(&mut self, message: impl Into<String>, hint: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("carousel.card_width must be positive (got {0})")]
    CardWidth(f64),
    #[error("carousel.load_threshold must be zero or positive (got {0})")]
    LoadThreshold(f64),
    #[error("carousel.page_size must be at least 1")]
    PageSize,
    #[error("client.base_url '{url}' is not a valid URL: {reason}")]
    BaseUrl { url: String, reason: String },
}

/// Reject settings the carousel cannot work with and warn about odd but
/// workable ones.
pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let carousel = &config.carousel;

    if !(carousel.card_width.is_finite() && carousel.card_width > 0.0) {
        return Err(ConfigGuardRailError::CardWidth(carousel.card_width));
    }
    if !(carousel.load_threshold.is_finite() && carousel.load_threshold >= 0.0) {
        return Err(ConfigGuardRailError::LoadThreshold(carousel.load_threshold));
    }
    if carousel.page_size == 0 {
        return Err(ConfigGuardRailError::PageSize);
    }

    let base_url = &config.client.base_url;
    let candidate = if base_url.starts_with("http://") || base_url.starts_with("https://") {
        base_url.clone()
    } else {
        format!("http://{base_url}")
    };
    if let Err(err) = Url::parse(&candidate) {
        return Err(ConfigGuardRailError::BaseUrl {
            url: base_url.clone(),
            reason: err.to_string(),
        });
    }

    if carousel.load_threshold >= carousel.card_width * carousel.page_size as f64 {
        warnings.push_with_hint(
            "carousel.load_threshold spans a full page of cards; every scroll will request more",
            "Lower load_threshold or raise page_size",
        );
    }

    if config.cors.allowed_origins.is_empty() {
        warnings.push("cors.allowed_origins is empty; any origin will be accepted");
    }

    Ok(warnings)
}
