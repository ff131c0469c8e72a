// Account facade handing out pre-configured URL builders

use crate::config::CloudConfig;
use crate::constants::CLOUDINARY_URL_ENV;
use crate::error::UrlError;
use crate::url::UrlBuilder;

/// Account configuration plus factory for [`UrlBuilder`]s
#[derive(Debug, Clone, Default)]
pub struct Cloudinary {
    config: CloudConfig,
}

impl Cloudinary {
    pub fn new(config: CloudConfig) -> Self {
        Self { config }
    }

    /// Load configuration from the `CLOUDINARY_URL` environment variable
    pub fn from_env() -> Result<Self, UrlError> {
        let url = std::env::var(CLOUDINARY_URL_ENV).map_err(|_| {
            UrlError::config(format!(
                "Environment variable '{}' is not set",
                CLOUDINARY_URL_ENV
            ))
        })?;
        Ok(Self::new(CloudConfig::from_url(&url)?))
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Fresh builder seeded with this account's settings
    pub fn url(&self) -> UrlBuilder {
        UrlBuilder::new(&self.config)
    }

    /// Shortcut for `self.url().image_tag(source, attributes)`
    pub fn image_tag<I, K, V>(&self, source: &str, attributes: I) -> Result<String, UrlError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.url().image_tag(source, attributes)
    }
}
