//! Delivery URL builder
//!
//! Turns a public id (or a remote URL) plus account and per-asset options
//! into a canonical delivery URL:
//!
//! ```text
//! http://res.cloudinary.com/demo/image/upload/c_fill,w_100/v1/folder/sample.jpg
//! ^prefix                    ^resource ^type  ^transformation ^version ^source
//! ```
//!
//! `generate` never mutates the builder. Every derived value (folded fetch
//! format, defaulted secure host, shortened routing, inferred version) lives
//! in a `ResolvedUrl` that is built per call.

pub mod escape;
pub mod shard;
pub mod tag;

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::config::ConfigSource;
use crate::constants::{
    AKAMAI_SHARED_CDN, DEFAULT_CDN_HOST, DEFAULT_DELIVERY_TYPE, DEFAULT_RESOURCE_TYPE,
    DEFAULT_VERSION, KEY_CDN_SUBDOMAIN, KEY_CLOUD_NAME, KEY_CNAME, KEY_PRIVATE_CDN, KEY_SECURE,
    KEY_SECURE_DISTRIBUTION, KEY_SHORTEN, SHARED_CDN, SHORT_IMAGE_UPLOAD,
};
use crate::error::UrlError;
use crate::transformation::Transformation;

pub use escape::{collapse_slashes, is_remote_url, is_versioned, smart_escape};
pub use shard::shard_for;

/// Fluent builder for a single delivery URL
#[derive(Debug, Clone, PartialEq)]
pub struct UrlBuilder {
    cloud_name: Option<String>,
    secure: bool,
    private_cdn: bool,
    secure_distribution: Option<String>,
    cdn_subdomain: bool,
    shorten: bool,
    cname: Option<String>,
    delivery_type: String,
    resource_type: String,
    format: Option<String>,
    version: Option<String>,
    transformation: Option<Transformation>,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self {
            cloud_name: None,
            secure: false,
            private_cdn: false,
            secure_distribution: None,
            cdn_subdomain: false,
            shorten: false,
            cname: None,
            delivery_type: DEFAULT_DELIVERY_TYPE.to_string(),
            resource_type: DEFAULT_RESOURCE_TYPE.to_string(),
            format: None,
            version: None,
            transformation: None,
        }
    }
}

/// Per-call view of the builder with every default and rewrite applied
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedUrl<'a> {
    prefix: String,
    resource_type: &'a str,
    delivery_type: &'a str,
    transformation: String,
    version: String,
    source: String,
}

impl ResolvedUrl<'_> {
    fn into_url(self) -> String {
        let joined = [
            self.prefix.as_str(),
            self.resource_type,
            self.delivery_type,
            self.transformation.as_str(),
            self.version.as_str(),
            self.source.as_str(),
        ]
        .join("/");
        collapse_slashes(&joined)
    }
}

impl UrlBuilder {
    /// Seed a builder from account configuration
    pub fn new<C: ConfigSource + ?Sized>(config: &C) -> Self {
        Self {
            cloud_name: config.get_string(KEY_CLOUD_NAME),
            secure_distribution: config.get_string(KEY_SECURE_DISTRIBUTION),
            cname: config.get_string(KEY_CNAME),
            secure: config.get_bool(KEY_SECURE, false),
            private_cdn: config.get_bool(KEY_PRIVATE_CDN, false),
            cdn_subdomain: config.get_bool(KEY_CDN_SUBDOMAIN, false),
            shorten: config.get_bool(KEY_SHORTEN, false),
            ..Default::default()
        }
    }

    pub fn cloud_name(mut self, cloud_name: impl Into<String>) -> Self {
        self.cloud_name = Some(cloud_name.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn private_cdn(mut self, private_cdn: bool) -> Self {
        self.private_cdn = private_cdn;
        self
    }

    pub fn secure_distribution(mut self, host: impl Into<String>) -> Self {
        self.secure_distribution = Some(host.into());
        self
    }

    pub fn cdn_subdomain(mut self, cdn_subdomain: bool) -> Self {
        self.cdn_subdomain = cdn_subdomain;
        self
    }

    pub fn shorten(mut self, shorten: bool) -> Self {
        self.shorten = shorten;
        self
    }

    pub fn cname(mut self, cname: impl Into<String>) -> Self {
        self.cname = Some(cname.into());
        self
    }

    /// Routing segment such as `upload`, `fetch`, `private` or `authenticated`
    pub fn delivery_type(mut self, delivery_type: impl Into<String>) -> Self {
        self.delivery_type = delivery_type.into();
        self
    }

    /// Routing segment such as `image`, `video` or `raw`
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn version(mut self, version: impl Display) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = Some(transformation);
        self
    }

    /// Edit the transformation in place while chaining setters
    pub fn transform(mut self, edit: impl FnOnce(&mut Transformation)) -> Self {
        edit(self.transformation_mut());
        self
    }

    /// Get-or-create access to the owned transformation
    pub fn transformation_mut(&mut self) -> &mut Transformation {
        self.transformation.get_or_insert_with(Transformation::new)
    }

    /// Build the delivery URL for `source`
    ///
    /// Returns `Ok(None)` when `source` is `None`. The cloud name is checked
    /// first, so a missing cloud name fails even without a source.
    pub fn generate(&self, source: Option<&str>) -> Result<Option<String>, UrlError> {
        let (format, transformation) = self.fold_fetch_format();

        let cloud_name = self
            .cloud_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(UrlError::MissingCloudName)?;

        let Some(source) = source else {
            return Ok(None);
        };

        let source = if is_remote_url(source) {
            if self.delivery_type == "upload" || self.delivery_type == "asset" {
                tracing::debug!(
                    delivery_type = %self.delivery_type,
                    "Remote URL passed through unchanged"
                );
                return Ok(Some(source.to_string()));
            }
            smart_escape(source)
        } else if let Some(format) = format {
            format!("{}.{}", source, format)
        } else {
            source.to_string()
        };

        let resolved = self.resolve(cloud_name, transformation, source);
        let url = resolved.into_url();
        tracing::trace!(url = %url, "Generated delivery URL");
        Ok(Some(url))
    }

    /// Render an `<img>` tag for `source`
    ///
    /// Attributes are emitted in key order. Width and height implied by the
    /// transformation overwrite caller-supplied values under the same keys.
    pub fn image_tag<I, K, V>(&self, source: &str, attributes: I) -> Result<String, UrlError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let url = self.generate(Some(source))?.unwrap_or_default();

        let mut attributes: BTreeMap<String, String> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        if let Some(transformation) = &self.transformation {
            if let Some(height) = transformation.html_height() {
                attributes.insert("height".to_string(), height);
            }
            if let Some(width) = transformation.html_width() {
                attributes.insert("width".to_string(), width);
            }
        }

        Ok(tag::render_img_tag(&url, &attributes))
    }

    /// Fetched assets carry their format in the transformation, not in a suffix
    fn fold_fetch_format(&self) -> (Option<&str>, String) {
        let format = self.format.as_deref().filter(|f| !f.is_empty());

        match format {
            Some(format) if self.delivery_type == "fetch" => {
                let mut transformation = self.transformation.clone().unwrap_or_default();
                transformation.fetch_format(format);
                (None, transformation.generate())
            }
            _ => {
                let rendered = self
                    .transformation
                    .as_ref()
                    .map(Transformation::generate)
                    .unwrap_or_default();
                (format, rendered)
            }
        }
    }

    fn resolve<'a>(
        &'a self,
        cloud_name: &str,
        transformation: String,
        source: String,
    ) -> ResolvedUrl<'a> {
        let secure_distribution = self
            .secure_distribution
            .as_deref()
            .filter(|host| !host.is_empty())
            .unwrap_or(SHARED_CDN);

        let mut prefix = if self.secure {
            format!("https://{}", secure_distribution)
        } else {
            let subdomain = if self.cdn_subdomain {
                let subdomain = shard::subdomain_for(&source);
                tracing::debug!(subdomain = %subdomain, "Selected CDN shard");
                subdomain
            } else {
                String::new()
            };
            let host = match self.cname.as_deref().filter(|cname| !cname.is_empty()) {
                Some(cname) => cname.to_string(),
                None if self.private_cdn => format!("{}-{}", cloud_name, DEFAULT_CDN_HOST),
                None => DEFAULT_CDN_HOST.to_string(),
            };
            format!("http://{}{}", subdomain, host)
        };

        // Private CDN hosts already carry the cloud name
        if !self.private_cdn || (self.secure && secure_distribution == AKAMAI_SHARED_CDN) {
            prefix.push('/');
            prefix.push_str(cloud_name);
        }

        let (resource_type, delivery_type) = if self.shorten
            && self.resource_type == DEFAULT_RESOURCE_TYPE
            && self.delivery_type == DEFAULT_DELIVERY_TYPE
        {
            tracing::debug!("Shortened image/upload routing");
            (SHORT_IMAGE_UPLOAD, "")
        } else {
            (self.resource_type.as_str(), self.delivery_type.as_str())
        };

        let version = match self.version.as_deref().filter(|v| !v.is_empty()) {
            Some(version) => format!("v{}", version),
            None if source.contains('/')
                && !is_versioned(&source)
                && !escape::is_literal_remote_url(&source) =>
            {
                tracing::debug!(source = %source, "Inferred version for nested public id");
                format!("v{}", DEFAULT_VERSION)
            }
            None => String::new(),
        };

        ResolvedUrl {
            prefix,
            resource_type,
            delivery_type,
            transformation,
            version,
            source,
        }
    }
}
