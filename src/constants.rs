// Constants module - centralized default values for URL generation
//
// Host names and routing segments are fixed by the delivery service and
// must stay byte-for-byte stable so generated URLs keep hitting the cache.

// =============================================================================
// Host defaults
// =============================================================================

/// Shared (multi-tenant) CDN host used on the plain-http path
pub const DEFAULT_CDN_HOST: &str = "res.cloudinary.com";

/// Akamai shared CDN host
pub const AKAMAI_SHARED_CDN: &str = "cloudinary-a.akamaihd.net";

/// Host used for https delivery when no secure distribution is configured
pub const SHARED_CDN: &str = AKAMAI_SHARED_CDN;

// =============================================================================
// Routing defaults
// =============================================================================

/// Default delivery type segment
pub const DEFAULT_DELIVERY_TYPE: &str = "upload";

/// Default resource type segment
pub const DEFAULT_RESOURCE_TYPE: &str = "image";

/// Resource type code used for shortened image/upload URLs
pub const SHORT_IMAGE_UPLOAD: &str = "iu";

/// Version assumed for nested public ids that carry no version marker
pub const DEFAULT_VERSION: &str = "1";

// =============================================================================
// Sharding defaults
// =============================================================================

/// Number of `a<N>.` CDN subdomains
pub const CDN_SHARD_COUNT: i64 = 5;

// =============================================================================
// Configuration keys
// =============================================================================

pub const KEY_CLOUD_NAME: &str = "cloud_name";
pub const KEY_SECURE_DISTRIBUTION: &str = "secure_distribution";
pub const KEY_CNAME: &str = "cname";
pub const KEY_SECURE: &str = "secure";
pub const KEY_PRIVATE_CDN: &str = "private_cdn";
pub const KEY_CDN_SUBDOMAIN: &str = "cdn_subdomain";
pub const KEY_SHORTEN: &str = "shorten";

/// Environment variable holding a `cloudinary://` configuration URL
pub const CLOUDINARY_URL_ENV: &str = "CLOUDINARY_URL";
