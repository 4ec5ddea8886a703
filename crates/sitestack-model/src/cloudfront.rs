//! CloudFront distribution declaration model.
//!
//! Enum values mirror the CloudFront API wire values.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Method {
    /// Default variant.
    #[default]
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "HEAD")]
    Head,
    #[serde(rename = "OPTIONS")]
    Options,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(rename = "DELETE")]
    Delete,
}

impl Method {
    /// The GET/HEAD/OPTIONS method set used for static content.
    pub const GET_HEAD_OPTIONS: [Self; 3] = [Self::Get, Self::Head, Self::Options];

    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-managed cache policy preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CachePolicy {
    /// Default variant.
    #[default]
    CachingOptimized,
    CachingDisabled,
    CachingOptimizedForUncompressedObjects,
}

impl CachePolicy {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CachingOptimized => "CachingOptimized",
            Self::CachingDisabled => "CachingDisabled",
            Self::CachingOptimizedForUncompressedObjects => {
                "CachingOptimizedForUncompressedObjects"
            }
        }
    }

    /// The well-known managed policy ID CloudFront assigns to this preset.
    #[must_use]
    pub fn policy_id(&self) -> &'static str {
        match self {
            Self::CachingOptimized => "658327ea-f89d-4fab-a63d-7e88639e58f6",
            Self::CachingDisabled => "4135ea2d-6df8-44a3-9df3-4b5a84be39ad",
            Self::CachingOptimizedForUncompressedObjects => {
                "b2884449-e4de-46a7-ac36-70bc7f1ddd6d"
            }
        }
    }
}

impl std::fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewer protocol policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewerProtocolPolicy {
    /// Default variant.
    #[default]
    #[serde(rename = "allow-all")]
    AllowAll,
    #[serde(rename = "https-only")]
    HttpsOnly,
    #[serde(rename = "redirect-to-https")]
    RedirectToHttps,
}

impl ViewerProtocolPolicy {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllowAll => "allow-all",
            Self::HttpsOnly => "https-only",
            Self::RedirectToHttps => "redirect-to-https",
        }
    }
}

impl std::fmt::Display for ViewerProtocolPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ViewerProtocolPolicy {
    fn from(s: &str) -> Self {
        match s {
            "https-only" => Self::HttpsOnly,
            "redirect-to-https" => Self::RedirectToHttps,
            _ => Self::default(),
        }
    }
}

/// Maximum HTTP version viewers may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpVersion {
    /// Default variant.
    #[default]
    #[serde(rename = "http1.1")]
    Http11,
    #[serde(rename = "http2")]
    Http2,
    #[serde(rename = "http2and3")]
    Http2And3,
    #[serde(rename = "http3")]
    Http3,
}

impl HttpVersion {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http11 => "http1.1",
            Self::Http2 => "http2",
            Self::Http2And3 => "http2and3",
            Self::Http3 => "http3",
        }
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge-location price tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceClass {
    /// Default variant. North America and Europe only, the lowest-cost tier.
    #[default]
    #[serde(rename = "PriceClass_100")]
    PriceClass100,
    #[serde(rename = "PriceClass_200")]
    PriceClass200,
    #[serde(rename = "PriceClass_All")]
    PriceClassAll,
}

impl PriceClass {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceClass100 => "PriceClass_100",
            Self::PriceClass200 => "PriceClass_200",
            Self::PriceClassAll => "PriceClass_All",
        }
    }
}

impl std::fmt::Display for PriceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum TLS protocol version for viewer connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MinimumProtocolVersion {
    /// Default variant.
    #[default]
    #[serde(rename = "TLSv1")]
    TlsV1,
    #[serde(rename = "TLSv1_2016")]
    TlsV12016,
    #[serde(rename = "TLSv1.1_2016")]
    TlsV112016,
    #[serde(rename = "TLSv1.2_2018")]
    TlsV122018,
    #[serde(rename = "TLSv1.2_2019")]
    TlsV122019,
    #[serde(rename = "TLSv1.2_2021")]
    TlsV122021,
}

impl MinimumProtocolVersion {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TlsV1 => "TLSv1",
            Self::TlsV12016 => "TLSv1_2016",
            Self::TlsV112016 => "TLSv1.1_2016",
            Self::TlsV122018 => "TLSv1.2_2018",
            Self::TlsV122019 => "TLSv1.2_2019",
            Self::TlsV122021 => "TLSv1.2_2021",
        }
    }
}

impl std::fmt::Display for MinimumProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 4xx error remapped to a custom page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomErrorResponse {
    /// The origin error status being remapped.
    pub error_code: u16,
    /// The status returned to the viewer.
    pub response_code: u16,
    /// Path of the page served instead, e.g. `/error.html`.
    pub response_page_path: String,
}

impl CustomErrorResponse {
    /// Remap `error_code` to a page served with the given status.
    #[must_use]
    pub fn remap(error_code: u16, response_code: u16, page: impl Into<String>) -> Self {
        Self {
            error_code,
            response_code,
            response_page_path: page.into(),
        }
    }
}

/// Access-log delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSpec {
    /// Name of the bucket receiving logs. May be a deploy-time token.
    pub bucket: String,
    /// Include cookies in the logged requests.
    #[builder(default = false)]
    pub include_cookies: bool,
    /// Key prefix for delivered log objects.
    #[builder(default)]
    pub prefix: Option<String>,
}

/// S3 origin settings for a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct OriginSpec {
    /// Name of the origin bucket. May be a deploy-time token.
    pub bucket: String,
    /// Restrict bucket reads to this distribution via origin access control.
    #[builder(default = true)]
    pub origin_access_control: bool,
    /// Attempts CloudFront makes to connect to the origin.
    #[builder(default = 3)]
    pub connection_attempts: i32,
    /// Per-attempt connection timeout in seconds.
    #[builder(default = 10)]
    pub connection_timeout_secs: i32,
}

/// Declaration of a CloudFront distribution with a single S3 origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSpec {
    /// The S3 origin.
    pub origin: OriginSpec,

    /// Whether the distribution serves traffic.
    #[builder(default = true)]
    pub enabled: bool,

    /// Object served for the root URL.
    #[builder(default = String::from("index.html"))]
    pub default_root_object: String,

    /// Methods viewers may use.
    #[builder(default = Method::GET_HEAD_OPTIONS.to_vec())]
    pub allowed_methods: Vec<Method>,

    /// Methods whose responses are cached.
    #[builder(default = Method::GET_HEAD_OPTIONS.to_vec())]
    pub cached_methods: Vec<Method>,

    /// Compress responses when the viewer supports it.
    #[builder(default = true)]
    pub compress: bool,

    /// Managed cache policy preset.
    #[builder(default)]
    pub cache_policy: CachePolicy,

    /// Viewer protocol handling.
    #[builder(default)]
    pub viewer_protocol_policy: ViewerProtocolPolicy,

    /// Error-to-page remappings.
    #[builder(default)]
    pub error_responses: Vec<CustomErrorResponse>,

    /// Maximum viewer HTTP version.
    #[builder(default)]
    pub http_version: HttpVersion,

    /// Edge-location price tier.
    #[builder(default)]
    pub price_class: PriceClass,

    /// Minimum viewer TLS version.
    #[builder(default)]
    pub minimum_protocol_version: MinimumProtocolVersion,

    /// Access-log delivery, if enabled.
    #[builder(default)]
    pub logging: Option<LoggingSpec>,

    /// ARN of an attached WAF web ACL, if any.
    #[builder(default)]
    pub web_acl_arn: Option<String>,
}
