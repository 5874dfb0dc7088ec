//! Error types for quire storage and configuration.

use miette::Diagnostic;
use std::path::PathBuf;

/// Why an upload did not produce a URL.
///
/// These never reach callers of [`MediaStore::upload`](crate::store::MediaStore::upload);
/// they collapse into [`UploadResult::Failure`](crate::store::UploadResult) and are
/// only reported through tracing.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum StoreError {
    /// Reading the captured file failed before anything was sent.
    #[error("failed to read file for upload: {0}")]
    #[diagnostic(code(quire::store::read))]
    Read(#[from] std::io::Error),

    /// The request could not be built or the exchange did not complete.
    #[error(transparent)]
    #[diagnostic(code(quire::store::transport))]
    Transport(#[from] reqwest::Error),

    /// The storage endpoint answered with a non-success status.
    #[error("storage endpoint returned status {0}")]
    #[diagnostic(code(quire::store::status))]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("invalid upload response: {0}")]
    #[diagnostic(code(quire::store::decode))]
    Decode(#[from] serde_json::Error),

    /// The response parsed but carried no usable `url`.
    #[error("upload response has no url")]
    #[diagnostic(code(quire::store::missing_url))]
    MissingUrl,
}

/// Configuration loading errors.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("error reading config file {}", path.display())]
    #[diagnostic(code(quire::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file")]
    #[diagnostic(code(quire::config::parse))]
    Parse(#[from] toml::de::Error),

    #[error("invalid upload endpoint {value:?}")]
    #[diagnostic(
        code(quire::config::endpoint),
        help("the endpoint must be an absolute http(s) URL")
    )]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value {value:?} for {var}")]
    #[diagnostic(code(quire::config::env))]
    InvalidEnv { var: &'static str, value: String },
}
