//! quire-common: pieces shared by the quire editor crates.
//!
//! - `media`: media kinds and the `MediaFile` abstraction over captured files
//! - `store`: the `MediaStore` seam to remote storage, plus an HTTP implementation
//! - `config`: storage configuration loading
//! - `telemetry`: tracing subscriber setup
//! - `error`: error types for the above

pub mod config;
pub mod error;
pub mod media;
pub mod store;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use bytes::Bytes;
pub use config::{Config, StorageConfig};
pub use error::{ConfigError, StoreError};
pub use media::{DiskFile, MediaFile, MediaKind, MemoryFile};
pub use store::{HttpMediaStore, MediaStore, UploadResult};
