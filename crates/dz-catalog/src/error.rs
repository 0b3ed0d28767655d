//! Error types for device catalog queries

use thiserror::Error;

use dz_core::DeviceFilter;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that abort a catalog query
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure or non-success HTTP status
    #[error("failed to fetch '{filter}' devices from {url}: {source}")]
    Http {
        filter: DeviceFilter,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The hub answered with something that is not a device list
    #[error("invalid '{filter}' device list from hub: {source}")]
    Decode {
        filter: DeviceFilter,
        #[source]
        source: serde_json::Error,
    },

    /// The hub reported a failed query
    #[error("hub refused '{filter}' device query with status '{status}'")]
    HubStatus { filter: DeviceFilter, status: String },
}
