//! Device catalog for the Domoticz hub
//!
//! The generator never talks to the network directly; it asks a
//! [`DeviceCatalog`] for device lists. [`HttpCatalog`] queries the hub's
//! `json.htm` listing API, [`StaticCatalog`] serves canned lists.
//!
//! A run fetches four lists up front into a [`CatalogSnapshot`]:
//!
//! ```ignore
//! use dz_catalog::{CatalogSnapshot, HttpCatalog};
//!
//! let catalog = HttpCatalog::new("192.168.1.5:8080")?;
//! let snapshot = CatalogSnapshot::fetch(&catalog).await?;
//! ```

mod catalog;
mod error;
mod http;
mod memory;

pub use catalog::{parse_device_list, CatalogSnapshot, DeviceCatalog};
pub use error::{CatalogError, CatalogResult};
pub use http::HttpCatalog;
pub use memory::StaticCatalog;
