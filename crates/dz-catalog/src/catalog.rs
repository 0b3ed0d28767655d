//! Device catalog interface

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use dz_core::{DeviceFilter, DeviceRecord};

use crate::error::{CatalogError, CatalogResult};

/// Source of device records
///
/// Implementations return devices in the hub's order (sorted by name).
#[async_trait]
pub trait DeviceCatalog: Send + Sync {
    /// Fetch all devices matching `filter`; `only_used` drops devices not marked in use
    async fn fetch(
        &self,
        filter: DeviceFilter,
        only_used: bool,
    ) -> CatalogResult<Vec<DeviceRecord>>;
}

/// Body of a device listing response
#[derive(Debug, Deserialize)]
struct DeviceListResponse {
    status: String,
    /// Absent when no device matches
    #[serde(default)]
    result: Vec<DeviceRecord>,
}

/// Decode a device listing body
pub fn parse_device_list(filter: DeviceFilter, body: &str) -> CatalogResult<Vec<DeviceRecord>> {
    let response: DeviceListResponse =
        serde_json::from_str(body).map_err(|source| CatalogError::Decode { filter, source })?;

    if response.status != "OK" {
        return Err(CatalogError::HubStatus {
            filter,
            status: response.status,
        });
    }

    debug!("Decoded {} '{}' devices", response.result.len(), filter);
    Ok(response.result)
}

/// Every device list a run needs, fetched once per filter
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Switches, dimmers, locks and contact sensors in use
    pub lights: Vec<DeviceRecord>,
    /// Temperature, humidity, barometer and wind sensors in use
    pub temperature: Vec<DeviceRecord>,
    /// Utility meters in use
    pub utility: Vec<DeviceRecord>,
    /// Every device, in use or not
    pub all: Vec<DeviceRecord>,
}

impl CatalogSnapshot {
    /// Query the catalog once per filter, sequentially; the first failure aborts
    pub async fn fetch(catalog: &dyn DeviceCatalog) -> CatalogResult<Self> {
        let lights = catalog.fetch(DeviceFilter::Light, true).await?;
        let temperature = catalog.fetch(DeviceFilter::Temp, true).await?;
        let utility = catalog.fetch(DeviceFilter::Utility, true).await?;
        let all = catalog.fetch(DeviceFilter::All, false).await?;

        info!(
            "Fetched {} light, {} temperature, {} utility and {} total devices",
            lights.len(),
            temperature.len(),
            utility.len(),
            all.len()
        );

        Ok(Self {
            lights,
            temperature,
            utility,
            all,
        })
    }
}
