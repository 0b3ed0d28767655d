//! In-memory catalog

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use dz_core::{DeviceFilter, DeviceRecord};

use crate::catalog::{parse_device_list, DeviceCatalog};
use crate::error::CatalogResult;

/// Catalog serving fixed device lists, one per filter
///
/// Used for offline runs and tests. `only_used` is ignored: whatever was
/// loaded for a filter is what the hub would have returned.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    devices: HashMap<DeviceFilter, Vec<DeviceRecord>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device list returned for `filter`
    pub fn with_devices(mut self, filter: DeviceFilter, devices: Vec<DeviceRecord>) -> Self {
        self.devices.insert(filter, devices);
        self
    }

    /// Set the device list for `filter` from a raw hub response body
    pub fn with_response(mut self, filter: DeviceFilter, body: &str) -> CatalogResult<Self> {
        let devices = parse_device_list(filter, body)?;
        self.devices.insert(filter, devices);
        Ok(self)
    }
}

#[async_trait]
impl DeviceCatalog for StaticCatalog {
    async fn fetch(
        &self,
        filter: DeviceFilter,
        _only_used: bool,
    ) -> CatalogResult<Vec<DeviceRecord>> {
        let devices = self.devices.get(&filter).cloned().unwrap_or_default();
        debug!("Serving {} static '{}' devices", devices.len(), filter);
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_snapshot_from_static_catalog() {
        let catalog = StaticCatalog::new()
            .with_devices(
                DeviceFilter::Light,
                vec![DeviceRecord::new("7", "Porch").with_switch_type("On/Off")],
            )
            .with_devices(
                DeviceFilter::All,
                vec![
                    DeviceRecord::new("7", "Porch"),
                    DeviceRecord::new("50", "Thermostat").with_type("Thermostat"),
                ],
            );

        let snapshot = CatalogSnapshot::fetch(&catalog).await.unwrap();
        assert_eq!(snapshot.lights.len(), 1);
        assert!(snapshot.temperature.is_empty());
        assert!(snapshot.utility.is_empty());
        assert_eq!(snapshot.all.len(), 2);
    }

    #[tokio::test]
    async fn test_with_response() {
        let catalog = StaticCatalog::new()
            .with_response(
                DeviceFilter::Utility,
                r#"{"status": "OK", "result": [{"idx": "12", "Name": "Dryer", "SubType": "kWh"}]}"#,
            )
            .unwrap();

        let devices = catalog.fetch(DeviceFilter::Utility, true).await.unwrap();
        assert_eq!(devices[0].subtype, "kWh");
    }

    #[test]
    fn test_with_response_rejects_failed_query() {
        let result = StaticCatalog::new().with_response(DeviceFilter::Light, r#"{"status": "ERR"}"#);
        assert!(matches!(result, Err(CatalogError::HubStatus { .. })));
    }
}
