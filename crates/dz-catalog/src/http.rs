//! HTTP client for the hub's JSON device listing

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use dz_core::{DeviceFilter, DeviceRecord};

use crate::catalog::{parse_device_list, DeviceCatalog};
use crate::error::{CatalogError, CatalogResult};

/// Catalog backed by the hub's `json.htm` API
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client for the hub at `host` (e.g. "192.168.1.5:8080")
    pub fn new(host: &str) -> CatalogResult<Self> {
        let client = Client::builder().build().map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            base_url: Self::base_url(host),
        })
    }

    fn base_url(host: &str) -> String {
        let host = host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}/json.htm")
        } else {
            format!("http://{host}/json.htm")
        }
    }

    /// Query parameters for one listing request
    fn query(filter: DeviceFilter, only_used: bool) -> Vec<(&'static str, &'static str)> {
        let mut query = vec![
            ("type", "devices"),
            ("order", "Name"),
            ("filter", filter.as_str()),
        ];
        if only_used {
            query.push(("used", "true"));
        }
        query
    }
}

#[async_trait]
impl DeviceCatalog for HttpCatalog {
    async fn fetch(
        &self,
        filter: DeviceFilter,
        only_used: bool,
    ) -> CatalogResult<Vec<DeviceRecord>> {
        debug!("GET {} filter={} used={}", self.base_url, filter, only_used);

        let http_err = |source: reqwest::Error| CatalogError::Http {
            filter,
            url: self.base_url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::query(filter, only_used))
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;

        let body = response.text().await.map_err(http_err)?;
        parse_device_list(filter, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        assert_eq!(
            HttpCatalog::base_url("192.168.1.5:8080"),
            "http://192.168.1.5:8080/json.htm"
        );
        assert_eq!(
            HttpCatalog::base_url("https://hub.local/"),
            "https://hub.local/json.htm"
        );
    }

    #[test]
    fn test_query_parameters() {
        let used = HttpCatalog::query(DeviceFilter::Temp, true);
        assert_eq!(
            used,
            vec![
                ("type", "devices"),
                ("order", "Name"),
                ("filter", "temp"),
                ("used", "true")
            ]
        );

        let all = HttpCatalog::query(DeviceFilter::All, false);
        assert!(!all.iter().any(|(k, _)| *k == "used"));
    }

    #[tokio::test]
    async fn test_unreachable_hub_is_fatal() {
        // Port 9 (discard) on localhost is closed on any sane test machine
        let catalog = HttpCatalog::new("127.0.0.1:9").unwrap();
        let err = catalog.fetch(DeviceFilter::Light, true).await.unwrap_err();
        assert!(matches!(err, CatalogError::Http { filter: DeviceFilter::Light, .. }));
    }
}
