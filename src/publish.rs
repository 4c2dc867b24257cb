use reqwest::blocking::Client;

use crate::error::PublishError;
use crate::inventory::types::InventorySnapshot;

/// Delivery target for snapshots and temperature cycles. The host
/// identifier accompanies every publish call as the distinguishing key;
/// delivery guarantees belong to the implementation, not the callers.
pub trait Publisher {
    fn publish_snapshot(
        &self,
        host: &str,
        snapshot: &InventorySnapshot,
    ) -> Result<(), PublishError>;

    fn publish_temperatures(&self, host: &str, line: &str) -> Result<(), PublishError>;
}

/// Prints to stdout. The default when no store URL is given.
pub struct ConsolePublisher;

impl Publisher for ConsolePublisher {
    fn publish_snapshot(
        &self,
        _host: &str,
        snapshot: &InventorySnapshot,
    ) -> Result<(), PublishError> {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        Ok(())
    }

    fn publish_temperatures(&self, host: &str, line: &str) -> Result<(), PublishError> {
        println!("{} {}", host, line);
        Ok(())
    }
}

/// Delivers to a remote store over HTTP: the snapshot as JSON, temperature
/// cycles as a plain-text value keyed by host.
pub struct StorePublisher {
    client: Client,
    base_url: String,
}

impl StorePublisher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn inventory_url(&self, host: &str) -> String {
        format!("{}/api/v1/nodes/{}/inventory", self.base_url, host)
    }

    fn temperature_url(&self, host: &str) -> String {
        format!("{}/api/v1/nodes/{}/disk-temperatures", self.base_url, host)
    }

    fn check(url: String, response: reqwest::blocking::Response) -> Result<(), PublishError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(PublishError::Http { url, status })
        }
    }
}

impl Publisher for StorePublisher {
    fn publish_snapshot(
        &self,
        host: &str,
        snapshot: &InventorySnapshot,
    ) -> Result<(), PublishError> {
        let url = self.inventory_url(host);
        let response = self
            .client
            .post(&url)
            .json(snapshot)
            .send()
            .map_err(|source| PublishError::Request {
                url: url.clone(),
                source,
            })?;
        Self::check(url, response)
    }

    fn publish_temperatures(&self, host: &str, line: &str) -> Result<(), PublishError> {
        let url = self.temperature_url(host);
        let response = self
            .client
            .put(&url)
            .body(line.to_string())
            .send()
            .map_err(|source| PublishError::Request {
                url: url.clone(),
                source,
            })?;
        Self::check(url, response)
    }
}
