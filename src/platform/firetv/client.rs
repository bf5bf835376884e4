// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! firetv-server HTTP client.

use crate::errors::ServiceError;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, Deserialize)]
struct DeviceList {
    devices: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct DeviceStatus {
    state: Option<String>,
}

/// Base url of a firetv-server.
///
/// `host` is an address with optional port, anything else like a path is rejected.
pub fn server_url(host: &str) -> Result<Url, ServiceError> {
    let server = Url::parse(&format!("http://{host}/"))?;
    if server.host_str().is_none() || server.path() != "/" {
        return Err(ServiceError::BadRequest(format!(
            "Invalid firetv-server host: {host}"
        )));
    }
    Ok(server)
}

/// Client of a single device registered with a firetv-server.
#[derive(Clone)]
pub struct FireTvClient {
    client: awc::Client,
    /// Server base address, e.g. `http://localhost:5556/`
    server: Url,
    device_id: String,
}

impl FireTvClient {
    /// Create a new client for a device.
    ///
    /// # Arguments
    ///
    /// * `client`: shared HTTP client
    /// * `host`: firetv-server address with optional port, e.g. `localhost:5556`
    /// * `device_id`: device identifier on the firetv-server
    ///
    /// returns: `BadRequest` error if `host` is not a valid address
    pub fn new(
        client: awc::Client,
        host: &str,
        device_id: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client,
            server: server_url(host)?,
            device_id: device_id.into(),
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Identifiers of all devices registered with the server.
    pub async fn list_devices(&self) -> Result<Vec<String>, ServiceError> {
        let list: DeviceList = self.get_json(&["devices", "list"]).await?;
        Ok(list.devices.into_iter().map(|(id, _)| id).collect())
    }

    /// Raw device state reported by the server, e.g. `play` or `disconnected`.
    pub async fn state(&self) -> Result<Option<String>, ServiceError> {
        let status: DeviceStatus = self
            .get_json(&["devices", "state", &self.device_id])
            .await?;
        Ok(status.state)
    }

    /// Perform an action on the device. The response body is ignored.
    pub async fn action(&self, action_id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["devices", "action", &self.device_id, action_id]);
        debug!("[{}] <- GET {url}", self.device_id);
        let response = self.client.get(url.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(ServiceError::TransportFailure(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ServiceError> {
        let url = self.endpoint(segments);
        debug!("[{}] <- GET {url}", self.device_id);
        let mut response = self.client.get(url.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(ServiceError::TransportFailure(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        Ok(response.json::<T>().await?)
    }

    /// Server url with the given, percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.server.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
