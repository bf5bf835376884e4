// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Amazon Fire TV platform.
//!
//! The devices are controlled with a [firetv-server](https://github.com/happyleavesaoc/python-firetv)
//! HTTP server, which must be running and have the configured device registered.

mod client;
mod device;
#[cfg(test)]
mod test_server;

pub use client::{FireTvClient, server_url};
pub use device::{FireTvDevice, SUPPORT_FIRETV, map_state};

use crate::configuration::FireTvSettings;
use crate::errors::ServiceError;
use log::{error, info, warn};

/// Set up the configured Fire TV device.
///
/// Returns `None` if the server is not reachable or doesn't know the configured device.
pub async fn setup_platform(
    client: &awc::Client,
    settings: &FireTvSettings,
) -> Option<FireTvDevice> {
    match connect(client, settings).await {
        Ok(device) => {
            info!(
                "[{}] Device accessible and ready for control",
                settings.device
            );
            Some(device)
        }
        Err(ServiceError::ConfigurationMismatch(msg)) => {
            warn!("[{}] {msg}", settings.device);
            None
        }
        Err(e) => {
            error!(
                "[{}] Could not connect to firetv-server at {}: {e}",
                settings.device, settings.host
            );
            None
        }
    }
}

async fn connect(
    client: &awc::Client,
    settings: &FireTvSettings,
) -> Result<FireTvDevice, ServiceError> {
    let firetv = FireTvClient::new(client.clone(), &settings.host, &settings.device)?;

    let devices = firetv.list_devices().await?;
    if !devices.iter().any(|id| id == &settings.device) {
        return Err(ServiceError::ConfigurationMismatch(format!(
            "Device is not registered with firetv-server. Available devices: {}",
            devices.join(",")
        )));
    }

    Ok(FireTvDevice::new(firetv, settings.name.clone()))
}
