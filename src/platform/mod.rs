// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Remote platform drivers.

pub mod firetv;

use crate::configuration::PlatformSettings;
use crate::entity::RemoteDevice;
use log::warn;
use std::rc::Rc;

/// Set up the devices of all configured platforms.
///
/// Platform entries which can't be set up are logged and skipped.
pub async fn setup_platforms(
    client: &awc::Client,
    platforms: &[PlatformSettings],
) -> Vec<Rc<dyn RemoteDevice>> {
    let mut devices: Vec<Rc<dyn RemoteDevice>> = Vec::with_capacity(platforms.len());

    for platform in platforms {
        match platform {
            PlatformSettings::Firetv(settings) => {
                if let Some(device) = firetv::setup_platform(client, settings).await {
                    devices.push(Rc::new(device));
                }
            }
        }
    }

    if devices.is_empty() {
        warn!("No remote devices available");
    }

    devices
}
