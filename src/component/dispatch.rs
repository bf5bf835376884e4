// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Service command dispatching to remote devices.

use crate::capabilities::{Button, has};
use crate::component::RemoteEntity;
use crate::component::command::RemoteCommand;
use crate::entity::{RemoteDevice, play_pause_button, toggle_capability};
use crate::errors::ServiceError;
use log::{debug, info, warn};

/// Execute a command on all target entities, one after the other.
///
/// A failing device doesn't abort the dispatch to the remaining devices. Polling devices are
/// refreshed right after the command has been executed.
///
/// Returns the number of devices which executed the command successfully.
pub async fn dispatch(command: RemoteCommand, targets: &[RemoteEntity]) -> usize {
    let mut executed = 0;

    for entity in targets {
        let device = entity.device.as_ref();
        match invoke(command, device).await {
            Ok(true) => {
                info!("[{}] {command}", entity.entity_id);
                executed += 1;
            }
            Ok(false) => {
                debug!(
                    "[{}] {command} not supported by {}, ignoring",
                    entity.entity_id,
                    device.name()
                );
                continue;
            }
            Err(e) => warn!("[{}] {command} failed: {e}", entity.entity_id),
        }

        if device.should_poll() {
            entity.refresh().await;
        }
    }

    executed
}

/// Invoke the handler of a command.
///
/// Returns `Ok(false)` if the device doesn't support the command, either because the capability
/// flag is missing or there is no handler for it. Button fallbacks also require the capability of
/// the action they delegate to.
async fn invoke(command: RemoteCommand, device: &dyn RemoteDevice) -> Result<bool, ServiceError> {
    if !has(device.supported_commands(), command.required_capability()) {
        return Ok(false);
    }

    let action = match command {
        RemoteCommand::TurnOn => device.turn_on(),
        RemoteCommand::TurnOff => device.turn_off(),
        RemoteCommand::Toggle => device.toggle(),
        RemoteCommand::Button(button) => match (device.press(button), button) {
            (Some(action), _) => action,
            (None, Button::PlayPause) => {
                let delegate = play_pause_button(device.state());
                if !has(device.supported_commands(), delegate.capability()) {
                    return Ok(false);
                }
                device.button_play_pause()
            }
            (None, Button::Power) => {
                if !has(device.supported_commands(), toggle_capability(device.state())) {
                    return Ok(false);
                }
                device.toggle()
            }
            (None, _) => return Ok(false),
        },
    };

    action.await.map(|_| true)
}
