// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Remote device contract implemented by every remote driver.

use crate::capabilities::{Button, SupportedCommands};
use crate::errors::ServiceError;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Published attribute holding the [`SupportedCommands`] bit mask.
pub const ATTR_SUPPORTED_COMMANDS: &str = "supported_commands";

/// Future of a device action.
pub type ActionFuture<'a> = LocalBoxFuture<'a, Result<(), ServiceError>>;

/// Remote device state.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    #[default]
    Unknown,
    Off,
    Idle,
    Playing,
    Paused,
    Standby,
}

/// A remote controllable device.
///
/// Drivers run on a single-threaded actor runtime, all futures are `!Send`. The state is cached
/// in the driver and refreshed with [`RemoteDevice::update`].
pub trait RemoteDevice {
    /// Display name of the device.
    fn name(&self) -> &str;

    /// Flags of commands that are supported.
    fn supported_commands(&self) -> SupportedCommands;

    /// Last known device state.
    fn state(&self) -> DeviceState;

    fn turn_on(&self) -> ActionFuture<'_>;

    fn turn_off(&self) -> ActionFuture<'_>;

    /// The device state must be refreshed periodically.
    fn should_poll(&self) -> bool {
        true
    }

    /// Refresh the cached device state.
    fn update(&self) -> LocalBoxFuture<'_, ()> {
        futures::future::ready(()).boxed_local()
    }

    /// Native handler of a button.
    ///
    /// Returns `None` if the driver doesn't implement the button.
    fn press(&self, _button: Button) -> Option<ActionFuture<'_>> {
        None
    }

    /// Additional attributes published while the device is not off.
    fn device_attributes(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Toggles the power on the device.
    fn toggle(&self) -> ActionFuture<'_> {
        if toggle_capability(self.state()) == SupportedCommands::TURN_ON {
            self.turn_on()
        } else {
            self.turn_off()
        }
    }

    /// Presses pause if the device is playing, play otherwise.
    fn button_play_pause(&self) -> ActionFuture<'_> {
        let button = play_pause_button(self.state());
        match self.press(button) {
            Some(action) => action,
            None => {
                debug!("[{}] No handler for button {button}", self.name());
                futures::future::ready(Ok(())).boxed_local()
            }
        }
    }
}

/// Power operation [`RemoteDevice::toggle`] performs in the given state.
pub fn toggle_capability(state: DeviceState) -> SupportedCommands {
    match state {
        DeviceState::Off | DeviceState::Idle => SupportedCommands::TURN_ON,
        _ => SupportedCommands::TURN_OFF,
    }
}

/// Button [`RemoteDevice::button_play_pause`] presses in the given state.
pub fn play_pause_button(state: DeviceState) -> Button {
    match state {
        DeviceState::Playing => Button::Pause,
        _ => Button::Play,
    }
}

/// Published state attributes of a remote device.
///
/// An off device only exposes its supported commands.
pub fn state_attributes(device: &dyn RemoteDevice) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(
        ATTR_SUPPORTED_COMMANDS.into(),
        device.supported_commands().bits().into(),
    );

    if device.state() != DeviceState::Off {
        attributes.extend(
            device
                .device_attributes()
                .into_iter()
                .filter(|(_, v)| !v.is_null()),
        );
    }

    attributes
}
