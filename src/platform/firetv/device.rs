// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Amazon Fire TV remote device.

use crate::capabilities::{Button, SupportedCommands};
use crate::entity::{ActionFuture, DeviceState, RemoteDevice};
use crate::platform::firetv::client::FireTvClient;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use log::error;
use serde_json::{Map, Value};
use std::cell::Cell;
use std::str::FromStr;

/// Supported commands of a Fire TV. The power button toggles between on and off.
pub const SUPPORT_FIRETV: SupportedCommands = SupportedCommands::all();

/// firetv-server action of each button.
const BUTTON_ACTIONS: [(Button, &str); 15] = [
    (Button::Home, "home"),
    (Button::VolumeUp, "volume_up"),
    (Button::VolumeDown, "volume_down"),
    (Button::PlayPause, "media_play_pause"),
    (Button::Next, "media_next"),
    (Button::Previous, "media_previous"),
    (Button::Play, "media_play"),
    (Button::Pause, "media_pause"),
    (Button::Up, "up"),
    (Button::Down, "down"),
    (Button::Left, "left"),
    (Button::Right, "right"),
    (Button::Enter, "enter"),
    (Button::Back, "back"),
    (Button::Menu, "menu"),
];

/// Device state reported by firetv-server.
#[derive(Debug, PartialEq, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
enum FireTvState {
    Idle,
    Off,
    Play,
    Pause,
    Standby,
    Disconnected,
}

impl From<FireTvState> for DeviceState {
    fn from(state: FireTvState) -> Self {
        match state {
            FireTvState::Idle => DeviceState::Idle,
            FireTvState::Off => DeviceState::Off,
            FireTvState::Play => DeviceState::Playing,
            FireTvState::Pause => DeviceState::Paused,
            FireTvState::Standby => DeviceState::Standby,
            FireTvState::Disconnected => DeviceState::Unknown,
        }
    }
}

/// Map a firetv-server state. Unknown values map to [`DeviceState::Unknown`].
pub fn map_state(state: &str) -> DeviceState {
    FireTvState::from_str(state)
        .map(DeviceState::from)
        .unwrap_or_default()
}

pub struct FireTvDevice {
    firetv: FireTvClient,
    name: String,
    state: Cell<DeviceState>,
}

impl FireTvDevice {
    pub fn new(firetv: FireTvClient, name: impl Into<String>) -> Self {
        Self {
            firetv,
            name: name.into(),
            state: Cell::new(DeviceState::Unknown),
        }
    }

    /// Perform a firetv-server action. Failures are only logged.
    fn action(&self, action_id: &'static str) -> ActionFuture<'_> {
        async move {
            if let Err(e) = self.firetv.action(action_id).await {
                error!(
                    "[{}] Action request for {action_id} was not accepted: {e}",
                    self.firetv.device_id()
                );
            }
            Ok(())
        }
        .boxed_local()
    }
}

impl RemoteDevice for FireTvDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_commands(&self) -> SupportedCommands {
        SUPPORT_FIRETV
    }

    fn state(&self) -> DeviceState {
        self.state.get()
    }

    fn turn_on(&self) -> ActionFuture<'_> {
        self.action("turn_on")
    }

    fn turn_off(&self) -> ActionFuture<'_> {
        self.action("turn_off")
    }

    fn update(&self) -> LocalBoxFuture<'_, ()> {
        async move {
            let state = match self.firetv.state().await {
                Ok(state) => state.as_deref().map(map_state).unwrap_or_default(),
                Err(e) => {
                    error!(
                        "[{}] Could not retrieve device state: {e}",
                        self.firetv.device_id()
                    );
                    DeviceState::Unknown
                }
            };
            self.state.set(state);
        }
        .boxed_local()
    }

    fn press(&self, button: Button) -> Option<ActionFuture<'_>> {
        BUTTON_ACTIONS
            .iter()
            .find(|(b, _)| *b == button)
            .map(|&(_, action_id)| self.action(action_id))
    }

    fn device_attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::with_capacity(1);
        attributes.insert("device_id".into(), self.firetv.device_id().into());
        attributes
    }
}
