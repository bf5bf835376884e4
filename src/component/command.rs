// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Remote domain service commands.

use crate::capabilities::{Button, SupportedCommands};
use crate::errors::ServiceError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::IntoEnumIterator;

const BUTTON_PREFIX: &str = "button_";

/// Service command of the remote domain.
///
/// The string representation is the service name: `turn_on`, `turn_off`, `toggle` and
/// `button_<name>` for every [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum RemoteCommand {
    TurnOn,
    TurnOff,
    Toggle,
    Button(Button),
}

impl RemoteCommand {
    /// All service commands.
    pub fn iter() -> impl Iterator<Item = RemoteCommand> {
        [
            RemoteCommand::TurnOn,
            RemoteCommand::TurnOff,
            RemoteCommand::Toggle,
        ]
        .into_iter()
        .chain(Button::iter().map(RemoteCommand::Button))
    }

    /// Capabilities a device must support to execute the command.
    pub fn required_capability(self) -> SupportedCommands {
        match self {
            RemoteCommand::TurnOn => SupportedCommands::TURN_ON,
            RemoteCommand::TurnOff => SupportedCommands::TURN_OFF,
            RemoteCommand::Toggle => SupportedCommands::TURN_ON | SupportedCommands::TURN_OFF,
            RemoteCommand::Button(button) => button.capability(),
        }
    }
}

impl Display for RemoteCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteCommand::TurnOn => f.write_str("turn_on"),
            RemoteCommand::TurnOff => f.write_str("turn_off"),
            RemoteCommand::Toggle => f.write_str("toggle"),
            RemoteCommand::Button(button) => write!(f, "{BUTTON_PREFIX}{button}"),
        }
    }
}

impl FromStr for RemoteCommand {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turn_on" => Ok(RemoteCommand::TurnOn),
            "turn_off" => Ok(RemoteCommand::TurnOff),
            "toggle" => Ok(RemoteCommand::Toggle),
            _ => s
                .strip_prefix(BUTTON_PREFIX)
                .and_then(|b| Button::from_str(b).ok())
                .map(RemoteCommand::Button)
                .ok_or_else(|| {
                    ServiceError::BadRequest(format!(
                        "Invalid service: {s}. Valid services: {}",
                        RemoteCommand::iter()
                            .map(|c| c.to_string())
                            .collect::<Vec<_>>()
                            .join(",")
                    ))
                }),
        }
    }
}
