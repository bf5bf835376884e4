// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Remote capability flags.
//!
//! A remote device advertises the commands it supports with a [`SupportedCommands`] flag set.
//! The bit values are part of the published entity attributes and must not change.

bitflags::bitflags! {
    /// Bit flags of supported remote commands.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SupportedCommands: u32 {
        const BUTTON_HOME = 1;
        const BUTTON_VOLUME_UP = 1 << 1;
        const BUTTON_VOLUME_DOWN = 1 << 2;
        const BUTTON_POWER = 1 << 3;
        const BUTTON_PLAY_PAUSE = 1 << 4;
        const BUTTON_NEXT = 1 << 5;
        const BUTTON_PREVIOUS = 1 << 6;
        const BUTTON_PLAY = 1 << 7;
        const BUTTON_PAUSE = 1 << 8;
        const BUTTON_UP = 1 << 9;
        const BUTTON_DOWN = 1 << 10;
        const BUTTON_LEFT = 1 << 11;
        const BUTTON_RIGHT = 1 << 12;
        const BUTTON_ENTER = 1 << 13;
        const BUTTON_BACK = 1 << 14;
        const BUTTON_MENU = 1 << 15;
        const TURN_ON = 1 << 16;
        const TURN_OFF = 1 << 17;
    }
}

/// Returns true if `capability` is fully contained in `mask`.
pub fn has(mask: SupportedCommands, capability: SupportedCommands) -> bool {
    mask.contains(capability)
}

/// Named remote buttons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Button {
    Home,
    VolumeUp,
    VolumeDown,
    Power,
    PlayPause,
    Next,
    Previous,
    Play,
    Pause,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Back,
    Menu,
}

impl Button {
    /// Capability bit a device must set to accept this button.
    pub const fn capability(self) -> SupportedCommands {
        match self {
            Button::Home => SupportedCommands::BUTTON_HOME,
            Button::VolumeUp => SupportedCommands::BUTTON_VOLUME_UP,
            Button::VolumeDown => SupportedCommands::BUTTON_VOLUME_DOWN,
            Button::Power => SupportedCommands::BUTTON_POWER,
            Button::PlayPause => SupportedCommands::BUTTON_PLAY_PAUSE,
            Button::Next => SupportedCommands::BUTTON_NEXT,
            Button::Previous => SupportedCommands::BUTTON_PREVIOUS,
            Button::Play => SupportedCommands::BUTTON_PLAY,
            Button::Pause => SupportedCommands::BUTTON_PAUSE,
            Button::Up => SupportedCommands::BUTTON_UP,
            Button::Down => SupportedCommands::BUTTON_DOWN,
            Button::Left => SupportedCommands::BUTTON_LEFT,
            Button::Right => SupportedCommands::BUTTON_RIGHT,
            Button::Enter => SupportedCommands::BUTTON_ENTER,
            Button::Back => SupportedCommands::BUTTON_BACK,
            Button::Menu => SupportedCommands::BUTTON_MENU,
        }
    }
}
