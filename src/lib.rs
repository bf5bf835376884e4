// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Remote control entity domain with an Amazon Fire TV driver.

pub mod capabilities;
pub mod component;
pub mod configuration;
pub mod entity;
pub mod errors;
pub mod platform;
pub mod startup;
pub mod util;

#[cfg(test)]
mod test_util;

pub use startup::*;
