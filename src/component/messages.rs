// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Actix actor message definitions used to communicate with the [`RemoteComponent`].

#[allow(unused_imports)] // used for doc links
use crate::component::RemoteComponent;
use crate::component::{EntityState, RemoteCommand};
use crate::errors::ServiceError;
use actix::prelude::Message;
use derive_more::Constructor;

/// Call a remote domain service.
///
/// Returns the number of devices which executed the command.
#[derive(Debug, Constructor, Message)]
#[rtype(result = "Result<usize, ServiceError>")]
pub struct CallService {
    pub command: RemoteCommand,
    /// Target entities. `None` or an empty list targets all remote entities.
    pub entity_ids: Option<Vec<String>>,
}

/// Get the published states of the remote entities.
#[derive(Debug, Default, Constructor, Message)]
#[rtype(result = "Vec<EntityState>")]
pub struct GetStates {
    /// Requested entities. `None` or an empty list returns all remote entities.
    pub entity_ids: Option<Vec<String>>,
}

/// Refresh the state of all polling devices now.
#[derive(Debug, Message)]
#[rtype(result = "()")]
pub struct RefreshStates;

/// Check if a remote entity is not off.
///
/// Without an entity identifier all remote entities are checked, and the result is true if any
/// of them is not off.
#[derive(Debug, Constructor, Message)]
#[rtype(result = "bool")]
pub struct IsOn {
    pub entity_id: Option<String>,
}
