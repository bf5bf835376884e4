// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Actix message handlers of the [`RemoteComponent`].

use crate::component::{
    CallService, GetStates, IsOn, RefreshStates, RemoteComponent, dispatch,
};
use crate::entity::DeviceState;
use crate::errors::ServiceError;
use actix::{Handler, MessageResult, ResponseFuture};
use log::info;

impl Handler<CallService> for RemoteComponent {
    type Result = ResponseFuture<Result<usize, ServiceError>>;

    fn handle(&mut self, msg: CallService, _ctx: &mut Self::Context) -> Self::Result {
        let targets = self.resolve_targets(msg.entity_ids.as_deref());
        let command = msg.command;

        Box::pin(async move {
            if targets.is_empty() {
                return Err(ServiceError::NotFound(format!(
                    "No remote entity found for service {command}"
                )));
            }
            info!("Calling service {command} on {} entities", targets.len());
            Ok(dispatch(command, &targets).await)
        })
    }
}

impl Handler<GetStates> for RemoteComponent {
    type Result = MessageResult<GetStates>;

    fn handle(&mut self, msg: GetStates, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(
            self.resolve_targets(msg.entity_ids.as_deref())
                .iter()
                .map(|e| e.to_state())
                .collect(),
        )
    }
}

impl Handler<RefreshStates> for RemoteComponent {
    type Result = ResponseFuture<()>;

    fn handle(&mut self, _msg: RefreshStates, _ctx: &mut Self::Context) -> Self::Result {
        let targets = self.resolve_targets(None);

        Box::pin(async move {
            for entity in targets.iter().filter(|e| e.device.should_poll()) {
                entity.refresh().await;
            }
        })
    }
}

impl Handler<IsOn> for RemoteComponent {
    type Result = bool;

    fn handle(&mut self, msg: IsOn, _ctx: &mut Self::Context) -> Self::Result {
        let entity_ids = msg.entity_id.map(|id| vec![id]);
        self.resolve_targets(entity_ids.as_deref())
            .iter()
            .any(|e| e.device.state() != DeviceState::Off)
    }
}
