// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Remote entity component: entity registry, state polling and service call handling.

mod command;
mod dispatch;
mod handler;
mod messages;

pub use command::RemoteCommand;
pub use dispatch::dispatch;
pub use messages::*;

use crate::entity::{DeviceState, RemoteDevice, state_attributes};
use crate::util::slugify;
use actix::prelude::{Actor, AsyncContext, Context};
use actix::WrapFuture;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Entity domain of all remote devices.
pub const DOMAIN: &str = "remote";

/// A registered remote device.
#[derive(Clone)]
pub struct RemoteEntity {
    pub entity_id: String,
    pub device: Rc<dyn RemoteDevice>,
    update_status: Rc<Cell<UpdateStatus>>,
}

/// State refresh progress of an entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum UpdateStatus {
    #[default]
    Idle,
    Running,
    /// Another refresh was requested while running.
    Pending,
}

/// Resets the update status if a refresh completes or is dropped.
struct UpdateGuard<'a>(&'a Cell<UpdateStatus>);

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.0.set(UpdateStatus::Idle);
    }
}

impl RemoteEntity {
    pub fn new(entity_id: String, device: Rc<dyn RemoteDevice>) -> Self {
        Self {
            entity_id,
            device,
            update_status: Default::default(),
        }
    }

    /// Refresh the device state.
    ///
    /// Only one device update is in flight at a time. A refresh requested while an update is
    /// running returns immediately and the running refresh updates the device once more, so the
    /// final state is never older than the latest request.
    pub async fn refresh(&self) {
        if self.update_status.get() != UpdateStatus::Idle {
            debug!("[{}] Update in progress, queuing refresh", self.entity_id);
            self.update_status.set(UpdateStatus::Pending);
            return;
        }

        self.update_status.set(UpdateStatus::Running);
        let _guard = UpdateGuard(&self.update_status);
        loop {
            self.device.update().await;
            if self.update_status.replace(UpdateStatus::Running) != UpdateStatus::Pending {
                break;
            }
        }
    }

    pub fn to_state(&self) -> EntityState {
        EntityState {
            entity_id: self.entity_id.clone(),
            name: self.device.name().to_string(),
            state: self.device.state(),
            attributes: state_attributes(self.device.as_ref()),
        }
    }
}

/// Published state of a remote entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityState {
    pub entity_id: String,
    pub name: String,
    pub state: DeviceState,
    pub attributes: Map<String, Value>,
}

pub struct RemoteComponent {
    /// Registered entities in registration order
    entities: Vec<RemoteEntity>,
    scan_interval: Duration,
}

impl RemoteComponent {
    pub fn new(scan_interval: Duration) -> Self {
        Self {
            entities: Vec::new(),
            scan_interval,
        }
    }

    /// Register devices. Entity identifiers are derived from the device names.
    pub fn add_devices(&mut self, devices: impl IntoIterator<Item = Rc<dyn RemoteDevice>>) {
        for device in devices {
            let entity_id = self.generate_entity_id(device.name());
            info!("[{entity_id}] Added remote '{}'", device.name());
            self.entities.push(RemoteEntity::new(entity_id, device));
        }
    }

    pub fn entities(&self) -> &[RemoteEntity] {
        &self.entities
    }

    /// Create a unique `remote.<name>` identifier, suffixed with `_2`, `_3`, ... if already taken.
    fn generate_entity_id(&self, name: &str) -> String {
        let mut object_id = slugify(name);
        if object_id.is_empty() {
            object_id = DOMAIN.to_string();
        }
        let base = format!("{DOMAIN}.{object_id}");
        let mut entity_id = base.clone();
        let mut suffix = 2;
        while self.entities.iter().any(|e| e.entity_id == entity_id) {
            entity_id = format!("{base}_{suffix}");
            suffix += 1;
        }
        entity_id
    }

    /// Resolve the target entities of a service call.
    ///
    /// No or an empty list of identifiers targets all entities. Unknown identifiers are skipped.
    fn resolve_targets(&self, entity_ids: Option<&[String]>) -> Vec<RemoteEntity> {
        match entity_ids {
            Some(ids) if !ids.is_empty() => ids
                .iter()
                .filter_map(|id| {
                    let entity = self.entities.iter().find(|e| &e.entity_id == id);
                    if entity.is_none() {
                        warn!("[{id}] Unknown remote entity, ignoring");
                    }
                    entity.cloned()
                })
                .collect(),
            _ => self.entities.clone(),
        }
    }

    fn poll_devices(&self, ctx: &mut Context<Self>) {
        for entity in self.entities.iter().filter(|e| e.device.should_poll()) {
            let entity = entity.clone();
            ctx.spawn(
                async move {
                    let old_state = entity.device.state();
                    entity.refresh().await;
                    let new_state = entity.device.state();
                    if old_state != new_state {
                        info!("[{}] State changed: {old_state} -> {new_state}", entity.entity_id);
                    } else {
                        debug!("[{}] State: {new_state}", entity.entity_id);
                    }
                }
                .into_actor(self),
            );
        }
    }
}

impl Actor for RemoteComponent {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "Remote component started with {} entities, scan interval: {:?}",
            self.entities.len(),
            self.scan_interval
        );
        if self.scan_interval.is_zero() {
            return;
        }
        self.poll_devices(ctx);
        ctx.run_interval(self.scan_interval, |act, ctx| act.poll_devices(ctx));
    }
}
