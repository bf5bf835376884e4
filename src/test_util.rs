// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Test doubles shared by unit tests.

use crate::capabilities::{Button, SupportedCommands};
use crate::entity::{ActionFuture, DeviceState, RemoteDevice};
use crate::errors::ServiceError;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::task::Poll;

/// In-memory remote recording every invoked operation.
///
/// Supports all commands. `play_pause` and `power` have no native handler.
pub struct MockRemote {
    name: String,
    supported: SupportedCommands,
    state: Cell<DeviceState>,
    /// state reported after the next `update`
    next_state: Cell<Option<DeviceState>>,
    buttons: bool,
    poll: bool,
    fail: bool,
    attributes: Map<String, Value>,
    calls: RefCell<Vec<String>>,
    updates: Cell<u32>,
    updates_in_flight: Cell<u32>,
    max_updates_in_flight: Cell<u32>,
}

impl MockRemote {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            supported: SupportedCommands::all(),
            state: Cell::new(DeviceState::Unknown),
            next_state: Cell::new(None),
            buttons: true,
            poll: true,
            fail: false,
            attributes: Map::new(),
            calls: RefCell::new(Vec::new()),
            updates: Cell::new(0),
            updates_in_flight: Cell::new(0),
            max_updates_in_flight: Cell::new(0),
        }
    }

    pub fn with_state(self, state: DeviceState) -> Self {
        self.state.set(state);
        self
    }

    pub fn with_next_state(self, state: DeviceState) -> Self {
        self.next_state.set(Some(state));
        self
    }

    pub fn with_supported(mut self, supported: SupportedCommands) -> Self {
        self.supported = supported;
        self
    }

    pub fn without_buttons(mut self) -> Self {
        self.buttons = false;
        self
    }

    pub fn without_polling(mut self) -> Self {
        self.poll = false;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn updates(&self) -> u32 {
        self.updates.get()
    }

    /// Highest number of concurrently running updates.
    pub fn max_updates_in_flight(&self) -> u32 {
        self.max_updates_in_flight.get()
    }

    fn record(&self, call: String) -> ActionFuture<'_> {
        self.calls.borrow_mut().push(call);
        let result = if self.fail {
            Err(ServiceError::TransportFailure(format!(
                "{} is unreachable",
                self.name
            )))
        } else {
            Ok(())
        };
        futures::future::ready(result).boxed_local()
    }
}

impl RemoteDevice for MockRemote {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_commands(&self) -> SupportedCommands {
        self.supported
    }

    fn state(&self) -> DeviceState {
        self.state.get()
    }

    fn turn_on(&self) -> ActionFuture<'_> {
        self.record("turn_on".into())
    }

    fn turn_off(&self) -> ActionFuture<'_> {
        self.record("turn_off".into())
    }

    fn should_poll(&self) -> bool {
        self.poll
    }

    /// Suspends once before applying the next state, like a device waiting for a response.
    fn update(&self) -> LocalBoxFuture<'_, ()> {
        async move {
            self.updates.set(self.updates.get() + 1);
            let in_flight = self.updates_in_flight.get() + 1;
            self.updates_in_flight.set(in_flight);
            self.max_updates_in_flight
                .set(self.max_updates_in_flight.get().max(in_flight));

            let mut suspended = false;
            futures::future::poll_fn(|cx| {
                if suspended {
                    Poll::Ready(())
                } else {
                    suspended = true;
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            })
            .await;

            if let Some(state) = self.next_state.take() {
                self.state.set(state);
            }
            self.updates_in_flight.set(self.updates_in_flight.get() - 1);
        }
        .boxed_local()
    }

    fn press(&self, button: Button) -> Option<ActionFuture<'_>> {
        match button {
            Button::PlayPause | Button::Power => None,
            _ if self.buttons => Some(self.record(format!("press:{button}"))),
            _ => None,
        }
    }

    fn device_attributes(&self) -> Map<String, Value> {
        self.attributes.clone()
    }
}
