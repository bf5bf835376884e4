// Copyright (c) 2024 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Minimal in-process firetv-server for tests.

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Map, json};
use std::sync::Mutex;

/// Server state value to respond without a `state` field.
pub const NO_STATE: &str = "<none>";

struct ServerData {
    devices: Vec<String>,
    state: Mutex<String>,
    actions: Mutex<Vec<String>>,
}

pub struct FakeFireTvServer {
    /// Listening address, e.g. `127.0.0.1:41234`
    pub host: String,
    data: web::Data<ServerData>,
    handle: ServerHandle,
}

impl FakeFireTvServer {
    /// Start a server on an ephemeral port with the given registered devices and device state.
    pub async fn start(devices: &[&str], state: &str) -> Self {
        let data = web::Data::new(ServerData {
            devices: devices.iter().map(|d| d.to_string()).collect(),
            state: Mutex::new(state.into()),
            actions: Mutex::new(Vec::new()),
        });

        let app_data = data.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_data.clone())
                .route("/devices/list", web::get().to(list_devices))
                .route("/devices/state/{device_id}", web::get().to(device_state))
                .route(
                    "/devices/action/{device_id}/{action_id}",
                    web::get().to(device_action),
                )
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind test server");

        let host = server.addrs()[0].to_string();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self { host, data, handle }
    }

    pub fn set_state(&self, state: &str) {
        *self.data.state.lock().unwrap() = state.into();
    }

    /// Received actions in `{device_id}/{action_id}` format.
    pub fn actions(&self) -> Vec<String> {
        self.data.actions.lock().unwrap().clone()
    }

    pub async fn stop(&self) {
        self.handle.stop(false).await;
    }
}

async fn list_devices(data: web::Data<ServerData>) -> HttpResponse {
    let devices: Map<_, _> = data
        .devices
        .iter()
        .map(|id| (id.clone(), json!({ "host": "192.168.1.42:5555", "adbkey": null })))
        .collect();
    HttpResponse::Ok().json(json!({ "devices": devices }))
}

async fn device_state(data: web::Data<ServerData>, device_id: web::Path<String>) -> HttpResponse {
    if !data.devices.contains(&device_id) {
        return HttpResponse::NotFound().finish();
    }
    let state = data.state.lock().unwrap().clone();
    if state == NO_STATE {
        HttpResponse::Ok().json(json!({}))
    } else {
        HttpResponse::Ok().json(json!({ "state": state }))
    }
}

async fn device_action(
    data: web::Data<ServerData>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (device_id, action_id) = path.into_inner();
    data.actions
        .lock()
        .unwrap()
        .push(format!("{device_id}/{action_id}"));
    HttpResponse::Ok().json(json!({ "success": true }))
}
