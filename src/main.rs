// Copyright (c) 2022 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

use std::path::Path;
use std::time::Duration;

use actix::Actor;
use anyhow::Context;
use clap::{ArgAction, ArgMatches, Command, arg};
use log::info;
use remote_firetv::component::{CallService, GetStates, RefreshStates, RemoteCommand, RemoteComponent};
use remote_firetv::configuration::{DEF_CONFIG_FILE, get_configuration};
use remote_firetv::platform::setup_platforms;
use remote_firetv::startup::{APP_VERSION, built_info};
use remote_firetv::util::new_http_client;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Command::new(built_info::PKG_NAME)
        .version(APP_VERSION)
        .about("Remote control for Amazon Fire TV devices with a firetv-server")
        .arg(arg!(-c --config <FILE> "Configuration file").required(false))
        .subcommand(Command::new("run").about("Poll the configured devices until stopped (default)"))
        .subcommand(Command::new("states").about("Print the current device states as json"))
        .subcommand(
            Command::new("call")
                .about("Call a remote service and print the device states as json")
                .arg(arg!(<SERVICE> "Service name, e.g. turn_on, toggle or button_home"))
                .arg(
                    arg!(-e --entity <ENTITY_ID> "Target entity, e.g. remote.amazon_fire_tv. Default: all")
                        .required(false)
                        .action(ArgAction::Append),
                ),
        )
        .get_matches();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg_file = match args.get_one::<String>("config") {
        None => {
            if Path::new(DEF_CONFIG_FILE).exists() {
                Some(DEF_CONFIG_FILE)
            } else {
                None
            }
        }
        Some(c) => Some(c.as_str()),
    };
    let cfg = get_configuration(cfg_file).context("Failed to read configuration")?;
    info!("{} {APP_VERSION}: {}", built_info::PKG_NAME, cfg.remote);

    // parse the service call before connecting to any device
    let call = match args.subcommand() {
        Some(("call", sub)) => Some(parse_service_call(sub)?),
        _ => None,
    };
    let poll = matches!(args.subcommand_name(), None | Some("run"));

    let client = new_http_client(cfg.remote.request_timeout);
    let devices = setup_platforms(&client, &cfg.platforms).await;

    let mut component = RemoteComponent::new(if poll {
        cfg.remote.scan_interval
    } else {
        Duration::ZERO
    });
    component.add_devices(devices);
    let addr = component.start();

    if poll {
        actix_web::rt::signal::ctrl_c().await?;
        info!("Shutting down");
        return Ok(());
    }

    addr.send(RefreshStates).await?;
    if let Some(call) = call {
        let executed = addr.send(call).await??;
        info!("Service executed on {executed} devices");
    }
    let states = addr.send(GetStates::default()).await?;
    println!("{}", serde_json::to_string_pretty(&states)?);

    Ok(())
}

fn parse_service_call(args: &ArgMatches) -> anyhow::Result<CallService> {
    let service = args
        .get_one::<String>("SERVICE")
        .context("Missing service name")?;
    let command: RemoteCommand = service.parse()?;
    let entity_ids = args
        .get_many::<String>("entity")
        .map(|ids| ids.cloned().collect());

    Ok(CallService::new(command, entity_ids))
}
