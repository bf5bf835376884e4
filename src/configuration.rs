// Copyright (c) 2022 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Configuration file handling.

use crate::platform::firetv::server_url;
use config::{Config, ConfigError};
use log::{info, warn};
use serde_with::{DurationSeconds, serde_as};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default configuration file.
pub const DEF_CONFIG_FILE: &str = "configuration.yaml";

pub const DEF_SCAN_INTERVAL_SEC: u64 = 10;
pub const DEF_REQUEST_TIMEOUT_SEC: u64 = 5;

pub const DEF_FIRETV_HOST: &str = "localhost:5556";
pub const DEF_FIRETV_DEVICE: &str = "default";
pub const DEF_FIRETV_NAME: &str = "Amazon Fire TV";

/// Environment variable prefix for configuration overrides.
///
/// Nested keys are separated with `__`, e.g. `REMOTE_REMOTE__SCAN_INTERVAL_SEC=30` sets
/// `remote.scan_interval_sec`.
const ENV_PREFIX: &str = "REMOTE";

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    pub remote: RemoteSettings,
    /// Configured remote platforms. Every entry sets up one device.
    pub platforms: Vec<PlatformSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote: Default::default(),
            platforms: vec![PlatformSettings::Firetv(Default::default())],
        }
    }
}

/// Remote component settings.
#[serde_as]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct RemoteSettings {
    /// Device state polling interval.
    #[serde_as(as = "DurationSeconds")]
    #[serde(rename = "scan_interval_sec")]
    pub scan_interval: Duration,
    /// HTTP request timeout for device control servers, including connection setup.
    #[serde_as(as = "DurationSeconds")]
    #[serde(rename = "request_timeout_sec")]
    pub request_timeout: Duration,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(DEF_SCAN_INTERVAL_SEC),
            request_timeout: Duration::from_secs(DEF_REQUEST_TIMEOUT_SEC),
        }
    }
}

impl Display for RemoteSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scan interval={:?}, request timeout={:?}",
            self.scan_interval, self.request_timeout
        )
    }
}

/// Remote platform configuration, selected with the `platform` key.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum PlatformSettings {
    Firetv(FireTvSettings),
}

/// Amazon Fire TV controlled by a firetv-server.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FireTvSettings {
    /// firetv-server address with optional port.
    #[serde(default = "default_firetv_host")]
    pub host: String,
    /// Device identifier registered with the firetv-server.
    #[serde(default = "default_firetv_device")]
    pub device: String,
    /// Display name.
    #[serde(default = "default_firetv_name")]
    pub name: String,
}

impl Default for FireTvSettings {
    fn default() -> Self {
        Self {
            host: default_firetv_host(),
            device: default_firetv_device(),
            name: default_firetv_name(),
        }
    }
}

fn default_firetv_host() -> String {
    DEF_FIRETV_HOST.into()
}
fn default_firetv_device() -> String {
    DEF_FIRETV_DEVICE.into()
}
fn default_firetv_name() -> String {
    DEF_FIRETV_NAME.into()
}

/// Load the configuration settings.
///
/// The application provides default values which can be overriden in the following order:
/// 1. Configuration settings in the yaml or json configuration file specified in `filename`
/// 2. Environment variables with prefix `REMOTE_`
///
/// An invalid scan interval or request timeout is replaced with its default value.
pub fn get_configuration(filename: Option<&str>) -> Result<Settings, ConfigError> {
    match filename {
        None => info!("No configuration file, using default configuration"),
        Some(f) => info!("Loading configuration file: {f}"),
    }
    load_configuration(filename.map(config::File::with_name))
}

fn load_configuration<S>(file: Option<S>) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    // default configuration
    let mut config = Config::builder().add_source(Config::try_from(&Settings::default())?);
    // read optional configuration file to override defaults
    if let Some(file) = file {
        config = config.add_source(file);
    }

    let config = config
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings: Settings = config.try_deserialize()?;

    check_cfg_values(settings)
}

fn check_cfg_values(mut settings: Settings) -> Result<Settings, ConfigError> {
    if settings.remote.scan_interval.is_zero() {
        warn!("Invalid scan interval, using default.");
        settings.remote.scan_interval = Duration::from_secs(DEF_SCAN_INTERVAL_SEC);
    }
    if settings.remote.request_timeout.is_zero() {
        warn!("Invalid request timeout, using default.");
        settings.remote.request_timeout = Duration::from_secs(DEF_REQUEST_TIMEOUT_SEC);
    }

    for platform in &settings.platforms {
        match platform {
            PlatformSettings::Firetv(firetv) => {
                if let Err(e) = server_url(&firetv.host) {
                    return Err(ConfigError::Message(e.to_string()));
                }
                if firetv.device.trim().is_empty() {
                    return Err(ConfigError::Message("firetv device must be set".into()));
                }
            }
        }
    }

    if settings.platforms.is_empty() {
        warn!("No remote platforms configured");
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use rstest::rstest;

    fn load_yaml(yaml: &str) -> Result<Settings, ConfigError> {
        load_configuration(Some(config::File::from_str(yaml, FileFormat::Yaml)))
    }

    #[test]
    fn default_configuration() {
        let settings = load_configuration(None::<Config>)
            .expect("default configuration must be valid");

        assert_eq!(Duration::from_secs(10), settings.remote.scan_interval);
        assert_eq!(Duration::from_secs(5), settings.remote.request_timeout);
        assert_eq!(
            vec![PlatformSettings::Firetv(FireTvSettings {
                host: "localhost:5556".into(),
                device: "default".into(),
                name: "Amazon Fire TV".into(),
            })],
            settings.platforms
        );
    }

    #[test]
    fn platform_defaults_are_applied() {
        let settings = load_yaml(
            r#"
platforms:
  - platform: firetv
    host: 192.168.1.5:5556
  - platform: firetv
    device: bedroom
    name: Bedroom TV
"#,
        )
        .unwrap();

        assert_eq!(
            vec![
                PlatformSettings::Firetv(FireTvSettings {
                    host: "192.168.1.5:5556".into(),
                    device: "default".into(),
                    name: "Amazon Fire TV".into(),
                }),
                PlatformSettings::Firetv(FireTvSettings {
                    host: "localhost:5556".into(),
                    device: "bedroom".into(),
                    name: "Bedroom TV".into(),
                }),
            ],
            settings.platforms
        );
    }

    #[test]
    fn invalid_intervals_are_replaced_with_defaults() {
        let settings = load_yaml(
            r#"
remote:
  scan_interval_sec: 0
  request_timeout_sec: 0
"#,
        )
        .unwrap();

        assert_eq!(Duration::from_secs(10), settings.remote.scan_interval);
        assert_eq!(Duration::from_secs(5), settings.remote.request_timeout);
    }

    #[test]
    fn custom_intervals() {
        let settings = load_yaml(
            r#"
remote:
  scan_interval_sec: 30
  request_timeout_sec: 2
"#,
        )
        .unwrap();

        assert_eq!(Duration::from_secs(30), settings.remote.scan_interval);
        assert_eq!(Duration::from_secs(2), settings.remote.request_timeout);
    }

    #[rstest]
    #[case("fire tv:5556")]
    #[case("localhost/api")]
    #[case("localhost:5556/")]
    #[case("http://localhost")]
    fn invalid_host_is_rejected_at_load_time(#[case] host: &str) {
        let result = load_yaml(&format!(
            r#"
platforms:
  - platform: firetv
    host: "{host}"
"#
        ));

        assert!(result.is_err(), "Expected error for host {host}");
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let result = load_yaml(
            r#"
platforms:
  - platform: roku
    host: 192.168.1.7
"#,
        );

        assert!(result.is_err(), "Expected error for unknown platform");
    }
}
