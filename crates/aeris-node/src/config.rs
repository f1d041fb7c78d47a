//! Configuration management for the Aeris sensor node
//!
//! Settings come from `conf/application.yml`, environment variables with
//! the `aeris` prefix, and CLI flags (highest precedence).

use std::time::Duration;

use aeris_common::AerisError;
use aeris_core::TelemetryConfig;
use clap::Parser;
use config::{Config, Environment};

use crate::startup::LoggingConfig;

/// Deployment region the replay dataset was captured in; a node without
/// configured coordinates picks a random position inside these bounds.
pub const REGION_LAT_MIN: f64 = 45.75;
pub const REGION_LAT_SPAN: f64 = 0.1;
pub const REGION_LON_MIN: f64 = 15.87;
pub const REGION_LON_SPAN: f64 = 0.13;

/// Command line arguments for the node
#[derive(Debug, Parser)]
#[command(name = "aeris-node", about = "Aeris environmental sensor node")]
struct Cli {
    #[arg(long = "registry-addr", env = "AERIS_REGISTRY_ADDR")]
    registry_addr: Option<String>,
    #[arg(long = "csv", env = "AERIS_READINGS_CSV")]
    readings_csv: Option<String>,
    #[arg(long = "grpc-port")]
    grpc_port: Option<u16>,
    #[arg(long = "lat")]
    latitude: Option<f64>,
    #[arg(long = "lon")]
    longitude: Option<f64>,
    #[arg(long = "log-dir", env = "AERIS_LOG_DIR")]
    log_dir: Option<String>,
}

/// Node configuration loaded from config file, environment, and CLI
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("aeris")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/application.yml").required(false));

        if let Some(v) = args.registry_addr {
            config_builder = config_builder
                .set_override("registry.addrs", vec![v])
                .expect("Failed to set registry address override");
        }
        if let Some(v) = args.readings_csv {
            config_builder = config_builder
                .set_override("sensor.readings_csv", v)
                .expect("Failed to set readings csv override");
        }
        if let Some(v) = args.grpc_port {
            config_builder = config_builder
                .set_override("sensor.grpc_port", i64::from(v))
                .expect("Failed to set gRPC port override");
        }
        if let Some(v) = args.latitude {
            config_builder = config_builder
                .set_override("sensor.latitude", v)
                .expect("Failed to set latitude override");
        }
        if let Some(v) = args.longitude {
            config_builder = config_builder
                .set_override("sensor.longitude", v)
                .expect("Failed to set longitude override");
        }
        if let Some(v) = args.log_dir {
            config_builder = config_builder
                .set_override("logging.dir", v)
                .expect("Failed to set log dir override");
        }

        let config = config_builder
            .build()
            .expect("Failed to build configuration");

        Configuration { config }
    }

    /// Build from an already-assembled `Config` (used by tests).
    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Registry
    // ========================================================================

    pub fn registry_addrs(&self) -> Vec<String> {
        self.config
            .get::<Vec<String>>("registry.addrs")
            .ok()
            .filter(|addrs| !addrs.is_empty())
            .unwrap_or_else(|| vec![aeris_common::DEFAULT_REGISTRY_ADDR.to_string()])
    }

    pub fn registry_connect_timeout_ms(&self) -> u64 {
        self.config
            .get_int("registry.connect_timeout_ms")
            .unwrap_or(5000) as u64
    }

    pub fn registry_read_timeout_ms(&self) -> u64 {
        self.config
            .get_int("registry.read_timeout_ms")
            .unwrap_or(30000) as u64
    }

    // ========================================================================
    // Sensor
    // ========================================================================

    /// Configured gRPC port; `None` (or 0) means probe an ephemeral one.
    pub fn grpc_port(&self) -> Option<u16> {
        self.config
            .get_int("sensor.grpc_port")
            .ok()
            .filter(|port| *port > 0)
            .map(|port| port as u16)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.config.get_float("sensor.latitude").ok()
    }

    pub fn longitude(&self) -> Option<f64> {
        self.config.get_float("sensor.longitude").ok()
    }

    /// IP to advertise to the registry; defaults to the first non-loopback
    /// interface address.
    pub fn advertised_ip(&self) -> String {
        self.config
            .get_string("sensor.ip")
            .unwrap_or_else(|_| aeris_common::local_ip())
    }

    pub fn readings_csv(&self) -> Result<String, AerisError> {
        self.config.get_string("sensor.readings_csv").map_err(|_| {
            AerisError::ConfigError(
                "sensor.readings_csv is required (or pass --csv)".to_string(),
            )
        })
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.config
            .get_int("sensor.tick_interval_ms")
            .unwrap_or(aeris_common::DEFAULT_TICK_INTERVAL_MS as i64) as u64
    }

    pub fn neighbor_refresh_ticks(&self) -> u64 {
        self.config
            .get_int("sensor.neighbor_refresh_ticks")
            .unwrap_or(aeris_common::DEFAULT_NEIGHBOR_REFRESH_TICKS as i64) as u64
    }

    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms()),
            neighbor_refresh_ticks: self.neighbor_refresh_ticks(),
        }
    }

    // ========================================================================
    // Logging
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            dir: self.config.get_string("logging.dir").ok().map(Into::into),
            level: self
                .config
                .get_string("logging.level")
                .unwrap_or_else(|_| "info".to_string()),
        }
    }
}
