//! Configuration loading
//!
//! Reads the settings TOML from flash, falling back to the embedded
//! `lumen.toml` and finally to the built-in defaults. A bad configuration
//! is logged, never fatal.

use core::str;
use defmt::*;

use lumen_core::config::{parse_config, ControllerConfig, ParseError};
use lumen_hal::{FlashError, FlashStorage, StorageKey};

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 2048;

/// Configuration loading errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// TOML parsing or validation failed
    Parse(ParseError),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Load the controller configuration
pub async fn load_config<S: FlashStorage>(storage: &mut S, embedded: &str) -> ControllerConfig {
    info!("Loading configuration...");

    match load_from_flash(storage).await {
        Ok(config) => {
            info!("Loaded configuration from flash");
            log_config_summary(&config);
            return config;
        }
        Err(ConfigError::Flash(FlashError::NotFound)) => {
            debug!("No configuration in flash, using embedded lumen.toml");
        }
        Err(e) => {
            warn!("Failed to load configuration from flash: {:?}", e);
        }
    }

    match parse_config(embedded) {
        Ok(config) => {
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Embedded lumen.toml rejected: {:?}, using defaults", e);
            ControllerConfig::default()
        }
    }
}

async fn load_from_flash<S: FlashStorage>(
    storage: &mut S,
) -> Result<ControllerConfig, ConfigError> {
    let mut buffer = [0u8; MAX_TOML_SIZE];
    let len = storage.read(StorageKey::Settings, &mut buffer).await?;

    debug!("Read {} bytes of TOML from flash", len);

    let toml_str = str::from_utf8(&buffer[..len]).map_err(|_| ConfigError::InvalidUtf8)?;
    Ok(parse_config(toml_str)?)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ControllerConfig) {
    debug!(
        "  power: threshold={}, settle={}ms",
        config.power.threshold, config.power.wake_settle_ms
    );
    debug!(
        "  auto: hysteresis={}, interval={}ms",
        config.auto.hysteresis, config.auto.loop_interval_ms
    );
    debug!(
        "  session: step={}, idle={}ms",
        config.session.step, config.session.idle_timeout_ms
    );
    debug!(
        "  panel: pulse={}ms, reset hold={}ms",
        config.panel.pulse_ms, config.panel.reset_hold_ms
    );
    debug!("  persist: {}", config.persist.enabled);
}
