use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cloud_providers::aws::config::{get_aws_default_profile, AwsConfig};
use crate::constants::{
    AWS_REGION, BUSY_PIN, DC_PIN, GPIO_CHIP, REFRESH_INTERVAL_SECS, RESET_PIN, SPI_DEVICE,
};
use config::builder::DefaultState;
use config::{Config as RConfig, ConfigBuilder, Environment};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub refresh_interval_secs: u64,

    pub aws_init_type: AwsConfig,
    pub aws_region: String,

    pub spi_device: String,
    pub gpio_chip: String,
    pub busy_pin: u64,
    pub dc_pin: u64,
    pub reset_pin: u64,
}

pub struct ConfigLoader;

impl ConfigLoader {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = RConfig::builder()
            .set_default("refresh_interval_secs", REFRESH_INTERVAL_SECS)?
            .set_default("aws_init_type", AwsConfig::Profile(get_aws_default_profile()))?
            .set_default("aws_region", AWS_REGION)?
            .set_default("spi_device", SPI_DEVICE)?
            .set_default("gpio_chip", GPIO_CHIP)?
            .set_default("busy_pin", BUSY_PIN)?
            .set_default("dc_pin", DC_PIN)?
            .set_default("reset_pin", RESET_PIN)?;

        Ok(builder)
    }

    /// Defaults reproduce the wiring of a stock Waveshare 2.13" HAT and an
    /// hourly refresh; any key can be overridden through `INKDASH_*`
    /// environment variables (e.g. `INKDASH_AWS_REGION=eu-west-1`).
    pub fn load_default_config() -> Result<Config> {
        Self::defaults()?
            .add_source(Environment::with_prefix("INKDASH"))
            .build()?
            .try_deserialize()
            .context("failed to parse config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds from the default layer only, so a stray INKDASH_* variable
    // on the host cannot skew the assertions.
    #[test]
    fn builtin_defaults_match_constants() {
        let config: Config = ConfigLoader::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.refresh_interval_secs, 3600);
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.spi_device, "/dev/spidev0.0");
        assert_eq!(config.gpio_chip, "/dev/gpiochip0");
        assert_eq!(config.busy_pin, 24);
        assert_eq!(config.dc_pin, 25);
        assert_eq!(config.reset_pin, 17);
    }
}
