pub const REFRESH_INTERVAL_SECS: u64 = 3600;
pub const AWS_REGION: &str = "us-east-1";

// Waveshare 2.13" HAT wiring on a Raspberry Pi. CS is handled by the
// kernel spidev driver (CE0).
pub const SPI_DEVICE: &str = "/dev/spidev0.0";
pub const SPI_MAX_SPEED_HZ: u32 = 4_000_000;
pub const GPIO_CHIP: &str = "/dev/gpiochip0";
pub const BUSY_PIN: u64 = 24;
pub const DC_PIN: u64 = 25;
pub const RESET_PIN: u64 = 17;

pub const GPIO_CONSUMER: &str = "inkdash";
