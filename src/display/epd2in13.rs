use anyhow::{anyhow, Context, Result};
use epd_waveshare::epd2in13_v2::{Display2in13, Epd2in13};
use epd_waveshare::prelude::*;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};

use crate::config::Config;
use crate::constants::{GPIO_CONSUMER, SPI_MAX_SPEED_HZ};
use crate::display::DashboardScreen;

type Panel = Epd2in13<SpidevDevice, CdevPin, CdevPin, CdevPin, Delay>;

/// Waveshare 2.13" panel on the Pi's SPI bus. Chip select is CE0, owned
/// by the kernel spidev driver; BUSY/DC/RST go through the GPIO character
/// device.
pub struct Epd2in13Screen {
    spi: SpidevDevice,
    delay: Delay,
    panel: Panel,
    asleep: bool,
}

impl Epd2in13Screen {
    pub fn new(config: &Config) -> Result<Self> {
        let mut spi = SpidevDevice::open(&config.spi_device)
            .with_context(|| format!("opening SPI device {}", config.spi_device))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_MAX_SPEED_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.0.configure(&options).context("configuring SPI device")?;

        let mut chip = Chip::new(&config.gpio_chip)
            .with_context(|| format!("opening GPIO chip {}", config.gpio_chip))?;
        let busy = request_pin(&mut chip, config.busy_pin as u32, LineRequestFlags::INPUT)?;
        let dc = request_pin(&mut chip, config.dc_pin as u32, LineRequestFlags::OUTPUT)?;
        let rst = request_pin(&mut chip, config.reset_pin as u32, LineRequestFlags::OUTPUT)?;

        let mut delay = Delay;
        let panel = Epd2in13::new(&mut spi, busy, dc, rst, &mut delay, None)
            .map_err(|err| anyhow!("initializing the panel controller: {:?}", err))?;

        Ok(Self {
            spi,
            delay,
            panel,
            asleep: false,
        })
    }
}

impl DashboardScreen for Epd2in13Screen {
    fn clear(&mut self) -> Result<()> {
        self.panel
            .clear_frame(&mut self.spi, &mut self.delay)
            .map_err(|err| anyhow!("clearing the panel: {:?}", err))
    }

    fn show(&mut self, frame: &Display2in13) -> Result<()> {
        // The previous cycle left the controller in deep sleep.
        if self.asleep {
            self.panel
                .wake_up(&mut self.spi, &mut self.delay)
                .map_err(|err| anyhow!("waking the panel: {:?}", err))?;
            self.asleep = false;
        }

        self.panel
            .update_frame(&mut self.spi, frame.buffer(), &mut self.delay)
            .map_err(|err| anyhow!("pushing the frame buffer: {:?}", err))?;
        self.panel
            .display_frame(&mut self.spi, &mut self.delay)
            .map_err(|err| anyhow!("refreshing the panel: {:?}", err))
    }

    fn sleep(&mut self) -> Result<()> {
        self.panel
            .sleep(&mut self.spi, &mut self.delay)
            .map_err(|err| anyhow!("putting the panel to sleep: {:?}", err))?;
        self.asleep = true;
        Ok(())
    }
}

fn request_pin(chip: &mut Chip, line: u32, flags: LineRequestFlags) -> Result<CdevPin> {
    let handle = chip
        .get_line(line)
        .and_then(|line| line.request(flags, 0, GPIO_CONSUMER))
        .with_context(|| format!("requesting GPIO line {}", line))?;
    CdevPin::new(handle).with_context(|| format!("wrapping GPIO line {}", line))
}
