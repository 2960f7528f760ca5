pub mod epd2in13;
pub mod preview;

use anyhow::Result;
use epd_waveshare::epd2in13_v2::Display2in13;
use mockall::automock;

pub use epd2in13::Epd2in13Screen;
pub use preview::PreviewScreen;

/// Seam between rendering and the panel. The handle behind an
/// implementation lives for the whole process; `clear` runs once before
/// the loop, `show` pushes one full-refresh frame, `sleep` drops the
/// panel into deep sleep until the next cycle.
#[automock]
pub trait DashboardScreen {
    fn clear(&mut self) -> Result<()>;
    fn show(&mut self, frame: &Display2in13) -> Result<()>;
    fn sleep(&mut self) -> Result<()>;
}
