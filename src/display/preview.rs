use anyhow::Result;
use epd_waveshare::epd2in13_v2::{Display2in13, HEIGHT, WIDTH};
use epd_waveshare::prelude::*;

use crate::display::DashboardScreen;

// The frame is drawn rotated 90 degrees, so the logical canvas is
// HEIGHT wide and WIDTH tall.
const LANDSCAPE_W: u32 = HEIGHT;
const LANDSCAPE_H: u32 = WIDTH;

/// Stand-in screen that dumps the frame to stdout as ASCII art. Lets the
/// layout be eyeballed at the bench with no panel attached.
#[derive(Default)]
pub struct PreviewScreen;

impl DashboardScreen for PreviewScreen {
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn show(&mut self, frame: &Display2in13) -> Result<()> {
        let mut out = String::with_capacity(((LANDSCAPE_W + 1) * LANDSCAPE_H) as usize);
        for y in 0..LANDSCAPE_H {
            for x in 0..LANDSCAPE_W {
                out.push(if pixel_is_black(frame, x, y) { '#' } else { ' ' });
            }
            out.push('\n');
        }
        print!("{}", out);
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Reads one landscape pixel back out of the packed portrait buffer,
/// undoing the Rotate90 coordinate mapping. White is bit 1, black bit 0.
pub(crate) fn pixel_is_black(frame: &Display2in13, x: u32, y: u32) -> bool {
    debug_assert!(x < LANDSCAPE_W && y < LANDSCAPE_H);

    let native_x = WIDTH - 1 - y;
    let native_y = x;

    let stride = (WIDTH as usize + 7) / 8;
    let index = native_y as usize * stride + native_x as usize / 8;
    let mask = 0x80 >> (native_x % 8);

    frame.buffer()[index] & mask == 0
}
