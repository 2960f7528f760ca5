use anyhow::Result;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    prelude::*,
    text::{Baseline, Text},
};
use epd_waveshare::{color::Color, epd2in13_v2::Display2in13, prelude::*};

use crate::dashboard::snapshot::DashboardSnapshot;

pub const TITLE: &str = "AWS Dashboard";

/// All lines start at the same x offset; the panel clips anything that
/// runs past the right edge.
const MARGIN_X: i32 = 5;

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn lines(snapshot: &DashboardSnapshot) -> [(i32, String); 5] {
    [
        (0, TITLE.to_string()),
        (
            20,
            format!("Yesterday: {}", format_money(snapshot.yesterday_cost)),
        ),
        (
            40,
            format!("Month-to-date: {}", format_money(snapshot.month_cost)),
        ),
        (60, format!("EC2 running: {}", snapshot.ec2_running)),
        (100, format!("Updated: {}", snapshot.updated_at)),
    ]
}

/// Draws the snapshot into a fresh landscape framebuffer, white background
/// and black 6x10 text at fixed positions. The buffer is consumed by the
/// screen in the same cycle.
pub fn render(snapshot: &DashboardSnapshot) -> Result<Display2in13> {
    // Default buffer is already the white background color.
    let mut display = Display2in13::default();
    display.set_rotation(DisplayRotation::Rotate90);

    let style = MonoTextStyle::new(&FONT_6X10, Color::Black);
    for (y, text) in lines(snapshot) {
        Text::with_baseline(&text, Point::new(MARGIN_X, y), style, Baseline::Top)
            .draw(&mut display)?;
    }

    Ok(display)
}
