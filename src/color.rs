use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::{EXPENSES_RGB, RESOURCES_RGB};
use crate::data::model::Flag;

// ---------------------------------------------------------------------------
// Sequential palette for the category pie
// ---------------------------------------------------------------------------

const BLUE_HUE: f32 = 212.0;
const DARKEST: f32 = 0.25;
const LIGHTEST: f32 = 0.82;

/// `n` shades of blue from dark to light, evenly spaced in lightness.
pub fn sequential_blues(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![blue(DARKEST)],
        _ => (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1) as f32;
                blue(DARKEST + t * (LIGHTEST - DARKEST))
            })
            .collect(),
    }
}

fn blue(lightness: f32) -> Color32 {
    let hsl = Hsl::new(BLUE_HUE, 0.7, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Fixed flag colours
// ---------------------------------------------------------------------------

/// Green for resources, red for expenses, gray otherwise.
pub fn flag_color(flag: &Flag) -> Color32 {
    match flag {
        Flag::Resources => from_rgb(RESOURCES_RGB),
        Flag::Expenses => from_rgb(EXPENSES_RGB),
        Flag::Other(_) => Color32::GRAY,
    }
}

fn from_rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}
