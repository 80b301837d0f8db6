use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue of the first series; the rest are spaced evenly around the wheel.
const BASE_HUE: f32 = 210.0;

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(2).len(), 2);
    }

    #[test]
    fn two_series_are_blue_and_orange() {
        let p = generate_palette(2);
        let RGBColor(r, _, b) = p[0];
        assert!(b > r, "first colour should be blue-ish: {:?}", p[0]);
        let RGBColor(r, _, b) = p[1];
        assert!(r > b, "second colour should be orange-ish: {:?}", p[1]);
    }
}
