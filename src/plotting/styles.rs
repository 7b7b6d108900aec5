use plotters::style::RGBColor;

use super::chart::{ColorScale, Palette};

const DARK2: [RGBColor; 8] = [
    RGBColor(27, 158, 119),
    RGBColor(217, 95, 2),
    RGBColor(117, 112, 179),
    RGBColor(231, 41, 138),
    RGBColor(102, 166, 30),
    RGBColor(230, 171, 2),
    RGBColor(166, 118, 29),
    RGBColor(102, 102, 102),
];

const YLGN: [RGBColor; 9] = [
    RGBColor(255, 255, 229),
    RGBColor(247, 252, 185),
    RGBColor(217, 240, 163),
    RGBColor(173, 221, 142),
    RGBColor(120, 198, 121),
    RGBColor(65, 171, 93),
    RGBColor(35, 132, 67),
    RGBColor(0, 104, 55),
    RGBColor(0, 69, 41),
];

impl Palette {
    /// Colour for the `idx`-th series, cycling through the palette.
    pub fn color(self, idx: usize) -> RGBColor {
        match self {
            Palette::Dark2 => DARK2[idx % DARK2.len()],
        }
    }
}

impl ColorScale {
    /// Linearly interpolate the scale at `t` in [0, 1]. Values outside are
    /// clamped.
    pub fn sample(self, t: f64) -> RGBColor {
        let stops: &[RGBColor] = match self {
            ColorScale::YlGn => &YLGN,
        };

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[lower], stops[upper]);
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }
}

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBColor,
    pub text_color: RGBColor,
    pub axis_color: RGBColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBColor(255, 255, 255),
            text_color: RGBColor(82, 82, 82),
            axis_color: RGBColor(10, 10, 10),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_size: 15,
            margin: 10,
            label_area_size: 50,
        }
    }
}
