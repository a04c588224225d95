//! Color mapping utilities for SVG visualization.

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    /// Format as CSS hex: #rrggbb
    pub(crate) fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Viridis sampled at nine evenly spaced points; intermediate values are interpolated.
pub(crate) const VIRIDIS: [Rgb; 9] = [
    Rgb { r: 0x44, g: 0x01, b: 0x54 },
    Rgb { r: 0x47, g: 0x2d, b: 0x7b },
    Rgb { r: 0x3b, g: 0x52, b: 0x8b },
    Rgb { r: 0x2c, g: 0x72, b: 0x8e },
    Rgb { r: 0x21, g: 0x91, b: 0x8c },
    Rgb { r: 0x28, g: 0xae, b: 0x80 },
    Rgb { r: 0x5e, g: 0xc9, b: 0x62 },
    Rgb { r: 0xad, g: 0xdc, b: 0x30 },
    Rgb { r: 0xfd, g: 0xe7, b: 0x25 },
];

/// Viridis color ramp for t in [0.0, 1.0].
pub(crate) fn viridis(t: f64) -> Rgb {
    // Handle NaN / infinities: fall back to the low end.
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);

    let lerp = |a: u8, b: u8| -> u8 {
        (a as f64 + (b as f64 - a as f64) * frac)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgb { r: lerp(a.r, b.r), g: lerp(a.g, b.g), b: lerp(a.b, b.b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_anchor_colors() {
        assert_eq!(viridis(0.0), VIRIDIS[0]);
        assert_eq!(viridis(1.0), VIRIDIS[8]);
        assert_eq!(viridis(0.5), VIRIDIS[4]);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(viridis(-3.0), VIRIDIS[0]);
        assert_eq!(viridis(7.0), VIRIDIS[8]);
        assert_eq!(viridis(f64::NAN), VIRIDIS[0]);
    }

    #[test]
    fn formats_as_css() {
        let color = Rgb { r: 253, g: 231, b: 37 };
        assert_eq!(color.hex(), "#fde725");
    }
}
