/// Linear two-stop color gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub low: (u8, u8, u8),
    pub high: (u8, u8, u8),
}

/// Light to dark violet, used for score heatmaps.
pub const VIOLET: Gradient = Gradient {
    low: (0xD0, 0x99, 0xF2),
    high: (0x54, 0x0A, 0x67),
};

impl Gradient {
    /// Color at `t` in [0, 1]; out-of-range values clamp.
    pub fn at(&self, t: f64) -> (u8, u8, u8) {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        (
            lerp(self.low.0, self.high.0),
            lerp(self.low.1, self.high.1),
            lerp(self.low.2, self.high.2),
        )
    }

    /// Color of `value` within [min, max]. A flat range maps to the low end.
    pub fn map(&self, value: f64, min: f64, max: f64) -> (u8, u8, u8) {
        let span = max - min;
        if span <= 0.0 || !span.is_finite() {
            return self.at(0.0);
        }
        self.at((value - min) / span)
    }

    pub fn hex(&self, t: f64) -> String {
        let (r, g, b) = self.at(t);
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

pub fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_midpoint() {
        assert_eq!(VIOLET.hex(0.0), "#D099F2");
        assert_eq!(VIOLET.hex(1.0), "#540A67");
        assert_eq!(VIOLET.at(0.5), (0x92, 0x52, 0xAD));
    }

    #[test]
    fn test_map_clamps_and_handles_flat_range() {
        assert_eq!(VIOLET.map(5.0, 0.0, 1.0), VIOLET.high);
        assert_eq!(VIOLET.map(-1.0, 0.0, 1.0), VIOLET.low);
        assert_eq!(VIOLET.map(0.3, 0.3, 0.3), VIOLET.low);
    }
}
