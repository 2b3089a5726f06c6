//! Colors and colormaps
//!
//! Figures use two palettes: viridis for per-column fills and a diverging
//! map (coolwarm by default) for correlation coefficients. A colormap is a
//! list of evenly spaced anchor colors blended linearly in between.

use serde::{Deserialize, Serialize};

/// RGB color, channels in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Blend towards `other`; `t = 0` is `self`, `t = 1` is `other`
    pub fn mix(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let blend = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Color::rgb(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }
}

/// Names accepted by `get_colormap` (each also with a `_r` suffix)
pub const BUILTIN_COLORMAPS: [&str; 3] = ["viridis", "coolwarm", "seismic"];

/// Evenly spaced anchor colors, optionally read back to front
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    pub name: String,
    anchors: Vec<Color>,
    reversed: bool,
}

impl Colormap {
    pub fn new(name: impl Into<String>, anchors: Vec<Color>) -> Self {
        Self {
            name: name.into(),
            anchors,
            reversed: false,
        }
    }

    /// The same colormap read from the other end
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// Color at position `t`, clamped to [0, 1]
    pub fn sample(&self, t: f32) -> Color {
        let mut t = t.clamp(0.0, 1.0);
        if self.reversed {
            t = 1.0 - t;
        }

        match self.anchors.len() {
            0 => Color::default(),
            1 => self.anchors[0],
            n => {
                let pos = t * (n - 1) as f32;
                let lo = (pos.floor() as usize).min(n - 2);
                self.anchors[lo].mix(&self.anchors[lo + 1], pos - lo as f32)
            }
        }
    }

    /// Color for `value` on the scale `[min, max]`; values outside are clipped
    pub fn map_value(&self, value: f64, min: f64, max: f64) -> Color {
        if max > min {
            self.sample(((value - min) / (max - min)) as f32)
        } else {
            self.sample(0.5)
        }
    }
}

/// Perceptually uniform sequential map
pub fn viridis() -> Colormap {
    Colormap::new(
        "viridis",
        vec![
            Color::rgb(0.267, 0.005, 0.329),
            Color::rgb(0.282, 0.141, 0.458),
            Color::rgb(0.254, 0.265, 0.530),
            Color::rgb(0.207, 0.372, 0.553),
            Color::rgb(0.164, 0.471, 0.558),
            Color::rgb(0.128, 0.567, 0.551),
            Color::rgb(0.135, 0.659, 0.518),
            Color::rgb(0.267, 0.749, 0.441),
            Color::rgb(0.478, 0.821, 0.318),
            Color::rgb(0.741, 0.873, 0.150),
            Color::rgb(0.993, 0.906, 0.144),
        ],
    )
}

/// Blue to red through light grey
pub fn coolwarm() -> Colormap {
    Colormap::new(
        "coolwarm",
        vec![
            Color::rgb(0.230, 0.299, 0.754),
            Color::rgb(0.552, 0.691, 0.996),
            Color::rgb(0.865, 0.865, 0.865),
            Color::rgb(0.957, 0.647, 0.510),
            Color::rgb(0.706, 0.016, 0.150),
        ],
    )
}

/// Dark blue to dark red through white
pub fn seismic() -> Colormap {
    Colormap::new(
        "seismic",
        vec![
            Color::rgb(0.0, 0.0, 0.3),
            Color::rgb(0.0, 0.0, 1.0),
            Color::rgb(1.0, 1.0, 1.0),
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.5, 0.0, 0.0),
        ],
    )
}

/// Look up a built-in colormap, case-insensitively; `_r` reverses it
pub fn get_colormap(name: &str) -> Option<Colormap> {
    let lower = name.to_ascii_lowercase();
    if let Some(base) = lower.strip_suffix("_r") {
        return get_colormap(base).map(Colormap::reversed);
    }
    match lower.as_str() {
        "viridis" => Some(viridis()),
        "coolwarm" => Some(coolwarm()),
        "seismic" => Some(seismic()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(1.0, 128.0 / 255.0, 0.0).to_hex(), "#FF8000");
        assert_eq!(Color::rgb(0.0, 2.0, -1.0).to_hex(), "#00FF00");
    }

    #[test]
    fn test_mix_midpoint() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(1.0, 1.0, 1.0);
        assert_eq!(black.mix(&white, 0.5), Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(black.mix(&white, 2.0), white);
    }

    #[test]
    fn test_sample_hits_anchors() {
        let cmap = coolwarm();
        assert_eq!(cmap.sample(0.0), Color::rgb(0.230, 0.299, 0.754));
        assert_eq!(cmap.sample(0.5), Color::rgb(0.865, 0.865, 0.865));
        assert_eq!(cmap.sample(1.0), Color::rgb(0.706, 0.016, 0.150));
    }

    #[test]
    fn test_map_value_clips() {
        let cmap = coolwarm();
        let cold = cmap.map_value(-1.0, -1.0, 1.0);
        let warm = cmap.map_value(1.0, -1.0, 1.0);

        assert!(cold.b > cold.r);
        assert!(warm.r > warm.b);
        assert_eq!(cmap.map_value(5.0, -1.0, 1.0), warm);
        assert_eq!(cmap.map_value(-7.0, -1.0, 1.0), cold);
        assert_eq!(cmap.map_value(3.0, 2.0, 2.0), cmap.sample(0.5));
    }

    #[test]
    fn test_reversed_swaps_ends() {
        assert_eq!(viridis().sample(0.0), viridis().reversed().sample(1.0));
        assert_eq!(viridis().reversed().reversed(), viridis());
    }

    #[test]
    fn test_degenerate_maps() {
        assert_eq!(Colormap::new("none", vec![]).sample(0.3), Color::default());
        let single = Colormap::new("one", vec![Color::rgb(0.1, 0.2, 0.3)]);
        assert_eq!(single.sample(0.9), Color::rgb(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_lookup() {
        for name in BUILTIN_COLORMAPS {
            assert!(get_colormap(name).is_some());
        }
        let rev = get_colormap("CoolWarm_r").unwrap();
        assert_eq!(rev.sample(0.0), coolwarm().sample(1.0));
        assert!(get_colormap("jet").is_none());
    }
}
