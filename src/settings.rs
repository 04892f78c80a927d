//! Visual preferences
//!
//! Settings only change how the world is drawn, never how it is simulated.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles drawn per frame for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Number of background stars drawn
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => crate::consts::STAR_COUNT / 2,
            QualityPreset::Medium | QualityPreset::High => crate::consts::STAR_COUNT,
        }
    }

    /// Whether glow halos are drawn by default
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Glow around bullets and power-ups
    pub glow: bool,
    /// Particle effects (muzzle flash, hits, explosions)
    pub particles: bool,
    /// Background star field
    pub starfield: bool,
    /// Expanding explosion rings
    pub explosion_rings: bool,

    // === Accessibility ===
    /// Reduced motion (stars stop twinkling)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            glow: true,
            particles: true,
            starfield: true,
            explosion_rings: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.glow = preset.glow_enabled();
    }

    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply overrides from a URL query such as `?quality=low&glow=off`.
    ///
    /// `quality` applies its preset first; the remaining keys are toggles
    /// and win over the preset. Unknown keys and bad values are logged and skipped.
    pub fn apply_query(&mut self, query: &str) {
        let pairs: Vec<(&str, &str)> = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect();

        for (key, value) in &pairs {
            if *key == "quality" {
                match QualityPreset::parse(value) {
                    Some(preset) => self.apply_preset(preset),
                    None => log::warn!("Unknown quality preset {value:?}"),
                }
            }
        }

        for (key, value) in pairs {
            let flag = match key {
                "quality" => continue,
                "glow" => &mut self.glow,
                "particles" => &mut self.particles,
                "starfield" => &mut self.starfield,
                "rings" | "explosion_rings" => &mut self.explosion_rings,
                "reduced_motion" => &mut self.reduced_motion,
                _ => {
                    log::warn!("Ignoring unknown setting {key:?}");
                    continue;
                }
            };
            match parse_flag(value) {
                Some(on) => *flag = on,
                None => log::warn!("Setting {key} expects on/off, got {value:?}"),
            }
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective star count
    pub fn star_count(&self) -> usize {
        if !self.starfield {
            0
        } else {
            self.quality.star_count()
        }
    }

    /// Whether stars twinkle (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        !self.reduced_motion
    }
}

/// A bare key (`?reduced_motion`) counts as on
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_preset_disables_glow() {
        let s = Settings::from_preset(QualityPreset::Low);
        assert!(!s.glow);
        assert_eq!(s.max_particles(), 100);
        assert_eq!(s.star_count(), crate::consts::STAR_COUNT / 2);
    }

    #[test]
    fn test_toggles_override_preset() {
        let mut s = Settings::from_preset(QualityPreset::High);
        s.particles = false;
        s.starfield = false;
        assert_eq!(s.max_particles(), 0);
        assert_eq!(s.star_count(), 0);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_settings_from_json() {
        let s = Settings::from_json(r#"{ "quality": "Low", "reduced_motion": true }"#).unwrap();
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(!s.effective_twinkle());
        assert!(s.particles);
    }

    #[test]
    fn test_query_applies_preset_then_toggles() {
        let mut s = Settings::default();
        s.apply_query("?glow=on&quality=low&reduced_motion");
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(s.glow);
        assert!(s.reduced_motion);
        assert_eq!(s.max_particles(), 100);
    }

    #[test]
    fn test_query_skips_bad_entries() {
        let mut s = Settings::default();
        s.apply_query("quality=ultra&particles=maybe&volume=3&&rings=0");
        assert_eq!(s.quality, QualityPreset::Medium);
        assert!(s.particles);
        assert!(!s.explosion_rings);
    }

    #[test]
    fn test_empty_query_keeps_defaults() {
        let mut s = Settings::default();
        s.apply_query("");
        assert_eq!(s, Settings::default());
    }
}
