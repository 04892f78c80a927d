//! Cosmic Defender - A vertical arcade space shooter
//!
//! Core modules:
//! - `sim`: Simulation (movement, spawning, collisions, world state)
//! - `renderer`: Canvas contract, scene drawing and the WebGPU backend
//! - `engine`: Phase machine and frame loop entry point
//! - `tuning`: Data-driven game balance
//! - `settings`: Visual preferences

pub mod engine;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, FrameStatus};
pub use sim::GamePhase;
pub use settings::{QualityPreset, Settings};
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Default drawing surface size (pixels)
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Nominal frame duration in milliseconds (used by the headless runner)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Background star field
    pub const STAR_COUNT: usize = 100;
    pub const STAR_STEP_X: usize = 7;
    pub const STAR_STEP_Y: usize = 11;
}

/// RGBA colors, components in 0..=1
pub type Color = [f32; 4];

/// Palette shared by the simulation (entity colors) and the renderer
pub mod colors {
    use super::Color;

    pub const PLAYER: Color = [0.0, 1.0, 1.0, 1.0]; // #00ffff
    pub const PLAYER_COCKPIT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_ENGINE: Color = [1.0, 0.4, 0.0, 1.0]; // #ff6600
    pub const BULLET: Color = [1.0, 1.0, 0.0, 1.0]; // #ffff00
    pub const FAST_ENEMY: Color = [1.0, 4.0 / 15.0, 4.0 / 15.0, 1.0]; // #ff4444
    pub const POWER_UP_HEALTH: Color = [0.0, 1.0, 0.0, 1.0]; // #00ff00
    pub const POWER_UP_SCORE: Color = [1.0, 2.0 / 3.0, 0.0, 1.0]; // #ffaa00
    pub const EXPLOSION: Color = [1.0, 0.4, 0.0, 1.0]; // #ff6600
    pub const PLAYER_HIT: Color = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_BACK: Color = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_FILL: Color = [0.0, 0.5, 0.0, 1.0];
    pub const STAR: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND_INNER: Color = [0.0, 4.0 / 255.0, 40.0 / 255.0, 1.0]; // #000428
    pub const BACKGROUND_OUTER: Color = [0.0, 78.0 / 255.0, 146.0 / 255.0, 1.0]; // #004e92

    /// Convert HSL (hue in degrees, saturation/lightness in 0..=1) to RGBA
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        [r + m, g + m, b + m, 1.0]
    }

    /// Same color with a different alpha
    #[inline]
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_hsl_primaries() {
        let red = hsl(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5 && red[2].abs() < 1e-5);

        let magenta = hsl(300.0, 1.0, 0.5);
        assert!((magenta[0] - 1.0).abs() < 1e-5);
        assert!(magenta[1].abs() < 1e-5);
        assert!((magenta[2] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hsl_wraps_hue() {
        let a = hsl(330.0, 0.7, 0.5);
        let b = hsl(690.0, 0.7, 0.5);
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < 1e-5);
        }
    }
}
