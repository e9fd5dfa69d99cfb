//! Scene parameters and their textual overrides.

use crate::constants::{
    COLOR_A_HEX, COLOR_B_HEX, MAX_PARTICLES, MAX_PIXEL_RATIO, PARTICLE_COUNT, PARTICLE_SEED,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("color `{0}` is not in #RRGGBB form")]
    BadColor(String),
    #[error("value `{value}` for `{key}` is not a valid number")]
    BadNumber { key: String, value: String },
    #[error("particle count must be at least 1")]
    EmptyField,
    #[error("particle count {0} exceeds the maximum of 1000000")]
    TooManyParticles(usize),
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub seed: u64,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    pub max_pixel_ratio: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: PARTICLE_SEED,
            // Both palette entries are compile-time literals in valid form
            color_a: parse_hex_color(COLOR_A_HEX).unwrap_or([1.0, 0.0, 1.0 / 3.0]),
            color_b: parse_hex_color(COLOR_B_HEX).unwrap_or([0.0, 1.0, 1.0]),
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

impl SceneConfig {
    /// Apply one `key=value` override, e.g. from a URL query or environment.
    ///
    /// Recognised keys: `particles`, `seed`, `color_a`, `color_b`.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let bad_number = || ConfigError::BadNumber {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "particles" => {
                let n: usize = value.trim().parse().map_err(|_| bad_number())?;
                if n == 0 {
                    return Err(ConfigError::EmptyField);
                }
                if n > MAX_PARTICLES {
                    return Err(ConfigError::TooManyParticles(n));
                }
                self.particle_count = n;
            }
            "seed" => self.seed = value.trim().parse().map_err(|_| bad_number())?,
            "color_a" => self.color_a = parse_hex_color(value)?,
            "color_b" => self.color_b = parse_hex_color(value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Apply every override in order, logging and skipping the bad ones.
    pub fn with_overrides<'a, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            if let Err(e) = self.apply_override(key, value) {
                log::warn!("[config] ignoring override: {e}");
            }
        }
        self
    }

    /// Device pixel ratio as seen by the shader.
    pub fn pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        device_pixel_ratio.min(self.max_pixel_ratio)
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into linear 0..1 components.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3], ConfigError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ConfigError::BadColor(hex.to_string()));
    }
    let mut out = [0.0f32; 3];
    for (i, c) in out.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| ConfigError::BadColor(hex.to_string()))?;
        *c = byte as f32 / 255.0;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_colors() {
        assert_eq!(parse_hex_color("#FF0055").unwrap(), [1.0, 0.0, 85.0 / 255.0]);
        assert_eq!(parse_hex_color("00ffff").unwrap(), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("#ÿÿÿ").is_err());
    }

    #[test]
    fn overrides_apply_and_bad_ones_are_skipped() {
        let cfg = SceneConfig::default().with_overrides([
            ("particles", "1000"),
            ("seed", "7"),
            ("particles", "zero"),
            ("volume", "11"),
        ]);
        assert_eq!(cfg.particle_count, 1000);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn zero_particles_is_rejected() {
        let mut cfg = SceneConfig::default();
        assert_eq!(
            cfg.apply_override("particles", "0"),
            Err(ConfigError::EmptyField)
        );
        assert_eq!(cfg.particle_count, PARTICLE_COUNT);
    }

    #[test]
    fn oversized_particle_count_is_rejected() {
        let mut cfg = SceneConfig::default();
        assert_eq!(
            cfg.apply_override("particles", "10000000"),
            Err(ConfigError::TooManyParticles(10_000_000))
        );
        assert_eq!(cfg.particle_count, PARTICLE_COUNT);

        let limit = MAX_PARTICLES.to_string();
        assert_eq!(cfg.apply_override("particles", &limit), Ok(()));
        assert_eq!(cfg.particle_count, MAX_PARTICLES);
    }

    #[test]
    fn largest_field_fits_default_gpu_buffer() {
        // wgpu::Limits::default().max_buffer_size
        const MAX_BUFFER_SIZE: usize = 1 << 28;
        let bytes = MAX_PARTICLES * std::mem::size_of::<crate::particles::ParticleInstance>();
        assert!(bytes <= MAX_BUFFER_SIZE, "{bytes} bytes");
    }

    #[test]
    fn pixel_ratio_is_clamped() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.pixel_ratio(3.0), 2.0);
        assert_eq!(cfg.pixel_ratio(1.5), 1.5);
    }
}
