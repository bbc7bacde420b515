//! # Overlay Configuration
//!
//! Pool sizing and draw defaults for a [`crate::render::DebugOverlay`].
//! Configurations load from TOML or RON, picked by file extension.
//!
//! ```toml
//! [pools]
//! line_batch_size = 1000
//! sphere_batch_size = 500
//!
//! [defaults.options]
//! thickness = 0.02
//! draw_through = true
//! ```

use crate::render::host::PrimitiveKind;
use crate::render::options::{DrawOptions, GridOptions, NumberLineOptions, VectorOptions};
use serde::{Deserialize, Serialize};

/// Default number of host objects created per pool growth
pub const DEFAULT_GROWTH_BATCH_SIZE: usize = 500;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Pool growth settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Line slots created per growth
    pub line_batch_size: usize,
    /// Sphere slots created per growth
    pub sphere_batch_size: usize,
    /// Cone slots created per growth
    pub cone_batch_size: usize,
    /// Plane slots created per growth
    pub plane_batch_size: usize,
    /// Tessellation hint for spheres, tubes and cones
    pub segments: u32,
}

impl PoolConfig {
    /// Growth batch size for a pooled kind; 0 for unpooled kinds
    pub const fn batch_size(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Line => self.line_batch_size,
            PrimitiveKind::Sphere => self.sphere_batch_size,
            PrimitiveKind::Cone => self.cone_batch_size,
            PrimitiveKind::Plane => self.plane_batch_size,
            PrimitiveKind::TransformHandle => 0,
        }
    }

    /// Same batch size for every kind
    pub fn uniform(batch_size: usize) -> Self {
        Self {
            line_batch_size: batch_size,
            sphere_batch_size: batch_size,
            cone_batch_size: batch_size,
            plane_batch_size: batch_size,
            ..Self::default()
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            line_batch_size: DEFAULT_GROWTH_BATCH_SIZE,
            sphere_batch_size: DEFAULT_GROWTH_BATCH_SIZE,
            cone_batch_size: DEFAULT_GROWTH_BATCH_SIZE,
            plane_batch_size: DEFAULT_GROWTH_BATCH_SIZE,
            segments: 16,
        }
    }
}

/// Defaults for composite primitives and option-less helpers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawDefaults {
    /// Options used by [`crate::render::DebugOverlay::default_options`]
    pub options: DrawOptions,
    /// Arrowheads for `draw_vector`
    pub vector: VectorOptions,
    /// Layout for `draw_grid_plane`
    pub grid: GridOptions,
    /// Layout for `draw_number_line`
    pub number_line: NumberLineOptions,
}

/// Top-level overlay configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Pool growth settings
    pub pools: PoolConfig,
    /// Draw defaults
    pub defaults: DrawDefaults,
}

impl Config for OverlayConfig {}

impl OverlayConfig {
    /// Set pool settings
    pub fn with_pools(mut self, pools: PoolConfig) -> Self {
        self.pools = pools;
        self
    }

    /// Set draw defaults
    pub const fn with_defaults(mut self, defaults: DrawDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in PrimitiveKind::POOLED {
            if self.pools.batch_size(kind) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{kind} pool batch size must be at least 1"
                )));
            }
        }

        let options = &self.defaults.options;
        if !(0.0..=1.0).contains(&options.opacity) {
            return Err(ConfigError::Invalid(format!(
                "default opacity {} is outside [0, 1]",
                options.opacity
            )));
        }
        if options.thickness <= 0.0 {
            return Err(ConfigError::Invalid(
                "default line thickness must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.defaults.grid.fill_opacity) {
            return Err(ConfigError::Invalid("grid fill opacity is outside [0, 1]".to_string()));
        }
        if self.defaults.vector.head_length < 0.0 || self.defaults.vector.head_radius < 0.0 {
            return Err(ConfigError::Invalid(
                "vector head dimensions must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::Color;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("debug_overlay_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = OverlayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pools.batch_size(PrimitiveKind::Sphere), DEFAULT_GROWTH_BATCH_SIZE);
        assert_eq!(config.pools.batch_size(PrimitiveKind::TransformHandle), 0);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = OverlayConfig::default().with_pools(PoolConfig {
            cone_batch_size: 0,
            ..PoolConfig::default()
        });
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("cone"));
    }

    #[test]
    fn test_bad_opacity_rejected() {
        let mut config = OverlayConfig::default();
        config.defaults.options.opacity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [pools]
            line_batch_size = 1000

            [defaults.options]
            draw_through = true
            color = { r = 1.0, g = 0.0, b = 0.0 }
        "#;
        let config: OverlayConfig = toml::from_str(text).unwrap();

        assert_eq!(config.pools.line_batch_size, 1000);
        assert_eq!(config.pools.plane_batch_size, DEFAULT_GROWTH_BATCH_SIZE);
        assert!(config.defaults.options.draw_through);
        assert_eq!(config.defaults.options.color, Color::RED);
        assert_eq!(config.defaults.grid, GridOptions::default());
    }

    #[test]
    fn test_ron_parses() {
        let text = "(pools: (sphere_batch_size: 64), defaults: (vector: (head_length: 0.3)))";
        let config: OverlayConfig = ron::from_str(text).unwrap();
        assert_eq!(config.pools.sphere_batch_size, 64);
        assert!((config.defaults.vector.head_length - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut config = OverlayConfig::default().with_pools(PoolConfig::uniform(32));
        config.defaults.number_line.tick_spacing = 0.5;

        for ext in ["toml", "ron"] {
            let path = temp_path(&format!("config.{ext}"));
            config.save_to_file(&path).unwrap();
            let loaded = OverlayConfig::load_from_file(&path).unwrap();
            std::fs::remove_file(&path).ok();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = OverlayConfig::default().save_to_file(&temp_path("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = OverlayConfig::load_from_file(&temp_path("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
