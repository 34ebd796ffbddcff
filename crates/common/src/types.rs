use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a terrain configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Terrain generation and rendering settings.
///
/// Loaded once at startup (or edited live in the viewer) and passed by
/// reference to the heightfield, mesh, and renderer layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Side length of the square heightmap texture, in texels.
    pub tex_size: u32,
    /// Noise-space units per texel when sampling the source.
    pub noise_resolution: f32,
    /// Seed forwarded to the noise source.
    pub noise_seed: u32,
    /// Vertical scale applied to normalized height samples.
    pub height_scale: f32,
    /// Side length of the terrain chunk footprint, in world units.
    pub chunk_size: u32,
    /// Interior vertex density of the chunk mesh (1.0 = one per unit).
    pub chunk_density: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tex_size: 512,
            noise_resolution: 0.1,
            noise_seed: 0,
            height_scale: 1.0,
            chunk_size: 100,
            chunk_density: 1.0,
        }
    }
}

impl TerrainConfig {
    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Reject values the rest of the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tex_size == 0 {
            return Err(ConfigError::Invalid("tex_size must be at least 1".into()));
        }
        if self.chunk_size < 3 {
            return Err(ConfigError::Invalid(
                "chunk_size must be at least 3 to triangulate".into(),
            ));
        }
        if !(self.noise_resolution > 0.0) {
            return Err(ConfigError::Invalid(
                "noise_resolution must be positive".into(),
            ));
        }
        if !(self.chunk_density > 0.0) {
            return Err(ConfigError::Invalid(
                "chunk_density must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TerrainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tex_size, 512);
        assert_eq!(config.chunk_size, 100);
    }

    #[test]
    fn json_round_trip() {
        let config = TerrainConfig {
            tex_size: 256,
            height_scale: 8.0,
            ..TerrainConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: TerrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn save_and_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("terrain.json");

        let config = TerrainConfig {
            noise_seed: 7,
            ..TerrainConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = TerrainConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = TerrainConfig::load("/nonexistent/terrain.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn zero_tex_size_rejected() {
        let config = TerrainConfig {
            tex_size: 0,
            ..TerrainConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn tiny_chunk_rejected() {
        let config = TerrainConfig {
            chunk_size: 2,
            ..TerrainConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
