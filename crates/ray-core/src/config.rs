//! Engine tuning and authored effect configuration.
//!
//! Engine tuning is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `<dir>/default.toml`
//! 2. `<dir>/user.toml`
//! 3. Environment variables (`RAY_KEY`, nested with `__`)
//!
//! Effect descriptions are authored elsewhere and arrive as TOML.

use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flow::FlowConfig;
use crate::forces::tidal::{
    DeformationStrategy, TidalField, TidalTuning, DEFAULT_ANCHOR, MIN_DISTANCE_FRACTION, TIDAL_FACTOR_CAP,
};
use crate::layout::RayLayout;
use crate::mesh::alpha::{AlphaTuning, ClipRange, CLIP_FADE_WIDTH, EDGE_FADE_ZONE};
use crate::mesh::generator::{GeneratorTuning, CULL_ALPHA};
use crate::mesh::mask::GridMask;
use crate::mesh::pattern::CellPattern;
use crate::shapes::descriptor::ShapeDescriptor;

/// Environment prefix for engine tuning overrides.
pub const ENV_PREFIX: &str = "RAY_";

/// Overridable engine constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the tidal factor.
    pub tidal_factor_cap: f32,
    /// Minimum field distance as a fraction of the field radius.
    pub min_distance_fraction: f32,
    /// How strongly ray ends resist deformation, in [0,1].
    pub deformation_anchor: f32,
    /// Rings below this alpha at both ends are skipped.
    pub cull_alpha: f32,
    pub clip_fade_width: f32,
    pub edge_fade_zone: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tidal_factor_cap: TIDAL_FACTOR_CAP,
            min_distance_fraction: MIN_DISTANCE_FRACTION,
            deformation_anchor: DEFAULT_ANCHOR,
            cull_alpha: CULL_ALPHA,
            clip_fade_width: CLIP_FADE_WIDTH,
            edge_fade_zone: EDGE_FADE_ZONE,
        }
    }
}

impl EngineConfig {
    /// Load tuning from `config/` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load tuning from a specific config directory and the environment.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }
        // RAY_TIDAL_FACTOR_CAP=3 -> tidal_factor_cap = 3
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract()?;
        log::debug!("engine config loaded from {}: {:?}", config_dir.display(), config);
        Ok(config)
    }

    pub fn generator_tuning(&self) -> GeneratorTuning {
        GeneratorTuning {
            cull_alpha: self.cull_alpha.max(0.0),
            alpha: AlphaTuning {
                clip_fade_width: self.clip_fade_width,
                edge_zone: self.edge_fade_zone,
            },
            tidal: TidalTuning {
                factor_cap: self.tidal_factor_cap,
                min_distance_fraction: self.min_distance_fraction,
                anchor: self.deformation_anchor,
            },
        }
    }
}

/// Deformation mode with its field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformationConfig {
    pub mode: DeformationStrategy,
    pub field: TidalField,
}

/// One authored ray effect: a group of rays sharing shape and animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayEffectConfig {
    pub shape: ShapeDescriptor,
    pub ray_count: u32,
    pub layout: RayLayout,
    pub flow: FlowConfig,
    pub deformation: DeformationConfig,
    pub clip: ClipRange,
    pub pattern: CellPattern,
    /// Linear RGB in [0,1].
    pub color: [f32; 3],
    pub mask: Option<GridMask>,
}

impl Default for RayEffectConfig {
    fn default() -> Self {
        Self {
            shape: ShapeDescriptor::default(),
            ray_count: 1,
            layout: RayLayout::default(),
            flow: FlowConfig::default(),
            deformation: DeformationConfig::default(),
            clip: ClipRange::default(),
            pattern: CellPattern::Solid,
            color: [1.0, 1.0, 1.0],
            mask: None,
        }
    }
}

impl RayEffectConfig {
    /// Parse an effect description from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(Figment::new().merge(Toml::string(toml)).extract()?)
    }

    /// Load an effect description from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Figment::new().merge(Toml::file(path.as_ref())).extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.tidal_factor_cap, 2.0);
        assert_eq!(config.min_distance_fraction, 0.05);
        assert_eq!(config.cull_alpha, 0.001);
        assert_eq!(config.generator_tuning(), GeneratorTuning::default());
    }

    #[test]
    fn test_empty_effect_is_default() {
        let config = RayEffectConfig::from_toml_str("").unwrap();
        assert_eq!(config, RayEffectConfig::default());
    }

    #[test]
    fn test_effect_round_trips_names() {
        let toml = r#"
            ray_count = 6
            pattern = "checker"

            [shape]
            body = "DROPLET"
            shaping = 2.0

            [deformation]
            mode = "TIDAL"
            field = { center = [0.0, 1.0, 0.0], intensity = 0.5, radius = 3.0 }
        "#;
        let config = RayEffectConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.ray_count, 6);
        assert_eq!(config.pattern, CellPattern::Checker);
        assert_eq!(config.shape.shaping, Some(2.0));
        assert_eq!(config.deformation.mode, DeformationStrategy::Tidal);
        assert_eq!(config.deformation.field.radius, 3.0);
    }

    #[test]
    fn test_malformed_effect_errors() {
        let err = RayEffectConfig::from_toml_str("ray_count = \"many\"").unwrap_err();
        assert!(format!("{}", err).contains("configuration error"));
    }
}
