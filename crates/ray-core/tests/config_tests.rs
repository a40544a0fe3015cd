//! Integration tests for configuration loading.
//!
//! Engine tuning reads `RAY_*` environment variables, so every test touching
//! the environment runs serially.

use std::path::PathBuf;

use ray_core::config::{EngineConfig, RayEffectConfig};
use ray_core::effect::RayEffect;
use ray_core::flow::{FlickerMode, TravelMode, WaveDistribution};
use ray_core::forces::tidal::DeformationStrategy;
use ray_core::layout::RayLayout;
use ray_core::mesh::pattern::CellPattern;
use ray_core::shapes::descriptor::BodyType;
use serial_test::serial;

fn config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
}

#[test]
#[serial]
fn test_default_file_matches_builtin() {
    std::env::remove_var("RAY_TIDAL_FACTOR_CAP");
    let config = EngineConfig::load_from(config_dir()).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
#[serial]
fn test_missing_dir_uses_defaults() {
    std::env::remove_var("RAY_TIDAL_FACTOR_CAP");
    let config = EngineConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("RAY_TIDAL_FACTOR_CAP", "3.5");
    let config = EngineConfig::load_from(config_dir());
    std::env::remove_var("RAY_TIDAL_FACTOR_CAP");

    let config = config.unwrap();
    assert_eq!(config.tidal_factor_cap, 3.5);
    assert_eq!(config.generator_tuning().tidal.factor_cap, 3.5);
}

#[test]
#[serial]
fn test_bad_env_value_is_error() {
    std::env::set_var("RAY_CULL_ALPHA", "lots");
    let result = EngineConfig::load_from(config_dir());
    std::env::remove_var("RAY_CULL_ALPHA");
    assert!(result.is_err());
}

#[test]
fn test_effect_file_loads() {
    let config = RayEffectConfig::from_file(config_dir().join("effects/solar_flare.toml")).unwrap();
    assert_eq!(config.ray_count, 12);
    assert_eq!(config.shape.body, BodyType::Droplet);
    assert_eq!(config.shape.rings, 24);
    assert!(matches!(config.layout, RayLayout::Fan { arc, .. } if arc == 360.0));

    let phase = config.flow.phase.as_ref().unwrap();
    assert_eq!(phase.distribution, WaveDistribution::GoldenRatio);
    assert!(phase.enabled, "omitted fields take their defaults");

    let travel = config.flow.travel.as_ref().unwrap();
    assert_eq!(travel.mode, TravelMode::BipolarCometSync);
    assert_eq!(travel.count, 2);
    assert_eq!(config.flow.flicker.as_ref().unwrap().mode, FlickerMode::Scintillation);

    assert_eq!(config.deformation.mode, DeformationStrategy::Tidal);
    assert_eq!(config.clip.end, 0.9);

    let fx = RayEffect::new(config);
    assert_eq!(fx.deformation(), Some(DeformationStrategy::Tidal));
    assert_eq!(fx.frame(0.5).len(), 12);
}

#[test]
fn test_unknown_names_fall_back() {
    let toml = r#"
        pattern = "herringbone"

        [shape]
        body = "PYRAMID"

        [flow.travel]
        mode = "ZIGZAG"
    "#;
    let config = RayEffectConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.pattern, CellPattern::Solid);
    assert_eq!(config.shape.body, BodyType::Sphere);
    assert_eq!(config.flow.travel.unwrap().mode, TravelMode::None);
}

#[test]
fn test_beam_layout_parses() {
    let toml = r#"
        ray_count = 3

        [layout]
        type = "beam"
        origin = [0.0, 1.0, 0.0]
        direction = [0.0, 0.0, 2.0]
        length = 4.0
    "#;
    let config = RayEffectConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.layout.radii(), (0.0, 4.0));
}

#[test]
fn test_flat_body_effect_builds_nothing() {
    let config = RayEffectConfig::from_toml_str("ray_count = 4\n[shape]\nbody = \"LINE\"").unwrap();
    let fx = RayEffect::new(config);
    assert!(fx.merged_mesh(0.0).vertices.is_empty());
}
