use glam::Vec3;
use ray_core::forces::tidal::{tidal_factor, DeformationStrategy, TidalField, TidalTuning, TIDAL_FACTOR_CAP};

const MODES: [DeformationStrategy; 4] = [
    DeformationStrategy::None,
    DeformationStrategy::TowardCenter,
    DeformationStrategy::AwayFromCenter,
    DeformationStrategy::Tidal,
];

fn sample_points() -> Vec<Vec3> {
    let mut points = Vec::new();
    for x in -2..=2 {
        for y in -2..=2 {
            points.push(Vec3::new(x as f32 * 1.3, y as f32 * 0.7 + 0.1, 0.4));
        }
    }
    points
}

#[test]
fn test_zero_intensity_is_identity() {
    let field = TidalField::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 5.0);
    for mode in MODES {
        for p in sample_points() {
            for t in [0.0, 0.3, 0.5, 1.0] {
                assert_eq!(mode.apply(p, Vec3::ZERO, t, &field), p, "{:?} moved {:?}", mode, p);
            }
        }
    }
}

#[test]
fn test_zero_radius_is_identity() {
    let field = TidalField::new(Vec3::ZERO, 3.0, 0.0);
    for mode in MODES {
        for p in sample_points() {
            assert_eq!(mode.deform(p, Vec3::ONE, &field), p);
        }
    }
}

#[test]
fn test_toward_center_stretches_radial_by_k() {
    // Vertex at distance d = R from the field: k = 1 * R^3 / d^3 = 1
    let field = TidalField::new(Vec3::ZERO, 1.0, 10.0);
    let position = Vec3::new(10.0, 0.0, 0.0);
    let origin = Vec3::new(9.0, 0.0, 0.0);

    let k = tidal_factor(position, &field, &TidalTuning::default());
    assert!((k - 1.0).abs() < 1e-6, "expected k = 1, got {}", k);

    let out = DeformationStrategy::TowardCenter.apply(position, origin, 0.5, &field);
    let radial_before = (position - origin).x;
    let radial_after = (out - origin).x;
    assert!(
        (radial_after - radial_before * (1.0 + k)).abs() < 1e-5,
        "radial {} -> {}",
        radial_before,
        radial_after
    );
    assert!(out.y.abs() < 1e-6 && out.z.abs() < 1e-6);
}

#[test]
fn test_toward_center_thins_lateral() {
    let field = TidalField::new(Vec3::ZERO, 1.0, 10.0);
    let origin = Vec3::new(10.0, 0.0, 0.0);
    let position = Vec3::new(10.0, 1.0, 0.0);
    let out = DeformationStrategy::TowardCenter.apply(position, origin, 0.5, &field);
    assert!((out - origin).y < 1.0, "lateral offset should shrink, got {:?}", out);
}

#[test]
fn test_away_from_center_compresses_radial() {
    let field = TidalField::new(Vec3::ZERO, 1.0, 10.0);
    let origin = Vec3::new(9.0, 0.0, 0.0);
    let position = Vec3::new(10.0, 0.0, 0.0);
    let out = DeformationStrategy::AwayFromCenter.apply(position, origin, 0.5, &field);
    assert!((out - origin).x < 1.0);
}

#[test]
fn test_displacement_bounded_by_cap() {
    let origin = Vec3::new(0.5, 0.5, 0.5);
    for intensity in [50.0, -1.0, -50.0] {
        let field = TidalField::new(Vec3::new(0.2, -0.1, 0.0), intensity, 2.0);
        for mode in MODES {
            for p in sample_points() {
                for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
                    let out = mode.apply(p, origin, t, &field);
                    let moved = (out - p).length();
                    let bound = TIDAL_FACTOR_CAP * (p - origin).length() + 1e-4;
                    assert!(out.is_finite(), "{:?} produced {:?}", mode, out);
                    assert!(moved <= bound, "{:?} at {} moved {} > {}", mode, intensity, moved, bound);
                }
            }
        }
    }
}

#[test]
fn test_negative_intensity_near_center_stays_put() {
    let field = TidalField::new(Vec3::ZERO, -1.0, 10.0);
    let p = Vec3::new(0.1, 0.0, 0.0);
    let out = DeformationStrategy::TowardCenter.deform(p, Vec3::new(0.0, 1.0, 0.0), &field);
    assert_eq!(out, p);
}

#[test]
fn test_vertex_at_field_center_is_finite() {
    let field = TidalField::new(Vec3::ZERO, 1.0, 1.0);
    for mode in MODES {
        let out = mode.apply(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 0.5, &field);
        assert!(out.is_finite());
    }
}

#[test]
fn test_anchor_pins_ends() {
    let field = TidalField::new(Vec3::ZERO, 1.0, 10.0);
    let tuning = TidalTuning {
        anchor: 1.0,
        ..TidalTuning::default()
    };
    let origin = Vec3::new(9.0, 0.0, 0.0);
    let p = Vec3::new(10.0, 0.0, 0.0);
    for t in [0.0, 1.0] {
        let out = DeformationStrategy::Tidal.apply_tuned(p, origin, t, &field, &tuning);
        assert!((out - p).length() < 1e-6, "end at t={} moved to {:?}", t, out);
    }
}

#[test]
fn test_mode_names_parse() {
    assert_eq!("toward_center".parse::<DeformationStrategy>(), Ok(DeformationStrategy::TowardCenter));
    assert_eq!("TIDAL".parse::<DeformationStrategy>(), Ok(DeformationStrategy::Tidal));
    assert_eq!(DeformationStrategy::from("bogus".to_string()), DeformationStrategy::None);
}
