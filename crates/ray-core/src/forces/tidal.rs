use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::named_enum;

/// Upper bound on the tidal factor `k`.
pub const TIDAL_FACTOR_CAP: f32 = 2.0;

/// Minimum field distance as a fraction of the field radius.
pub const MIN_DISTANCE_FRACTION: f32 = 0.05;

/// Default strength of the axial anchoring of ray ends.
pub const DEFAULT_ANCHOR: f32 = 0.5;

/// Point source that deforms nearby ray bodies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TidalField {
    pub center: Vec3,
    pub intensity: f32,
    /// Reference radius; `k == intensity` at this distance.
    pub radius: f32,
}

impl Default for TidalField {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            intensity: 0.0,
            radius: 1.0,
        }
    }
}

impl TidalField {
    pub fn new(center: Vec3, intensity: f32, radius: f32) -> Self {
        Self {
            center,
            intensity,
            radius,
        }
    }

    /// A field that displaces nothing.
    pub fn is_inert(&self) -> bool {
        self.intensity == 0.0
            || self.radius == 0.0
            || !self.intensity.is_finite()
            || !self.radius.is_finite()
    }
}

/// Tuning shared by all deformation modes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TidalTuning {
    pub factor_cap: f32,
    pub min_distance_fraction: f32,
    /// 0 deforms the whole body evenly, 1 pins both ends.
    pub anchor: f32,
}

impl Default for TidalTuning {
    fn default() -> Self {
        Self {
            factor_cap: TIDAL_FACTOR_CAP,
            min_distance_fraction: MIN_DISTANCE_FRACTION,
            anchor: DEFAULT_ANCHOR,
        }
    }
}

/// Spaghettification: stretch along the field direction, thin across it.
///
/// This is a visual offset only. It reproduces the look of a tidal force
/// near a point source without integrating any motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeformationStrategy {
    #[default]
    None,
    TowardCenter,
    AwayFromCenter,
    Tidal,
}

named_enum!(DeformationStrategy, "deformation mode", {
    "NONE" => None,
    "TOWARD_CENTER" | "TOWARDS_CENTER" => TowardCenter,
    "AWAY_FROM_CENTER" => AwayFromCenter,
    "TIDAL" => Tidal,
});

impl DeformationStrategy {
    /// Deformed copy of `position`.
    ///
    /// * `position` - world-space vertex.
    /// * `origin` - centre of the vertex's own body; the radial/lateral split
    ///   is taken on `position - origin`.
    /// * `t` - ray-local coordinate, 0 at the base and 1 at the tip.
    /// * `field` - the deforming point source.
    pub fn apply(&self, position: Vec3, origin: Vec3, t: f32, field: &TidalField) -> Vec3 {
        self.apply_tuned(position, origin, t, field, &TidalTuning::default())
    }

    /// Like [`apply`](Self::apply) with explicit tuning constants.
    pub fn apply_tuned(
        &self,
        position: Vec3,
        origin: Vec3,
        t: f32,
        field: &TidalField,
        tuning: &TidalTuning,
    ) -> Vec3 {
        if *self == DeformationStrategy::None || field.is_inert() {
            return position;
        }

        let k = tidal_factor(position, field, tuning);
        let v = position - field.center;
        let n = v.normalize_or_zero();
        let local = position - origin;
        let radial = n * local.dot(n);
        let lateral = local - radial;

        let displacement = match self {
            DeformationStrategy::None => Vec3::ZERO,
            DeformationStrategy::TowardCenter => radial * k - lateral * k * 0.5,
            DeformationStrategy::AwayFromCenter => -radial * k - lateral * k * 0.5,
            DeformationStrategy::Tidal => -(radial * k * 0.8) - lateral * k * 0.8,
        };

        position + displacement * anchor_weight(t, tuning.anchor)
    }

    /// Non-mutating convenience evaluated at the midpoint `t = 0.5`.
    pub fn deform(&self, position: Vec3, origin: Vec3, field: &TidalField) -> Vec3 {
        self.apply(position, origin, 0.5, field)
    }
}

/// Tidal factor `k = intensity * R^3 / d^3`, with `d` floored and `k` kept
/// in `[0, factor_cap]`. Negative intensities act as an inert field.
pub fn tidal_factor(position: Vec3, field: &TidalField, tuning: &TidalTuning) -> f32 {
    if field.is_inert() {
        return 0.0;
    }
    let radius = field.radius.abs();
    let min_dist = (tuning.min_distance_fraction * radius).max(1e-6);
    let d = (position - field.center).length().max(min_dist);
    let ratio = radius / d;
    let cap = tuning.factor_cap.max(0.0);
    (field.intensity * ratio * ratio * ratio).clamp(0.0, cap)
}

/// Axial weight `1 - anchor * (2t - 1)^2`; exactly 1 at the midpoint.
#[inline]
fn anchor_weight(t: f32, anchor: f32) -> f32 {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let c = 2.0 * t - 1.0;
    1.0 - anchor.clamp(0.0, 1.0) * c * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_floors_distance_at_center() {
        let field = TidalField::new(Vec3::ZERO, 0.001, 10.0);
        // At the center d is floored to 0.5, so k = 0.001 * 8000 = 8 -> capped
        let k = tidal_factor(Vec3::ZERO, &field, &TidalTuning::default());
        assert_eq!(k, TIDAL_FACTOR_CAP);
        assert!(k.is_finite());
    }

    #[test]
    fn test_factor_inverse_cube() {
        let field = TidalField::new(Vec3::ZERO, 1.0, 10.0);
        let tuning = TidalTuning::default();
        let near = tidal_factor(Vec3::new(10.0, 0.0, 0.0), &field, &tuning);
        let far = tidal_factor(Vec3::new(20.0, 0.0, 0.0), &field, &tuning);
        assert!((near - 1.0).abs() < 1e-6);
        assert!((far - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_factor_never_negative() {
        let field = TidalField::new(Vec3::ZERO, -1.0, 10.0);
        let k = tidal_factor(Vec3::new(0.1, 0.0, 0.0), &field, &TidalTuning::default());
        assert_eq!(k, 0.0);
    }

    #[test]
    fn test_anchor_weight_midpoint() {
        assert_eq!(anchor_weight(0.5, 0.7), 1.0);
        assert!((anchor_weight(0.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((anchor_weight(1.0, 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_none_is_identity() {
        let field = TidalField::new(Vec3::ZERO, 1.0, 10.0);
        let p = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(DeformationStrategy::None.deform(p, Vec3::ONE, &field), p);
    }
}
