//! Strategy lookup for authored shapes.
//!
//! Maps a [`BodyType`] to its [`RadiusProfile`] and a deformation mode to its
//! [`DeformationStrategy`]. Flat bodies have no 3D profile and return `None`
//! so the caller can route them to its 2D path.

use crate::forces::tidal::DeformationStrategy;
use crate::shapes::descriptor::{BodyType, ShapeDescriptor};
use crate::shapes::profile::{RadiusProfile, DEFAULT_DROPLET_POWER};

/// Profile for `body`, with the optional shaping parameter applied.
pub fn profile_for(body: BodyType, shaping: Option<f32>) -> Option<RadiusProfile> {
    match body {
        BodyType::Sphere => Some(RadiusProfile::Sphere),
        BodyType::Cone => Some(RadiusProfile::Cone),
        BodyType::Bullet => Some(RadiusProfile::Bullet),
        BodyType::Droplet => Some(RadiusProfile::droplet(
            shaping.unwrap_or(DEFAULT_DROPLET_POWER),
        )),
        BodyType::Egg => Some(RadiusProfile::egg(shaping.unwrap_or(0.0))),
        // Flat bodies are drawn by the 2D path
        BodyType::Line | BodyType::Ribbon => None,
    }
}

/// Profile for a whole descriptor.
pub fn profile_for_shape(shape: &ShapeDescriptor) -> Option<RadiusProfile> {
    profile_for(shape.body, shape.shaping)
}

/// Profile for `body`, or the sphere profile when `body` is absent.
pub fn profile_or_default(body: Option<BodyType>, shaping: Option<f32>) -> Option<RadiusProfile> {
    profile_for(body.unwrap_or_default(), shaping)
}

/// Deformation strategy for an optional authored mode; absent means `None`.
///
/// Returns `None` as well when the intensity disables the effect, so the
/// generator can skip the per-vertex work entirely.
pub fn deformation_for(mode: Option<DeformationStrategy>, intensity: f32) -> Option<DeformationStrategy> {
    match mode.unwrap_or_default() {
        DeformationStrategy::None => None,
        _ if intensity == 0.0 || !intensity.is_finite() => None,
        strategy => Some(strategy),
    }
}
