use serde::{Deserialize, Serialize};

use crate::error::named_enum;

/// Largest ring count the generator will tessellate.
pub const MAX_RINGS: u32 = 256;
/// Largest segment count the generator will tessellate.
pub const MAX_SEGMENTS: u32 = 512;

/// Visual body of a ray.
///
/// `Line` and `Ribbon` are flat bodies drawn by a separate 2D path and have
/// no radius profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyType {
    #[default]
    Sphere,
    Cone,
    Bullet,
    Droplet,
    Egg,
    Line,
    Ribbon,
}

named_enum!(BodyType, "body type", {
    "SPHERE" => Sphere,
    "CONE" => Cone,
    "BULLET" | "CAPSULE" => Bullet,
    "DROPLET" | "TEARDROP" => Droplet,
    "EGG" => Egg,
    "LINE" => Line,
    "RIBBON" => Ribbon,
});

impl BodyType {
    /// Whether this body is built by the 3D surface generator.
    pub fn is_volumetric(&self) -> bool {
        !matches!(self, BodyType::Line | BodyType::Ribbon)
    }
}

/// Authored shape of one ray body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDescriptor {
    pub body: BodyType,
    /// Axial length from base to tip.
    pub length: f32,
    /// Equatorial radius the profile multiplier is applied to.
    pub max_radius: f32,
    pub rings: u32,
    pub segments: u32,
    /// Droplet tip power or egg asymmetry; ignored by other bodies.
    pub shaping: Option<f32>,
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        Self {
            body: BodyType::Sphere,
            length: 1.0,
            max_radius: 0.5,
            rings: 16,
            segments: 24,
            shaping: None,
        }
    }
}

impl ShapeDescriptor {
    pub fn new(body: BodyType, length: f32, max_radius: f32) -> Self {
        Self {
            body,
            length,
            max_radius,
            ..Self::default()
        }
    }

    pub fn with_tessellation(mut self, rings: u32, segments: u32) -> Self {
        self.rings = rings;
        self.segments = segments;
        self
    }

    pub fn with_shaping(mut self, shaping: f32) -> Self {
        self.shaping = Some(shaping);
        self
    }

    /// Ring count clamped to `[1, MAX_RINGS]`.
    pub fn ring_count(&self) -> u32 {
        self.rings.clamp(1, MAX_RINGS)
    }

    /// Segment count clamped to `[3, MAX_SEGMENTS]`.
    pub fn segment_count(&self) -> u32 {
        self.segments.clamp(3, MAX_SEGMENTS)
    }

    /// Length with negative or non-finite values mapped to zero.
    pub fn axial_length(&self) -> f32 {
        if self.length.is_finite() {
            self.length.max(0.0)
        } else {
            0.0
        }
    }

    /// Radius with negative or non-finite values mapped to zero.
    pub fn radius(&self) -> f32 {
        if self.max_radius.is_finite() {
            self.max_radius.max(0.0)
        } else {
            0.0
        }
    }
}
