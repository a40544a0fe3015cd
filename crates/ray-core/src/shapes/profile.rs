//! Radius profiles for ray bodies.
//!
//! A profile maps the polar angle `theta` in `[0, PI]` (base to tip) to a
//! multiplier on the body's maximum radius. Every profile is a closed-form
//! curve; none of them is required to be monotonic.

use std::f32::consts::{FRAC_PI_2, PI};

/// Egg asymmetry is limited so the base never inverts.
pub const EGG_ASYMMETRY_LIMIT: f32 = 0.8;

/// Droplet power used when none is authored.
pub const DEFAULT_DROPLET_POWER: f32 = 1.5;

/// Closed family of radius curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadiusProfile {
    /// Constant 1.
    Sphere,
    /// Linear taper `theta / PI`.
    Cone,
    /// Hemispherical cap up to `PI/2`, then a straight cylinder.
    Bullet,
    /// `0.5 * (1 - cos) * |sin|^power`; power > 1 sharpens the tip.
    Droplet { power: f32 },
    /// `1 + asymmetry * cos`; positive asymmetry widens the base.
    Egg { asymmetry: f32 },
}

impl RadiusProfile {
    pub fn droplet(power: f32) -> Self {
        let power = if power.is_finite() {
            power.max(0.0)
        } else {
            DEFAULT_DROPLET_POWER
        };
        RadiusProfile::Droplet { power }
    }

    pub fn egg(asymmetry: f32) -> Self {
        let asymmetry = if asymmetry.is_finite() {
            asymmetry.clamp(-EGG_ASYMMETRY_LIMIT, EGG_ASYMMETRY_LIMIT)
        } else {
            0.0
        };
        RadiusProfile::Egg { asymmetry }
    }

    /// Radius multiplier at polar angle `theta`; input is clamped to `[0, PI]`.
    pub fn radius(&self, theta: f32) -> f32 {
        let theta = if theta.is_nan() { 0.0 } else { theta.clamp(0.0, PI) };
        let r = match *self {
            RadiusProfile::Sphere => 1.0,
            RadiusProfile::Cone => theta / PI,
            RadiusProfile::Bullet => {
                if theta < FRAC_PI_2 {
                    theta.sin()
                } else {
                    1.0
                }
            }
            RadiusProfile::Droplet { power } => {
                (1.0 - theta.cos()) * theta.sin().abs().powf(power) * 0.5
            }
            RadiusProfile::Egg { asymmetry } => 1.0 + asymmetry * theta.cos(),
        };
        r.max(0.0)
    }

    /// `d radius / d theta` by central difference, one-sided at the ends.
    pub fn slope(&self, theta: f32) -> f32 {
        const H: f32 = 1e-3;
        let theta = if theta.is_nan() { 0.0 } else { theta.clamp(0.0, PI) };
        let lo = (theta - H).max(0.0);
        let hi = (theta + H).min(PI);
        (self.radius(hi) - self.radius(lo)) / (hi - lo)
    }

    /// Fewest rings that avoid visible faceting. Advisory only.
    pub fn min_rings(&self) -> u32 {
        match self {
            RadiusProfile::Sphere => 8,
            RadiusProfile::Cone => 6,
            RadiusProfile::Bullet => 10,
            RadiusProfile::Droplet { .. } => 12,
            RadiusProfile::Egg { .. } => 10,
        }
    }
}
