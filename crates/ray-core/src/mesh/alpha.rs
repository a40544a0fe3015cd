//! Per-ring alpha modulation.
//!
//! All three terms are functions of the ray-local `t` (0 at the base, 1 at
//! the tip), not of the profile's polar angle.

use serde::{Deserialize, Serialize};

use crate::flow::TravelSample;
use crate::math::saturate;

/// Width of the clip-range fade ramps in `t` units.
pub const CLIP_FADE_WIDTH: f32 = 0.1;

/// Distance from a group edge within which edge fading starts.
pub const EDGE_FADE_ZONE: f32 = 0.4;

/// Visible part of a ray in `t` units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipRange {
    pub start: f32,
    pub end: f32,
}

impl Default for ClipRange {
    fn default() -> Self {
        Self { start: 0.0, end: 1.0 }
    }
}

impl ClipRange {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaTuning {
    pub clip_fade_width: f32,
    pub edge_zone: f32,
}

impl Default for AlphaTuning {
    fn default() -> Self {
        Self {
            clip_fade_width: CLIP_FADE_WIDTH,
            edge_zone: EDGE_FADE_ZONE,
        }
    }
}

/// Alpha inputs of one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaInputs {
    /// Whole-ray alpha from the animation state.
    pub flow_alpha: f32,
    pub clip: ClipRange,
    /// Normalized position of this ray within its group, if the group has edges.
    pub edge_center: Option<f32>,
    pub travel: Option<TravelSample>,
}

impl Default for AlphaInputs {
    fn default() -> Self {
        Self {
            flow_alpha: 1.0,
            clip: ClipRange::default(),
            edge_center: None,
            travel: None,
        }
    }
}

impl AlphaInputs {
    /// Product of flow alpha, clip fade, edge fade and travel alpha at `t`.
    pub fn ring_alpha(&self, t: f32, tuning: &AlphaTuning) -> f32 {
        let clip = clip_fade(t, self.clip, tuning.clip_fade_width);
        if clip <= 0.0 {
            return 0.0;
        }
        let edge = self
            .edge_center
            .map(|c| edge_fade(c, t, tuning.edge_zone))
            .unwrap_or(1.0);
        let travel = self.travel.map(|s| s.alpha(t)).unwrap_or(1.0);
        saturate(saturate(self.flow_alpha) * clip * edge * travel)
    }
}

/// Zero outside `range`; linear ramps of `width` inside each clipped end.
///
/// An end that sits at the ray's own extreme (start <= 0 or end >= 1) is not
/// clipped and gets no ramp.
pub fn clip_fade(t: f32, range: ClipRange, width: f32) -> f32 {
    if t.is_nan() || t < range.start || t > range.end {
        return 0.0;
    }
    let width = width.max(1e-4);
    let rise = if range.start > 0.0 {
        ((t - range.start) / width).min(1.0)
    } else {
        1.0
    };
    let fall = if range.end < 1.0 {
        ((range.end - t) / width).min(1.0)
    } else {
        1.0
    };
    saturate(rise * fall)
}

/// Fade for rays whose group position `center` is near either group edge.
///
/// Near the low edge, vertices towards the base fade by
/// `proximity * (1 - t)`; near the high edge, vertices towards the tip fade by
/// `proximity * t`. Both factors multiply and the result is floored at 0.
pub fn edge_fade(center: f32, t: f32, zone: f32) -> f32 {
    let zone = zone.max(1e-4);
    let center = saturate(center);
    let t = saturate(t);

    let mut fade = 1.0;
    if center < zone {
        let proximity = (zone - center) / zone;
        fade *= 1.0 - proximity * (1.0 - t);
    }
    if center > 1.0 - zone {
        let proximity = (center - (1.0 - zone)) / zone;
        fade *= 1.0 - proximity * t;
    }
    fade.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_no_ramp() {
        let range = ClipRange::default();
        assert_eq!(clip_fade(0.0, range, CLIP_FADE_WIDTH), 1.0);
        assert_eq!(clip_fade(1.0, range, CLIP_FADE_WIDTH), 1.0);
    }

    #[test]
    fn test_clip_ramps() {
        let range = ClipRange::new(0.2, 0.8);
        assert_eq!(clip_fade(0.1, range, 0.1), 0.0);
        assert!((clip_fade(0.25, range, 0.1) - 0.5).abs() < 1e-5);
        assert_eq!(clip_fade(0.5, range, 0.1), 1.0);
        assert!((clip_fade(0.75, range, 0.1) - 0.5).abs() < 1e-5);
        assert_eq!(clip_fade(0.9, range, 0.1), 0.0);
    }

    #[test]
    fn test_edge_fade_middle_ray_untouched() {
        for i in 0..=10 {
            assert_eq!(edge_fade(0.5, i as f32 / 10.0, EDGE_FADE_ZONE), 1.0);
        }
    }

    #[test]
    fn test_edge_fade_at_low_edge() {
        // Ray at the very edge: base vertex fully faded, tip untouched
        assert_eq!(edge_fade(0.0, 0.0, EDGE_FADE_ZONE), 0.0);
        assert_eq!(edge_fade(0.0, 1.0, EDGE_FADE_ZONE), 1.0);
        assert!((edge_fade(0.2, 0.0, EDGE_FADE_ZONE) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_edge_fade_at_high_edge() {
        assert_eq!(edge_fade(1.0, 1.0, EDGE_FADE_ZONE), 0.0);
        assert_eq!(edge_fade(1.0, 0.0, EDGE_FADE_ZONE), 1.0);
    }

    #[test]
    fn test_ring_alpha_product() {
        let inputs = AlphaInputs {
            flow_alpha: 0.5,
            clip: ClipRange::new(0.2, 0.8),
            ..AlphaInputs::default()
        };
        let a = inputs.ring_alpha(0.25, &AlphaTuning::default());
        assert!((a - 0.25).abs() < 1e-5);
    }
}
