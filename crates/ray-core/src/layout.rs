//! Placement of the rays of a group.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::frame::LocalFrame;

/// Where the rays of a group sit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RayLayout {
    /// Rays radiate from `center` in the plane perpendicular to `normal`,
    /// spanning `arc` degrees from `start_angle`, between `inner_radius`
    /// and `outer_radius`.
    Fan {
        center: Vec3,
        normal: Vec3,
        inner_radius: f32,
        outer_radius: f32,
        arc: f32,
        start_angle: f32,
    },
    /// Every ray shares one axis; useful for layered beams and tendrils.
    Beam {
        origin: Vec3,
        direction: Vec3,
        length: f32,
    },
}

impl Default for RayLayout {
    fn default() -> Self {
        RayLayout::Fan {
            center: Vec3::ZERO,
            normal: Vec3::Y,
            inner_radius: 0.0,
            outer_radius: 1.0,
            arc: 360.0,
            start_angle: 0.0,
        }
    }
}

/// Resolved placement of one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayPlacement {
    pub origin: Vec3,
    pub direction: Vec3,
    pub length: f32,
    /// Position within an open fan in [0,1]; `None` for closed fans and beams.
    pub group_position: Option<f32>,
}

impl RayLayout {
    /// Placement of ray `index` out of `count`.
    pub fn place(&self, index: u32, count: u32) -> RayPlacement {
        match *self {
            RayLayout::Fan {
                center,
                normal,
                inner_radius,
                outer_radius,
                arc,
                start_angle,
            } => {
                let arc = if arc.is_finite() { arc.clamp(0.0, 360.0) } else { 360.0 };
                let count = count.max(1);
                let closed = arc >= 360.0;

                // A closed fan spaces rays over the whole turn; an open one
                // puts the first and last ray on the arc's ends.
                let fraction = if closed {
                    index as f32 / count as f32
                } else if count > 1 {
                    index as f32 / (count - 1) as f32
                } else {
                    0.5
                };

                let angle = (start_angle + fraction * arc).to_radians();
                let frame = LocalFrame::from_direction(normal);
                let direction = frame.right * angle.cos() + frame.up * angle.sin();
                let inner = inner_radius.max(0.0);

                RayPlacement {
                    origin: center + direction * inner,
                    direction,
                    length: (outer_radius - inner).max(0.0),
                    group_position: if closed { None } else { Some(fraction.clamp(0.0, 1.0)) },
                }
            }
            RayLayout::Beam {
                origin,
                direction,
                length,
            } => RayPlacement {
                origin,
                direction: LocalFrame::from_direction(direction).forward,
                length: length.max(0.0),
                group_position: None,
            },
        }
    }

    /// `(inner, outer)` radial extent used by the flow context.
    pub fn radii(&self) -> (f32, f32) {
        match *self {
            RayLayout::Fan {
                inner_radius,
                outer_radius,
                ..
            } => (inner_radius, outer_radius),
            RayLayout::Beam { length, .. } => (0.0, length),
        }
    }

    /// Angular extent of the group in degrees.
    pub fn arc(&self) -> f32 {
        match *self {
            RayLayout::Fan { arc, .. } => arc,
            RayLayout::Beam { .. } => 360.0,
        }
    }
}
