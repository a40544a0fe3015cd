use glam::Vec3;

/// Above this `|dir . Y|` the reference axis switches to X.
const NEAR_VERTICAL: f32 = 0.99;

/// Orthonormal frame whose `forward` is a ray's axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self::from_direction(Vec3::Y)
    }
}

impl LocalFrame {
    /// Frame from an axis direction via a reference-vector cross product.
    ///
    /// World up is the reference unless the axis is nearly vertical, in which
    /// case world X is used. A zero or non-finite direction yields +Y.
    pub fn from_direction(direction: Vec3) -> Self {
        let forward = direction
            .try_normalize()
            .filter(|d| d.is_finite())
            .unwrap_or(Vec3::Y);
        let reference = if forward.dot(Vec3::Y).abs() > NEAR_VERTICAL {
            Vec3::X
        } else {
            Vec3::Y
        };
        let right = reference.cross(forward).normalize();
        let up = forward.cross(right);
        Self { right, up, forward }
    }

    /// Map frame-local `(x, y, z)` to a world-space offset.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.right * local.x + self.up * local.y + self.forward * local.z
    }
}
