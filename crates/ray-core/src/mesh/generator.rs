//! Ring x segment surface generation.
//!
//! The body is a spheroidal shell scaled by the radius profile. For ring
//! angle `theta` (0 at the base, PI at the tip) and segment angle `phi`:
//!
//! ```text
//! center = origin + forward * L/2
//! p      = center + profile(theta) * (right * R sin(theta) cos(phi)
//!                                   + up    * R sin(theta) sin(phi)
//!                                   - forward * L/2 cos(theta))
//! ```
//!
//! so the base sits at `origin` and the tip at `origin + forward * L` for a
//! unit profile. Alpha is evaluated per ring; rings invisible at both ends
//! are culled before any corner is computed.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::forces::tidal::{DeformationStrategy, TidalField, TidalTuning};
use crate::mesh::alpha::{AlphaInputs, AlphaTuning};
use crate::mesh::frame::LocalFrame;
use crate::mesh::mask::VisibilityMask;
use crate::mesh::pattern::{CellCoord, CellEmitter, CellPattern, PatternEmitter};
use crate::mesh::{pack_color, Mesh, MeshBuilder, Vertex, VertexId};
use crate::shapes::descriptor::ShapeDescriptor;
use crate::shapes::profile::RadiusProfile;

/// Rings whose alpha is below this at both ends are skipped.
pub const CULL_ALPHA: f32 = 0.001;

/// Everything needed to build one ray surface.
#[derive(Clone, Copy)]
pub struct SurfaceRequest<'a> {
    pub shape: &'a ShapeDescriptor,
    pub profile: RadiusProfile,
    /// Base of the ray (theta = 0).
    pub origin: Vec3,
    /// Axis from base to tip; need not be normalized.
    pub direction: Vec3,
    pub deformation: Option<(DeformationStrategy, TidalField)>,
    pub mask: Option<&'a dyn VisibilityMask>,
    pub alpha: AlphaInputs,
    pub pattern: CellPattern,
    /// Linear RGB in [0,1].
    pub color: [f32; 3],
}

impl<'a> SurfaceRequest<'a> {
    pub fn new(shape: &'a ShapeDescriptor, profile: RadiusProfile) -> Self {
        Self {
            shape,
            profile,
            origin: Vec3::ZERO,
            direction: Vec3::Y,
            deformation: None,
            mask: None,
            alpha: AlphaInputs::default(),
            pattern: CellPattern::Solid,
            color: [1.0, 1.0, 1.0],
        }
    }

    pub fn placed(mut self, origin: Vec3, direction: Vec3) -> Self {
        self.origin = origin;
        self.direction = direction;
        self
    }

    pub fn with_deformation(mut self, strategy: DeformationStrategy, field: TidalField) -> Self {
        self.deformation = Some((strategy, field));
        self
    }

    pub fn with_mask(mut self, mask: &'a dyn VisibilityMask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_alpha(mut self, alpha: AlphaInputs) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_pattern(mut self, pattern: CellPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }
}

/// Tuning constants of the generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorTuning {
    pub cull_alpha: f32,
    pub alpha: AlphaTuning,
    pub tidal: TidalTuning,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            cull_alpha: CULL_ALPHA,
            alpha: AlphaTuning::default(),
            tidal: TidalTuning::default(),
        }
    }
}

/// Builds ray surfaces; holds no per-call state.
#[derive(Clone, Debug, Default)]
pub struct SurfaceGenerator<E = PatternEmitter> {
    emitter: E,
    tuning: GeneratorTuning,
}

impl SurfaceGenerator<PatternEmitter> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: CellEmitter> SurfaceGenerator<E> {
    pub fn with_emitter(emitter: E, tuning: GeneratorTuning) -> Self {
        Self { emitter, tuning }
    }

    pub fn with_tuning(mut self, tuning: GeneratorTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn tuning(&self) -> &GeneratorTuning {
        &self.tuning
    }

    /// Generate the complete mesh for one ray.
    pub fn generate(&self, req: &SurfaceRequest) -> Mesh {
        let rings = req.shape.ring_count();
        let segments = req.shape.segment_count();
        let body = Body::new(req);

        // Alpha at every ring boundary, t = i / rings
        let ring_alpha: Vec<f32> = (0..=rings)
            .map(|i| req.alpha.ring_alpha(i as f32 / rings as f32, &self.tuning.alpha))
            .collect();

        // cos/sin of every segment boundary
        let phis: Vec<(f32, f32)> = (0..=segments)
            .map(|j| {
                let phi = TAU * j as f32 / segments as f32;
                (phi.cos(), phi.sin())
            })
            .collect();

        let cells = (rings * segments) as usize;
        let mut builder = MeshBuilder::with_capacity(cells * 4, cells * 6);
        let mut culled = 0u32;
        let mut masked = 0u32;

        for i in 0..rings {
            let (alpha0, alpha1) = (ring_alpha[i as usize], ring_alpha[i as usize + 1]);
            if alpha0 < self.tuning.cull_alpha && alpha1 < self.tuning.cull_alpha {
                culled += 1;
                continue;
            }

            let t0 = i as f32 / rings as f32;
            let t1 = (i + 1) as f32 / rings as f32;
            let (theta0, theta1) = (t0 * PI, t1 * PI);
            let color0 = pack_color(req.color, alpha0);
            let color1 = pack_color(req.color, alpha1);

            for j in 0..segments {
                let u0 = j as f32 / segments as f32;
                let u1 = (j + 1) as f32 / segments as f32;

                if let Some(mask) = req.mask {
                    if !mask.is_visible(u0, t0) {
                        masked += 1;
                        continue;
                    }
                }

                let (cos0, sin0) = phis[j as usize];
                let (cos1, sin1) = phis[j as usize + 1];

                let corners = [
                    (theta0, t0, cos0, sin0, u0, color0),
                    (theta0, t0, cos1, sin1, u1, color0),
                    (theta1, t1, cos1, sin1, u1, color1),
                    (theta1, t1, cos0, sin0, u0, color1),
                ];
                let ids: [VertexId; 4] = corners.map(|(theta, t, cos_phi, sin_phi, u, color)| {
                    let (position, normal) = body.point(theta, cos_phi, sin_phi);
                    let position = self.deform(req, &body, position, t);
                    builder.push_vertex(Vertex::new(position, normal, [u, t], color))
                });

                self.emitter.emit(&mut builder, ids, req.pattern, CellCoord { ring: i, segment: j });
            }
        }

        let mesh = builder.finish();
        log::trace!(
            "surface {:?}: {} rings ({} culled, {} cells masked), {} vertices, {} triangles, {} lines",
            req.shape.body,
            rings,
            culled,
            masked,
            mesh.vertices.len(),
            mesh.triangle_count(),
            mesh.line_count()
        );
        mesh
    }

    fn deform(&self, req: &SurfaceRequest, body: &Body, position: Vec3, t: f32) -> Vec3 {
        match req.deformation {
            Some((strategy, field)) => strategy.apply_tuned(position, body.center, t, &field, &self.tuning.tidal),
            None => position,
        }
    }
}

/// Resolved placement of one body.
struct Body {
    frame: LocalFrame,
    center: Vec3,
    radius: f32,
    half_length: f32,
    profile: RadiusProfile,
}

impl Body {
    fn new(req: &SurfaceRequest) -> Self {
        let frame = LocalFrame::from_direction(req.direction);
        let half_length = req.shape.axial_length() * 0.5;
        Self {
            frame,
            center: req.origin + frame.forward * half_length,
            radius: req.shape.radius(),
            half_length,
            profile: req.profile,
        }
    }

    /// World position and outward normal at `(theta, phi)`.
    fn point(&self, theta: f32, cos_phi: f32, sin_phi: f32) -> (Vec3, Vec3) {
        let (sin_t, cos_t) = theta.sin_cos();
        let r = self.profile.radius(theta);
        let dr = self.profile.slope(theta);

        // Unit direction on the shell in frame space
        let dir = Vec3::new(sin_t * cos_phi, sin_t * sin_phi, -cos_t);
        let local = Vec3::new(dir.x * self.radius, dir.y * self.radius, dir.z * self.half_length) * r;

        // d/dphi x d/dtheta over sin(theta): the spheroid term scaled by r
        // plus the profile slope term. Falls back to the shell direction
        // when flat or degenerate.
        let (a, c) = (self.radius, self.half_length);
        let normal = if a > 0.0 && c > 0.0 {
            let shell = Vec3::new(c * sin_t * cos_phi, c * sin_t * sin_phi, -a * cos_t);
            let taper = Vec3::new(-c * cos_t * cos_phi, -c * cos_t * sin_phi, -a * sin_t);
            (shell * r + taper * dr).try_normalize().unwrap_or(dir)
        } else {
            dir
        };

        (self.center + self.frame.to_world(local), self.frame.to_world(normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::descriptor::BodyType;

    #[test]
    fn test_sphere_base_and_tip() {
        let shape = ShapeDescriptor::new(BodyType::Sphere, 2.0, 1.0).with_tessellation(4, 8);
        let req = SurfaceRequest::new(&shape, RadiusProfile::Sphere).placed(Vec3::ZERO, Vec3::Y);
        let body = Body::new(&req);
        let (base, _) = body.point(0.0, 1.0, 0.0);
        let (tip, _) = body.point(PI, 1.0, 0.0);
        assert!(base.length() < 1e-5, "base at origin, got {:?}", base);
        assert!((tip - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5, "tip at length, got {:?}", tip);
    }

    #[test]
    fn test_sphere_normals_radial() {
        let shape = ShapeDescriptor::new(BodyType::Sphere, 2.0, 1.0);
        let req = SurfaceRequest::new(&shape, RadiusProfile::Sphere);
        let body = Body::new(&req);
        for k in 1..8 {
            let theta = PI * k as f32 / 8.0;
            let (p, n) = body.point(theta, 0.6, 0.8);
            let radial = (p - body.center).normalize();
            assert!((n - radial).length() < 1e-4, "theta {}: {:?} vs {:?}", theta, n, radial);
        }
    }

    #[test]
    fn test_tapered_normals_perpendicular_to_surface() {
        let shape = ShapeDescriptor::new(BodyType::Cone, 3.0, 0.4);
        let (dt, dp) = (1e-2, 0.1);
        let phi = 0.9f32;
        let at = |body: &Body, theta: f32, phi: f32| {
            let (s, c) = phi.sin_cos();
            body.point(theta, c, s)
        };
        for profile in [RadiusProfile::Cone, RadiusProfile::droplet(2.0), RadiusProfile::egg(0.6)] {
            let req = SurfaceRequest::new(&shape, profile).placed(Vec3::ZERO, Vec3::new(0.2, 1.0, 0.3));
            let body = Body::new(&req);
            for k in 1..8 {
                let theta = PI * k as f32 / 8.0;
                let (here, n) = at(&body, theta, phi);

                let along = (at(&body, theta + dt, phi).0 - at(&body, theta - dt, phi).0).normalize();
                assert!(n.dot(along).abs() < 1e-2, "{:?} theta {}: n.t = {}", profile, theta, n.dot(along));

                let around = (at(&body, theta, phi + dp).0 - at(&body, theta, phi - dp).0).normalize();
                assert!(n.dot(around).abs() < 1e-2, "{:?} theta {}: around", profile, theta);

                assert!(n.dot(here - body.center) > 0.0, "{:?} theta {}: normal points inward", profile, theta);
            }
        }
    }

    #[test]
    fn test_deformation_moves_vertices() {
        let shape = ShapeDescriptor::new(BodyType::Sphere, 1.0, 0.5).with_tessellation(4, 6);
        let plain = SurfaceRequest::new(&shape, RadiusProfile::Sphere);
        let field = TidalField::new(Vec3::new(3.0, 0.5, 0.0), 1.0, 2.0);
        let bent = plain.with_deformation(DeformationStrategy::TowardCenter, field);

        let gen = SurfaceGenerator::new();
        let a = gen.generate(&plain);
        let b = gen.generate(&bent);
        assert_eq!(a.vertices.len(), b.vertices.len());
        assert_eq!(a.triangles, b.triangles);
        assert!(a
            .vertices
            .iter()
            .zip(&b.vertices)
            .any(|(x, y)| (x.position() - y.position()).length() > 1e-4));
    }
}
