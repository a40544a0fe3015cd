//! Per-frame orchestration of one ray effect.
//!
//! A [`RayEffect`] resolves its strategies once at construction. Each frame
//! it runs the flow pipeline per ray, turns the resulting state into alpha
//! inputs and hands the placed ray to the surface generator. Rays are
//! independent, so with the `parallel` feature they are built on the rayon
//! pool.

use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{EngineConfig, RayEffectConfig};
use crate::flow::{AnimationState, FlowContext, FlowPipeline, WaveDistribution};
use crate::forces::tidal::DeformationStrategy;
use crate::mesh::alpha::AlphaInputs;
use crate::mesh::generator::{SurfaceGenerator, SurfaceRequest};
use crate::mesh::mask::VisibilityMask;
use crate::mesh::Mesh;
use crate::shapes::dispatcher::{deformation_for, profile_for_shape};
use crate::shapes::profile::RadiusProfile;

/// Output of one ray for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RayFrame {
    pub index: u32,
    pub state: AnimationState,
    pub mesh: Mesh,
}

/// A configured group of rays.
pub struct RayEffect {
    config: RayEffectConfig,
    profile: Option<RadiusProfile>,
    deformation: Option<DeformationStrategy>,
    pipeline: FlowPipeline,
    generator: SurfaceGenerator,
}

impl RayEffect {
    pub fn new(config: RayEffectConfig) -> Self {
        Self::with_engine(config, &EngineConfig::default())
    }

    pub fn with_engine(config: RayEffectConfig, engine: &EngineConfig) -> Self {
        let profile = profile_for_shape(&config.shape);
        let deformation = deformation_for(Some(config.deformation.mode), config.deformation.field.intensity);
        if profile.is_none() {
            log::debug!("{} body has no 3D profile, surfaces are skipped", config.shape.body);
        }
        Self {
            config,
            profile,
            deformation,
            pipeline: FlowPipeline::standard(),
            generator: SurfaceGenerator::new().with_tuning(engine.generator_tuning()),
        }
    }

    /// Replace the stage order.
    pub fn with_pipeline(mut self, pipeline: FlowPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &RayEffectConfig {
        &self.config
    }

    pub fn profile(&self) -> Option<RadiusProfile> {
        self.profile
    }

    pub fn deformation(&self) -> Option<DeformationStrategy> {
        self.deformation
    }

    pub fn ray_count(&self) -> u32 {
        self.config.ray_count
    }

    /// Flow context of ray `index` at `time`.
    pub fn context(&self, index: u32, time: f32) -> FlowContext<'_> {
        let flow = &self.config.flow;
        let (inner, outer) = self.config.layout.radii();
        let (distribution, wave_count) = flow
            .phase
            .as_ref()
            .map(|p| (p.distribution, p.wave_count))
            .unwrap_or((WaveDistribution::Continuous, 1));

        FlowContext::new(flow, index, self.config.ray_count, time)
            .with_radii(inner, outer)
            .with_wave(self.config.layout.arc(), distribution, wave_count)
    }

    /// Animation state of ray `index` at `time`.
    pub fn animate(&self, index: u32, time: f32) -> AnimationState {
        self.pipeline.compute(&self.context(index, time))
    }

    /// Animate and build ray `index` at `time`.
    pub fn build_ray(&self, index: u32, time: f32) -> RayFrame {
        let state = self.animate(index, time);
        let Some(profile) = self.profile else {
            return RayFrame {
                index,
                state,
                mesh: Mesh::default(),
            };
        };

        let placement = self.config.layout.place(index, self.config.ray_count);
        let mut shape = self.config.shape;
        shape.length = placement.length;

        let flow = &self.config.flow;
        let alpha = AlphaInputs {
            flow_alpha: FlowPipeline::flow_alpha(&state, flow),
            clip: self.config.clip,
            edge_center: placement.group_position,
            travel: FlowPipeline::travel_sample(&state, flow),
        };

        let mut request = SurfaceRequest::new(&shape, profile)
            .placed(placement.origin, placement.direction)
            .with_alpha(alpha)
            .with_pattern(self.config.pattern)
            .with_color(self.config.color);
        if let Some(strategy) = self.deformation {
            request = request.with_deformation(strategy, self.config.deformation.field);
        }
        if let Some(mask) = self.config.mask.as_ref() {
            request = request.with_mask(mask as &dyn VisibilityMask);
        }

        RayFrame {
            index,
            state,
            mesh: self.generator.generate(&request),
        }
    }

    /// Every ray of the effect at `time`, in index order.
    pub fn frame(&self, time: f32) -> Vec<RayFrame> {
        let count = self.config.ray_count;

        #[cfg(feature = "parallel")]
        let rays: Vec<RayFrame> = (0..count)
            .into_par_iter()
            .map(|i| self.build_ray(i, time))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rays: Vec<RayFrame> = (0..count).map(|i| self.build_ray(i, time)).collect();

        rays
    }

    /// All rays at `time` merged into one mesh.
    pub fn merged_mesh(&self, time: f32) -> Mesh {
        let mut merged = Mesh::default();
        for ray in self.frame(time) {
            merged.append(&ray.mesh);
        }
        log::trace!(
            "frame t={:.3}: {} rays, {} vertices, {} triangles",
            time,
            self.config.ray_count,
            merged.vertices.len(),
            merged.triangle_count()
        );
        merged
    }

    /// Undeformed tip position of every ray.
    pub fn tips(&self) -> Vec<Vec3> {
        (0..self.config.ray_count)
            .map(|i| {
                let p = self.config.layout.place(i, self.config.ray_count);
                p.origin + p.direction * p.length
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FlowConfig, PhaseConfig};
    use crate::shapes::descriptor::{BodyType, ShapeDescriptor};

    fn effect(body: BodyType, rays: u32) -> RayEffect {
        RayEffect::new(RayEffectConfig {
            shape: ShapeDescriptor::new(body, 1.0, 0.2).with_tessellation(4, 6),
            ray_count: rays,
            ..RayEffectConfig::default()
        })
    }

    #[test]
    fn test_frame_has_every_ray() {
        let fx = effect(BodyType::Cone, 5);
        let frame = fx.frame(0.25);
        assert_eq!(frame.len(), 5);
        for (i, ray) in frame.iter().enumerate() {
            assert_eq!(ray.index, i as u32);
            assert_eq!(ray.mesh.vertices.len(), 4 * 4 * 6);
        }
    }

    #[test]
    fn test_flat_body_yields_empty_mesh() {
        let fx = effect(BodyType::Ribbon, 3);
        assert!(fx.profile().is_none());
        assert!(fx.frame(1.0).iter().all(|r| r.mesh.is_empty()));
    }

    #[test]
    fn test_context_uses_phase_settings() {
        let mut config = RayEffectConfig {
            flow: FlowConfig {
                phase: Some(PhaseConfig {
                    distribution: WaveDistribution::Sequential,
                    wave_count: 3,
                    ..PhaseConfig::default()
                }),
                ..FlowConfig::default()
            },
            ..RayEffectConfig::default()
        };
        config.ray_count = 4;
        let fx = RayEffect::new(config);
        let ctx = fx.context(2, 0.5);
        assert_eq!(ctx.distribution, WaveDistribution::Sequential);
        assert_eq!(ctx.wave_count, 3);
        assert_eq!(ctx.ray_count, 4);
    }

    #[test]
    fn test_merged_mesh_concatenates() {
        let fx = effect(BodyType::Sphere, 3);
        let merged = fx.merged_mesh(0.0);
        assert_eq!(merged.vertices.len(), 3 * 4 * 4 * 6);
        let max = merged.triangles.iter().copied().max().unwrap_or(0);
        assert!((max as usize) < merged.vertices.len());
    }

    #[test]
    fn test_inert_deformation_resolved_away() {
        let fx = RayEffect::new(RayEffectConfig {
            deformation: crate::config::DeformationConfig {
                mode: DeformationStrategy::Tidal,
                ..Default::default()
            },
            ..RayEffectConfig::default()
        });
        assert_eq!(fx.deformation(), None);
    }
}
