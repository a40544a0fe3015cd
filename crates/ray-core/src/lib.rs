//! Procedural geometry and animation for energy-ray effects.
//!
//! A ray is a volumetric body (sphere, cone, bullet, droplet, egg) placed on
//! an axis. Each frame the [`flow`] pipeline computes a per-ray
//! [`AnimationState`] from time alone, and the [`mesh`] generator turns the
//! shape, its radius profile, optional tidal deformation and the resulting
//! alpha into a vertex/index buffer. [`RayEffect`] ties both together for a
//! group of rays described by a [`RayEffectConfig`].

pub mod config;
pub mod effect;
pub mod error;
pub mod flow;
pub mod forces;
pub mod layout;
pub mod math;
pub mod mesh;
pub mod shapes;

pub use config::{DeformationConfig, EngineConfig, RayEffectConfig};
pub use effect::{RayEffect, RayFrame};
pub use error::{ConfigError, UnknownVariant};
pub use flow::{AnimationState, FlowConfig, FlowContext, FlowPipeline};
pub use forces::{DeformationStrategy, TidalField};
pub use layout::{RayLayout, RayPlacement};
pub use mesh::{Mesh, SurfaceGenerator, SurfaceRequest, Vertex};
pub use shapes::{BodyType, RadiusProfile, ShapeDescriptor};
