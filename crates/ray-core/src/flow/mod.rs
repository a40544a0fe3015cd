//! Per-ray animation state.
//!
//! The flow pipeline folds a fixed, ordered list of stateless stages
//! (phase, travel, flicker) over [`AnimationState::ZERO`]. Each stage reads a
//! [`FlowContext`] and returns a new state; nothing is carried between frames
//! except the caller-supplied time.

pub mod flicker;
pub mod phase;
pub mod travel;

use serde::{Deserialize, Serialize};

use crate::math::{saturate, sine01};

pub use flicker::{compute_flicker_alpha, FlickerConfig, FlickerMode};
pub use phase::{ray_offset, PhaseConfig, WaveDistribution};
pub use travel::{compute_travel_alpha, TravelConfig, TravelMode, TravelSample};

/// Immutable `(phase, travel_phase, flicker_alpha)` triple, each in [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    phase: f32,
    travel_phase: f32,
    flicker_alpha: f32,
}

impl AnimationState {
    /// Seed state: no phase, no travel, fully visible.
    pub const ZERO: Self = Self {
        phase: 0.0,
        travel_phase: 0.0,
        flicker_alpha: 1.0,
    };

    /// Phase at the end of its cycle, fully visible.
    pub const FULL: Self = Self {
        phase: 1.0,
        travel_phase: 0.0,
        flicker_alpha: 1.0,
    };

    /// Build a state; every field is clamped into [0,1] (NaN maps to 0).
    pub fn new(phase: f32, travel_phase: f32, flicker_alpha: f32) -> Self {
        Self {
            phase: saturate(phase),
            travel_phase: saturate(travel_phase),
            flicker_alpha: saturate(flicker_alpha),
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn travel_phase(&self) -> f32 {
        self.travel_phase
    }

    pub fn flicker_alpha(&self) -> f32 {
        self.flicker_alpha
    }

    pub fn with_phase(self, phase: f32) -> Self {
        Self::new(phase, self.travel_phase, self.flicker_alpha)
    }

    pub fn with_travel_phase(self, travel_phase: f32) -> Self {
        Self::new(self.phase, travel_phase, self.flicker_alpha)
    }

    pub fn with_flicker_alpha(self, flicker_alpha: f32) -> Self {
        Self::new(self.phase, self.travel_phase, flicker_alpha)
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Animation sub-configs of one effect. An absent sub-config disables its stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub phase: Option<PhaseConfig>,
    pub travel: Option<TravelConfig>,
    pub flicker: Option<FlickerConfig>,
}

impl FlowConfig {
    pub fn phase_enabled(&self) -> Option<&PhaseConfig> {
        self.phase.as_ref().filter(|c| c.enabled)
    }

    pub fn travel_enabled(&self) -> Option<&TravelConfig> {
        self.travel.as_ref().filter(|c| c.enabled)
    }

    pub fn flicker_enabled(&self) -> Option<&FlickerConfig> {
        self.flicker.as_ref().filter(|c| c.enabled)
    }
}

/// Inputs of one pipeline evaluation.
#[derive(Clone, Copy, Debug)]
pub struct FlowContext<'a> {
    pub config: &'a FlowConfig,
    pub ray_index: u32,
    pub ray_count: u32,
    pub time: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Angular extent of the wave sweep in degrees (360 = full turn).
    pub wave_arc: f32,
    pub distribution: WaveDistribution,
    /// Number of sweep copies across the group.
    pub wave_count: u32,
}

impl<'a> FlowContext<'a> {
    pub fn new(config: &'a FlowConfig, ray_index: u32, ray_count: u32, time: f32) -> Self {
        Self {
            config,
            ray_index,
            ray_count,
            time,
            inner_radius: 0.0,
            outer_radius: 1.0,
            wave_arc: 360.0,
            distribution: WaveDistribution::Continuous,
            wave_count: 1,
        }
    }

    pub fn with_radii(mut self, inner_radius: f32, outer_radius: f32) -> Self {
        self.inner_radius = inner_radius;
        self.outer_radius = outer_radius;
        self
    }

    pub fn with_wave(mut self, wave_arc: f32, distribution: WaveDistribution, wave_count: u32) -> Self {
        self.wave_arc = wave_arc;
        self.distribution = distribution;
        self.wave_count = wave_count;
        self
    }

    /// Radial span covered by the ray, never negative.
    pub fn radial_span(&self) -> f32 {
        (self.outer_radius - self.inner_radius).max(0.0)
    }
}

/// One pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Phase,
    Travel,
    Flicker,
}

impl Stage {
    pub fn should_run(&self, ctx: &FlowContext) -> bool {
        match self {
            Stage::Phase => ctx.config.phase_enabled().is_some(),
            Stage::Travel => ctx.config.travel_enabled().is_some(),
            Stage::Flicker => ctx.config.flicker_enabled().is_some(),
        }
    }

    pub fn apply(&self, state: AnimationState, ctx: &FlowContext) -> AnimationState {
        match self {
            Stage::Phase => phase::apply(state, ctx),
            Stage::Travel => travel::apply(state, ctx),
            Stage::Flicker => flicker::apply(state, ctx),
        }
    }
}

/// Standard stage order.
pub const STANDARD_STAGES: [Stage; 3] = [Stage::Phase, Stage::Travel, Stage::Flicker];

/// Ordered fold of stages over [`AnimationState::ZERO`].
#[derive(Clone, Copy, Debug)]
pub struct FlowPipeline {
    stages: &'static [Stage],
}

impl Default for FlowPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl FlowPipeline {
    pub const fn standard() -> Self {
        Self {
            stages: &STANDARD_STAGES,
        }
    }

    pub const fn with_stages(stages: &'static [Stage]) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        self.stages
    }

    pub fn compute(&self, ctx: &FlowContext) -> AnimationState {
        self.stages
            .iter()
            .filter(|stage| stage.should_run(ctx))
            .fold(AnimationState::ZERO, |state, stage| stage.apply(state, ctx))
    }

    /// Scalar alpha for a whole ray: flicker times the phase pulse.
    ///
    /// The pulse is `1 - depth * (1 - sine01(phase))`, with `depth` taken from
    /// the phase config and zero when the phase stage is disabled.
    pub fn flow_alpha(state: &AnimationState, config: &FlowConfig) -> f32 {
        let depth = config
            .phase_enabled()
            .map(|c| saturate(c.pulse_depth))
            .unwrap_or(0.0);
        let pulse = 1.0 - depth * (1.0 - sine01(state.phase()));
        saturate(state.flicker_alpha() * pulse)
    }

    /// Per-vertex travel parameters, or `None` when travel is disabled.
    pub fn travel_sample(state: &AnimationState, config: &FlowConfig) -> Option<TravelSample> {
        config.travel_enabled().map(|c| TravelSample {
            mode: c.mode,
            phase: state.travel_phase(),
            count: c.count,
            width: c.width,
        })
    }
}
