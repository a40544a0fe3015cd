use serde::{Deserialize, Serialize};

use crate::error::named_enum;
use crate::flow::{AnimationState, FlowContext};
use crate::math::{fract, hash11, GOLDEN_RATIO};

/// How the wave phase is spread across the rays of a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WaveDistribution {
    /// Every ray shares the base phase; the group pulses uniformly.
    #[default]
    Continuous,
    /// `index * phi`, avoids visible clustering.
    GoldenRatio,
    /// Hash of the index.
    Random,
    /// `index / count`, a visible rotating sweep.
    Sequential,
}

named_enum!(WaveDistribution, "wave distribution", {
    "CONTINUOUS" => Continuous,
    "GOLDEN_RATIO" | "GOLDEN" => GoldenRatio,
    "RANDOM" => Random,
    "SEQUENTIAL" => Sequential,
});

/// Radiative phase settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub enabled: bool,
    /// Cycles per time unit.
    pub speed: f32,
    /// How far the phase pulse dims the ray at its trough, in [0,1].
    pub pulse_depth: f32,
    pub distribution: WaveDistribution,
    pub wave_count: u32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            pulse_depth: 0.5,
            distribution: WaveDistribution::Continuous,
            wave_count: 1,
        }
    }
}

/// Per-ray offset in [0,1) for a distribution. Continuous has none.
pub fn ray_offset(distribution: WaveDistribution, ray_index: u32, ray_count: u32) -> f32 {
    let index = ray_index as f32;
    match distribution {
        WaveDistribution::Continuous => 0.0,
        WaveDistribution::GoldenRatio => fract(index * GOLDEN_RATIO),
        WaveDistribution::Random => hash11(index * 7.13 + 1.0),
        WaveDistribution::Sequential => fract(index / ray_count.max(1) as f32),
    }
}

/// Phase of one ray at `ctx.time`.
pub fn compute_phase(ctx: &FlowContext) -> f32 {
    let speed = ctx.config.phase.as_ref().map(|c| c.speed).unwrap_or(0.0);
    let base = fract(ctx.time * speed);

    if ctx.distribution == WaveDistribution::Continuous {
        return base;
    }

    let arc = (ctx.wave_arc / 360.0).max(0.0);
    let copies = ctx.wave_count.max(1) as f32;
    let offset = ray_offset(ctx.distribution, ctx.ray_index, ctx.ray_count) * arc * copies;
    fract(base + offset)
}

pub(crate) fn apply(state: AnimationState, ctx: &FlowContext) -> AnimationState {
    state.with_phase(compute_phase(ctx))
}
