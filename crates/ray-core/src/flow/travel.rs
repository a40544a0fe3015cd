//! Travel: highlights and particles that move along a ray.
//!
//! The travel stage only advances `travel_phase`. The visible pattern is a
//! separate per-vertex function, [`compute_travel_alpha`], evaluated at the
//! ray-local coordinate `t` (0 at the base, 1 at the tip).
//!
//! Modes come in matched sets. Each base pattern runs forward (base to tip),
//! reversed (tip to base), or bipolar: `t` is remapped to the distance from
//! the ray's midpoint so the pattern emanates from the centre towards both
//! ends. `Sync` bipolar modes use the same phase on both halves; `Alt` modes
//! shift the base-side half by half a cycle for a ping-pong look.

use serde::{Deserialize, Serialize};

use crate::error::named_enum;
use crate::flow::{ray_offset, AnimationState, FlowContext};
use crate::math::{fract, hash11, saturate, wrapped_distance};

/// Narrowest particle width.
pub const MIN_WIDTH: f32 = 0.05;

/// Most sparks evaluated per vertex.
pub const MAX_SPARKS: u32 = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelMode {
    #[default]
    None,
    Chase,
    ReverseChase,
    Scroll,
    ReverseScroll,
    Comet,
    ReverseComet,
    Spark,
    ReverseSpark,
    PulseWave,
    ReversePulseWave,
    BipolarChaseSync,
    BipolarChaseAlt,
    BipolarScrollSync,
    BipolarScrollAlt,
    BipolarCometSync,
    BipolarCometAlt,
    BipolarSparkSync,
    BipolarSparkAlt,
    BipolarPulseSync,
    BipolarPulseAlt,
}

named_enum!(TravelMode, "travel mode", {
    "NONE" => None,
    "CHASE" => Chase,
    "REVERSE_CHASE" => ReverseChase,
    "SCROLL" => Scroll,
    "REVERSE_SCROLL" => ReverseScroll,
    "COMET" => Comet,
    "REVERSE_COMET" => ReverseComet,
    "SPARK" => Spark,
    "REVERSE_SPARK" => ReverseSpark,
    "PULSE_WAVE" => PulseWave,
    "REVERSE_PULSE_WAVE" => ReversePulseWave,
    "BIPOLAR_CHASE_SYNC" => BipolarChaseSync,
    "BIPOLAR_CHASE_ALT" => BipolarChaseAlt,
    "BIPOLAR_SCROLL_SYNC" => BipolarScrollSync,
    "BIPOLAR_SCROLL_ALT" => BipolarScrollAlt,
    "BIPOLAR_COMET_SYNC" => BipolarCometSync,
    "BIPOLAR_COMET_ALT" => BipolarCometAlt,
    "BIPOLAR_SPARK_SYNC" => BipolarSparkSync,
    "BIPOLAR_SPARK_ALT" => BipolarSparkAlt,
    "BIPOLAR_PULSE_SYNC" | "BIPOLAR_PULSE_WAVE_SYNC" => BipolarPulseSync,
    "BIPOLAR_PULSE_ALT" | "BIPOLAR_PULSE_WAVE_ALT" => BipolarPulseAlt,
});

/// Shape of the moving highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelPattern {
    Chase,
    Scroll,
    Comet,
    Spark,
    PulseWave,
}

/// How `t` is mapped before the pattern is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelDirection {
    Forward,
    Reverse,
    Bipolar { alternate: bool },
}

impl TravelMode {
    pub const ALL: [TravelMode; 21] = [
        TravelMode::None,
        TravelMode::Chase,
        TravelMode::ReverseChase,
        TravelMode::Scroll,
        TravelMode::ReverseScroll,
        TravelMode::Comet,
        TravelMode::ReverseComet,
        TravelMode::Spark,
        TravelMode::ReverseSpark,
        TravelMode::PulseWave,
        TravelMode::ReversePulseWave,
        TravelMode::BipolarChaseSync,
        TravelMode::BipolarChaseAlt,
        TravelMode::BipolarScrollSync,
        TravelMode::BipolarScrollAlt,
        TravelMode::BipolarCometSync,
        TravelMode::BipolarCometAlt,
        TravelMode::BipolarSparkSync,
        TravelMode::BipolarSparkAlt,
        TravelMode::BipolarPulseSync,
        TravelMode::BipolarPulseAlt,
    ];

    /// Split into pattern and direction; `None` has neither.
    pub fn decompose(&self) -> Option<(TravelPattern, TravelDirection)> {
        use TravelDirection::*;
        use TravelPattern::*;
        let sync = Bipolar { alternate: false };
        let alt = Bipolar { alternate: true };
        let parts = match self {
            TravelMode::None => return None,
            TravelMode::Chase => (Chase, Forward),
            TravelMode::ReverseChase => (Chase, Reverse),
            TravelMode::Scroll => (Scroll, Forward),
            TravelMode::ReverseScroll => (Scroll, Reverse),
            TravelMode::Comet => (Comet, Forward),
            TravelMode::ReverseComet => (Comet, Reverse),
            TravelMode::Spark => (Spark, Forward),
            TravelMode::ReverseSpark => (Spark, Reverse),
            TravelMode::PulseWave => (PulseWave, Forward),
            TravelMode::ReversePulseWave => (PulseWave, Reverse),
            TravelMode::BipolarChaseSync => (Chase, sync),
            TravelMode::BipolarChaseAlt => (Chase, alt),
            TravelMode::BipolarScrollSync => (Scroll, sync),
            TravelMode::BipolarScrollAlt => (Scroll, alt),
            TravelMode::BipolarCometSync => (Comet, sync),
            TravelMode::BipolarCometAlt => (Comet, alt),
            TravelMode::BipolarSparkSync => (Spark, sync),
            TravelMode::BipolarSparkAlt => (Spark, alt),
            TravelMode::BipolarPulseSync => (PulseWave, sync),
            TravelMode::BipolarPulseAlt => (PulseWave, alt),
        };
        Some(parts)
    }

    pub fn is_bipolar(&self) -> bool {
        matches!(self.decompose(), Some((_, TravelDirection::Bipolar { .. })))
    }
}

/// Travel settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    pub enabled: bool,
    pub speed: f32,
    pub mode: TravelMode,
    /// Particles (or bands) along the ray.
    pub count: u32,
    /// Particle width in `t` units.
    pub width: f32,
    /// Offset each ray's travel by its wave distribution offset.
    pub stagger: bool,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            mode: TravelMode::Chase,
            count: 1,
            width: 0.2,
            stagger: false,
        }
    }
}

/// Everything the per-vertex travel function needs for one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TravelSample {
    pub mode: TravelMode,
    pub phase: f32,
    pub count: u32,
    pub width: f32,
}

impl TravelSample {
    pub fn alpha(&self, t: f32) -> f32 {
        compute_travel_alpha(t, self.mode, self.phase, self.count, self.width)
    }
}

/// Travel phase of one ray at `ctx.time`.
pub fn compute_travel_phase(ctx: &FlowContext) -> f32 {
    let Some(config) = ctx.config.travel.as_ref() else {
        return 0.0;
    };
    let mut phase = fract(ctx.time * config.speed * 0.3);
    if config.stagger {
        phase = fract(phase + ray_offset(ctx.distribution, ctx.ray_index, ctx.ray_count));
    }
    phase
}

pub(crate) fn apply(state: AnimationState, ctx: &FlowContext) -> AnimationState {
    state.with_travel_phase(compute_travel_phase(ctx))
}

/// Travel alpha at ray-local `t` in [0,1]. Always in [0,1]; `None` is 1.
pub fn compute_travel_alpha(t: f32, mode: TravelMode, phase: f32, count: u32, width: f32) -> f32 {
    let Some((pattern, direction)) = mode.decompose() else {
        return 1.0;
    };

    let t = saturate(t);
    let width = if width.is_finite() { width.max(MIN_WIDTH) } else { MIN_WIDTH };
    let count = count.max(1);
    let phase = if phase.is_finite() { phase } else { 0.0 };

    let (u, phase) = match direction {
        TravelDirection::Forward => (t, phase),
        TravelDirection::Reverse => (1.0 - t, phase),
        TravelDirection::Bipolar { alternate } => {
            let u = (t - 0.5).abs() * 2.0;
            let phase = if alternate && t < 0.5 { phase + 0.5 } else { phase };
            (u, phase)
        }
    };

    let alpha = match pattern {
        TravelPattern::Chase => chase(u, phase, count, width),
        TravelPattern::Scroll => scroll(u, phase, count, width),
        TravelPattern::Comet => comet(u, phase, count, width),
        TravelPattern::Spark => spark(u, phase, count, width),
        TravelPattern::PulseWave => pulse_wave(u, phase, count, width),
    };
    saturate(alpha)
}

/// Distance from `u` to the nearest of `count` evenly spaced heads at `phase`.
fn nearest_head(u: f32, phase: f32, count: u32) -> f32 {
    let n = count as f32;
    wrapped_distance(u * n, phase * n) / n
}

/// Evenly spaced particles with quadratic falloff.
fn chase(u: f32, phase: f32, count: u32, width: f32) -> f32 {
    let d = nearest_head(u, phase, count);
    let falloff = (1.0 - d / width).max(0.0);
    falloff * falloff
}

/// Continuous bands scrolling along the ray; narrow widths sharpen them.
fn scroll(u: f32, phase: f32, count: u32, width: f32) -> f32 {
    let band = 0.5 + 0.5 * ((u - phase) * count as f32 * std::f32::consts::TAU).cos();
    band.powf((0.25 / width).max(0.25))
}

/// Bright head with a tail trailing behind it.
fn comet(u: f32, phase: f32, count: u32, width: f32) -> f32 {
    let n = count as f32;
    // Distance behind the nearest head, in u units
    let behind = fract((phase - u) * n) / n;
    let tail = (1.0 - behind / width).max(0.0);
    // A short glow ahead of the head keeps it from looking clipped
    let ahead = (1.0 / n - behind).max(0.0);
    let glow = (1.0 - ahead / (width * 0.25)).max(0.0);
    (tail * tail).max(glow * glow * glow)
}

/// Short flashes at fixed hashed spots, each with its own timing.
fn spark(u: f32, phase: f32, count: u32, width: f32) -> f32 {
    let half_width = width * 0.5;
    (0..count.min(MAX_SPARKS))
        .map(|i| {
            let seed = i as f32 + 1.0;
            let pos = hash11(seed * 17.31);
            let life = fract(phase * 2.0 + hash11(seed * 5.77 + 3.1));
            let flash = (1.0 - life) * (1.0 - life);
            let falloff = (1.0 - (u - pos).abs() / half_width).max(0.0);
            flash * falloff
        })
        .fold(0.0, f32::max)
}

/// Soft gaussian wave fronts.
fn pulse_wave(u: f32, phase: f32, count: u32, width: f32) -> f32 {
    let d = nearest_head(u, phase, count) / width;
    (-4.0 * d * d).exp()
}
