use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::named_enum;
use crate::flow::{AnimationState, FlowContext};
use crate::math::{fract, hash11, hash12, mix, saturate, smoothstep};

/// Flicker archetypes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlickerMode {
    #[default]
    None,
    /// Per-ray hash noise that twinkles independently.
    Scintillation,
    /// Hard on/off square wave.
    Strobe,
    /// Smooth sine breathing.
    FadePulse,
    /// Blended multi-rate noise, like a failing light.
    Flicker,
    /// Sparse spikes with exponential decay.
    Lightning,
    /// Double "lub-dub" pulse.
    Heartbeat,
}

named_enum!(FlickerMode, "flicker mode", {
    "NONE" => None,
    "SCINTILLATION" => Scintillation,
    "STROBE" => Strobe,
    "FADE_PULSE" | "PULSE" => FadePulse,
    "FLICKER" => Flicker,
    "LIGHTNING" => Lightning,
    "HEARTBEAT" => Heartbeat,
});

impl FlickerMode {
    pub const ALL: [FlickerMode; 7] = [
        FlickerMode::None,
        FlickerMode::Scintillation,
        FlickerMode::Strobe,
        FlickerMode::FadePulse,
        FlickerMode::Flicker,
        FlickerMode::Lightning,
        FlickerMode::Heartbeat,
    ];
}

/// Flicker settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickerConfig {
    pub enabled: bool,
    pub mode: FlickerMode,
    /// How deep the flicker dims, in [0,1].
    pub intensity: f32,
    /// Cycles per time unit.
    pub frequency: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: FlickerMode::Scintillation,
            intensity: 0.5,
            frequency: 4.0,
        }
    }
}

/// Flicker alpha in [0,1]; a pure function of its inputs. `None` is 1.
pub fn compute_flicker_alpha(
    mode: FlickerMode,
    time: f32,
    ray_index: u32,
    intensity: f32,
    frequency: f32,
) -> f32 {
    if mode == FlickerMode::None {
        return 1.0;
    }

    let intensity = saturate(intensity);
    let frequency = if frequency.is_finite() { frequency.max(0.0) } else { 0.0 };
    let time = if time.is_finite() { time } else { 0.0 };
    let ray = ray_index as f32;
    let cycle = time * frequency;

    let alpha = match mode {
        FlickerMode::None => 1.0,
        FlickerMode::Scintillation => {
            // Interpolate between per-step hashes so stars shimmer instead of pop
            let step = cycle.floor();
            let a = hash12(ray * 13.7 + 1.0, step);
            let b = hash12(ray * 13.7 + 1.0, step + 1.0);
            let n = mix(a, b, smoothstep(0.0, 1.0, fract(cycle)));
            1.0 - intensity * n
        }
        FlickerMode::Strobe => {
            let offset = hash11(ray * 3.3 + 0.7) * 0.25;
            if fract(cycle + offset) < 0.5 {
                1.0
            } else {
                1.0 - intensity
            }
        }
        FlickerMode::FadePulse => {
            let offset = hash11(ray * 2.1 + 5.0);
            let breath = 0.5 + 0.5 * ((cycle + offset) * TAU).sin();
            1.0 - intensity * (1.0 - breath)
        }
        FlickerMode::Flicker => {
            let seed = ray * 7.9 + 2.0;
            let slow = hash12(seed, (cycle * 0.5).floor());
            let mid = hash12(seed + 31.0, (cycle * 2.7).floor());
            let fast = hash12(seed + 67.0, (cycle * 7.1).floor());
            let n = slow * 0.5 + mid * 0.3 + fast * 0.2;
            // Occasional deep dropouts
            let dropout = if hash12(seed + 97.0, cycle.floor()) > 0.85 { 1.0 } else { n };
            1.0 - intensity * dropout
        }
        FlickerMode::Lightning => {
            let step = cycle.floor();
            let strike = hash12(ray * 5.3 + 11.0, step);
            let base = 1.0 - intensity;
            if strike < 0.6 {
                base
            } else {
                let at = hash12(ray * 5.3 + 23.0, step) * 0.6;
                let since = fract(cycle) - at;
                if since < 0.0 {
                    base
                } else {
                    base + intensity * (-since * 12.0).exp()
                }
            }
        }
        FlickerMode::Heartbeat => {
            let x = fract(cycle + hash11(ray * 1.9 + 4.0) * 0.1);
            let lub = (-((x - 0.1) / 0.04).powi(2)).exp();
            let dub = 0.6 * (-((x - 0.3) / 0.05).powi(2)).exp();
            (1.0 - intensity) + intensity * lub.max(dub)
        }
    };
    saturate(alpha)
}

pub(crate) fn apply(state: AnimationState, ctx: &FlowContext) -> AnimationState {
    let alpha = match ctx.config.flicker.as_ref() {
        Some(c) => compute_flicker_alpha(c.mode, ctx.time, ctx.ray_index, c.intensity, c.frequency),
        None => 1.0,
    };
    state.with_flicker_alpha(alpha)
}
