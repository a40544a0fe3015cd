//! Scalar helpers ported from the effect shaders.
//!
//! Everything here is a pure function of its arguments so flicker and travel
//! patterns stay reproducible frame to frame.

use std::f32::consts::TAU;

/// The golden ratio `(1 + sqrt 5) / 2`; its fractional part spaces ray offsets evenly.
pub const GOLDEN_RATIO: f32 = 1.618_034;

/// Hash float to [0,1) - port of GLSL hash11
pub fn hash11(p: f32) -> f32 {
    let mut p = (p * 0.1031).fract();
    p *= p + 33.33;
    p *= p + p;
    fract(p)
}

/// Hash vec2 to [0,1) - port of GLSL hash12
pub fn hash12(x: f32, y: f32) -> f32 {
    let p3x = fract(x * 0.1031);
    let p3y = fract(y * 0.1031);
    let p3z = fract(x * 0.1031); // .xyx swizzle
    let dot_val = p3x * (p3y + 33.33) + p3y * (p3z + 33.33) + p3z * (p3x + 33.33);
    let p3x = p3x + dot_val;
    let p3y = p3y + dot_val;
    let p3z = p3z + dot_val;
    fract((p3x + p3y) * p3z)
}

/// GLSL `fract`, always in [0,1) even for negative input.
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Smooth interpolation - port of GLSL smoothstep
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// GLSL-style `mix(a, b, t)` for scalars.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Clamp to [0,1], mapping NaN to 0.
#[inline]
pub fn saturate(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Shortest distance between two points on the unit circle `[0,1)`.
#[inline]
pub fn wrapped_distance(a: f32, b: f32) -> f32 {
    let d = fract(a - b);
    d.min(1.0 - d)
}

/// Raised-cosine wave in [0,1]: 0.5 at phase 0, peak at phase 0.25.
#[inline]
pub fn sine01(phase: f32) -> f32 {
    0.5 + 0.5 * (phase * TAU).sin()
}
