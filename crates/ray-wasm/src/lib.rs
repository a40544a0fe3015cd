use ray_core::config::RayEffectConfig;
use ray_core::effect::RayEffect;
use ray_core::forces::tidal::{DeformationStrategy, TidalField};
use ray_core::mesh::alpha::ClipRange;
use ray_core::mesh::{Mesh, Vertex};
use wasm_bindgen::prelude::*;

/// Floats per GPU vertex: position, normal, uv, packed RGBA8.
const VERTEX_STRIDE_FLOATS: usize = std::mem::size_of::<Vertex>() / std::mem::size_of::<f32>();

/// One ray effect driven from JavaScript.
///
/// The mesh of the last frame is kept so JS can read the vertex and index
/// buffers straight out of wasm memory.
#[wasm_bindgen]
pub struct RayEffectWorld {
    config: RayEffectConfig,
    effect: RayEffect,
    mesh: Mesh,
}

#[wasm_bindgen]
impl RayEffectWorld {
    /// Create a world from an effect description in TOML.
    #[wasm_bindgen(constructor)]
    pub fn new(effect_toml: &str) -> Result<RayEffectWorld, JsValue> {
        let config = RayEffectConfig::from_toml_str(effect_toml).map_err(|e| {
            web_sys::console::error_1(&format!("WASM RayEffectWorld: {}", e).into());
            JsValue::from_str(&e.to_string())
        })?;

        web_sys::console::log_1(
            &format!(
                "WASM RayEffectWorld created: {} rays, {} body",
                config.ray_count, config.shape.body
            )
            .into(),
        );

        let effect = RayEffect::new(config.clone());
        Ok(RayEffectWorld {
            config,
            effect,
            mesh: Mesh::default(),
        })
    }

    /// Build every ray at `time`; returns elapsed milliseconds.
    #[wasm_bindgen]
    pub fn frame(&mut self, time: f32) -> f32 {
        let start = js_sys::Date::now();
        self.mesh = self.effect.merged_mesh(time);
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_ptr(&self) -> *const f32 {
        let floats: &[f32] = bytemuck::cast_slice(&self.mesh.vertices);
        floats.as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_byte_length(&self) -> usize {
        self.mesh.vertex_bytes().len()
    }

    #[wasm_bindgen]
    pub fn vertex_stride_floats(&self) -> usize {
        VERTEX_STRIDE_FLOATS
    }

    #[wasm_bindgen]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    #[wasm_bindgen]
    pub fn get_triangle_index_ptr(&self) -> *const u32 {
        self.mesh.triangles.as_ptr()
    }

    #[wasm_bindgen]
    pub fn triangle_index_count(&self) -> usize {
        self.mesh.triangles.len()
    }

    #[wasm_bindgen]
    pub fn get_line_index_ptr(&self) -> *const u32 {
        self.mesh.lines.as_ptr()
    }

    #[wasm_bindgen]
    pub fn line_index_count(&self) -> usize {
        self.mesh.lines.len()
    }

    #[wasm_bindgen]
    pub fn ray_count(&self) -> u32 {
        self.effect.ray_count()
    }

    /// `[phase, travel_phase, flicker_alpha]` of one ray at `time`.
    #[wasm_bindgen]
    pub fn animation_state(&self, index: u32, time: f32) -> Vec<f32> {
        let state = self.effect.animate(index, time);
        vec![state.phase(), state.travel_phase(), state.flicker_alpha()]
    }

    #[wasm_bindgen]
    pub fn set_ray_count(&mut self, ray_count: u32) {
        self.config.ray_count = ray_count;
        self.rebuild();
    }

    #[wasm_bindgen]
    pub fn set_tidal_field(&mut self, x: f32, y: f32, z: f32, intensity: f32, radius: f32) {
        self.config.deformation.field = TidalField::new(glam::Vec3::new(x, y, z), intensity, radius);
        self.rebuild();
    }

    /// Unknown names fall back to no deformation.
    #[wasm_bindgen]
    pub fn set_deformation_mode(&mut self, mode: &str) {
        self.config.deformation.mode = DeformationStrategy::from(mode.to_string());
        self.rebuild();
    }

    #[wasm_bindgen]
    pub fn set_clip(&mut self, start: f32, end: f32) {
        self.config.clip = ClipRange::new(start, end);
        self.rebuild();
    }

    #[wasm_bindgen]
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.config.color = [r, g, b];
        self.rebuild();
    }

    /// Replace the whole effect description; the current one is kept on error.
    #[wasm_bindgen]
    pub fn load_effect(&mut self, effect_toml: &str) -> bool {
        match RayEffectConfig::from_toml_str(effect_toml) {
            Ok(config) => {
                self.config = config;
                self.rebuild();
                true
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WASM RayEffectWorld: {}", e).into());
                false
            }
        }
    }
}

impl RayEffectWorld {
    fn rebuild(&mut self) {
        self.effect = RayEffect::new(self.config.clone());
    }
}
