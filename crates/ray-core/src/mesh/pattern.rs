//! Decorative cell emission.
//!
//! The generator hands every surviving quad to a [`CellEmitter`] as four
//! vertex handles. The emitter decides the committed topology: two
//! triangles, a subdivided fan, outline lines, or nothing.

use serde::{Deserialize, Serialize};

use crate::error::named_enum;
use crate::mesh::{MeshBuilder, Vertex, VertexId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellPattern {
    /// Two triangles split along the first diagonal.
    #[default]
    Solid,
    /// Two triangles split along the other diagonal.
    Flipped,
    /// Solid on even cells, nothing on odd cells.
    Checker,
    /// Centre vertex and four triangles.
    Subdivided,
    /// Quad outline.
    Wireframe,
    /// Lines along each ring.
    Rings,
    /// Lines along each segment, base to tip.
    Meridians,
}

named_enum!(CellPattern, "cell pattern", {
    "SOLID" => Solid,
    "FLIPPED" => Flipped,
    "CHECKER" | "CHECKERBOARD" => Checker,
    "SUBDIVIDED" => Subdivided,
    "WIREFRAME" => Wireframe,
    "RINGS" => Rings,
    "MERIDIANS" => Meridians,
});

/// Position of a quad in the tessellation grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellCoord {
    pub ring: u32,
    pub segment: u32,
}

/// Turns one quad into committed topology.
///
/// Corners arrive as `[(ring, seg), (ring, seg + 1), (ring + 1, seg + 1), (ring + 1, seg)]`.
pub trait CellEmitter: Send + Sync {
    fn emit(&self, builder: &mut MeshBuilder, corners: [VertexId; 4], pattern: CellPattern, cell: CellCoord);
}

/// Built-in emitter for every [`CellPattern`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternEmitter;

impl CellEmitter for PatternEmitter {
    fn emit(&self, builder: &mut MeshBuilder, corners: [VertexId; 4], pattern: CellPattern, cell: CellCoord) {
        let [a, b, c, d] = corners;
        match pattern {
            CellPattern::Solid => {
                builder.triangle(a, b, c);
                builder.triangle(a, c, d);
            }
            CellPattern::Flipped => {
                builder.triangle(a, b, d);
                builder.triangle(b, c, d);
            }
            CellPattern::Checker => {
                if (cell.ring + cell.segment) % 2 == 0 {
                    builder.triangle(a, b, c);
                    builder.triangle(a, c, d);
                }
            }
            CellPattern::Subdivided => {
                let center = average(builder, &corners);
                let m = builder.push_vertex(center);
                builder.triangle(a, b, m);
                builder.triangle(b, c, m);
                builder.triangle(c, d, m);
                builder.triangle(d, a, m);
            }
            CellPattern::Wireframe => {
                builder.line(a, b);
                builder.line(b, c);
                builder.line(c, d);
                builder.line(d, a);
            }
            CellPattern::Rings => builder.line(a, b),
            CellPattern::Meridians => builder.line(a, d),
        }
    }
}

/// Mean of four vertices; the normal is renormalized.
fn average(builder: &MeshBuilder, corners: &[VertexId; 4]) -> Vertex {
    let verts = corners.map(|id| *builder.vertex(id));
    let position = verts.iter().map(|v| v.position()).sum::<glam::Vec3>() * 0.25;
    let normal = verts
        .iter()
        .map(|v| v.normal())
        .sum::<glam::Vec3>()
        .try_normalize()
        .unwrap_or(verts[0].normal());
    let uv = [
        verts.iter().map(|v| v.uv[0]).sum::<f32>() * 0.25,
        verts.iter().map(|v| v.uv[1]).sum::<f32>() * 0.25,
    ];
    let mut color = [0u8; 4];
    for (ch, out) in color.iter_mut().enumerate() {
        let sum: u32 = verts.iter().map(|v| v.color[ch] as u32).sum();
        *out = ((sum + 2) / 4) as u8;
    }
    Vertex::new(position, normal, uv, color)
}
