//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Rgb;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert one sRGB channel to linear
fn srgb_to_linear(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Opaque RGBA for a palette color; `linear` when the target is an sRGB surface
pub fn rgba(color: Rgb, linear: bool) -> [f32; 4] {
    let Rgb(r, g, b) = color;
    if linear {
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
    } else {
        [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ]
    }
}

/// Colors for non-ball elements
pub mod colors {
    use crate::sim::Rgb;

    pub const BACKGROUND: Rgb = Rgb(255, 255, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_endpoints() {
        assert_eq!(rgba(Rgb(255, 0, 255), true), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(rgba(Rgb(255, 0, 255), false), [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_linear_is_darker_midtone() {
        let [lin, ..] = rgba(Rgb(128, 0, 0), true);
        let [raw, ..] = rgba(Rgb(128, 0, 0), false);
        assert!(lin < raw);
        assert!((lin - 0.2158).abs() < 1e-3);
    }
}
