//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::CarColor;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Colors for game elements (the original's 8-bit palette, normalized)
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const RED: [f32; 4] = [0.863, 0.078, 0.078, 1.0];
    pub const BLUE: [f32; 4] = [0.118, 0.565, 1.0, 1.0];
    pub const GREEN: [f32; 4] = [0.133, 0.545, 0.133, 1.0];
    pub const GREY: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
    pub const DARK_GREY: [f32; 4] = [0.125, 0.125, 0.125, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const ORANGE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const PURPLE: [f32; 4] = [0.541, 0.169, 0.886, 1.0];
    pub const ROAD: [f32; 4] = [0.188, 0.188, 0.188, 1.0];
    pub const GRASS: [f32; 4] = [0.133, 0.545, 0.133, 1.0];
    pub const GRASS_DARK: [f32; 4] = [0.055, 0.427, 0.055, 1.0];
}

/// RGBA for an enemy paint color
pub fn car_color_rgba(color: CarColor) -> [f32; 4] {
    match color {
        CarColor::Red => colors::RED,
        CarColor::Orange => colors::ORANGE,
        CarColor::Purple => colors::PURPLE,
        CarColor::Green => colors::GREEN,
    }
}

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
