//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
///
/// Positions are surface pixels (top-left origin, y down); the pipeline maps
/// them to clip space on upload.
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

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    pub const SKY_WATER: [f32; 4] = [0.659, 0.835, 1.0, 1.0]; // #a8d5ff
    pub const DEEP_WATER: [f32; 4] = [0.004, 0.361, 0.780, 1.0]; // #015cc7
    pub const SWELL: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const GOAL: [f32; 4] = [0.298, 0.318, 0.749, 1.0]; // #4C51BF
    pub const HULL: [f32; 4] = [0.290, 0.333, 0.408, 1.0]; // #4A5568
    pub const CABIN: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ICEBERG: [f32; 4] = [0.627, 0.682, 0.698, 1.0]; // #A0AEB2
    pub const ICE_HIGHLIGHT: [f32; 4] = [0.886, 0.910, 0.941, 1.0]; // #E2E8F0
    pub const MINE: [f32; 4] = [0.176, 0.216, 0.282, 1.0]; // #2D3748
    pub const MINE_SPIKE: [f32; 4] = [0.443, 0.502, 0.588, 1.0]; // #718096
    pub const MINE_CAP: [f32; 4] = [0.898, 0.243, 0.243, 1.0]; // #E53E3E
    pub const WAKE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
}
