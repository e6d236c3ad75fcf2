//! The static cube mesh.
//!
//! The mesh is built once from the eight corners of a unit cube centred at the
//! origin. Each face contributes two triangles that share the face normal, so
//! the whole mesh is exactly [`CUBE_VERTEX_COUNT`] non-indexed vertices.

use wgpu::util::DeviceExt;

/// 6 faces * 2 triangles * 3 vertices.
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Anything that can be bound as a vertex buffer describes its own layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Homogeneous position, `w` is always 1.
    pub position: [f32; 4],
    pub normal: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Emit the quad `a b c d` as the triangles `a b c` and `a c d`.
///
/// Corners are given counter-clockwise as seen from outside the cube, which
/// keeps every triangle front facing under `FrontFace::Ccw`.
fn add_face(
    vertices: &mut Vec<MeshVertex>,
    [a, b, c, d]: [[f32; 4]; 4],
    normal: [f32; 3],
) {
    for position in [a, b, c, a, c, d] {
        vertices.push(MeshVertex { position, normal });
    }
}

pub fn build_cube_vertices() -> Vec<MeshVertex> {
    let p000 = [-0.5, -0.5, -0.5, 1.0];
    let p001 = [-0.5, -0.5, 0.5, 1.0];
    let p010 = [-0.5, 0.5, -0.5, 1.0];
    let p011 = [-0.5, 0.5, 0.5, 1.0];
    let p100 = [0.5, -0.5, -0.5, 1.0];
    let p101 = [0.5, -0.5, 0.5, 1.0];
    let p110 = [0.5, 0.5, -0.5, 1.0];
    let p111 = [0.5, 0.5, 0.5, 1.0];

    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT as usize);
    // front
    add_face(&mut vertices, [p011, p001, p101, p111], [0.0, 0.0, 1.0]);
    // back
    add_face(&mut vertices, [p110, p100, p000, p010], [0.0, 0.0, -1.0]);
    // left
    add_face(&mut vertices, [p010, p000, p001, p011], [-1.0, 0.0, 0.0]);
    // right
    add_face(&mut vertices, [p111, p101, p100, p110], [1.0, 0.0, 0.0]);
    // top
    add_face(&mut vertices, [p010, p011, p111, p110], [0.0, 1.0, 0.0]);
    // bottom
    add_face(&mut vertices, [p001, p000, p100, p101], [0.0, -1.0, 0.0]);
    vertices
}

/// The cube vertices uploaded once at startup and shared by every instance.
#[derive(Debug)]
pub struct CubeMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl CubeMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertices = build_cube_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    }
}
