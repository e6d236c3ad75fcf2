//! Rotating cube instances and their per-instance GPU record.
//!
//! Every cube owns a position, a fixed colour and a rotation angle that grows
//! by [`ROTATION_STEP`] each time its transform is requested. The transform is
//! composed straight into clip space so the vertex shader only needs a single
//! matrix multiplication per vertex.

use std::f32::consts::FRAC_PI_6;

use cgmath::{Matrix4, Rad, Vector3, Vector4};

use crate::data_structures::mesh::Vertex;

/// Rotation added per frame. Assumes ~60 fps, there is no delta-time scaling.
pub const ROTATION_STEP: f32 = 0.01;
/// Vertical field of view (30°).
pub const FOV_Y: Rad<f32> = Rad(FRAC_PI_6);
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
/// The camera sits at the origin; the scene is pushed back along -Z instead.
pub const VIEW_OFFSET: [f32; 3] = [0.0, 0.0, -2.0];
/// Angle of both fixed tilts applied on top of the animated rotation (30°).
pub const TILT: f32 = FRAC_PI_6;
pub const CUBE_SCALE: f32 = 0.1;

/// Rotation about X, columns `(1,0,0,0) (0,c,s,0) (0,-s,c,0) (0,0,0,1)`.
pub fn rotation_x(angle: f32) -> Matrix4<f32> {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c,   s,   0.0,
        0.0, -s,  c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

/// Rotation about Y, columns `(c,0,s,0) (0,1,0,0) (-s,0,c,0) (0,0,0,1)`.
///
/// The sign pattern mirrors [`rotation_x`] rather than following the right-hand
/// rule, so this turns by `-angle` compared to `Matrix4::from_angle_y`. Scenes
/// are authored against this convention; keep it.
pub fn rotation_y(angle: f32) -> Matrix4<f32> {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Matrix4::new(
        c,   0.0, s,   0.0,
        0.0, 1.0, 0.0, 0.0,
        -s,  0.0, c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

/// Right-handed, Y-up perspective projection mapping view depth to [-1, 1].
pub fn projection(aspect: f32) -> Matrix4<f32> {
    cgmath::perspective(FOV_Y, aspect, Z_NEAR, Z_FAR)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cube {
    position: Vector3<f32>,
    color: Vector4<f32>,
    rotation_angle: f32,
}

impl Cube {
    pub fn new(position: Vector3<f32>, color: Vector4<f32>) -> Self {
        Self {
            position,
            color,
            rotation_angle: 0.0,
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn color(&self) -> Vector4<f32> {
        self.color
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    /// Model matrix for the current angle:
    /// `T(position) * Rx(angle) * Ry(30°) * Rx(30°) * S(0.1)`.
    pub fn model(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * rotation_x(self.rotation_angle)
            * rotation_y(TILT)
            * rotation_x(TILT)
            * Matrix4::from_scale(CUBE_SCALE)
    }

    /// Clip-space transform for the current angle. Does not advance the rotation.
    pub fn transform(&self, aspect: f32) -> Matrix4<f32> {
        projection(aspect) * Matrix4::from_translation(VIEW_OFFSET.into()) * self.model()
    }

    /// Advance the rotation by one step and return this frame's instance record.
    pub fn update_transform(&mut self, aspect: f32) -> CubeInstanceData {
        self.rotation_angle += ROTATION_STEP;
        CubeInstanceData {
            transform: self.transform(aspect).into(),
            color: self.color.into(),
        }
    }
}

/**
 * The per-instance record read by the vertex shader from buffer slot 1.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstanceData {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/**
 * Layout: the clip-space matrix as four column vectors followed by the colour.
 * Locations 0 and 1 belong to the mesh vertex, so instance data starts at 2.
 */
impl Vertex for CubeInstanceData {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<CubeInstanceData>() as wgpu::BufferAddress,
            // Advance once per cube, not per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
