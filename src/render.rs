//! Per-frame rendering.
//!
//! A frame is planned first and encoded second. [`FramePlan::build`] advances
//! the scene and decides which draw calls to issue; the [`Renderer`] then
//! uploads the plan's instance records and replays the draws into a single
//! render pass.
//!
//! # Key types
//!
//! - [`FramePlan`] holds the instance records and draw calls of one frame
//! - [`DrawCall`] is one instanced, non-indexed draw of the cube mesh
//! - [`Renderer`] owns the pipeline and the static mesh
//! - [`FrameStats`] summarises what a submitted frame contained
//!
//! The instance buffer is allocated from scratch every frame. That is fine for
//! a handful of cubes; a larger scene would keep a persistent buffer and
//! `write_buffer` into it, or double buffer it.

use std::{iter, ops::Range};

use wgpu::util::DeviceExt;

use crate::{
    context::{Context, SurfaceSize},
    data_structures::{
        cube::CubeInstanceData,
        mesh::{CUBE_VERTEX_COUNT, CubeMesh},
        scene::Scene,
        texture::Texture,
    },
    pipelines::basic::build_pipeline,
};

/// One instanced draw of the cube mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub vertices: Range<u32>,
    pub instances: Range<u32>,
}

/// Everything one frame will submit, computed before touching the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub instances: Vec<CubeInstanceData>,
    pub draw_calls: Vec<DrawCall>,
}

impl FramePlan {
    /// Advance every cube by one step and plan a single instanced draw covering
    /// all of them. An empty scene plans no draw at all.
    pub fn build(scene: &mut Scene, aspect: f32) -> Self {
        let instances = scene.update_transforms(aspect);
        let draw_calls = if instances.is_empty() {
            Vec::new()
        } else {
            vec![DrawCall {
                vertices: 0..CUBE_VERTEX_COUNT,
                instances: 0..instances.len() as u32,
            }]
        };
        Self {
            instances,
            draw_calls,
        }
    }

    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// What was submitted for a frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub instance_count: u32,
    pub instance_bytes: usize,
}

/// Owns the cube pipeline and the static mesh. Per-frame resources (depth
/// texture, instance buffer, command buffer) are created inside [`Renderer::render`]
/// and released when the GPU is done with them.
#[derive(Debug)]
pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    mesh: CubeMesh,
    pub clear_colour: wgpu::Color,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        clear_colour: wgpu::Color,
    ) -> Self {
        let pipeline = build_pipeline(device, color_format);
        let mesh = CubeMesh::new(device);
        log::info!("Cube pipeline ready, {} mesh vertices", mesh.num_vertices);
        Self {
            pipeline,
            mesh,
            clear_colour,
        }
    }

    /// Render one frame into `target`, which must have the colour format the
    /// renderer was built for and the given `size`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        size: SurfaceSize,
        scene: &mut Scene,
    ) -> FrameStats {
        let depth_texture = Texture::create_depth_texture(device, size.as_array(), "Frame Depth Texture");
        let plan = FramePlan::build(scene, size.aspect_ratio());

        let instance_buffer = (!plan.instances.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Instance Buffer"),
                contents: plan.instance_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            if let Some(instance_buffer) = &instance_buffer {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
                for draw in &plan.draw_calls {
                    render_pass.draw(draw.vertices.clone(), draw.instances.clone());
                }
            } else {
                log::trace!("empty scene, clearing only");
            }
        }
        queue.submit(iter::once(encoder.finish()));

        FrameStats {
            draw_calls: plan.draw_calls.len(),
            instance_count: plan.instances.len() as u32,
            instance_bytes: plan.instance_bytes().len(),
        }
    }

    /// Acquire the next drawable, render the scene into it and present it.
    ///
    /// Returns `None` when no drawable was available; the frame is skipped and
    /// the scene is left untouched. A suboptimal drawable is still used, and the
    /// surface is reconfigured after it was presented.
    pub fn draw_frame(&self, ctx: &mut Context, scene: &mut Scene) -> Option<FrameStats> {
        let (output, suboptimal) = match ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output) => (output, false),
            wgpu::CurrentSurfaceTexture::Suboptimal(output) => (output, true),
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => {
                log::debug!("No drawable available, skipping frame");
                return None;
            }
            // Reconfigure the surface if it's lost or outdated
            wgpu::CurrentSurfaceTexture::Outdated | wgpu::CurrentSurfaceTexture::Lost => {
                log::warn!("Surface lost or outdated, reconfiguring");
                ctx.reconfigure();
                return None;
            }
            #[allow(unreachable_patterns)]
            _ => {
                log::error!("Unable to acquire a drawable, skipping frame");
                return None;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let stats = self.render(&ctx.device, &ctx.queue, &view, ctx.size, scene);
        ctx.window.pre_present_notify();
        output.present();
        if suboptimal {
            log::debug!("Surface suboptimal, reconfiguring");
            ctx.reconfigure();
        }
        Some(stats)
    }
}
