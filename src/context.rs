use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{config::Config, flow::PacingMode};

/// Pixel dimensions of the render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. A degenerate surface reports 1.0.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Adopt a new size. Zero extents (minimised windows) are ignored.
    /// Returns whether the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn as_array(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

/// Pick the colour format for the swapchain.
///
/// Prefers the first non-sRGB format so the clear colour and the shaded cube
/// colours reach the display unencoded. Falls back to whatever comes first.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// The GPU side of the window: device, queue and the configured surface.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: SurfaceSize,
    pub pacing: PacingMode,
}

impl Context {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> anyhow::Result<Self> {
        let inner = window.inner_size();
        let size = SurfaceSize::new(inner.width.max(1), inner.height.max(1));

        log::info!("WGPU setup");
        let instance = wgpu::Instance::default();

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Cube Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .context("failed to create the GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&surface_caps.formats)
            .context("surface reports no supported formats")?;

        let pacing = PacingMode::select(app_config.vsync, &surface_caps.present_modes);
        let present_mode = match pacing {
            PacingMode::Display => wgpu::PresentMode::Fifo,
            PacingMode::Timer => surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| matches!(m, wgpu::PresentMode::Mailbox | wgpu::PresentMode::Immediate))
                .unwrap_or(wgpu::PresentMode::AutoNoVsync),
        };
        log::info!("Surface {:?}, {:?}, pacing {:?}", surface_format, present_mode, pacing);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            pacing,
        })
    }

    /// Resize the backing surface. Only surface geometry changes; nothing in the
    /// scene is touched and in-flight frames are unaffected.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size.resize(width, height) {
            self.reconfigure();
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.size.width;
        self.config.height = self.size.height;
        self.surface.configure(&self.device, &self.config);
    }
}
