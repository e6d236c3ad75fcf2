//! Frame pacing and the application event loop.
//!
//! The loop is single threaded: winit delivers window events and redraw
//! requests on the main thread, and every frame updates the scene, encodes the
//! draw and presents before the next event is handled.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window, the GPU [`Context`] and the [`Renderer`]
//! 2. `about_to_wait` asks the [`FramePacer`] whether a frame is due and either
//!    requests a redraw or sleeps until the next deadline
//! 3. `RedrawRequested` draws one frame via [`Renderer::draw_frame`]
//! 4. `Resized` resizes the surface, `CloseRequested` ends the loop

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::{Config, FrameRateRange},
    context::Context,
    data_structures::scene::Scene,
    render::Renderer,
};

/// How frames are scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacingMode {
    /// Presentation waits for the display's vertical blank.
    Display,
    /// Fixed-interval timer at the preferred rate.
    Timer,
}

impl PacingMode {
    /// Prefer the display refresh whenever vsync is wanted and the surface can do it.
    pub fn select(vsync: bool, present_modes: &[wgpu::PresentMode]) -> Self {
        let has_fifo = present_modes
            .iter()
            .any(|m| matches!(m, wgpu::PresentMode::Fifo | wgpu::PresentMode::FifoRelaxed));
        if vsync && has_fifo {
            PacingMode::Display
        } else {
            PacingMode::Timer
        }
    }
}

/// Decides when the next frame should start.
///
/// Frames never start closer together than `1 / max`. In [`PacingMode::Timer`]
/// they are spaced `1 / preferred` apart; with [`PacingMode::Display`] the
/// blocking present does the pacing and only the upper bound is enforced.
#[derive(Clone, Debug)]
pub struct FramePacer {
    mode: PacingMode,
    min_interval: Duration,
    target_interval: Duration,
    max_interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(range: FrameRateRange, mode: PacingMode) -> Self {
        let interval = |hz: u32| Duration::from_secs_f64(1.0 / hz.max(1) as f64);
        let min_interval = interval(range.max);
        let target_interval = match mode {
            PacingMode::Display => min_interval,
            PacingMode::Timer => interval(range.preferred),
        };
        Self {
            mode,
            min_interval,
            target_interval,
            max_interval: interval(range.min),
            last_frame: None,
        }
    }

    pub fn mode(&self) -> PacingMode {
        self.mode
    }

    pub fn target_interval(&self) -> Duration {
        self.target_interval
    }

    /// When the next frame should start. `None` until the first frame ran.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last_frame.map(|last| last + self.target_interval)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_deadline().is_none_or(|deadline| now >= deadline)
    }

    /// Record the start of a frame and return the time since the previous one.
    pub fn frame_started(&mut self, now: Instant) -> Duration {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        if dt > self.max_interval {
            log::debug!(
                "Frame gap of {:?} is below the minimum frame rate ({:?})",
                dt,
                self.max_interval
            );
        }
        if !dt.is_zero() && dt < self.min_interval {
            log::trace!("Frame started {:?} early", self.min_interval - dt);
        }
        self.last_frame = Some(now);
        dt
    }
}

/// Everything that exists once the window is up.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    renderer: Renderer,
    scene: Scene,
    pacer: FramePacer,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        let renderer = Renderer::new(&ctx.device, ctx.config.format, config.clear_colour());
        let scene = Scene::from_description(&config.scene);
        let pacer = FramePacer::new(config.frame_rate, ctx.pacing);
        log::info!("Scene with {} cubes", scene.len());
        Ok(Self {
            ctx,
            renderer,
            scene,
            pacer,
        })
    }

    fn draw(&mut self) {
        self.pacer.frame_started(Instant::now());
        if self.renderer.draw_frame(&mut self.ctx, &mut self.scene).is_none() {
            log::trace!("frame skipped");
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
}

impl App {
    fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Builder::new_current_thread().build()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => panic!("App initialization failed. Cannot create the window: {}", e),
        };

        let state = self
            .async_runtime
            .block_on(AppState::new(window, &self.config));
        let state = match state {
            Ok(state) => state,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {:#}",
                e
            ),
        };
        state.ctx.window.request_redraw();
        self.state = Some(state);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => state.draw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let state = match &self.state {
            Some(state) => state,
            None => return,
        };
        let now = Instant::now();
        if state.pacer.is_due(now) {
            state.ctx.window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else if let Some(deadline) = state.pacer.next_deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}

/// Open the window and run the render loop until the window is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
