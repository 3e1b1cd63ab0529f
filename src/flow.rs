//! Application event loop.
//!
//! [`run`] opens the window (or attaches to the `canvas.webgl` element on the
//! web), sets up the GPU, loads the assets and then drives the
//! [`FrameLoop`] from winit's redraw callback until the window closes.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window and starts the asynchronous startup:
//!    GPU context, asset loading, material binding, fireflies, GPU scene.
//!    Native blocks on a tokio runtime; the web spawns the future and is
//!    woken by an [`AppEvent::Initialized`] message.
//! 2. Window events feed the debug panel and the orbit controls, and resize
//!    the viewport.
//! 3. Every `RedrawRequested` ticks the frame loop: time uniforms, damping,
//!    upload, render. The next redraw is requested right away.
//! 4. `CloseRequested` sets the [`StopSignal`]; the loop reports `Stopped`
//!    and the event loop exits.
//!
//! A startup failure is logged, ends the event loop and is returned by [`run`].

use std::{fmt::Debug, sync::Arc};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

#[cfg(feature = "debug-ui")]
use crate::overlay::DebugOverlay;
use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::fireflies::{FireflyField, clock_seeded_rng},
    frame::{FrameLoop, FrameSink, StopSignal, SystemClock, Tick},
    render::GpuScene,
    resources::load_scene_assets,
    scene::SceneState,
    viewport::Viewport,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Everything that exists once startup finished.
pub struct AppState {
    pub(crate) ctx: Context,
    pub(crate) gpu: GpuScene,
    pub scene: SceneState,
    #[cfg(feature = "debug-ui")]
    overlay: DebugOverlay,
}

impl Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("ctx", &self.ctx)
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());

        let ctx = Context::new(window, surface_size(size, &viewport)).await?;
        let (model, baked) = load_scene_assets(&config, &ctx.device, &ctx.queue).await?;

        let fireflies =
            FireflyField::generate(config.firefly_count, &mut clock_seeded_rng());
        let mut scene = SceneState::new(&config, viewport, fireflies);
        scene.set_surface_size(ctx.config.width, ctx.config.height);
        let gpu = GpuScene::new(&ctx, &scene, model, &baked);

        #[cfg(feature = "debug-ui")]
        let overlay = DebugOverlay::new(&ctx);

        log::info!("Scene initialised");
        Ok(Self {
            ctx,
            gpu,
            scene,
            #[cfg(feature = "debug-ui")]
            overlay,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        let viewport = Viewport::from_physical(size.width, size.height, scale_factor);
        if self
            .scene
            .resize(viewport.width(), viewport.height(), scale_factor)
        {
            self.ctx.resize(surface_size(size, &self.scene.viewport));
            self.scene
                .set_surface_size(self.ctx.config.width, self.ctx.config.height);
        }
    }

    fn window_event(&mut self, event: &WindowEvent) {
        #[cfg(feature = "debug-ui")]
        if self.overlay.on_window_event(&self.ctx.window, event) {
            return;
        }
        self.scene.handle_window_event(event);
    }
}

impl FrameSink for AppState {
    fn set_elapsed(&mut self, elapsed: f32) {
        self.scene.set_elapsed(elapsed);
    }

    fn update_controls(&mut self) {
        self.scene.update_controls();
    }

    fn render(&mut self) -> anyhow::Result<()> {
        #[cfg(feature = "debug-ui")]
        for change in self.overlay.run(&self.ctx.window, &self.scene.debug) {
            self.scene.apply_debug(change);
        }

        self.gpu.upload(&self.ctx.queue, &self.scene);

        #[cfg(feature = "debug-ui")]
        let overlay: Option<&mut dyn crate::render::Overlay> = Some(&mut self.overlay);
        #[cfg(not(feature = "debug-ui"))]
        let overlay: Option<&mut dyn crate::render::Overlay> = None;

        match self.gpu.render(&self.ctx, &self.scene, overlay) {
            Ok(()) => (),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window.inner_size();
                let scale_factor = self.ctx.window.scale_factor();
                self.resize(size, scale_factor);
            }
            Err(e) => log::error!("Unable to render {}", e),
        }
        Ok(())
    }
}

/// The swapchain has to match the window on native; the web canvas takes the clamped backing store.
fn surface_size(physical: PhysicalSize<u32>, viewport: &Viewport) -> (u32, u32) {
    if cfg!(target_arch = "wasm32") {
        viewport.backing_size()
    } else {
        (physical.width.max(1), physical.height.max(1))
    }
}

pub enum AppEvent {
    Initialized(anyhow::Result<AppState>),
}

impl Debug for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(Ok(_)) => f.write_str("Initialized(Ok)"),
            Self::Initialized(Err(e)) => write!(f, "Initialized(Err({e}))"),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: EventLoopProxy<AppEvent>,
    config: SceneConfig,
    state: Option<AppState>,
    frame_loop: Option<FrameLoop<SystemClock>>,
    stop: StopSignal,
    starting: bool,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            config,
            state: None,
            frame_loop: None,
            stop: StopSignal::new(),
            starting: false,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.stop.stop();
        self.error = Some(error);
        event_loop.exit();
    }

    fn initialized(&mut self, event_loop: &ActiveEventLoop, state: anyhow::Result<AppState>) {
        self.starting = false;
        match state {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                let scale_factor = state.ctx.window.scale_factor();
                state.resize(size, scale_factor);
                state.ctx.window.request_redraw();
                self.frame_loop = Some(FrameLoop::new(SystemClock::new(), self.stop.clone()));
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Arc<Window>> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let selector = &self.config.canvas_selector;
            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.query_selector(selector).ok().flatten())
                .ok_or_else(|| anyhow::anyhow!("no element matches {selector}"))?;
            let html_canvas_element = canvas
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .map_err(|_| anyhow::anyhow!("{selector} is not a canvas"))?;
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        Ok(Arc::new(event_loop.create_window(window_attributes)?))
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.starting || self.error.is_some() {
            return;
        }
        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };
        self.starting = true;

        let init_future = AppState::new(window, self.config.clone());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self.async_runtime.block_on(init_future);
            self.user_event(event_loop, AppEvent::Initialized(state));
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let state = init_future.await;
                if proxy.send_event(AppEvent::Initialized(state)).is_err() {
                    log::error!("Event loop closed before the scene finished loading");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            // Sent by `spawn_local` on the web, directly after `block_on` on native
            AppEvent::Initialized(state) => self.initialized(event_loop, state),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => {
                if let WindowEvent::CloseRequested = event {
                    event_loop.exit();
                }
                return;
            }
        };

        state.window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.stop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let scale_factor = state.ctx.window.scale_factor();
                state.resize(size, scale_factor);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = state.ctx.window.inner_size();
                state.resize(size, scale_factor);
            }
            WindowEvent::RedrawRequested => {
                let Some(frame_loop) = self.frame_loop.as_mut() else {
                    return;
                };
                match frame_loop.tick(state) {
                    Ok(Tick::Continue) => state.ctx.window.request_redraw(),
                    Ok(Tick::Stopped) => event_loop.exit(),
                    Err(e) => self.fail(event_loop, e),
                }
            }
            _ => {}
        }
    }
}

/// Opens the window and runs the scene until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {e}").into());
        }
    }

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
