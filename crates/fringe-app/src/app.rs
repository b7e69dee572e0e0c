use std::sync::Arc;
use std::time::Instant;

use fringe_core::camera::{view_proj, Camera, Projection};
use fringe_core::presets::Intensity;
use fringe_gpu::aberration::AberrationPass;
use fringe_gpu::scene::ScenePass;
use winit::window::Window;

use crate::input::{step_displacement, InputAction, InputState, Key, DISPLACEMENT_STEP};

// ---------------------------------------------------------------------------
// Simple FPS counter — logs to console once per second
// ---------------------------------------------------------------------------

struct FpsCounter {
    frames: u32,
    last_report: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            last_report: Instant::now(),
        }
    }

    /// Increment the frame count.  Returns the FPS value if a full second has
    /// elapsed since the last report (so the caller can log it).
    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.last_report = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,

    // Render passes (size-dependent resources rebuilt on resize)
    scene: ScenePass,
    aberration: AberrationPass,

    // Fixed viewpoint; only the aspect ratio tracks resizes
    camera: Camera,
    projection: Projection,

    /// When set, the scene draws straight to the surface and the effect
    /// is skipped entirely.
    bypass: bool,

    input: InputState,

    // Frame timing
    last_frame: Instant,
    fps: FpsCounter,
}

impl App {
    /// Initialise wgpu for a given window.  The window is wrapped in `Arc` so
    /// that the surface can safely hold a `'static` reference to it.
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // ---- Instance -------------------------------------------------------
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // ---- Surface --------------------------------------------------------
        let surface = instance
            .create_surface(Arc::clone(&window))
            .expect("failed to create wgpu surface");

        // ---- Adapter --------------------------------------------------------
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("no suitable GPU adapter found");

        log::info!("GPU adapter: {}", adapter.get_info().name);

        // ---- Device & Queue -------------------------------------------------
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("fringe-app device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("failed to create GPU device");

        // ---- Surface configuration ------------------------------------------
        let surface_caps = surface.get_capabilities(&adapter);

        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}×{} {:?} Fifo",
            surface_config.width,
            surface_config.height,
            format
        );

        // ---- Render passes --------------------------------------------------
        let scene = ScenePass::new(&device, &surface_config);
        let aberration =
            AberrationPass::new(&device, &surface_config, Intensity::Classic.displacement());

        // ---- Camera ---------------------------------------------------------
        let camera = Camera::new(
            (0.0, 6.0, 14.0),
            -90f32.to_radians(),
            -20f32.to_radians(),
        );
        let projection = Projection::new(width, height, 45f32.to_radians(), 0.1, 100.0);

        Self {
            surface,
            device,
            queue,
            surface_config,
            scene,
            aberration,
            camera,
            projection,
            bypass: false,
            input: InputState::new(),
            last_frame: Instant::now(),
            fps: FpsCounter::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Reconfigure the surface and rebuild size-dependent GPU resources.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.surface.configure(&self.device, &self.surface_config);

        self.projection.resize(new_width, new_height);

        // Depth buffer and effect source texture are tied to the resolution.
        self.scene.resize(&self.device, &self.surface_config);
        self.aberration.resize(&self.device, &self.surface_config);

        log::debug!("Surface resized to {}×{}", new_width, new_height);
    }

    // -------------------------------------------------------------------------
    // Input — called by main.rs window_event handler
    // -------------------------------------------------------------------------

    /// Translate a key press and return the resulting action, if any.
    pub fn on_key_pressed(&self, key: Key) -> Option<InputAction> {
        self.input.on_key(key)
    }

    /// Apply an action to the app state.
    ///
    /// Returns `true` if the app should exit (i.e. action was `Quit`).
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::LoadIntensity(intensity) => {
                log::info!(
                    "Intensity preset: {} (displacement {:.3})",
                    intensity.name(),
                    intensity.displacement()
                );
                self.aberration
                    .set_displacement(&self.device, intensity.displacement());
            }

            InputAction::DisplacementUp => {
                let d = step_displacement(self.aberration.displacement(), DISPLACEMENT_STEP);
                self.aberration.set_displacement(&self.device, d);
            }

            InputAction::DisplacementDown => {
                let d = step_displacement(self.aberration.displacement(), -DISPLACEMENT_STEP);
                self.aberration.set_displacement(&self.device, d);
            }

            InputAction::ToggleBypass => {
                self.bypass = !self.bypass;
                log::info!("Effect bypass: {}", self.bypass);
            }

            InputAction::Reset => {
                log::info!("Reset to defaults");
                self.bypass = false;
                self.aberration
                    .set_displacement(&self.device, Intensity::Classic.displacement());
            }

            InputAction::Quit => return true,
        }
        false
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Run one full frame: advance the scene, draw it offscreen, resample
    /// it through the effect onto the surface.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // --- Timing ----------------------------------------------------------
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.scene.update(&self.queue, dt);
        self.scene
            .set_camera(&self.queue, view_proj(&self.camera, &self.projection));

        if let Some(fps) = self.fps.tick() {
            log::debug!(
                "FPS: {:.1}  displacement: {:.3}  bypass: {}",
                fps,
                self.aberration.displacement(),
                self.bypass,
            );
        }

        // --- Acquire surface texture -----------------------------------------
        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        if self.bypass {
            self.scene.render(&mut encoder, &surface_view);
        } else {
            // 1. Scene into the effect's source texture.
            self.scene.render(&mut encoder, self.aberration.scene_view());
            // 2. Displaced resample onto the surface.
            self.aberration.render(&mut encoder, &surface_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
