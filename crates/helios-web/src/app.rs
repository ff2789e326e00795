use crate::camera::Camera;
use crate::fullscreen::BrowserFullscreen;
use crate::gpu::GpuContext;
use crate::ui::debug::DebugPanel;
use crate::ui::UiState;
use helios_core::clock::SunClock;
use helios_core::config::HeliosConfig;
use helios_core::error::HeliosError;
use helios_core::events::subscribe;
use helios_core::fullscreen::{bind_key, BindKeyOptions, FullscreenBinding, FullscreenControl};
use helios_core::keyboard::{KeyCombo, KeyboardState, KeyboardTracker};
use helios_core::resize::{apply_resize, ResizeSync};
use helios_core::{EventKind, ListenerGuard, SharedSurface};
use helios_render::{SkyFrameUniforms, SkyRenderer, SkyRig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Gaps longer than this (a backgrounded tab) skip the frame instead of jumping the sun.
const MAX_FRAME_GAP_MS: f64 = 100.0;
/// Radians of sun angle per second while scrubbing.
const SCRUB_RATE: f64 = std::f64::consts::PI;
/// Radians of camera rotation per second.
const LOOK_RATE: f32 = 1.2;

/// Per-frame intent derived from the held keys.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub toggle_pause: bool,
    /// Sun angle offset to apply on top of the clock, in radians.
    pub scrub: f64,
    pub d_yaw: f32,
    pub d_pitch: f32,
}

/// Key bindings polled each frame.
pub struct Controls {
    pause: KeyCombo,
    rewind: KeyCombo,
    forward: KeyCombo,
    look_left: KeyCombo,
    look_right: KeyCombo,
    tilt_up: KeyCombo,
    tilt_down: KeyCombo,
    pause_was_down: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self {
            pause: KeyCombo::from("space"),
            rewind: KeyCombo::from("left"),
            forward: KeyCombo::from("right"),
            look_left: KeyCombo::from("a"),
            look_right: KeyCombo::from("d"),
            tilt_up: KeyCombo::from("up"),
            tilt_down: KeyCombo::from("down"),
            pause_was_down: false,
        }
    }

    /// Pause toggles once per press, not once per frame held.
    pub fn sample(&mut self, keys: &KeyboardState, dt_secs: f64) -> FrameInput {
        let axis = |negative: &KeyCombo, positive: &KeyCombo| {
            let mut value = 0.0;
            if keys.combo_pressed(negative) {
                value -= 1.0;
            }
            if keys.combo_pressed(positive) {
                value += 1.0;
            }
            value
        };

        let pause_down = keys.combo_pressed(&self.pause);
        let toggle_pause = pause_down && !self.pause_was_down;
        self.pause_was_down = pause_down;

        let look_step = LOOK_RATE * dt_secs as f32;
        FrameInput {
            toggle_pause,
            scrub: axis(&self.rewind, &self.forward) * SCRUB_RATE * dt_secs,
            d_yaw: axis(&self.look_right, &self.look_left) as f32 * look_step,
            d_pitch: axis(&self.tilt_down, &self.tilt_up) as f32 * look_step,
        }
    }
}

/// Main application struct. Owns all subsystems.
pub struct Application {
    gpu: Rc<RefCell<GpuContext>>,
    camera: Rc<RefCell<Camera>>,
    ui_state: UiState,
    debug_panel: DebugPanel,
    sky_renderer: SkyRenderer,
    rig: SkyRig,
    clock: SunClock,
    keyboard: KeyboardTracker,
    controls: Controls,
    last_frame_time: f64,
    _resize: ResizeSync,
    _fullscreen: FullscreenBinding,
    _blur: ListenerGuard,
}

impl Application {
    pub fn new(
        mut gpu: GpuContext,
        dpi_scale: f32,
        (css_width, css_height): (u32, u32),
        config: &HeliosConfig,
        surface: &SharedSurface,
        fullscreen_host: BrowserFullscreen,
    ) -> Result<Self, HeliosError> {
        let ui_state = UiState::new(&gpu.device, gpu.surface_format, dpi_scale);
        let sky_renderer = SkyRenderer::new(&gpu.device, gpu.surface_format);
        let mut debug_panel = DebugPanel::new(
            gpu.adapter_name.clone(),
            gpu.backend.clone(),
            config.fullscreen.key,
        );

        let mut camera = Camera::new(1.0);
        apply_resize(&mut gpu, &mut camera, css_width, css_height);
        let gpu = Rc::new(RefCell::new(gpu));
        let camera = Rc::new(RefCell::new(camera));
        let resize = ResizeSync::start(surface, gpu.clone(), camera.clone())?;

        let keyboard = KeyboardTracker::attach(surface)?;
        // Keys released while the window is unfocused never report key-up.
        let keys = keyboard.state();
        let blur = subscribe(surface, EventKind::Blur, move |_| keys.borrow_mut().reset())?;

        let api = fullscreen_host.probe();
        let fullscreen = Rc::new(FullscreenControl::new(fullscreen_host, api));
        let binding = bind_key(&fullscreen, surface, BindKeyOptions::from(&config.fullscreen))?;
        debug_panel.set_fullscreen_available(fullscreen.available());

        let clock = SunClock::new(&config.clock);
        let mut rig = SkyRig::new(config);
        rig.update(clock.angle());

        Ok(Self {
            gpu,
            camera,
            ui_state,
            debug_panel,
            sky_renderer,
            rig,
            clock,
            keyboard,
            controls: Controls::new(),
            last_frame_time: 0.0,
            _resize: resize,
            _fullscreen: binding,
            _blur: blur,
        })
    }

    /// Start the requestAnimationFrame loop. The closure is created once and
    /// re-registered every frame.
    pub fn start_loop(app: Rc<RefCell<Self>>) {
        let closure: RafClosure = Rc::new(RefCell::new(None));
        let closure_clone = closure.clone();

        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            {
                let mut app_ref = app.borrow_mut();
                let delta = timestamp - app_ref.last_frame_time;
                let backgrounded = app_ref.last_frame_time > 0.0 && delta > MAX_FRAME_GAP_MS;
                let first = app_ref.last_frame_time == 0.0;
                app_ref.last_frame_time = timestamp;

                if !backgrounded && !first {
                    app_ref.debug_panel.update(delta);
                    app_ref.step(delta / 1000.0);
                    app_ref.render_frame();
                }
            }
            schedule(&closure_clone);
        }) as Box<dyn FnMut(f64)>));

        schedule(&closure);
    }

    /// Advance the sun and camera by `dt_secs` from the current key state.
    fn step(&mut self, dt_secs: f64) {
        let input = self
            .controls
            .sample(&self.keyboard.state().borrow(), dt_secs);

        if input.toggle_pause {
            let paused = !self.clock.is_paused();
            self.clock.set_paused(paused);
            log::info!("Sun clock {}", if paused { "paused" } else { "resumed" });
        }
        if input.scrub != 0.0 {
            self.clock.set_angle(self.clock.angle() + input.scrub);
        }
        let angle = self.clock.advance(dt_secs);
        self.rig.update(angle);

        self.camera.borrow_mut().look(input.d_yaw, input.d_pitch);
        self.debug_panel
            .set_sun_info(angle, self.rig.phase(), self.clock.is_paused());
    }

    /// Render a single frame: sky pass, then the egui overlay.
    fn render_frame(&mut self) {
        let Application {
            gpu,
            camera,
            ui_state,
            debug_panel,
            sky_renderer,
            rig,
            ..
        } = self;
        let gpu = gpu.borrow();

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => {
                gpu.surface.configure(&gpu.device, &gpu.surface_config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                return;
            }
            Err(e) => {
                log::error!("Surface error: {e:?}");
                return;
            }
        };
        let view = output.texture.create_view(&Default::default());

        {
            let camera = camera.borrow();
            let frame =
                SkyFrameUniforms::from_rig(rig, camera.inverse_view_proj(), camera.position);
            sky_renderer.upload(&gpu.queue, &frame);
        }

        let ui = ui_state.run(
            gpu.surface_config.width,
            gpu.surface_config.height,
            |ctx| debug_panel.show(ctx),
        );

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sky-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            sky_renderer.render(&mut pass);
        }

        for (id, delta) in &ui.textures_delta.set {
            ui_state
                .renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        ui_state.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &ui.primitives,
            &ui.screen,
        );

        // forget_lifetime() lets the egui renderer borrow the pass past the encoder guard.
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            ui_state
                .renderer
                .render(&mut pass, &ui.primitives, &ui.screen);
        }

        for id in &ui.textures_delta.free {
            ui_state.renderer.free_texture(id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

fn schedule(closure: &RafClosure) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; animation loop stopped");
        return;
    };
    let registered = closure
        .borrow()
        .as_ref()
        .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()));
    match registered {
        Some(Ok(_)) => {}
        Some(Err(e)) => log::error!("rAF registration failed: {e:?}"),
        None => log::error!("rAF closure missing"),
    }
}
