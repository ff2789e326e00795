mod app;
mod camera;
mod dom;
mod fullscreen;
mod gpu;
pub mod ui;

use helios_core::config::HeliosConfig;
use helios_core::error::HeliosError;
use helios_core::SharedSurface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

const CANVAS_ID: &str = "helios-canvas";

/// WASM entry point. Sets the panic hook and initializes logging.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("logger init failed");
    log::info!("Helios starting...");

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run().await {
            show_error_to_user(&format!("{e}"));
        }
    });
}

/// Async initialization: loads config, sizes the canvas to the window, creates Application.
async fn run() -> Result<(), HeliosError> {
    let config = HeliosConfig::from_ron(include_str!("../../../config/helios.ron"))?;

    let window = web_sys::window().ok_or(HeliosError::MissingDom("window"))?;
    let document = window.document().ok_or(HeliosError::MissingDom("document"))?;

    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or(HeliosError::MissingDom("canvas element"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| HeliosError::MissingDom("canvas element"))?;

    // The sky fills the window, so size from the window rather than the element.
    let dpi_scale = window.device_pixel_ratio() as f32;
    let (css_width, css_height) = dom::window_size(&window);
    let physical_width = ((css_width as f32 * dpi_scale) as u32).max(1);
    let physical_height = ((css_height as f32 * dpi_scale) as u32).max(1);

    canvas.set_width(physical_width);
    canvas.set_height(physical_height);

    log::info!(
        "Canvas: {}x{} CSS, {}x{} physical (DPI: {:.2})",
        css_width,
        css_height,
        physical_width,
        physical_height,
        dpi_scale
    );

    let surface: SharedSurface = Rc::new(dom::DomEventSurface::new(window, document.clone()));
    let fullscreen_host = fullscreen::BrowserFullscreen::new(document);

    let gpu_ctx = gpu::init_gpu(canvas, physical_width, physical_height, dpi_scale).await?;
    let application = app::Application::new(
        gpu_ctx,
        dpi_scale,
        (css_width, css_height),
        &config,
        &surface,
        fullscreen_host,
    )?;
    let app_rc = Rc::new(RefCell::new(application));

    app::Application::start_loop(app_rc);

    Ok(())
}

/// Show a user-visible error, not just a console line.
fn show_error_to_user(msg: &str) {
    log::error!("{msg}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("Helios Error: {msg}"));
    }
}
