pub mod debug;

use egui_wgpu::ScreenDescriptor;

/// egui context plus its wgpu renderer. Input is never forwarded; the
/// overlay is display-only.
pub struct UiState {
    pub ctx: egui::Context,
    pub renderer: egui_wgpu::Renderer,
}

/// Tessellated output of one overlay frame, ready for upload.
pub struct UiFrame {
    pub screen: ScreenDescriptor,
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
}

impl UiState {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, dpi_scale: f32) -> Self {
        let ctx = egui::Context::default();
        ctx.set_pixels_per_point(dpi_scale);

        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self { ctx, renderer }
    }

    /// Run `build` over a screen of `width`x`height` physical pixels.
    pub fn run(&self, width: u32, height: u32, build: impl FnMut(&egui::Context)) -> UiFrame {
        let screen = ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: self.ctx.pixels_per_point(),
        };
        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(
                    width as f32 / screen.pixels_per_point,
                    height as f32 / screen.pixels_per_point,
                ),
            )),
            ..Default::default()
        };

        let output = self.ctx.run(raw_input, build);
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        UiFrame {
            screen,
            primitives,
            textures_delta: output.textures_delta,
        }
    }
}
