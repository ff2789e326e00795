use helios_core::Phase;

const FRAME_WINDOW: usize = 60;

/// Overlay with adapter info, frame timing, sun state and key hints.
pub struct DebugPanel {
    adapter_name: String,
    backend: String,
    frame_times: [f64; FRAME_WINDOW],
    frame_index: usize,
    avg_frame_time_ms: f64,
    sun_angle: f64,
    phase: Option<Phase>,
    paused: bool,
    fullscreen_available: bool,
    fullscreen_key: char,
}

impl DebugPanel {
    pub fn new(adapter_name: String, backend: String, fullscreen_key: char) -> Self {
        Self {
            adapter_name,
            backend,
            frame_times: [0.0; FRAME_WINDOW],
            frame_index: 0,
            avg_frame_time_ms: 0.0,
            sun_angle: 0.0,
            phase: None,
            paused: false,
            fullscreen_available: false,
            fullscreen_key,
        }
    }

    /// Record a frame's delta time and update the rolling average.
    pub fn update(&mut self, delta_ms: f64) {
        self.frame_times[self.frame_index] = delta_ms;
        self.frame_index = (self.frame_index + 1) % FRAME_WINDOW;
        let sum: f64 = self.frame_times.iter().sum();
        self.avg_frame_time_ms = sum / FRAME_WINDOW as f64;
    }

    pub fn fps(&self) -> f64 {
        if self.avg_frame_time_ms > 0.0 {
            1000.0 / self.avg_frame_time_ms
        } else {
            0.0
        }
    }

    pub fn set_sun_info(&mut self, angle: f64, phase: Option<Phase>, paused: bool) {
        self.sun_angle = angle;
        self.phase = phase;
        self.paused = paused;
    }

    pub fn set_fullscreen_available(&mut self, available: bool) {
        self.fullscreen_available = available;
    }

    /// Sun angle folded into [0, 360) degrees.
    pub fn sun_degrees(&self) -> f64 {
        self.sun_angle.to_degrees().rem_euclid(360.0)
    }

    pub fn show(&self, ctx: &egui::Context) {
        egui::Window::new("Sky")
            .default_open(true)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(&self.adapter_name);
                ui.label(&self.backend);
                ui.separator();
                ui.label(format!("{:.2} ms", self.avg_frame_time_ms));
                ui.label(format!("{:.0} FPS", self.fps()));
                ui.separator();
                let phase = self.phase.map_or("-", Phase::name);
                let state = if self.paused { "PAUSED" } else { "RUNNING" };
                ui.label(format!("Sun: {:.1}° | {} | {}", self.sun_degrees(), phase, state));
                ui.separator();
                ui.label("Space: pause  Left/Right: scrub time");
                ui.label("A/D: look around  Up/Down: tilt");
                if self.fullscreen_available {
                    ui.label(format!("{}: fullscreen", self.fullscreen_key.to_ascii_uppercase()));
                } else {
                    ui.label("Fullscreen unavailable");
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_rolling_average() {
        let mut panel = DebugPanel::new("gpu".into(), "WebGpu".into(), 'f');
        assert_eq!(panel.fps(), 0.0);
        for _ in 0..FRAME_WINDOW {
            panel.update(20.0);
        }
        assert!((panel.fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_sun_degrees_wrap() {
        let mut panel = DebugPanel::new(String::new(), String::new(), 'f');
        panel.set_sun_info(-std::f64::consts::FRAC_PI_2, Some(Phase::Night), false);
        assert!((panel.sun_degrees() - 270.0).abs() < 1e-9);
        panel.set_sun_info(std::f64::consts::TAU + 0.5_f64.to_radians(), Some(Phase::Day), true);
        assert!((panel.sun_degrees() - 0.5).abs() < 1e-9);
    }
}
