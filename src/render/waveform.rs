//! Waveform strip widget
//!
//! Draws the most recently rendered output samples as a scrolling mono
//! waveform so the active tone (and its ring/busy cadence) is visible.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke, Vec2};

/// Display settings for the waveform strip
#[derive(Clone)]
pub struct WaveformSettings {
    pub color: Color32,
    pub background: Color32,
    pub line_width: f32,
    pub show_midline: bool,
    /// Vertical scale: sample value that maps to the strip edge.
    pub full_scale: f32,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(100, 255, 100),
            background: Color32::from_rgb(10, 20, 10),
            line_width: 1.0,
            show_midline: true,
            full_scale: 20_000.0,
        }
    }
}

/// Scrolling waveform widget
#[derive(Default)]
pub struct WaveformStrip {
    pub settings: WaveformSettings,
}

impl WaveformStrip {
    pub fn new() -> Self {
        Self::default()
    }

    fn sample_to_screen(&self, index: usize, count: usize, value: i16, rect: Rect) -> Pos2 {
        let t = index as f32 / count.max(1) as f32;
        let norm = (value as f32 / self.settings.full_scale).clamp(-1.0, 1.0);

        Pos2::new(
            rect.left() + t * rect.width(),
            rect.center().y - norm * rect.height() * 0.5,
        )
    }

    pub fn show(&self, ui: &mut egui::Ui, samples: &[i16], size: Option<Vec2>) -> egui::Response {
        let size = size.unwrap_or_else(|| Vec2::new(ui.available_width(), 80.0));

        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 4.0, self.settings.background);

        if self.settings.show_midline {
            let midline = Stroke::new(0.5, Color32::from_rgba_unmultiplied(80, 100, 80, 150));
            painter.line_segment(
                [
                    Pos2::new(rect.left(), rect.center().y),
                    Pos2::new(rect.right(), rect.center().y),
                ],
                midline,
            );
        }

        if samples.len() >= 2 {
            let stroke = Stroke::new(self.settings.line_width, self.settings.color);
            let points: Vec<Pos2> = samples
                .iter()
                .enumerate()
                .map(|(i, &s)| self.sample_to_screen(i, samples.len(), s, rect))
                .collect();

            for window in points.windows(2) {
                painter.line_segment([window[0], window[1]], stroke);
            }
        }

        response
    }
}
