#![allow(dead_code)]

//! dialtone-rs - Telephone Keypad Tone Generator
//!
//! Emulates a telephone keypad's audio signaling: DTMF digit tones plus the
//! dial, ring and busy signals, rendered as a continuous 16-bit stream that
//! follows the buttons in real time.
//!
//! The UI thread mutates the shared signal state; the cpal callback reads it
//! once per block and synthesizes samples against an unbroken sample clock.

use eframe::egui;

mod audio;
mod keymap;
mod render;
mod settings;

use audio::{
    AudioOutput, MonitorBuffer, MonitorConsumer, PhoneMode, SignalState, Symbol, ToneKind,
    AMPLITUDE_MAX,
};
use keymap::KeyMap;
use render::WaveformStrip;
use settings::AppSettings;

/// Samples shown in the waveform strip (~43 ms at 48 kHz).
const MONITOR_SIZE: usize = 2048;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting dialtone-rs");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([320.0, 420.0])
            .with_title("dialtone-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "dialtone-rs",
        options,
        Box::new(|cc| Ok(Box::new(DialtoneApp::new(cc)))),
    )
}

pub struct DialtoneApp {
    state: SignalState,
    audio: AudioOutput,
    monitor: Option<MonitorConsumer>,
    keymap: KeyMap,
    waveform: WaveformStrip,

    /// Amplitude value for UI binding, synced to the state on change
    amplitude: u32,
    show_waveform: bool,

    /// Digit button currently held with the pointer
    held_digit: Option<Symbol>,
    /// Dial/Ring/Busy button currently held with the pointer
    held_tone: Option<ToneKind>,
    /// Digit awaiting a key in the bind-capture overlay
    binding_target: Option<Symbol>,
}

impl DialtoneApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let state = SignalState::new();
        let buffer = MonitorBuffer::new(MONITOR_SIZE);
        let producer = buffer.take_producer().expect("fresh buffer has a producer");
        let monitor = buffer.take_consumer();

        let audio = AudioOutput::start(state.clone(), producer);

        let mut app = Self {
            state,
            audio,
            monitor,
            keymap: KeyMap::new(),
            waveform: WaveformStrip::new(),
            amplitude: 0,
            show_waveform: true,
            held_digit: None,
            held_tone: None,
            binding_target: None,
        };

        AppSettings::load().apply(&mut app);
        app
    }

    /// Feed keyboard events to the bind overlay or the key map.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());

        for event in events {
            let egui::Event::Key {
                key,
                pressed,
                repeat,
                ..
            } = event
            else {
                continue;
            };

            if repeat {
                continue;
            }

            if let Some(symbol) = self.binding_target {
                if pressed {
                    if key == egui::Key::Escape {
                        self.binding_target = None;
                    } else {
                        self.keymap.bind(key, symbol);
                        self.binding_target = None;
                    }
                }
                continue;
            }

            if pressed {
                self.keymap.key_pressed(key, &self.state);
            } else {
                self.keymap.key_released(key, &self.state);
            }
        }
    }

    /// The 4x4 digit grid. Returns the digit currently held, if any.
    fn show_keypad(&mut self, ui: &mut egui::Ui) -> Option<Symbol> {
        let mut held = None;

        egui::Grid::new("keypad").spacing([4.0, 4.0]).show(ui, |ui| {
            for (i, symbol) in Symbol::ALL.into_iter().enumerate() {
                let response =
                    ui.add_sized([48.0, 40.0], egui::Button::new(symbol.label()));

                if response.is_pointer_button_down_on() {
                    held = Some(symbol);
                }
                if response.secondary_clicked() {
                    self.binding_target = Some(symbol);
                }

                let bound = self.keymap.keys_for(symbol);
                if !bound.is_empty() {
                    response.on_hover_text(format!(
                        "Bound: {}",
                        bound
                            .iter()
                            .map(|k| k.name())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ));
                }

                if i % 4 == 3 {
                    ui.end_row();
                }
            }
        });

        held
    }

    /// The Dial/Ring/Busy column. Returns the tone currently held, if any.
    fn show_tone_buttons(&mut self, ui: &mut egui::Ui) -> Option<ToneKind> {
        let mut held = None;

        for kind in ToneKind::ALL {
            let response = ui.add_sized([64.0, 40.0], egui::Button::new(kind.name()));
            if response.is_pointer_button_down_on() {
                held = Some(kind);
            }
        }

        held
    }

    /// Apply pointer press/release edges against last frame's held buttons.
    ///
    /// On-screen release always silences, whichever button went down; the
    /// stricter matching-release rule applies only to bound keys (keymap.rs).
    fn apply_held(&mut self, digit: Option<Symbol>, tone: Option<ToneKind>) {
        match (self.held_digit, digit) {
            (old, Some(new)) if old != Some(new) => self.state.press_digit(new),
            (Some(old), None) => self.state.release_digit(old),
            _ => {}
        }
        self.held_digit = digit;

        match (self.held_tone, tone) {
            (old, Some(new)) if old != Some(new) => self.state.press_mode(new),
            (Some(old), None) => self.state.release_mode(old),
            _ => {}
        }
        self.held_tone = tone;
    }

    fn show_bind_overlay(&mut self, ctx: &egui::Context) {
        let Some(symbol) = self.binding_target else {
            return;
        };

        egui::Window::new("Bind key")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Press a key to bind to '{}'...", symbol.to_char()));
                ui.small("Esc cancels");
            });
    }
}

impl eframe::App for DialtoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("dialtone-rs");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_waveform, "〜 Monitor");
                });
            });
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.audio.status);
                ui.separator();
                let mode = match self.state.mode() {
                    PhoneMode::Idle => "Idle".to_string(),
                    PhoneMode::DigitActive => match self.state.active_symbol() {
                        Some(s) => format!("Digit '{}'", s.to_char()),
                        None => "Digit".to_string(),
                    },
                    PhoneMode::DialTone => "Dial tone".to_string(),
                    PhoneMode::RingTone => "Ring tone".to_string(),
                    PhoneMode::BusyTone => "Busy tone".to_string(),
                };
                ui.small(mode);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (digit, tone) = ui
                .horizontal(|ui| {
                    let digit = self.show_keypad(ui);
                    ui.separator();
                    let tone = ui.vertical(|ui| self.show_tone_buttons(ui)).inner;
                    (digit, tone)
                })
                .inner;

            self.apply_held(digit, tone);

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Volume:");
                if ui
                    .add(egui::Slider::new(&mut self.amplitude, 0..=AMPLITUDE_MAX))
                    .changed()
                {
                    self.state.set_amplitude(self.amplitude);
                }
            });

            if self.show_waveform {
                ui.add_space(8.0);
                if let Some(monitor) = &mut self.monitor {
                    monitor.update();
                    self.waveform.show(ui, &monitor.samples(), None);
                }
            }
        });

        self.show_bind_overlay(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        AppSettings::from_app(self).save();
        log::info!("Shutting down");
    }
}
