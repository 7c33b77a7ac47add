//! Audio output
//!
//! Owns the cpal output stream. The callback takes one snapshot of the
//! shared signal state per block, renders every frame against the monotonic
//! sample clock, and advances the clock as it goes. The clock is owned by
//! the callback and is never reset while the stream lives, which keeps the
//! waveform phase-continuous across mode and key changes.
//!
//! The stream is opened once at startup, like the rest of the app it lives
//! until process exit. If no output device can be opened the app keeps
//! running muted; failures are surfaced through the status string and the
//! log, never a panic.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::monitor::MonitorProducer;
use super::state::SignalState;
use super::synth::{render_sample, SAMPLE_RATE};

/// Requested frames per render block (the device may grant another size).
pub const BLOCK_SIZE: u32 = 2048;

/// Ask for the preferred block size only when the device supports it;
/// otherwise let the device pick. Rendering snapshots state once per block
/// whatever size is granted, so nothing downstream depends on the choice.
fn choose_buffer_size(supported: &cpal::SupportedBufferSize) -> cpal::BufferSize {
    match supported {
        cpal::SupportedBufferSize::Range { min, max }
            if (*min..=*max).contains(&BLOCK_SIZE) =>
        {
            cpal::BufferSize::Fixed(BLOCK_SIZE)
        }
        _ => cpal::BufferSize::Default,
    }
}

/// Audio output engine driving the platform's render callback.
pub struct AudioOutput {
    /// The cpal output stream; None when running muted
    stream: Option<cpal::Stream>,

    /// Status message
    pub status: String,
}

impl AudioOutput {
    /// Open the default output device and start rendering.
    ///
    /// `monitor` is moved into the callback; every rendered sample is
    /// mirrored into it for the waveform strip.
    pub fn start(state: SignalState, monitor: MonitorProducer) -> Self {
        log::info!("Starting audio output...");

        let host = cpal::default_host();
        let device = match host.default_output_device() {
            Some(d) => d,
            None => {
                log::warn!("No output device found");
                return Self {
                    stream: None,
                    status: "No output device (running muted)".to_string(),
                };
            }
        };

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", device_name);

        let default_config = match device.default_output_config() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to get output config: {}", e);
                return Self {
                    stream: None,
                    status: format!("Error: {} (running muted)", e),
                };
            }
        };

        let channels = default_config.channels() as usize;
        let config = cpal::StreamConfig {
            channels: default_config.channels(),
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: choose_buffer_size(default_config.buffer_size()),
        };

        let stream_result = match default_config.sample_format() {
            cpal::SampleFormat::I16 => {
                let mut monitor = monitor;
                let mut clock: u64 = 0;
                device.build_output_stream(
                    &config,
                    move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        // One snapshot per block; mid-block transitions land
                        // at the start of the next block.
                        let snap = state.snapshot();
                        for frame in data.chunks_mut(channels) {
                            let sample = render_sample(&snap, clock, SAMPLE_RATE);
                            clock += 1;
                            for ch in frame.iter_mut() {
                                *ch = sample;
                            }
                            monitor.push(sample);
                        }
                    },
                    |err| log::error!("Audio output error: {}", err),
                    None,
                )
            }
            cpal::SampleFormat::F32 => {
                let mut monitor = monitor;
                let mut clock: u64 = 0;
                device.build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let snap = state.snapshot();
                        for frame in data.chunks_mut(channels) {
                            let sample = render_sample(&snap, clock, SAMPLE_RATE);
                            clock += 1;
                            let value = sample as f32 / 32768.0;
                            for ch in frame.iter_mut() {
                                *ch = value;
                            }
                            monitor.push(sample);
                        }
                    },
                    |err| log::error!("Audio output error: {}", err),
                    None,
                )
            }
            format => {
                log::warn!("Unsupported output sample format: {:?}", format);
                return Self {
                    stream: None,
                    status: format!("Unsupported format: {:?} (running muted)", format),
                };
            }
        };

        match stream_result {
            Ok(s) => {
                if let Err(e) = s.play() {
                    log::warn!("Failed to start output stream: {}", e);
                    return Self {
                        stream: None,
                        status: format!("Error: {} (running muted)", e),
                    };
                }

                log::info!("Audio output started");
                Self {
                    stream: Some(s),
                    status: format!("Playing: {} @ {} Hz", device_name, SAMPLE_RATE),
                }
            }
            Err(e) => {
                log::warn!("Failed to build output stream: {}", e);
                Self {
                    stream: None,
                    status: format!("Error: {} (running muted)", e),
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }
}
