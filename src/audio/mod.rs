//! Audio module - tone synthesis and real-time output
//!
//! This module provides:
//! - The DTMF frequency table
//! - The shared signal state and its control interface
//! - Per-sample tone synthesis
//! - The cpal output stream driving the render callback
//! - A lock-free monitor tap for the waveform display

mod dtmf;
mod monitor;
mod output;
mod state;
mod synth;

pub use dtmf::{FrequencyPair, Symbol, UnknownSymbolError};
pub use monitor::{MonitorBuffer, MonitorConsumer, MonitorProducer};
pub use output::AudioOutput;
pub use state::{PhoneMode, SignalState, ToneKind, AMPLITUDE_DEFAULT, AMPLITUDE_MAX};
pub use synth::SAMPLE_RATE;
