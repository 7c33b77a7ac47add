//! Shared signal state
//!
//! The single piece of state shared between the UI thread and the real-time
//! audio callback: which tone is active, which DTMF pair it uses, and how
//! loud it is.
//!
//! The audio callback must never block, so there is no mutex here. Each
//! field lives in its own atomic, written by the UI thread and read by the
//! audio thread with relaxed ordering. The frequency pair packs both Hz
//! values into one `AtomicU64` so the pair can never be observed half-updated.
//! A transition that lands mid-block is picked up at the start of the next
//! block; the callback snapshots all three fields once per block.

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use super::dtmf::{self, FrequencyPair, Symbol};

/// Maximum amplitude value. `set_amplitude` clamps to `0..=AMPLITUDE_MAX`.
pub const AMPLITUDE_MAX: u32 = 10_000;

/// Startup amplitude.
pub const AMPLITUDE_DEFAULT: u32 = 3_000;

/// The currently active telephony signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PhoneMode {
    #[default]
    Idle = 0,
    DigitActive = 1,
    DialTone = 2,
    RingTone = 3,
    BusyTone = 4,
}

impl PhoneMode {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::DigitActive,
            2 => Self::DialTone,
            3 => Self::RingTone,
            4 => Self::BusyTone,
            _ => Self::Idle,
        }
    }
}

/// The sustained tones selectable alongside the digit keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Dial,
    Ring,
    Busy,
}

impl ToneKind {
    pub const ALL: [ToneKind; 3] = [Self::Dial, Self::Ring, Self::Busy];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dial => "Dial",
            Self::Ring => "Ring",
            Self::Busy => "Busy",
        }
    }

    fn mode(self) -> PhoneMode {
        match self {
            Self::Dial => PhoneMode::DialTone,
            Self::Ring => PhoneMode::RingTone,
            Self::Busy => PhoneMode::BusyTone,
        }
    }
}

/// A consistent view of the signal state, read once per render block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub mode: PhoneMode,
    pub frequencies: FrequencyPair,
    pub amplitude: u32,
}

/// Shared signal state. Clone hands out another handle to the same state.
#[derive(Clone)]
pub struct SignalState {
    mode: Arc<AtomicU8>,
    frequencies: Arc<AtomicU64>,
    amplitude: Arc<AtomicU32>,
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalState {
    pub fn new() -> Self {
        Self {
            mode: Arc::new(AtomicU8::new(PhoneMode::Idle as u8)),
            frequencies: Arc::new(AtomicU64::new(FrequencyPair::default().pack())),
            amplitude: Arc::new(AtomicU32::new(AMPLITUDE_DEFAULT)),
        }
    }

    /// A keypad digit went down: activate its DTMF pair.
    pub fn press_digit(&self, symbol: Symbol) {
        let pair = dtmf::lookup(symbol);
        self.frequencies.store(pair.pack(), Ordering::Relaxed);
        self.mode.store(PhoneMode::DigitActive as u8, Ordering::Relaxed);
    }

    /// A keypad digit came up. Matches the on-screen button behavior:
    /// any release silences the tone, whichever digit it was.
    pub fn release_digit(&self, _symbol: Symbol) {
        self.mode.store(PhoneMode::Idle as u8, Ordering::Relaxed);
    }

    /// A dial/ring/busy button went down.
    pub fn press_mode(&self, kind: ToneKind) {
        self.mode.store(kind.mode() as u8, Ordering::Relaxed);
    }

    /// A dial/ring/busy button came up; release always silences.
    pub fn release_mode(&self, _kind: ToneKind) {
        self.mode.store(PhoneMode::Idle as u8, Ordering::Relaxed);
    }

    /// Set the output amplitude, clamped to `0..=AMPLITUDE_MAX`.
    pub fn set_amplitude(&self, value: u32) {
        self.amplitude
            .store(value.min(AMPLITUDE_MAX), Ordering::Relaxed);
    }

    pub fn amplitude(&self) -> u32 {
        self.amplitude.load(Ordering::Relaxed)
    }

    pub fn mode(&self) -> PhoneMode {
        PhoneMode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    /// The symbol whose frequency pair was most recently loaded by a digit
    /// press. The pair is only ever written by `press_digit`, so it outlives
    /// the press and is independent of the current mode.
    pub fn loaded_symbol(&self) -> Option<Symbol> {
        let pair = FrequencyPair::unpack(self.frequencies.load(Ordering::Relaxed));
        Symbol::ALL.into_iter().find(|&s| dtmf::lookup(s) == pair)
    }

    /// The symbol currently sounding, if a digit tone is active.
    pub fn active_symbol(&self) -> Option<Symbol> {
        if self.mode() != PhoneMode::DigitActive {
            return None;
        }
        self.loaded_symbol()
    }

    /// Read all three fields. Called once per render block by the audio
    /// thread; lock-free and wait-free.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: PhoneMode::from_u8(self.mode.load(Ordering::Relaxed)),
            frequencies: FrequencyPair::unpack(self.frequencies.load(Ordering::Relaxed)),
            amplitude: self.amplitude.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SignalState::new();
        let snap = state.snapshot();
        assert_eq!(snap.mode, PhoneMode::Idle);
        assert_eq!(snap.amplitude, AMPLITUDE_DEFAULT);
    }

    #[test]
    fn test_press_digit_loads_pair() {
        let state = SignalState::new();
        state.press_digit(Symbol::D5);
        let snap = state.snapshot();
        assert_eq!(snap.mode, PhoneMode::DigitActive);
        assert_eq!(snap.frequencies, FrequencyPair::new(770, 1336));
    }

    #[test]
    fn test_release_ignores_which_digit() {
        let state = SignalState::new();
        state.press_digit(Symbol::D5);
        // Releasing a different digit still silences the tone.
        state.release_digit(Symbol::D9);
        assert_eq!(state.snapshot().mode, PhoneMode::Idle);
    }

    #[test]
    fn test_mode_buttons() {
        let state = SignalState::new();
        for kind in ToneKind::ALL {
            state.press_mode(kind);
            assert_eq!(state.snapshot().mode, kind.mode());
            state.release_mode(kind);
            assert_eq!(state.snapshot().mode, PhoneMode::Idle);
        }
    }

    #[test]
    fn test_amplitude_clamped() {
        let state = SignalState::new();
        state.set_amplitude(25_000);
        assert_eq!(state.amplitude(), AMPLITUDE_MAX);
        state.set_amplitude(0);
        assert_eq!(state.amplitude(), 0);
        state.set_amplitude(4_242);
        assert_eq!(state.amplitude(), 4_242);
    }

    #[test]
    fn test_active_symbol_reverse_lookup() {
        let state = SignalState::new();
        assert_eq!(state.active_symbol(), None);
        state.press_digit(Symbol::Hash);
        assert_eq!(state.active_symbol(), Some(Symbol::Hash));
    }

    #[test]
    fn test_loaded_symbol_outlives_mode_changes() {
        let state = SignalState::new();
        // Nothing pressed yet: the default pair maps to no symbol.
        assert_eq!(state.loaded_symbol(), None);

        state.press_digit(Symbol::D5);
        state.press_mode(ToneKind::Ring);

        // The mode moved on but the pair stays until the next digit press.
        assert_eq!(state.active_symbol(), None);
        assert_eq!(state.loaded_symbol(), Some(Symbol::D5));

        state.release_mode(ToneKind::Ring);
        assert_eq!(state.loaded_symbol(), Some(Symbol::D5));
    }

    #[test]
    fn test_concurrent_amplitude_never_torn() {
        let state = SignalState::new();
        let writer = state.clone();

        let handle = std::thread::spawn(move || {
            for i in 0..10_000u32 {
                writer.set_amplitude(i * 7);
            }
        });

        for _ in 0..10_000 {
            let amp = state.snapshot().amplitude;
            assert!(amp <= AMPLITUDE_MAX, "observed out-of-range amplitude {amp}");
        }

        handle.join().unwrap();
    }
}
