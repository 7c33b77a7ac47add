//! Tone synthesis
//!
//! Pure per-sample waveform generation. Time comes from a single monotonic
//! sample counter that is never reset: keeping `t` unbroken across mode and
//! key changes keeps the sine generators phase-continuous, so transitions
//! switch tones without a discontinuity click. A frequency change still
//! jumps the instantaneous frequency, which is the audible tone switch
//! itself and is intended.
//!
//! The digit tone sums two unit sines scaled by the amplitude, so the raw
//! value can reach twice the amplitude (up to 20000) and must be saturated
//! into the i16 range rather than allowed to wrap.

use std::f64::consts::TAU;

use super::dtmf::REFERENCE_TONE_HZ;
use super::state::{PhoneMode, Snapshot};

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 48_000;

/// Ring cadence: a 1 s burst repeating every 5 s.
const RING_PERIOD_S: f64 = 5.0;
const RING_ON_S: f64 = 1.0;

/// Busy cadence: 0.5 s on / 0.5 s off.
const BUSY_PERIOD_S: f64 = 1.0;
const BUSY_ON_S: f64 = 0.5;

fn saturate(value: f64) -> i16 {
    value.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

fn sine(freq_hz: u32, t: f64) -> f64 {
    (TAU * freq_hz as f64 * t).sin()
}

/// Render one signed 16-bit sample for the given state snapshot.
///
/// `sample_index` is the position on the monotonic sample clock;
/// `t = sample_index / sample_rate`. Deterministic, no hidden state.
pub fn render_sample(snapshot: &Snapshot, sample_index: u64, sample_rate: u32) -> i16 {
    let t = sample_index as f64 / sample_rate as f64;
    let amplitude = snapshot.amplitude as f64;

    match snapshot.mode {
        PhoneMode::Idle => 0,
        PhoneMode::DigitActive => {
            let pair = snapshot.frequencies;
            saturate(amplitude * (sine(pair.low, t) + sine(pair.high, t)))
        }
        PhoneMode::DialTone => saturate(amplitude * sine(REFERENCE_TONE_HZ, t)),
        PhoneMode::RingTone => {
            if t.rem_euclid(RING_PERIOD_S) < RING_ON_S {
                saturate(amplitude * sine(REFERENCE_TONE_HZ, t))
            } else {
                0
            }
        }
        PhoneMode::BusyTone => {
            if t.rem_euclid(BUSY_PERIOD_S) < BUSY_ON_S {
                saturate(amplitude * sine(REFERENCE_TONE_HZ, t))
            } else {
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;
    use crate::audio::dtmf::FrequencyPair;

    fn snap(mode: PhoneMode, frequencies: FrequencyPair, amplitude: u32) -> Snapshot {
        Snapshot {
            mode,
            frequencies,
            amplitude,
        }
    }

    /// Render a span the way a callback block would, starting at `clock`.
    fn render_block(snapshot: &Snapshot, clock: u64, sample_rate: u32, out: &mut [i16]) {
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = render_sample(snapshot, clock + i as u64, sample_rate);
        }
    }

    #[test]
    fn test_idle_is_silent() {
        let s = snap(PhoneMode::Idle, FrequencyPair::new(770, 1336), 10_000);
        for n in [0, 1, 1000, 48_000, u64::from(u32::MAX)] {
            assert_eq!(render_sample(&s, n, SAMPLE_RATE), 0);
        }
    }

    #[test]
    fn test_digit_zero_at_t_zero() {
        let s = snap(PhoneMode::DigitActive, FrequencyPair::new(770, 1477), 3_000);
        assert_eq!(render_sample(&s, 0, SAMPLE_RATE), 0);
    }

    #[test]
    fn test_digit_peak_is_twice_amplitude() {
        // Pick a pair where both sines peak together: at t = 0.0025 s,
        // 100 Hz sits at 0.25 cycles and 500 Hz at 1.25 cycles, so the raw
        // sum reaches 2 * amplitude.
        let s = snap(PhoneMode::DigitActive, FrequencyPair::new(100, 500), 10_000);
        let n = (0.0025 * SAMPLE_RATE as f64) as u64;
        assert!(render_sample(&s, n, SAMPLE_RATE) >= 19_999);
    }

    #[test]
    fn test_digit_sum_saturates() {
        // render_sample is pure over its arguments, so drive it past the
        // UI clamp to prove the output clamps to i16::MAX instead of
        // wrapping negative.
        let s = snap(PhoneMode::DigitActive, FrequencyPair::new(100, 500), 30_000);
        let n = (0.0025 * SAMPLE_RATE as f64) as u64;
        assert_eq!(render_sample(&s, n, SAMPLE_RATE), i16::MAX);

        // And the trough clamps to i16::MIN.
        // t = 0.0075 s: 100 Hz at 0.75 cycles, 500 Hz at 3.75 cycles.
        let n = (0.0075 * SAMPLE_RATE as f64) as u64;
        assert_eq!(render_sample(&s, n, SAMPLE_RATE), i16::MIN);
    }

    #[test]
    fn test_dial_tone_is_425_hz() {
        let s = snap(PhoneMode::DialTone, FrequencyPair::default(), 3_000);
        // Quarter period of 425 Hz.
        let t = 0.25 / 425.0;
        let n = (t * SAMPLE_RATE as f64).round() as u64;
        let value = render_sample(&s, n, SAMPLE_RATE) as f64;
        let expected = 3_000.0 * (TAU * 425.0 * (n as f64 / SAMPLE_RATE as f64)).sin();
        assert!((value - expected.trunc()).abs() <= 1.0);
        assert!(value > 2_900.0);
    }

    #[test]
    fn test_ring_cadence_boundaries() {
        let s = snap(PhoneMode::RingTone, FrequencyPair::default(), 3_000);
        let rate = u64::from(SAMPLE_RATE);

        // Last sample before t = 1.0 is inside the burst; it may still be a
        // zero crossing of the sine, so check the gate over a short run.
        let before_off: Vec<i16> = (rate - 48..rate)
            .map(|n| render_sample(&s, n, SAMPLE_RATE))
            .collect();
        assert!(before_off.iter().any(|&v| v != 0));

        // t in [1, 5) is exactly silent.
        for n in [rate, rate + 1, 3 * rate, 5 * rate - 1] {
            assert_eq!(render_sample(&s, n, SAMPLE_RATE), 0);
        }

        // t = 5.0 starts the next burst.
        let next_burst: Vec<i16> = (5 * rate..5 * rate + 48)
            .map(|n| render_sample(&s, n, SAMPLE_RATE))
            .collect();
        assert!(next_burst.iter().any(|&v| v != 0));
    }

    #[test]
    fn test_busy_cadence_boundaries() {
        let s = snap(PhoneMode::BusyTone, FrequencyPair::default(), 3_000);
        let rate = u64::from(SAMPLE_RATE);
        let half = rate / 2;

        let on_run: Vec<i16> = (half - 48..half)
            .map(|n| render_sample(&s, n, SAMPLE_RATE))
            .collect();
        assert!(on_run.iter().any(|&v| v != 0));

        // t in [0.5, 1.0) is silent.
        for n in [half, half + 1, rate - 1] {
            assert_eq!(render_sample(&s, n, SAMPLE_RATE), 0);
        }

        let next_on: Vec<i16> = (rate..rate + 48)
            .map(|n| render_sample(&s, n, SAMPLE_RATE))
            .collect();
        assert!(next_on.iter().any(|&v| v != 0));
    }

    #[test]
    fn test_block_splits_are_seamless() {
        // One long render must be bit-identical to the same span rendered
        // as many small consecutive blocks: the sample clock is the only
        // time base, so block boundaries cannot introduce seams.
        let s = snap(PhoneMode::DigitActive, FrequencyPair::new(697, 1209), 5_000);
        let total = 4096usize;

        let mut whole = vec![0i16; total];
        render_block(&s, 0, SAMPLE_RATE, &mut whole);

        let mut pieced = vec![0i16; total];
        let mut clock = 0u64;
        for chunk in pieced.chunks_mut(137) {
            render_block(&s, clock, SAMPLE_RATE, chunk);
            clock += chunk.len() as u64;
        }

        assert_eq!(whole, pieced);
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        let s = snap(PhoneMode::DigitActive, FrequencyPair::new(770, 1336), 0);
        for n in 0..1000 {
            assert_eq!(render_sample(&s, n, SAMPLE_RATE), 0);
        }
    }
}
