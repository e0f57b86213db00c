//! Effect tuning.
//!
//! Hardware facts (sample rate, converter widths, ring length) are
//! compile-time [`constants`](crate::constants). Everything a player might
//! want retuned per build lives in [`PedalConfig`].

use crate::constants::{SAMPLE_RATE_HZ, WAH_TABLES, WAH_TAPS};
use crate::effects::DelayWindow;
use crate::error::{ConfigError, DelayEffect};

/// Gain and knob-mapped delay range for echo or chorus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayConfig {
    /// Linear gain applied to the delayed tap.
    pub gain: f32,
    /// Delay at knob fully counter-clockwise, in milliseconds.
    pub min_ms: f32,
    /// Delay at knob fully clockwise, in milliseconds.
    pub max_ms: f32,
}

impl DelayConfig {
    /// Convert the millisecond range into whole samples at [`SAMPLE_RATE_HZ`].
    pub fn window(&self) -> DelayWindow {
        DelayWindow::new(ms_to_samples(self.min_ms), ms_to_samples(self.max_ms))
    }

    fn validate(&self, effect: DelayEffect, capacity: usize) -> Result<(), ConfigError> {
        validate_gain(self.gain)?;
        for ms in [self.min_ms, self.max_ms] {
            if !ms.is_finite() || ms < 0.0 {
                return Err(ConfigError::InvalidDelay { effect, ms });
            }
        }
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvertedDelayWindow {
                effect,
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        // The newest sample sits at offset 0, so the oldest reachable one is capacity - 1.
        let samples = ms_to_samples(self.max_ms);
        if samples >= capacity {
            return Err(ConfigError::DelayExceedsBuffer {
                effect,
                samples,
                capacity,
            });
        }
        Ok(())
    }
}

/// Wah filter bank design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WahConfig {
    /// Bandpass center frequency of each table, in sweep order.
    pub centers_hz: [f32; WAH_TABLES],
    /// Cutoff of the windowed-sinc lowpass prototype (half the passband width).
    pub cutoff_hz: f32,
    /// Gain applied to the filtered signal.
    pub gain: f32,
}

/// Complete effect tuning for one pedal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedalConfig {
    pub echo: DelayConfig,
    pub chorus: DelayConfig,
    pub wah: WahConfig,
}

impl PedalConfig {
    /// Stock tuning: 100–187 ms echo at 0.25, 10–55 ms chorus at 0.5 and a
    /// 1–10 kHz wah with a ~1 kHz passband.
    pub const DEFAULT: PedalConfig = PedalConfig {
        echo: DelayConfig {
            gain: 0.25,
            min_ms: 100.0,
            max_ms: 187.0,
        },
        chorus: DelayConfig {
            gain: 0.5,
            min_ms: 10.0,
            max_ms: 55.0,
        },
        wah: WahConfig {
            centers_hz: [
                1_000.0, 2_000.0, 3_000.0, 4_000.0, 5_000.0, 6_000.0, 7_000.0, 8_000.0, 9_000.0,
                10_000.0,
            ],
            cutoff_hz: 500.0,
            gain: 1.0,
        },
    };

    /// Check every value against a ring of `capacity` samples.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if capacity < WAH_TAPS {
            return Err(ConfigError::RingShorterThanFilter {
                taps: WAH_TAPS,
                capacity,
            });
        }
        self.echo.validate(DelayEffect::Echo, capacity)?;
        self.chorus.validate(DelayEffect::Chorus, capacity)?;

        validate_gain(self.wah.gain)?;
        if !(self.wah.cutoff_hz.is_finite() && self.wah.cutoff_hz > 0.0) {
            return Err(ConfigError::InvalidCutoff(self.wah.cutoff_hz));
        }
        let nyquist = SAMPLE_RATE_HZ as f32 / 2.0;
        for &fc in &self.wah.centers_hz {
            if !(fc > 0.0 && fc < nyquist) {
                return Err(ConfigError::InvalidCenterFrequency(fc));
            }
        }

        log::debug!("pedal config accepted for a {} sample ring", capacity);
        Ok(())
    }
}

impl Default for PedalConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn validate_gain(gain: f32) -> Result<(), ConfigError> {
    if gain.is_finite() && gain >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidGain(gain))
    }
}

fn ms_to_samples(ms: f32) -> usize {
    (ms * (SAMPLE_RATE_HZ as f32 / 1000.0)) as usize
}
