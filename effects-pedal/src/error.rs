//! Startup configuration errors.
//!
//! The sample path itself never fails; everything that can go wrong is
//! caught once by [`PedalConfig::validate`](crate::config::PedalConfig::validate)
//! before any table is built.

use thiserror::Error;

/// Which delay-based transform a [`ConfigError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayEffect {
    Echo,
    Chorus,
}

/// Rejected [`PedalConfig`](crate::config::PedalConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("ring of {capacity} samples is shorter than the {taps}-tap wah filter")]
    RingShorterThanFilter { taps: usize, capacity: usize },

    #[error("{effect:?} delay window is inverted: {min_ms} ms > {max_ms} ms")]
    InvertedDelayWindow {
        effect: DelayEffect,
        min_ms: f32,
        max_ms: f32,
    },

    #[error("{effect:?} delay of {samples} samples does not fit a ring of {capacity}")]
    DelayExceedsBuffer {
        effect: DelayEffect,
        samples: usize,
        capacity: usize,
    },

    #[error("{effect:?} delay of {ms} ms is not a finite non-negative time")]
    InvalidDelay { effect: DelayEffect, ms: f32 },

    #[error("gain must be finite and non-negative, got {0}")]
    InvalidGain(f32),

    #[error("wah center frequency {0} Hz must lie strictly between 0 and Nyquist")]
    InvalidCenterFrequency(f32),

    #[error("wah prototype cutoff must be positive, got {0} Hz")]
    InvalidCutoff(f32),
}
