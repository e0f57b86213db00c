//! Windowed-sinc FIR design.
//!
//! A bandpass table is a lowpass prototype shifted up to the center
//! frequency by cosine modulation:
//!
//! ```text
//! h[n] = lowpass[n] · hamming[n] · cos(2π · fc · (n − L/2) / fs)
//! ```
//!
//! The prototype cutoff sets half the passband width. With a Hamming window
//! the transition band is roughly `3.3 · fs / L` wide.

use core::f32::consts::PI;

/// Hamming window weight for tap `n` of a `len`-tap filter.
#[inline]
pub fn hamming(n: usize, len: usize) -> f32 {
    if len < 2 {
        return 1.0;
    }
    0.54 - 0.46 * libm::cosf(2.0 * PI * n as f32 / (len - 1) as f32)
}

/// Ideal lowpass impulse response (unwindowed sinc) at tap `n`.
///
/// Tap `len / 2` is the center; the DC gain of the ideal filter is 1.
#[inline]
pub fn lowpass_prototype(n: usize, len: usize, cutoff_hz: f32, sample_rate_hz: f32) -> f32 {
    let fc = cutoff_hz / sample_rate_hz;
    let k = n as f32 - (len / 2) as f32;
    if k == 0.0 {
        2.0 * fc
    } else {
        libm::sinf(2.0 * PI * fc * k) / (PI * k)
    }
}

/// Magnitude of the filter's frequency response at `hz`.
pub fn magnitude_response(taps: &[f32], hz: f32, sample_rate_hz: f32) -> f32 {
    let w = 2.0 * PI * hz / sample_rate_hz;
    let (mut re, mut im) = (0.0f32, 0.0f32);
    for (n, &h) in taps.iter().enumerate() {
        re += h * libm::cosf(w * n as f32);
        im -= h * libm::sinf(w * n as f32);
    }
    libm::sqrtf(re * re + im * im)
}

/// Design an `L`-tap Hamming-windowed bandpass centered on `center_hz`.
///
/// The taps are scaled so the gain at `center_hz` is exactly 1, which keeps
/// the level constant when switching between tables of different centers.
pub fn design_bandpass<const L: usize>(
    center_hz: f32,
    cutoff_hz: f32,
    sample_rate_hz: f32,
) -> [f32; L] {
    let mid = (L / 2) as f32;
    let mut taps: [f32; L] = core::array::from_fn(|n| {
        let carrier = libm::cosf(2.0 * PI * center_hz * (n as f32 - mid) / sample_rate_hz);
        lowpass_prototype(n, L, cutoff_hz, sample_rate_hz) * hamming(n, L) * carrier
    });

    let gain = magnitude_response(&taps, center_hz, sample_rate_hz);
    if gain > 0.0 {
        for t in taps.iter_mut() {
            *t /= gain;
        }
    }
    taps
}
