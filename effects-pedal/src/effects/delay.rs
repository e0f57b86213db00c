//! Echo and chorus: one attenuated delayed tap added to the input.
//!
//! The two effects differ in a single bit. Echo writes its output back into
//! the ring, so the next pass over that slot picks the tap up again and the
//! repeats decay geometrically. Chorus leaves the ring untouched and produces
//! exactly one delayed copy.

use crate::buffer::SampleRing;
use crate::constants::{ADC_BITS, CONTROL_MAX};
use crate::dsp::intrinsics::unsigned_saturate;

/// Knob-mapped delay range in samples, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min: usize,
    max: usize,
}

impl DelayWindow {
    /// A window from `min` to `max` samples. Swapped bounds are reordered.
    pub const fn new(min: usize, max: usize) -> Self {
        if min <= max {
            DelayWindow { min, max }
        } else {
            DelayWindow { min: max, max: min }
        }
    }

    /// A window that ignores the knob.
    pub const fn fixed(samples: usize) -> Self {
        DelayWindow {
            min: samples,
            max: samples,
        }
    }

    pub const fn min(&self) -> usize {
        self.min
    }

    pub const fn max(&self) -> usize {
        self.max
    }

    /// Linear map from control value to delay.
    #[inline]
    pub fn delay_for(&self, control: u16) -> usize {
        let control = control.min(CONTROL_MAX) as usize;
        self.min + (self.max - self.min) * control / CONTROL_MAX as usize
    }
}

/// Whether the delayed tap is written back into the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Echo: output replaces the current sample in the ring.
    WriteBack,
    /// Chorus: the ring keeps the dry input.
    None,
}

/// A single delayed tap with fixed gain.
#[derive(Debug, Clone, Copy)]
pub struct DelayTap {
    gain: f32,
    window: DelayWindow,
    feedback: Feedback,
}

impl DelayTap {
    pub const fn echo(gain: f32, window: DelayWindow) -> Self {
        DelayTap {
            gain,
            window,
            feedback: Feedback::WriteBack,
        }
    }

    pub const fn chorus(gain: f32, window: DelayWindow) -> Self {
        DelayTap {
            gain,
            window,
            feedback: Feedback::None,
        }
    }

    pub fn window(&self) -> DelayWindow {
        self.window
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// `current + gain · delayed(m)`, with `m` taken from the knob.
    #[inline]
    pub fn process<const N: usize>(&self, ring: &SampleRing<N>, control: u16) -> i32 {
        let m = self.window.delay_for(control);
        let tap = (self.gain * ring.delayed(m) as f32) as i32;
        let y = (ring.current() as i32).saturating_add(tap);

        if self.feedback == Feedback::WriteBack {
            ring.overwrite(unsigned_saturate::<ADC_BITS>(y) as u16);
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: usize = 10;

    /// Run an impulse of height 1000 followed by silence through `tap`.
    fn impulse_response(tap: &DelayTap) -> [i32; 60] {
        let ring: SampleRing<64> = SampleRing::new();
        let mut out = [0i32; 60];
        for (t, y) in out.iter_mut().enumerate() {
            ring.push(if t == 0 { 1000 } else { 0 });
            *y = tap.process(&ring, 0);
            ring.advance();
        }
        out
    }

    #[test]
    fn window_maps_knob_linearly() {
        let w = DelayWindow::new(480, 2640);
        assert_eq!(w.delay_for(0), 480);
        assert_eq!(w.delay_for(CONTROL_MAX), 2640);
        assert_eq!(w.delay_for(u16::MAX), 2640);
        let mid = w.delay_for(CONTROL_MAX / 2);
        assert!(mid > 1550 && mid < 1570);
    }

    #[test]
    fn swapped_window_is_reordered() {
        assert_eq!(DelayWindow::new(9, 3), DelayWindow::new(3, 9));
    }

    #[test]
    fn echo_repeats_decay_at_multiples_of_delay() {
        let out = impulse_response(&DelayTap::echo(0.5, DelayWindow::fixed(M)));
        assert_eq!(out[0], 1000);
        assert_eq!(out[M], 500);
        assert_eq!(out[2 * M], 250);
        assert_eq!(out[3 * M], 125);
        assert_eq!(out[4 * M], 62);
        assert_eq!(out[5 * M], 31);
        for (t, &y) in out.iter().enumerate() {
            if t % M != 0 {
                assert_eq!(y, 0, "unexpected output at {t}");
            }
        }
    }

    #[test]
    fn chorus_produces_one_copy() {
        let out = impulse_response(&DelayTap::chorus(0.5, DelayWindow::fixed(M)));
        assert_eq!(out[0], 1000);
        assert_eq!(out[M], 500);
        for (t, &y) in out.iter().enumerate() {
            if t != 0 && t != M {
                assert_eq!(y, 0, "unexpected output at {t}");
            }
        }
    }

    #[test]
    fn echo_write_back_is_saturated_to_adc_range() {
        let ring: SampleRing<8> = SampleRing::new();
        let tap = DelayTap::echo(1.0, DelayWindow::fixed(1));
        ring.push(4000);
        tap.process(&ring, 0);
        ring.advance();
        ring.push(4000);
        assert_eq!(tap.process(&ring, 0), 8000);
        assert_eq!(ring.current(), 4095);
    }

    #[test]
    fn extreme_gain_saturates_instead_of_overflowing() {
        let ring: SampleRing<8> = SampleRing::new();
        let chorus = DelayTap::chorus(1.0e6, DelayWindow::fixed(1));
        let echo = DelayTap::echo(1.0e6, DelayWindow::fixed(1));
        ring.push(4000);
        ring.advance();
        ring.push(4000);
        assert_eq!(chorus.process(&ring, 0), i32::MAX);
        assert_eq!(echo.process(&ring, 0), i32::MAX);
        assert_eq!(ring.current(), 4095);
    }

    #[test]
    fn chorus_leaves_ring_untouched() {
        let ring: SampleRing<8> = SampleRing::new();
        let tap = DelayTap::chorus(1.0, DelayWindow::fixed(1));
        ring.push(100);
        ring.advance();
        ring.push(200);
        assert_eq!(tap.process(&ring, 0), 300);
        assert_eq!(ring.current(), 200);
    }
}
