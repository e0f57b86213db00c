//! Resolution reduction by zeroing low-order bits.

use crate::constants::{ADC_BITS, CONTROL_MAX};

/// Effective resolution for a control value: 1 bit at zero, [`ADC_BITS`] at
/// full scale, `round(1 + (ADC_BITS - 1) / CONTROL_MAX · control)` between.
#[inline]
pub fn resolution_for(control: u16) -> u32 {
    let control = control.min(CONTROL_MAX) as u32;
    let max = CONTROL_MAX as u32;
    1 + ((ADC_BITS - 1) * control + max / 2) / max
}

/// Keep the top `bits` of a `width`-bit code and zero the rest.
///
/// The shift is clamped to `0..=width`, so `bits > width` leaves the code
/// unchanged and `bits == 0` clears it.
#[inline]
pub fn crush(sample: u16, bits: u32, width: u32) -> u16 {
    let shift = width.saturating_sub(bits).min(width);
    let wide = sample as u32;
    ((wide >> shift) << shift) as u16
}

/// Bit-crush transform over [`ADC_BITS`]-wide codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitCrush;

impl BitCrush {
    #[inline]
    pub fn process(&self, sample: u16, control: u16) -> i32 {
        crush(sample, resolution_for(control), ADC_BITS) as i32
    }
}
