//! Wah: FIR bandpass over the most recent samples with a swept center.

use crate::buffer::SampleRing;
use crate::constants::ADC_BITS;
use crate::wah::WahFilterBank;

/// ADC code of a zero-volt audio signal (the input is biased to mid-rail).
pub const MID_SCALE: u16 = 1 << (ADC_BITS - 1);

/// Bandpass convolution against the bank's active table.
pub struct Wah<'a> {
    bank: &'a WahFilterBank,
    gain: f32,
}

impl<'a> Wah<'a> {
    pub fn new(bank: &'a WahFilterBank, gain: f32) -> Self {
        Wah { bank, gain }
    }

    /// Dot product of the last `L` samples with the active taps.
    ///
    /// Samples are centered on [`MID_SCALE`] before filtering and the result
    /// is shifted back, so the bias survives the bandpass.
    #[inline]
    pub fn process<const N: usize>(&self, ring: &SampleRing<N>) -> i32 {
        let taps = self.bank.active_coefficients();
        let mid = MID_SCALE as f32;

        let mut acc = 0.0f32;
        for (n, &h) in taps.iter().enumerate() {
            acc += h * (ring.delayed(n) as f32 - mid);
        }
        (MID_SCALE as i32).saturating_add(libm::roundf(self.gain * acc) as i32)
    }
}
