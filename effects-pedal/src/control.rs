//! Knob denoising and the shared control value.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::constants::{CONTROL_MAX, KNOB_HISTORY_LEN};

/// Denoised knob position in `0..=CONTROL_MAX`.
///
/// Written only by [`ControlValueTracker`]; read by dispatch and the control
/// clock, which may see a value up to one knob period old.
pub struct ControlValue(AtomicU16);

impl ControlValue {
    pub const fn new() -> Self {
        ControlValue(AtomicU16::new(0))
    }

    /// Current control value.
    #[inline]
    pub fn get(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, value: u16) {
        self.0.store(value, Ordering::Relaxed);
    }
}

impl Default for ControlValue {
    fn default() -> Self {
        Self::new()
    }
}

/// Moving average over the last [`KNOB_HISTORY_LEN`] knob readings.
///
/// The history starts zero-filled, so the first few readings after reset
/// are biased low until the window fills (100 ms at the 100 Hz knob rate).
pub struct ControlValueTracker<'a> {
    history: [u16; KNOB_HISTORY_LEN],
    /// Slot that the next reading replaces.
    oldest: usize,
    /// Running sum of `history`.
    sum: u32,
    value: &'a ControlValue,
}

impl<'a> ControlValueTracker<'a> {
    pub fn new(value: &'a ControlValue) -> Self {
        ControlValueTracker {
            history: [0; KNOB_HISTORY_LEN],
            oldest: 0,
            sum: 0,
            value,
        }
    }

    /// Add a raw knob code and publish the new mean.
    ///
    /// Codes above [`CONTROL_MAX`] are saturated first.
    pub fn record(&mut self, raw_code: u16) {
        let code = raw_code.min(CONTROL_MAX);

        self.sum -= self.history[self.oldest] as u32;
        self.sum += code as u32;
        self.history[self.oldest] = code;
        self.oldest = (self.oldest + 1) % KNOB_HISTORY_LEN;

        self.value.set((self.sum / KNOB_HISTORY_LEN as u32) as u16);
    }

    /// The value most recently published.
    pub fn value(&self) -> u16 {
        self.value.get()
    }
}
