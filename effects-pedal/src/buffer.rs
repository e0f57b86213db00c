//! Circular history of captured audio samples.
//!
//! The ring is shared between two interrupt levels without a lock:
//!
//! | Operation | Caller | Level |
//! |-----------|--------|-------|
//! | [`push`](SampleRing::push) | sample capture | highest |
//! | [`delayed`](SampleRing::delayed) | effect transforms | dispatch |
//! | [`overwrite`](SampleRing::overwrite) | echo feedback | dispatch |
//! | [`advance`](SampleRing::advance) | effect dispatch | dispatch |
//!
//! The cursor names the slot of the sample currently being processed. Capture
//! writes that slot, dispatch reads history relative to it and then advances
//! exactly once. This holds as long as dispatch for sample *k* finishes before
//! capture of sample *k + 1*, which the scheduling configuration guarantees.

use core::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

use crate::constants::BUFFER_LENGTH;

/// Fixed-capacity ring of raw sample codes with a single write cursor.
///
/// Every slot and the cursor are atomics, so a `&SampleRing` can be shared
/// between interrupt levels. Mutating methods are crate-private: only the
/// pipeline handles that own the corresponding role can call them.
pub struct SampleRing<const N: usize = BUFFER_LENGTH> {
    slots: [AtomicU16; N],
    cursor: AtomicUsize,
}

impl<const N: usize> SampleRing<N> {
    /// Create a zero-filled ring with the cursor at slot 0.
    #[allow(clippy::declare_interior_mut_const)]
    pub const fn new() -> Self {
        assert!(N >= 1, "sample ring needs at least one slot");

        const SILENT: AtomicU16 = AtomicU16::new(0);
        SampleRing {
            slots: [SILENT; N],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Create a ring with every slot holding `code` and the cursor at slot 0.
    ///
    /// The pipeline fills with the ADC mid-scale code so history before the
    /// first capture reads as silence rather than the negative rail.
    pub fn filled(code: u16) -> Self {
        SampleRing {
            slots: core::array::from_fn(|_| AtomicU16::new(code)),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Slot index of the current sample.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Store `sample` at the cursor. Does not advance.
    pub(crate) fn push(&self, sample: u16) {
        let i = self.cursor.load(Ordering::Relaxed);
        self.slots[i].store(sample, Ordering::Release);
    }

    /// Replace the sample at the cursor after it has been captured.
    ///
    /// Echo uses this to feed its attenuated tap back into the history.
    pub(crate) fn overwrite(&self, sample: u16) {
        self.push(sample);
    }

    /// Move the cursor to the next slot, wrapping to 0 at capacity.
    pub(crate) fn advance(&self) {
        let i = self.cursor.load(Ordering::Relaxed);
        let next = if i + 1 >= N { 0 } else { i + 1 };
        self.cursor.store(next, Ordering::Release);
    }

    /// The current sample (`delayed(0)`).
    #[inline]
    pub fn current(&self) -> u16 {
        self.delayed(0)
    }

    /// The sample captured `offset` periods before the current one.
    ///
    /// Offsets past the oldest retained sample are clamped to `N - 1`.
    #[inline]
    pub fn delayed(&self, offset: usize) -> u16 {
        self.slots[self.delayed_index(offset)].load(Ordering::Acquire)
    }

    /// Slot index holding the sample `offset` periods back. Always `< N`.
    #[inline]
    pub fn delayed_index(&self, offset: usize) -> usize {
        let offset = if offset >= N { N - 1 } else { offset };
        let i = self.cursor.load(Ordering::Acquire);
        // i < N and offset < N, so i + N - offset is in (0, 2N).
        let back = i + N - offset;
        if back >= N {
            back - N
        } else {
            back
        }
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Push then advance, the way capture and dispatch do for one sample.
    fn feed<const N: usize>(ring: &SampleRing<N>, samples: &[u16]) {
        for &s in samples {
            ring.push(s);
            ring.advance();
        }
    }

    #[test]
    fn filled_ring_reads_fill_at_every_offset() {
        let ring: SampleRing<5> = SampleRing::filled(2048);
        for offset in 0..8 {
            assert_eq!(ring.delayed(offset), 2048);
        }
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn push_does_not_advance() {
        let ring: SampleRing<4> = SampleRing::new();
        ring.push(7);
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.current(), 7);
    }

    #[test]
    fn advance_wraps_to_zero() {
        let ring: SampleRing<3> = SampleRing::new();
        ring.advance();
        ring.advance();
        assert_eq!(ring.cursor(), 2);
        ring.advance();
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn delayed_reads_history_without_wrap() {
        let ring: SampleRing<8> = SampleRing::new();
        feed(&ring, &[10, 20, 30]);
        ring.push(40);
        assert_eq!(ring.delayed(0), 40);
        assert_eq!(ring.delayed(1), 30);
        assert_eq!(ring.delayed(3), 10);
    }

    #[test]
    fn delayed_wraps_past_slot_zero() {
        let ring: SampleRing<5> = SampleRing::new();
        feed(&ring, &[1, 2, 3, 4, 5, 6]);
        // Cursor is at slot 1; slot 0 holds 6 and slot 4 holds 5.
        ring.push(7);
        assert_eq!(ring.cursor(), 1);
        assert_eq!(ring.delayed(1), 6);
        assert_eq!(ring.delayed(2), 5);
        assert_eq!(ring.delayed(4), 3);
        assert_eq!(ring.delayed_index(4), 2);
    }

    #[test]
    fn eight_slot_scenario() {
        let ring: SampleRing<8> = SampleRing::new();
        feed(&ring, &[1, 2, 3, 4, 5, 6, 7]);
        ring.push(8);
        assert_eq!(ring.delayed(3), 5);
        ring.advance();
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn oversized_offset_clamps_to_oldest() {
        let ring: SampleRing<4> = SampleRing::new();
        feed(&ring, &[1, 2, 3]);
        ring.push(4);
        assert_eq!(ring.delayed(3), 1);
        assert_eq!(ring.delayed(4), 1);
        assert_eq!(ring.delayed(usize::MAX), 1);
    }

    #[test]
    fn overwrite_replaces_current_only() {
        let ring: SampleRing<4> = SampleRing::new();
        feed(&ring, &[100]);
        ring.push(200);
        ring.overwrite(250);
        assert_eq!(ring.current(), 250);
        assert_eq!(ring.delayed(1), 100);
    }

    #[test]
    fn single_slot_ring() {
        let ring: SampleRing<1> = SampleRing::new();
        ring.push(9);
        ring.advance();
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.delayed(0), 9);
        assert_eq!(ring.delayed(5), 9);
    }
}
