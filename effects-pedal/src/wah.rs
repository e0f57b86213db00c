//! Swept bandpass filter bank for the wah effect.
//!
//! The bank holds one precomputed FIR table per center frequency. A sweep
//! walks the active index back and forth across the tables:
//!
//! ```text
//! 0 → 1 → … → K−1 → K−2 → … → 1 → 0 → 1 → …
//! ```
//!
//! The active index is a single atomic word. The wah transform loads it once
//! per sample and convolves with that whole table, so a sweep step landing
//! mid-sample can never produce a mix of two tables.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::config::WahConfig;
use crate::constants::{CONTROL_MAX, SAMPLE_RATE_HZ, WAH_TABLES, WAH_TAPS};
use crate::dsp::fir::design_bandpass;

/// One set of bandpass taps.
pub type WahTable = [f32; WAH_TAPS];

/// Control ticks between sweep steps for a given control value.
///
/// A higher knob gives a shorter period: 1 tick at full scale, 16 ticks at
/// zero (100 Hz down to 6.25 Hz at the 100 Hz control rate).
#[inline]
pub fn sweep_period(control: u16) -> u32 {
    let inverted = CONTROL_MAX - control.min(CONTROL_MAX);
    (inverted >> 8) as u32 + 1
}

/// Precomputed bandpass tables plus the published sweep position.
pub struct WahFilterBank {
    tables: [WahTable; WAH_TABLES],
    index: AtomicUsize,
}

impl WahFilterBank {
    /// Design every table for `config`. Runs once at startup.
    pub fn new(config: &WahConfig) -> Self {
        let fs = SAMPLE_RATE_HZ as f32;
        let tables = core::array::from_fn(|k| {
            design_bandpass::<WAH_TAPS>(config.centers_hz[k], config.cutoff_hz, fs)
        });
        log::info!(
            "wah bank: {} tables x {} taps, {}-{} Hz",
            WAH_TABLES,
            WAH_TAPS,
            config.centers_hz[0],
            config.centers_hz[WAH_TABLES - 1]
        );
        WahFilterBank {
            tables,
            index: AtomicUsize::new(0),
        }
    }

    /// Number of tables in the sweep.
    pub const fn len(&self) -> usize {
        WAH_TABLES
    }

    pub const fn is_empty(&self) -> bool {
        WAH_TABLES == 0
    }

    /// Index of the table the wah transform is using.
    pub fn index(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// The currently selected table, resolved with a single index load.
    #[inline]
    pub fn active_coefficients(&self) -> &WahTable {
        &self.tables[self.index()]
    }

    /// Table `k`, if it exists.
    pub fn table(&self, k: usize) -> Option<&WahTable> {
        self.tables.get(k)
    }

    fn publish(&self, k: usize) {
        debug_assert!(k < WAH_TABLES);
        self.index.store(k, Ordering::Release);
    }
}

/// Sweep direction across the table indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Bouncing index over `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepState {
    index: usize,
    direction: Direction,
    len: usize,
}

impl SweepState {
    /// Start at index 0 moving up.
    pub const fn new(len: usize) -> Self {
        SweepState {
            index: 0,
            direction: Direction::Up,
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one step and return the new index.
    ///
    /// The direction flips on arriving at either end, so the index never
    /// leaves `0..len`. A sweep over fewer than two entries stays at 0.
    pub fn step(&mut self) -> usize {
        if self.len < 2 {
            return self.index;
        }
        self.index = match self.direction {
            Direction::Up => self.index + 1,
            Direction::Down => self.index - 1,
        };
        if self.index == self.len - 1 {
            self.direction = Direction::Down;
        } else if self.index == 0 {
            self.direction = Direction::Up;
        }
        self.index
    }
}

/// Writer side of the sweep. Owned by the control clock.
pub struct WahSweep<'a> {
    bank: &'a WahFilterBank,
    state: SweepState,
}

impl<'a> WahSweep<'a> {
    pub(crate) fn new(bank: &'a WahFilterBank) -> Self {
        WahSweep {
            bank,
            state: SweepState::new(bank.len()),
        }
    }

    /// Advance the sweep one table and publish it to the wah transform.
    pub fn tick(&mut self) -> usize {
        let k = self.state.step();
        self.bank.publish(k);
        k
    }

    pub fn state(&self) -> SweepState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PedalConfig;

    #[test]
    fn sweep_bounces_between_ends() {
        let mut s = SweepState::new(4);
        let mut seen = [0usize; 10];
        for slot in seen.iter_mut() {
            *slot = s.step();
        }
        assert_eq!(seen, [1, 2, 3, 2, 1, 0, 1, 2, 3, 2]);
    }

    #[test]
    fn direction_flips_exactly_at_bounds() {
        let mut s = SweepState::new(3);
        assert_eq!(s.direction(), Direction::Up);
        s.step(); // 1
        assert_eq!(s.direction(), Direction::Up);
        s.step(); // 2
        assert_eq!(s.direction(), Direction::Down);
        s.step(); // 1
        assert_eq!(s.direction(), Direction::Down);
        s.step(); // 0
        assert_eq!(s.direction(), Direction::Up);
    }

    #[test]
    fn degenerate_sweeps_hold_still() {
        let mut one = SweepState::new(1);
        assert_eq!(one.step(), 0);
        assert_eq!(one.step(), 0);
    }

    #[test]
    fn sweep_period_mapping() {
        assert_eq!(sweep_period(CONTROL_MAX), 1);
        assert_eq!(sweep_period(0), 16);
        assert_eq!(sweep_period(CONTROL_MAX - 255), 1);
        assert_eq!(sweep_period(CONTROL_MAX - 256), 2);
        assert_eq!(sweep_period(u16::MAX), 1);
    }

    #[test]
    fn tick_publishes_whole_table() {
        let bank = WahFilterBank::new(&PedalConfig::DEFAULT.wah);
        assert_eq!(bank.index(), 0);
        assert!(core::ptr::eq(bank.active_coefficients(), bank.table(0).unwrap()));

        let mut sweep = WahSweep::new(&bank);
        assert_eq!(sweep.tick(), 1);
        assert_eq!(bank.index(), 1);
        assert!(core::ptr::eq(bank.active_coefficients(), bank.table(1).unwrap()));
    }

    #[test]
    fn full_round_trip_returns_to_start() {
        let bank = WahFilterBank::new(&PedalConfig::DEFAULT.wah);
        let mut sweep = WahSweep::new(&bank);
        for _ in 0..2 * (WAH_TABLES - 1) {
            assert!(sweep.tick() < WAH_TABLES);
        }
        assert_eq!(bank.index(), 0);
        assert_eq!(sweep.state().direction(), Direction::Up);
    }

    #[test]
    fn tables_differ_per_center() {
        let bank = WahFilterBank::new(&PedalConfig::DEFAULT.wah);
        assert_ne!(bank.table(0), bank.table(1));
        assert!(bank.table(WAH_TABLES).is_none());
    }
}
