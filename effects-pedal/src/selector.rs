//! Effect selection from the footswitch inputs.
//!
//! The selector is the lowest-priority work in the pedal. It sleeps on a
//! scheduler primitive (posted by the control clock at 20 Hz), samples four
//! debounced switch inputs and publishes the chosen [`Effect`] through an
//! [`EffectSlot`]. It is the only writer of that slot.
//!
//! ## Priority
//!
//! Switches are checked in a fixed order and the first closed one wins:
//!
//! ```text
//! Wah > BitCrush > Chorus > Echo > (none) Passthrough
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::digital::InputPin;

use crate::effects::Effect;
use crate::io::PeriodicWait;

/// The active effect, shared between the selector and dispatch.
///
/// Stored as a single byte, so a reader always sees one whole tag.
pub struct EffectSlot(AtomicU8);

impl EffectSlot {
    pub const fn new() -> Self {
        EffectSlot(AtomicU8::new(Effect::Passthrough as u8))
    }

    #[inline]
    pub fn get(&self) -> Effect {
        Effect::from_u8(self.0.load(Ordering::Relaxed))
    }

    fn set(&self, effect: Effect) {
        self.0.store(effect as u8, Ordering::Relaxed);
    }
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The four selector switches. A high level means the switch is closed.
pub struct SelectorInputs<P> {
    pub wah: P,
    pub bit_crush: P,
    pub chorus: P,
    pub echo: P,
}

/// Control-level task that owns the switches and writes the [`EffectSlot`].
pub struct EffectSelector<'a, P> {
    slot: &'a EffectSlot,
    inputs: SelectorInputs<P>,
    current: Effect,
}

impl<'a, P: InputPin> EffectSelector<'a, P> {
    pub(crate) fn new(slot: &'a EffectSlot, inputs: SelectorInputs<P>) -> Self {
        EffectSelector {
            slot,
            inputs,
            current: slot.get(),
        }
    }

    /// The effect this selector last published.
    pub fn current(&self) -> Effect {
        self.current
    }

    /// Sample the switches once and publish the result.
    ///
    /// Switches are read in priority order and reading stops at the first
    /// closed one. On a read error nothing is published.
    pub fn poll(&mut self) -> Result<Effect, P::Error> {
        let selected = if self.inputs.wah.is_high()? {
            Effect::Wah
        } else if self.inputs.bit_crush.is_high()? {
            Effect::BitCrush
        } else if self.inputs.chorus.is_high()? {
            Effect::Chorus
        } else if self.inputs.echo.is_high()? {
            Effect::Echo
        } else {
            Effect::Passthrough
        };

        if selected != self.current {
            log::info!("effect {:?} -> {:?}", self.current, selected);
            self.slot.set(selected);
            self.current = selected;
        }
        Ok(selected)
    }

    /// Block on `wait`, poll, repeat. Never returns.
    ///
    /// A failed read keeps the previous effect active.
    pub fn run<W: PeriodicWait>(mut self, wait: &mut W) -> ! {
        loop {
            wait.wait();
            if let Err(e) = self.poll() {
                log::warn!("selector switch read failed: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Switch whose level the test controls. `None` reads as a fault.
    struct TestPin<'a>(&'a Cell<Option<bool>>);

    impl ErrorType for TestPin<'_> {
        type Error = PinFault;
    }

    impl InputPin for TestPin<'_> {
        fn is_high(&mut self) -> Result<bool, PinFault> {
            self.0.get().ok_or(PinFault)
        }

        fn is_low(&mut self) -> Result<bool, PinFault> {
            self.is_high().map(|h| !h)
        }
    }

    struct Board {
        wah: Cell<Option<bool>>,
        bit_crush: Cell<Option<bool>>,
        chorus: Cell<Option<bool>>,
        echo: Cell<Option<bool>>,
    }

    impl Board {
        fn open() -> Self {
            Board {
                wah: Cell::new(Some(false)),
                bit_crush: Cell::new(Some(false)),
                chorus: Cell::new(Some(false)),
                echo: Cell::new(Some(false)),
            }
        }

        fn inputs(&self) -> SelectorInputs<TestPin<'_>> {
            SelectorInputs {
                wah: TestPin(&self.wah),
                bit_crush: TestPin(&self.bit_crush),
                chorus: TestPin(&self.chorus),
                echo: TestPin(&self.echo),
            }
        }
    }

    #[test]
    fn highest_priority_closed_switch_wins() {
        let board = Board::open();
        let slot = EffectSlot::new();
        let mut selector = EffectSelector::new(&slot, board.inputs());

        for bits in 0u8..16 {
            let closed = |n: u8| Some(bits & (1 << n) != 0);
            board.wah.set(closed(3));
            board.bit_crush.set(closed(2));
            board.chorus.set(closed(1));
            board.echo.set(closed(0));

            let expected = match bits {
                8..=15 => Effect::Wah,
                4..=7 => Effect::BitCrush,
                2..=3 => Effect::Chorus,
                1 => Effect::Echo,
                _ => Effect::Passthrough,
            };
            assert_eq!(selector.poll().unwrap(), expected, "switches {bits:04b}");
            assert_eq!(slot.get(), expected);
        }
    }

    #[test]
    fn slot_starts_at_passthrough() {
        assert_eq!(EffectSlot::new().get(), Effect::Passthrough);
    }

    #[test]
    fn poll_publishes_selected_effect() {
        let board = Board::open();
        let slot = EffectSlot::new();
        let mut selector = EffectSelector::new(&slot, board.inputs());

        board.chorus.set(Some(true));
        assert_eq!(selector.poll().unwrap(), Effect::Chorus);
        assert_eq!(slot.get(), Effect::Chorus);

        board.wah.set(Some(true));
        assert_eq!(selector.poll().unwrap(), Effect::Wah);
        assert_eq!(slot.get(), Effect::Wah);
    }

    #[test]
    fn releasing_all_switches_returns_to_passthrough() {
        let board = Board::open();
        let slot = EffectSlot::new();
        let mut selector = EffectSelector::new(&slot, board.inputs());

        board.echo.set(Some(true));
        selector.poll().unwrap();
        assert_eq!(slot.get(), Effect::Echo);

        board.echo.set(Some(false));
        selector.poll().unwrap();
        assert_eq!(slot.get(), Effect::Passthrough);
    }

    #[test]
    fn lower_priority_fault_is_not_read_when_higher_switch_closed() {
        let board = Board::open();
        let slot = EffectSlot::new();
        let mut selector = EffectSelector::new(&slot, board.inputs());

        board.bit_crush.set(Some(true));
        board.echo.set(None);
        assert_eq!(selector.poll().unwrap(), Effect::BitCrush);
    }

    #[test]
    fn read_error_keeps_previous_effect() {
        let board = Board::open();
        let slot = EffectSlot::new();
        let mut selector = EffectSelector::new(&slot, board.inputs());

        board.echo.set(Some(true));
        selector.poll().unwrap();

        board.wah.set(None);
        assert!(selector.poll().is_err());
        assert_eq!(slot.get(), Effect::Echo);
        assert_eq!(selector.current(), Effect::Echo);
    }
}
