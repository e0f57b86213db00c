//! Hardware seams between the pipeline and the board.
//!
//! Register access, interrupt wiring and RTOS objects stay in the firmware.
//! The pipeline only needs these three capabilities plus
//! [`embedded_hal::digital::InputPin`] for the effect selector switches.
//!
//! | Trait | Used by | Provides |
//! |-------|---------|----------|
//! | [`AdcChannel`] | sample and knob capture | latest conversion result |
//! | [`DacChannel`] | effect dispatch | output code sink |
//! | [`PeriodicWait`] | effect selector | blocking wait for the next activation |

/// A converter channel whose result register holds the latest conversion.
///
/// Called from interrupt context, so implementations must not block.
pub trait AdcChannel {
    /// Raw code of the most recent conversion.
    fn read_code(&mut self) -> u16;
}

/// Analog output. The code is already within the DAC's range.
pub trait DacChannel {
    fn write_code(&mut self, code: u16);
}

/// A scheduler primitive the selector task blocks on between activations,
/// e.g. an RTOS semaphore posted by the control clock.
pub trait PeriodicWait {
    fn wait(&mut self);
}

impl<T: AdcChannel + ?Sized> AdcChannel for &mut T {
    fn read_code(&mut self) -> u16 {
        (**self).read_code()
    }
}

impl<T: DacChannel + ?Sized> DacChannel for &mut T {
    fn write_code(&mut self, code: u16) {
        (**self).write_code(code)
    }
}
