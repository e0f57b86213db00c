//! Interrupt handlers and the state they share.
//!
//! ## Priorities
//!
//! ```text
//!  priority   handler            rate      writes
//!  ───────────────────────────────────────────────────────────────
//!  capture    SampleCapture      48 kHz    ring slot, ready flag
//!  capture    KnobCapture        100 Hz    control value
//!  capture    ControlClock       100 Hz    wah index
//!  dispatch   EffectDispatch     48 kHz    ring cursor, DAC
//!  control    EffectSelector     20 Hz     active effect
//! ```
//!
//! Every shared field has exactly one writer, enforced by
//! [`PedalState::split`] handing each writer out once. Dispatch for sample
//! *k* is assumed to finish before capture of sample *k + 1*; a late
//! dispatch is not detected.
//!
//! ## Usage with RTIC
//!
//! ```ignore
//! // In init:
//! let state: &'static PedalState = cortex_m::singleton!(
//!     : PedalState = PedalState::new(PedalConfig::DEFAULT).unwrap()
//! ).unwrap();
//! let handles = state.split(selector_inputs).unwrap();
//!
//! // Audio ADC end-of-conversion ISR (highest priority):
//! cx.local.sample_capture.isr(&mut audio_adc);
//! rtic::pend(Interrupt::SWI_DISPATCH);
//!
//! // Software interrupt (middle priority):
//! cx.local.dispatch.isr(&mut dac);
//!
//! // 100 Hz timer ISR:
//! if cx.local.clock.isr().selector_due {
//!     selector_semaphore.post();
//! }
//!
//! // Selector task (lowest priority):
//! handles.selector.run(&mut selector_semaphore);
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::InputPin;

use crate::buffer::SampleRing;
use crate::config::PedalConfig;
use crate::constants::{ADC_BITS, BUFFER_LENGTH, DAC_BITS, SELECTOR_TICK_DIVIDER};
use crate::control::{ControlValue, ControlValueTracker};
use crate::dsp::intrinsics::rescale_saturate;
use crate::effects::{Effect, EffectBank, MID_SCALE};
use crate::error::ConfigError;
use crate::io::{AdcChannel, DacChannel};
use crate::selector::{EffectSelector, EffectSlot, SelectorInputs};
use crate::wah::{sweep_period, WahFilterBank, WahSweep};


/// Everything the handlers share. Build once at startup, then [`split`](Self::split).
pub struct PedalState<const N: usize = BUFFER_LENGTH> {
    config: PedalConfig,
    ring: SampleRing<N>,
    control: ControlValue,
    effect: EffectSlot,
    wah: WahFilterBank,
    /// Set by capture, cleared by dispatch.
    sample_ready: AtomicBool,
    taken: AtomicBool,
}

impl<const N: usize> PedalState<N> {
    /// Validate `config` against a ring of `N` samples and design the wah tables.
    ///
    /// The ring starts at mid-scale, so history before the first capture is
    /// silence.
    pub fn new(config: PedalConfig) -> Result<Self, ConfigError> {
        config.validate(N)?;
        log::info!(
            "pedal state: {} sample ring, echo {:?}, chorus {:?}",
            N,
            config.echo.window(),
            config.chorus.window()
        );
        Ok(PedalState {
            config,
            ring: SampleRing::filled(MID_SCALE),
            control: ControlValue::new(),
            effect: EffectSlot::new(),
            wah: WahFilterBank::new(&config.wah),
            sample_ready: AtomicBool::new(false),
            taken: AtomicBool::new(false),
        })
    }

    /// Hand out the writer handles. Returns `None` after the first call.
    pub fn split<P: InputPin>(&self, inputs: SelectorInputs<P>) -> Option<PedalHandles<'_, N, P>> {
        if self.taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(PedalHandles {
            sample_capture: SampleCapture {
                ring: &self.ring,
                ready: &self.sample_ready,
            },
            knob_capture: KnobCapture {
                tracker: ControlValueTracker::new(&self.control),
            },
            dispatch: EffectDispatch {
                ring: &self.ring,
                control: &self.control,
                effect: &self.effect,
                ready: &self.sample_ready,
                bank: EffectBank::new(&self.config, &self.wah),
            },
            clock: ControlClock {
                control: &self.control,
                sweep: WahSweep::new(&self.wah),
                ticks: 0,
                since_sweep: 0,
            },
            selector: EffectSelector::new(&self.effect, inputs),
        })
    }

    pub fn config(&self) -> &PedalConfig {
        &self.config
    }

    pub fn ring(&self) -> &SampleRing<N> {
        &self.ring
    }

    /// Current denoised knob value.
    pub fn control(&self) -> u16 {
        self.control.get()
    }

    pub fn active_effect(&self) -> Effect {
        self.effect.get()
    }

    pub fn wah(&self) -> &WahFilterBank {
        &self.wah
    }
}

/// The single set of writers for a [`PedalState`].
pub struct PedalHandles<'a, const N: usize, P> {
    pub sample_capture: SampleCapture<'a, N>,
    pub knob_capture: KnobCapture<'a>,
    pub dispatch: EffectDispatch<'a, N>,
    pub clock: ControlClock<'a>,
    pub selector: EffectSelector<'a, P>,
}

/// Audio ADC end-of-conversion handler.
pub struct SampleCapture<'a, const N: usize> {
    ring: &'a SampleRing<N>,
    ready: &'a AtomicBool,
}

impl<const N: usize> SampleCapture<'_, N> {
    /// Store the latest conversion at the ring cursor and mark it ready.
    ///
    /// The caller pends [`EffectDispatch`] afterwards.
    #[inline]
    pub fn isr<A: AdcChannel>(&mut self, adc: &mut A) {
        self.ring.push(adc.read_code());
        self.ready.store(true, Ordering::Release);
    }
}

/// Knob ADC end-of-conversion handler.
pub struct KnobCapture<'a> {
    tracker: ControlValueTracker<'a>,
}

impl KnobCapture<'_> {
    #[inline]
    pub fn isr<A: AdcChannel>(&mut self, adc: &mut A) {
        self.tracker.record(adc.read_code());
    }
}

/// Runs the active effect once per captured sample.
pub struct EffectDispatch<'a, const N: usize> {
    ring: &'a SampleRing<N>,
    control: &'a ControlValue,
    effect: &'a EffectSlot,
    ready: &'a AtomicBool,
    bank: EffectBank<'a>,
}

impl<const N: usize> EffectDispatch<'_, N> {
    /// Process the pending sample, advance the ring and write the DAC.
    ///
    /// Returns the DAC code written, or `None` when no sample was pending.
    pub fn isr<D: DacChannel>(&mut self, dac: &mut D) -> Option<u16> {
        if !self.ready.swap(false, Ordering::AcqRel) {
            return None;
        }

        let y = self
            .bank
            .process(self.effect.get(), self.ring, self.control.get());
        self.ring.advance();

        let code = rescale_saturate::<ADC_BITS, DAC_BITS>(y) as u16;
        dac.write_code(code);
        Some(code)
    }
}

/// What a control tick asks the firmware to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockEvents {
    /// Post the selector task's wait primitive.
    pub selector_due: bool,
    /// New wah table index, when the sweep stepped on this tick.
    pub wah_step: Option<usize>,
}

/// 100 Hz master tick: paces the selector and the wah sweep.
pub struct ControlClock<'a> {
    control: &'a ControlValue,
    sweep: WahSweep<'a>,
    ticks: u32,
    since_sweep: u32,
}

impl ControlClock<'_> {
    pub fn isr(&mut self) -> ClockEvents {
        self.ticks = self.ticks.wrapping_add(1);
        let selector_due = self.ticks % SELECTOR_TICK_DIVIDER == 0;

        self.since_sweep += 1;
        let wah_step = if self.since_sweep >= sweep_period(self.control.get()) {
            self.since_sweep = 0;
            Some(self.sweep.tick())
        } else {
            None
        };

        ClockEvents {
            selector_due,
            wah_step,
        }
    }

    /// Ticks since start.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
