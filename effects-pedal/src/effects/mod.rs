//! The fixed effect bank.
//!
//! | Effect | Output | Knob controls |
//! |--------|--------|---------------|
//! | [`Passthrough`](Effect::Passthrough) | current input | nothing |
//! | [`BitCrush`](Effect::BitCrush) | input with low bits zeroed | resolution, 1–12 bits |
//! | [`Echo`](Effect::Echo) | input + g·delayed, fed back | delay, 100–187 ms |
//! | [`Chorus`](Effect::Chorus) | input + g·delayed, no feedback | delay, 10–55 ms |
//! | [`Wah`](Effect::Wah) | swept FIR bandpass | sweep rate (via the control clock) |
//!
//! Outputs are in ADC code units and may leave the ADC range; dispatch
//! rescales and saturates them for the DAC.

mod bit_crush;
mod delay;
mod wah;

pub use bit_crush::{crush, resolution_for, BitCrush};
pub use delay::{DelayTap, DelayWindow, Feedback};
pub use wah::{Wah, MID_SCALE};

use crate::buffer::SampleRing;
use crate::config::PedalConfig;
use crate::wah::WahFilterBank;

/// One of the pedal's transforms.
///
/// The discriminants match the numbering used by the selector switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Effect {
    #[default]
    Passthrough = 0,
    Wah = 1,
    BitCrush = 2,
    Chorus = 3,
    Echo = 4,
}

impl Effect {
    pub const ALL: [Effect; 5] = [
        Effect::Passthrough,
        Effect::Wah,
        Effect::BitCrush,
        Effect::Chorus,
        Effect::Echo,
    ];

    /// Decode a stored tag. Unknown tags fall back to passthrough.
    pub const fn from_u8(tag: u8) -> Effect {
        match tag {
            1 => Effect::Wah,
            2 => Effect::BitCrush,
            3 => Effect::Chorus,
            4 => Effect::Echo,
            _ => Effect::Passthrough,
        }
    }
}

/// All transforms with their tuning resolved to samples.
pub struct EffectBank<'a> {
    bit_crush: BitCrush,
    echo: DelayTap,
    chorus: DelayTap,
    wah: Wah<'a>,
}

impl<'a> EffectBank<'a> {
    pub fn new(config: &PedalConfig, wah_bank: &'a WahFilterBank) -> Self {
        EffectBank {
            bit_crush: BitCrush,
            echo: DelayTap::echo(config.echo.gain, config.echo.window()),
            chorus: DelayTap::chorus(config.chorus.gain, config.chorus.window()),
            wah: Wah::new(wah_bank, config.wah.gain),
        }
    }

    /// Evaluate `effect` for the sample at the ring cursor.
    ///
    /// Must run after the sample is pushed and before the cursor advances.
    #[inline]
    pub fn process<const N: usize>(&self, effect: Effect, ring: &SampleRing<N>, control: u16) -> i32 {
        match effect {
            Effect::Passthrough => ring.current() as i32,
            Effect::BitCrush => self.bit_crush.process(ring.current(), control),
            Effect::Echo => self.echo.process(ring, control),
            Effect::Chorus => self.chorus.process(ring, control),
            Effect::Wah => self.wah.process(ring),
        }
    }
}
