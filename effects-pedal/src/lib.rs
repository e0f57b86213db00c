//! # effects-pedal
//!
//! A `no_std`, zero-allocation real-time core for a single-channel guitar
//! effects pedal. It captures audio one sample at a time from an ADC,
//! runs one of a fixed bank of effects, and writes the result to a DAC. A
//! slow control path selects the effect from footswitches and scales it
//! with a knob.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Memory | [`buffer`] | Circular sample history with wraparound-safe lookup |
//! | Control | [`control`] / [`selector`] | Knob averaging, footswitch effect selection |
//! | DSP | [`dsp`] / [`wah`] | Saturation intrinsics, FIR design, swept filter bank |
//! | Effects | [`effects`] | Passthrough, bit-crush, echo, chorus, wah |
//! | Pipeline | [`pipeline`] | Interrupt handlers and the state they share |
//! | I/O | [`io`] | ADC/DAC/wait traits implemented by the firmware |
//!
//! ## Signal flow
//!
//! ```text
//!   audio ADC ──► SampleCapture ──► SampleRing ──► EffectDispatch ──► DAC
//!                                        ▲               │
//!   knob ADC ──► KnobCapture ──► ControlValue ───────────┤
//!                                        │               │
//!   100 Hz ──► ControlClock ──► WahFilterBank ───────────┤
//!                   │                                    │
//!                   └──► EffectSelector ──► EffectSlot ──┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use effects_pedal::config::PedalConfig;
//! use effects_pedal::pipeline::PedalState;
//! use effects_pedal::selector::SelectorInputs;
//!
//! let state: PedalState = PedalState::new(PedalConfig::DEFAULT)?;
//! let mut h = state.split(SelectorInputs { wah, bit_crush, chorus, echo }).unwrap();
//!
//! // Audio ADC ISR, then the dispatch software interrupt:
//! h.sample_capture.isr(&mut audio_adc);
//! h.dispatch.isr(&mut dac);
//! ```
//!
//! ## Audio parameters
//!
//! - **Sample rate:** 48 kHz ([`constants::SAMPLE_RATE_HZ`])
//! - **Sample format:** unsigned 12-bit ADC codes, biased to mid-rail
//! - **History:** 9000 samples, 187.5 ms ([`constants::BUFFER_LENGTH`])
//! - **Control rate:** 100 Hz knob and clock, 20 Hz selector

#![no_std]

pub mod constants;
pub mod config;
pub mod error;
pub mod buffer;
pub mod control;
pub mod dsp;
pub mod wah;
pub mod effects;
pub mod selector;
pub mod io;
pub mod pipeline;
