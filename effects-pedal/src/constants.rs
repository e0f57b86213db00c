/// Audio sample rate in Hz (ADC start-of-conversion timer).
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// Number of samples held by the history ring (187.5 ms at 48 kHz).
pub const BUFFER_LENGTH: usize = 9_000;

/// Resolution of the audio and knob ADC results.
pub const ADC_BITS: u32 = 12;

/// Resolution of the audio output DAC.
pub const DAC_BITS: u32 = 12;

/// Largest raw knob code, which is also the largest control value.
pub const CONTROL_MAX: u16 = (1 << ADC_BITS) - 1;

/// Master control tick rate in Hz. Drives the knob ADC, wah sweep and selector.
pub const CONTROL_TICK_HZ: u32 = 100;

/// Control ticks between selector activations (20 Hz).
pub const SELECTOR_TICK_DIVIDER: u32 = 5;

/// Number of knob readings averaged into the control value.
pub const KNOB_HISTORY_LEN: usize = 10;

/// Number of precomputed wah bandpass tables.
pub const WAH_TABLES: usize = 10;

/// Taps per wah bandpass table. Odd, so the filter has an integer center tap.
pub const WAH_TAPS: usize = 57;
