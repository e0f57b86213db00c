//! ARM DSP instruction wrappers with pure-Rust fallbacks.
//!
//! On `thumbv7em` targets (Cortex-M4/M7 with DSP extension), these compile to
//! single-cycle ARM instructions. On other targets (host tests, Cortex-M0),
//! equivalent pure-Rust implementations are used.

/// Unsigned saturate to `BITS` bits.
///
/// Computes `clamp(val, 0, 2^BITS - 1)`.
///
/// Maps to ARM `USAT` instruction. `BITS` must be a compile-time constant
/// because the ARM instruction requires an immediate operand.
#[inline(always)]
pub fn unsigned_saturate<const BITS: u32>(val: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "usat {out}, #{bits}, {val}",
                out = out(reg) out,
                val = in(reg) val,
                bits = const BITS,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let max = ((1u32 << BITS) - 1) as i32;
        if val > max {
            max
        } else if val < 0 {
            0
        } else {
            val
        }
    }
}

/// Shift a `FROM`-bit code to `TO` bits, then saturate to `TO` bits.
///
/// Widening shifts left, narrowing shifts right. Used to hand ADC-domain
/// values to a DAC of a different width.
#[inline(always)]
pub fn rescale_saturate<const FROM: u32, const TO: u32>(val: i32) -> i32 {
    let shifted = if TO >= FROM {
        val << (TO - FROM)
    } else {
        val >> (FROM - TO)
    };
    unsigned_saturate::<TO>(shifted)
}
