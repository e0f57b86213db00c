//! DSP math: converter saturation intrinsics and FIR design.

pub mod fir;
pub mod intrinsics;
