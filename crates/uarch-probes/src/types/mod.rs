//! Fixed-width register types for the probe kernels.
//!
//! Matrix-FMA instructions operate on fixed physical register shapes, so the
//! accumulator and packed-operand types are declared here as plain fixed-size
//! arrays rather than slices:
//!
//! | Type | Shape | Used by |
//! |------|-------|---------|
//! | [`I32x16`] | 16 × i32 | i8 accumulator |
//! | [`F32x16`] | 16 × f32 | f8 / bf16 / f16 / f32 accumulator |
//! | [`F64x4`]  | 4 × f64  | f64 accumulator |
//! | [`Bf16x2`] | 2 × bf16 | bf16 packed operand |
//! | [`F16x2`]  | 2 × f16  | f16 packed operand |
//!
//! The accumulators never carry meaningful values out of a kernel; the only
//! consumer of a lane is the anti-dead-code guard in the probe bodies.

use half::{bf16, f16};

/// 16-lane i32 accumulator register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct I32x16(pub [i32; 16]);

/// 16-lane f32 accumulator register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(64))]
pub struct F32x16(pub [f32; 16]);

/// 4-lane f64 accumulator register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct F64x4(pub [f64; 4]);

/// 2-lane packed bf16 operand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Bf16x2(pub [bf16; 2]);

/// 2-lane packed f16 operand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct F16x2(pub [f16; 2]);

impl I32x16 {
    pub const ZERO: Self = Self([0; 16]);
}

impl F32x16 {
    pub const ZERO: Self = Self([0.0; 16]);
}

impl F64x4 {
    pub const ZERO: Self = Self([0.0; 4]);
}

impl Bf16x2 {
    /// Duplicate one value into both packed lanes.
    pub fn splat(v: bf16) -> Self {
        Self([v; 2])
    }
}

impl F16x2 {
    /// Duplicate one value into both packed lanes.
    pub fn splat(v: f16) -> Self {
        Self([v; 2])
    }
}
