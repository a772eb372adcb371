//! Matrix-FMA throughput probes, one kernel per numeric format.
//!
//! Every kernel follows the same scheme: seed an operand from the thread
//! index, zero an accumulator register, then issue one modeled matrix-FMA
//! per iteration with the previous iteration's accumulator as both input and
//! destination. The self-dependency is deliberate: it forces back-to-back
//! issue so the elapsed time reflects instruction latency, not pipelined
//! throughput across independent accumulators.
//!
//! | Kernel | Operand | Accumulator | Instruction shape |
//! |--------|---------|-------------|-------------------|
//! | [`mfma_i8`]   | scalar i32 | [`I32x16`] | 32×32×8  |
//! | [`mfma_f8`]   | scalar f64 | [`F32x16`] | 32×32×16 |
//! | [`mfma_bf16`] | [`Bf16x2`] | [`F32x16`] | 32×32×4  |
//! | [`mfma_f16`]  | [`F16x2`]  | [`F32x16`] | 32×32×8  |
//! | [`mfma_f32`]  | scalar f32 | [`F32x16`] | 32×32×2  |
//! | [`mfma_f64`]  | scalar f64 | [`F64x4`]  | 16×16×4  |
//!
//! The f8 kernel takes its operand as a scalar f64 because that is the
//! instruction's calling convention for the packed 8-bit lanes.
//!
//! After the loop a guard compares lane 0 against twice its own value and
//! stores it into the thread's sink slot only when they are equal and the
//! lane is nonzero. Only non-finite lanes satisfy that, so the branch is
//! never taken in practice, yet the loop result feeds an externally
//! observable path the optimizer cannot strip, without the uniform
//! memory-latency noise an unconditional store would add.
//!
//! On a build target where a variant's instruction encoding does not exist
//! the kernel body compiles to a no-op; see [`crate::arch`].

use crate::arch::{Applicability, ProbeKind};
use crate::types::{Bf16x2, F16x2, F32x16, F64x4, I32x16};
use half::{bf16, f16};

// K-extent of each instruction shape, folded into the modeled step.
const I8_DEPTH: i32 = 8;
const F8_DEPTH: f32 = 16.0;
const BF16_DEPTH: f32 = 4.0;
const F16_DEPTH: f32 = 8.0;
const F32_DEPTH: f32 = 2.0;
const F64_DEPTH: f64 = 4.0;

/// One modeled `mfma_i32_32x32x8i8` issue. Wrapping arithmetic: the values
/// are never meaningful and hardware accumulators wrap the same way.
#[inline(always)]
fn step_i8(a: i32, b: i32, mut acc: I32x16) -> I32x16 {
    let prod = a.wrapping_mul(b).wrapping_mul(I8_DEPTH);
    for lane in acc.0.iter_mut() {
        *lane = lane.wrapping_add(prod);
    }
    acc
}

/// One modeled `mfma_f32_32x32x16_fp8_fp8` issue.
#[inline(always)]
fn step_f8(a: f64, b: f64, mut acc: F32x16) -> F32x16 {
    let prod = (a * b) as f32;
    for lane in acc.0.iter_mut() {
        *lane = prod.mul_add(F8_DEPTH, *lane);
    }
    acc
}

/// One modeled `mfma_f32_32x32x4bf16` issue. Both packed lanes contribute at
/// each of the K/2 depth pairs.
#[inline(always)]
fn step_bf16(a: Bf16x2, b: Bf16x2, mut acc: F32x16) -> F32x16 {
    let dot = a.0[0].to_f32() * b.0[0].to_f32() + a.0[1].to_f32() * b.0[1].to_f32();
    for lane in acc.0.iter_mut() {
        *lane = dot.mul_add(BF16_DEPTH / 2.0, *lane);
    }
    acc
}

/// One modeled `mfma_f32_32x32x8f16` issue.
#[inline(always)]
fn step_f16(a: F16x2, b: F16x2, mut acc: F32x16) -> F32x16 {
    let dot = a.0[0].to_f32() * b.0[0].to_f32() + a.0[1].to_f32() * b.0[1].to_f32();
    for lane in acc.0.iter_mut() {
        *lane = dot.mul_add(F16_DEPTH / 2.0, *lane);
    }
    acc
}

/// One modeled `mfma_f32_32x32x2f32` issue.
#[inline(always)]
fn step_f32(a: f32, b: f32, mut acc: F32x16) -> F32x16 {
    for lane in acc.0.iter_mut() {
        *lane = (a * b).mul_add(F32_DEPTH, *lane);
    }
    acc
}

/// One modeled `mfma_f64_16x16x4f64` issue.
#[inline(always)]
fn step_f64(a: f64, b: f64, mut acc: F64x4) -> F64x4 {
    for lane in acc.0.iter_mut() {
        *lane = (a * b).mul_add(F64_DEPTH, *lane);
    }
    acc
}

/// Anti-dead-code guard: write the lane only if it equals its own double
/// while nonzero, which no finite value does. The condition depends on the
/// loop result at runtime, so the optimizer can neither fold it nor discard
/// the accumulation chain feeding it.
#[inline(always)]
fn guarded_writeback(lane: f32, slot: &mut f32) {
    if lane == 2.0 * lane && lane != 0.0 {
        *slot = lane;
    }
}

/// 8-bit integer matrix-FMA probe.
pub fn mfma_i8(tid: u32, iterations: u32, slot: &mut f32) {
    if matches!(ProbeKind::MfmaI8.applicability(), Applicability::NotApplicable) {
        return;
    }
    let a = tid as i32;
    let mut acc = I32x16::ZERO;
    for _ in 0..iterations {
        acc = step_i8(a, a, acc);
    }
    guarded_writeback(acc.0[0] as f32, slot);
}

/// 8-bit float matrix-FMA probe (fnuz encoding families only).
pub fn mfma_f8(tid: u32, iterations: u32, slot: &mut f32) {
    if matches!(ProbeKind::MfmaF8.applicability(), Applicability::NotApplicable) {
        return;
    }
    let a = f64::from(tid);
    let mut acc = F32x16::ZERO;
    for _ in 0..iterations {
        acc = step_f8(a, a, acc);
    }
    guarded_writeback(acc.0[0], slot);
}

/// 16-bit brain-float matrix-FMA probe.
pub fn mfma_bf16(tid: u32, iterations: u32, slot: &mut f32) {
    if matches!(ProbeKind::MfmaBf16.applicability(), Applicability::NotApplicable) {
        return;
    }
    let a = Bf16x2::splat(bf16::from_f32(tid as f32));
    let mut acc = F32x16::ZERO;
    for _ in 0..iterations {
        acc = step_bf16(a, a, acc);
    }
    guarded_writeback(acc.0[0], slot);
}

/// 16-bit float matrix-FMA probe.
pub fn mfma_f16(tid: u32, iterations: u32, slot: &mut f32) {
    if matches!(ProbeKind::MfmaF16.applicability(), Applicability::NotApplicable) {
        return;
    }
    let a = F16x2::splat(f16::from_f32(tid as f32));
    let mut acc = F32x16::ZERO;
    for _ in 0..iterations {
        acc = step_f16(a, a, acc);
    }
    guarded_writeback(acc.0[0], slot);
}

/// 32-bit float matrix-FMA probe.
pub fn mfma_f32(tid: u32, iterations: u32, slot: &mut f32) {
    if matches!(ProbeKind::MfmaF32.applicability(), Applicability::NotApplicable) {
        return;
    }
    let a = tid as f32;
    let mut acc = F32x16::ZERO;
    for _ in 0..iterations {
        acc = step_f32(a, a, acc);
    }
    guarded_writeback(acc.0[0], slot);
}

/// 64-bit float matrix-FMA probe.
pub fn mfma_f64(tid: u32, iterations: u32, slot: &mut f32) {
    if matches!(ProbeKind::MfmaF64.applicability(), Applicability::NotApplicable) {
        return;
    }
    let a = f64::from(tid);
    let mut acc = F64x4::ZERO;
    for _ in 0..iterations {
        acc = step_f64(a, a, acc);
    }
    let lane = acc.0[0];
    if lane == 2.0 * lane && lane != 0.0 {
        *slot = lane as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::ALL_PROBES;

    const SENTINEL: f32 = -123.5;

    fn run(kind: ProbeKind, tid: u32, iterations: u32, slot: &mut f32) {
        match kind {
            ProbeKind::MfmaI8 => mfma_i8(tid, iterations, slot),
            ProbeKind::MfmaF8 => mfma_f8(tid, iterations, slot),
            ProbeKind::MfmaBf16 => mfma_bf16(tid, iterations, slot),
            ProbeKind::MfmaF16 => mfma_f16(tid, iterations, slot),
            ProbeKind::MfmaF32 => mfma_f32(tid, iterations, slot),
            ProbeKind::MfmaF64 => mfma_f64(tid, iterations, slot),
            ProbeKind::LdsLatency => unreachable!("not a compute probe"),
        }
    }

    #[test]
    fn f32_step_accumulates_depth_times_product() {
        // One issue from a zeroed accumulator: every lane is K * a * b.
        let acc = step_f32(3.0, 3.0, F32x16::ZERO);
        for lane in acc.0 {
            assert_eq!(lane, 2.0 * 9.0);
        }
        // A second issue chains on the first.
        let acc = step_f32(3.0, 3.0, acc);
        for lane in acc.0 {
            assert_eq!(lane, 4.0 * 9.0);
        }
    }

    #[test]
    fn f64_step_uses_four_wide_accumulator() {
        let acc = step_f64(2.0, 2.0, F64x4::ZERO);
        assert_eq!(acc.0.len(), 4);
        for lane in acc.0 {
            assert_eq!(lane, 4.0 * 4.0);
        }
    }

    #[test]
    fn i8_step_wraps_instead_of_overflowing() {
        let mut acc = I32x16::ZERO;
        for _ in 0..1000 {
            acc = step_i8(i32::MAX / 2, 3, acc);
        }
        // No panic in debug builds is the property under test.
        let _ = acc.0[0];
    }

    #[test]
    fn packed_operand_steps_match_scalar_model() {
        // Splatted packed lanes reduce to K * a * a, same as the scalar forms.
        let a16 = F16x2::splat(f16::from_f32(2.0));
        let acc = step_f16(a16, a16, F32x16::ZERO);
        assert_eq!(acc.0[0], 8.0 * 4.0);

        let abf = Bf16x2::splat(bf16::from_f32(2.0));
        let acc = step_bf16(abf, abf, F32x16::ZERO);
        assert_eq!(acc.0[0], 4.0 * 4.0);
    }

    #[test]
    fn zero_iterations_never_touch_the_sink() {
        for &kind in ALL_PROBES.iter().filter(|k| **k != ProbeKind::LdsLatency) {
            let mut slot = SENTINEL;
            run(kind, 7, 0, &mut slot);
            assert_eq!(slot, SENTINEL, "{} wrote on zero iterations", kind.kernel_name());
        }
    }

    #[test]
    fn finite_results_never_fire_the_guard() {
        for &kind in ALL_PROBES.iter().filter(|k| **k != ProbeKind::LdsLatency) {
            for tid in [0, 1, 17] {
                let mut slot = SENTINEL;
                run(kind, tid, 1, &mut slot);
                assert_eq!(
                    slot,
                    SENTINEL,
                    "{} wrote for tid={} after one iteration",
                    kind.kernel_name(),
                    tid
                );
            }
        }
    }

    #[test]
    fn guard_fires_only_for_non_finite_lanes() {
        let mut slot = SENTINEL;
        guarded_writeback(0.0, &mut slot);
        assert_eq!(slot, SENTINEL);
        guarded_writeback(42.0, &mut slot);
        assert_eq!(slot, SENTINEL);
        guarded_writeback(f32::INFINITY, &mut slot);
        assert_eq!(slot, f32::INFINITY);
    }

    #[test]
    fn f32_accumulator_after_one_issue_is_fixed_value_of_tid() {
        // Mirrors the documented model: lane = K * tid^2 with K = 2.
        let tid = 5u32;
        let acc = step_f32(tid as f32, tid as f32, F32x16::ZERO);
        for lane in acc.0 {
            assert_eq!(lane, 50.0);
        }
    }
}
