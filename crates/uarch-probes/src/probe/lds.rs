//! Scratch-memory pointer-chase latency probe.
//!
//! Thread 0 of a block writes a 64-entry scratch table holding a single
//! 64-cycle permutation (entry i points at i+1, entry 63 back at 0). After
//! one rendezvous barrier every thread chases pointers through the table,
//! starting from its own thread index; each load's address depends on the
//! previous load's value, so the chain cannot be reordered or overlapped and
//! the elapsed time exposes raw scratch access latency.
//!
//! The final chased index is written unconditionally to the thread's result
//! slot, which keeps the whole chain observable. Because the table is one
//! full cycle, any iteration count that is a multiple of 64 lands every
//! thread back on its starting index.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Barrier;

/// Scratch table entries. The permutation is one cycle over all of them.
pub const SCRATCH_ENTRIES: usize = 64;

/// Chase-loop unroll factor, to keep loop overhead out of the timing.
pub const CHASE_UNROLL: u32 = 64;

/// Block-shared state for the pointer-chase probe: the scratch table and the
/// single rendezvous barrier of the library.
pub struct BlockScratch {
    table: [AtomicU8; SCRATCH_ENTRIES],
    barrier: Barrier,
}

impl BlockScratch {
    /// Scratch state for a block of `block_dim` threads.
    pub fn new(block_dim: usize) -> Self {
        Self {
            table: std::array::from_fn(|_| AtomicU8::new(0)),
            barrier: Barrier::new(block_dim),
        }
    }
}

/// Pointer-chase kernel body for one thread.
///
/// Thread 0 populates the table before the barrier; the table is read-only
/// afterwards. Relaxed atomics suffice since the barrier orders the writes
/// before every read.
pub fn lds_latency(tid: u32, iterations: u32, scratch: &BlockScratch, slot: &mut f32) {
    if tid == 0 {
        for i in 0..SCRATCH_ENTRIES - 1 {
            scratch.table[i].store(i as u8 + 1, Ordering::Relaxed);
        }
        scratch.table[SCRATCH_ENTRIES - 1].store(0, Ordering::Relaxed);
    }

    scratch.barrier.wait();

    let mut index = tid as usize % SCRATCH_ENTRIES;
    let mut remaining = iterations;
    while remaining >= CHASE_UNROLL {
        for _ in 0..CHASE_UNROLL {
            index = scratch.table[index].load(Ordering::Relaxed) as usize;
        }
        remaining -= CHASE_UNROLL;
    }
    for _ in 0..remaining {
        index = scratch.table[index].load(Ordering::Relaxed) as usize;
    }

    *slot = index as f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chase_single(tid: u32, iterations: u32) -> f32 {
        let scratch = BlockScratch::new(1);
        let mut slot = f32::NAN;
        lds_latency(tid, iterations, &scratch, &mut slot);
        slot
    }

    #[test]
    fn zero_iterations_writes_back_start_index() {
        assert_eq!(chase_single(0, 0), 0.0);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        assert_eq!(chase_single(0, 64), 0.0);
        assert_eq!(chase_single(0, 128), 0.0);
        assert_eq!(chase_single(0, 192), 0.0);
    }

    #[test]
    fn partial_chase_steps_through_permutation() {
        // From index 0 the cycle visits 1, 2, 3, ...
        assert_eq!(chase_single(0, 1), 1.0);
        assert_eq!(chase_single(0, 5), 5.0);
        assert_eq!(chase_single(0, 63), 63.0);
        // One more step wraps the cycle.
        assert_eq!(chase_single(0, 65), 1.0);
    }

    #[test]
    fn remainder_iterations_after_unrolled_blocks() {
        // 70 = 64 + 6; ends six steps past the start.
        assert_eq!(chase_single(0, 70), 6.0);
    }
}
