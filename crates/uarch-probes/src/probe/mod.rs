//! The probe kernels.
//!
//! Two families share nothing but the launch contract and the fixed-width
//! register types:
//!
//! - [`lds`]: one scratch-memory pointer-chase latency kernel, the only
//!   place in the library with a synchronization barrier.
//! - [`mfma`]: six matrix-FMA throughput kernels, one per numeric format,
//!   each a fully thread-independent dependent-accumulation loop.

pub mod lds;
pub mod mfma;

pub use lds::{lds_latency, BlockScratch, CHASE_UNROLL, SCRATCH_ENTRIES};
pub use mfma::{mfma_bf16, mfma_f16, mfma_f32, mfma_f64, mfma_f8, mfma_i8};
