//! Micro-benchmark probe kernels for a matrix-accelerator microarchitecture.
//!
//! Each kernel isolates exactly one hardware resource and is shaped so the
//! measured time reflects real latency or throughput rather than compiler or
//! pipeline artifacts:
//!
//! | Probe | Resource | Mechanism |
//! |-------|----------|-----------|
//! | `lds_latency` | block scratch memory | serialized 64-entry pointer chase |
//! | `mfma_i8` … `mfma_f64` | matrix-FMA units | self-dependent accumulation chain |
//!
//! Three design rules run through every kernel:
//!
//! 1. **Data-dependence**: each loop step consumes the previous step's
//!    result (chased index or accumulator register), so neither hardware nor
//!    compiler can overlap iterations.
//! 2. **Guarded writeback**: the loop result feeds a runtime branch that no
//!    finite value can take, defeating dead-code elimination without adding
//!    an unconditional store to every thread's timing.
//! 3. **Build-time gating**: variants whose instruction encoding is absent
//!    on the target family compile to empty bodies; the
//!    [`ProbeKind::applicability`] query and [`launch_checked`] exist so
//!    callers never mistake an empty run for a measurement.
//!
//! # Quick Start
//!
//! ```
//! use uarch_probes::{launch, LaunchConfig, ProbeKind};
//!
//! // One block of 64 threads, two full cycles through the scratch table.
//! let cfg = LaunchConfig::single_block();
//! let mut sink = vec![0.0f32; cfg.thread_count()];
//! launch(ProbeKind::LdsLatency, cfg, 128, &mut sink).unwrap();
//! assert_eq!(sink[5], 5.0); // full cycles land back on the thread index
//! ```
//!
//! Timing, iteration-count sweeps, and throughput math belong to the caller;
//! [`ProbeKind::ops_per_iteration`] supplies the work-per-iteration factor.

pub mod api;
pub mod arch;
pub mod error;
pub mod probe;
pub mod types;

pub use api::{launch, launch_checked, LaunchConfig};
pub use arch::{Applicability, ArchFamily, ProbeKind, ALL_PROBES};
pub use error::{ProbeError, Result};
