//! Launch surface: run a probe kernel across a grid of blocks of threads.
//!
//! The contract is uniform for all seven kernels: an iteration count and a
//! result sink holding at least one `f32` slot per launched thread. Each
//! thread writes only its own slot, so sink slices are split per block and
//! handed out per thread without any locking. Timing, iteration sweeps, and
//! result aggregation belong to the caller.

use crate::arch::{Applicability, ArchFamily, ProbeKind};
use crate::error::{ProbeError, Result};
use crate::probe::{lds, mfma};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Grid and block dimensions for a probe launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    pub grid_dim: u32,
    pub block_dim: u32,
}

impl LaunchConfig {
    pub const fn new(grid_dim: u32, block_dim: u32) -> Self {
        Self {
            grid_dim,
            block_dim,
        }
    }

    /// One block of 64 threads, the reference configuration for the
    /// pointer-chase probe (one thread per scratch-table entry).
    pub const fn single_block() -> Self {
        Self::new(1, lds::SCRATCH_ENTRIES as u32)
    }

    /// Total launched threads.
    pub const fn thread_count(&self) -> usize {
        self.grid_dim as usize * self.block_dim as usize
    }
}

/// Launch a probe kernel.
///
/// Mirrors the device behavior: a variant that is inapplicable on the build
/// target runs as a silent no-op (a warning is logged). Use
/// [`launch_checked`] when an empty run must be treated as an error.
///
/// # Errors
///
/// Fails if the launch config describes zero threads or the sink has fewer
/// slots than launched threads.
pub fn launch(kind: ProbeKind, cfg: LaunchConfig, iterations: u32, sink: &mut [f32]) -> Result<()> {
    validate(cfg, sink)?;

    if kind.applicability() == Applicability::NotApplicable {
        log::warn!(
            "probe {} compiles to an empty body on {:?}; launch is a no-op",
            kind.kernel_name(),
            ArchFamily::build_target()
        );
    }
    log::debug!(
        "launching {}: grid={} block={} iterations={}",
        kind.kernel_name(),
        cfg.grid_dim,
        cfg.block_dim,
        iterations
    );

    let block_dim = cfg.block_dim as usize;
    let active = &mut sink[..cfg.thread_count()];

    #[cfg(feature = "parallel")]
    active
        .par_chunks_mut(block_dim)
        .for_each(|slots| run_block(kind, iterations, slots));

    #[cfg(not(feature = "parallel"))]
    for slots in active.chunks_mut(block_dim) {
        run_block(kind, iterations, slots);
    }

    Ok(())
}

/// Launch a probe kernel, refusing inapplicable variants.
///
/// # Errors
///
/// In addition to the [`launch`] errors, fails with
/// [`ProbeError::NotApplicable`] when the variant has an empty body on the
/// build target, so a caller cannot mistake launch overhead for a
/// measurement.
pub fn launch_checked(
    kind: ProbeKind,
    cfg: LaunchConfig,
    iterations: u32,
    sink: &mut [f32],
) -> Result<()> {
    if kind.applicability() == Applicability::NotApplicable {
        return Err(ProbeError::NotApplicable {
            probe: kind.kernel_name(),
            family: ArchFamily::build_target(),
        });
    }
    launch(kind, cfg, iterations, sink)
}

fn validate(cfg: LaunchConfig, sink: &[f32]) -> Result<()> {
    if cfg.grid_dim == 0 || cfg.block_dim == 0 {
        return Err(ProbeError::EmptyLaunch {
            grid_dim: cfg.grid_dim,
            block_dim: cfg.block_dim,
        });
    }
    if sink.len() < cfg.thread_count() {
        return Err(ProbeError::SinkTooSmall {
            needed: cfg.thread_count(),
            got: sink.len(),
        });
    }
    Ok(())
}

/// Run one block: scoped OS threads, one per lane, each owning its sink slot.
fn run_block(kind: ProbeKind, iterations: u32, slots: &mut [f32]) {
    match kind {
        ProbeKind::LdsLatency => {
            let scratch = lds::BlockScratch::new(slots.len());
            std::thread::scope(|s| {
                for (tid, slot) in slots.iter_mut().enumerate() {
                    let scratch = &scratch;
                    s.spawn(move || lds::lds_latency(tid as u32, iterations, scratch, slot));
                }
            });
        }
        _ => {
            std::thread::scope(|s| {
                for (tid, slot) in slots.iter_mut().enumerate() {
                    s.spawn(move || run_compute(kind, tid as u32, iterations, slot));
                }
            });
        }
    }
}

fn run_compute(kind: ProbeKind, tid: u32, iterations: u32, slot: &mut f32) {
    match kind {
        ProbeKind::MfmaI8 => mfma::mfma_i8(tid, iterations, slot),
        ProbeKind::MfmaF8 => mfma::mfma_f8(tid, iterations, slot),
        ProbeKind::MfmaBf16 => mfma::mfma_bf16(tid, iterations, slot),
        ProbeKind::MfmaF16 => mfma::mfma_f16(tid, iterations, slot),
        ProbeKind::MfmaF32 => mfma::mfma_f32(tid, iterations, slot),
        ProbeKind::MfmaF64 => mfma::mfma_f64(tid, iterations, slot),
        // Dispatched separately in run_block; nothing to do here.
        ProbeKind::LdsLatency => {}
    }
}
