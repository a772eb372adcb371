//! Error types for probe launches.

use crate::arch::ArchFamily;
use thiserror::Error;

/// Errors that can occur when launching a probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Launch configuration describes zero threads.
    #[error("empty launch: grid_dim={grid_dim}, block_dim={block_dim}")]
    EmptyLaunch { grid_dim: u32, block_dim: u32 },

    /// Result sink holds fewer slots than launched threads.
    #[error("result sink too small: {needed} slots needed, {got} provided")]
    SinkTooSmall { needed: usize, got: usize },

    /// Probe variant compiles to an empty body on the build target.
    #[error("probe {probe} is not applicable on {family:?}")]
    NotApplicable {
        probe: &'static str,
        family: ArchFamily,
    },
}

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
