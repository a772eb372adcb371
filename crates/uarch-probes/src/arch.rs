//! Target-architecture families and probe applicability.
//!
//! Different hardware generations support different subsets of the matrix
//! instruction encodings, so each probe variant is gated per family:
//!
//! | Probe | gfx908 | gfx90a | gfx940/941/942 |
//! |-------|--------|--------|----------------|
//! | lds_latency | yes | yes | yes |
//! | mfma_i8   | yes | yes | no (fnuz i8 encoding dropped) |
//! | mfma_f8   | no  | no  | yes (fnuz fp8 only exists there) |
//! | mfma_bf16 | yes | yes | no (same encoding split as i8) |
//! | mfma_f16  | yes | yes | yes |
//! | mfma_f32  | yes | yes | yes |
//! | mfma_f64  | no  | yes | yes |
//!
//! The family is fixed at build time by the `gfx9xx` cargo features, the way
//! device code is compiled once per `--offload-arch`. A kernel
//! that is inapplicable on the build target compiles to an empty body; the
//! [`ProbeKind::applicability`] query exists so a caller can tell an empty
//! run apart from a real measurement instead of trusting the silent no-op.

/// Hardware architecture family the crate is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchFamily {
    Gfx908,
    Gfx90a,
    Gfx940,
    Gfx941,
    Gfx942,
}

impl ArchFamily {
    /// Family selected at build time. Newest enabled feature wins; defaults
    /// to gfx90a when no family feature is set.
    pub const fn build_target() -> Self {
        if cfg!(feature = "gfx942") {
            ArchFamily::Gfx942
        } else if cfg!(feature = "gfx941") {
            ArchFamily::Gfx941
        } else if cfg!(feature = "gfx940") {
            ArchFamily::Gfx940
        } else if cfg!(feature = "gfx908") {
            ArchFamily::Gfx908
        } else {
            ArchFamily::Gfx90a
        }
    }

    /// Families using the fnuz 8-bit float encoding. These dropped the
    /// legacy i8 and bf16 matrix encodings in exchange.
    pub const fn has_fnuz_fp8(self) -> bool {
        matches!(self, ArchFamily::Gfx940 | ArchFamily::Gfx941 | ArchFamily::Gfx942)
    }

    /// Double-precision matrix units are absent on the first generation.
    pub const fn has_f64_mfma(self) -> bool {
        !matches!(self, ArchFamily::Gfx908)
    }
}

/// Whether a probe variant performs real work on a given family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Supported,
    NotApplicable,
}

/// The seven probe kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// Scratch-memory pointer-chase latency probe.
    LdsLatency,
    /// Matrix-FMA throughput, 8-bit integer.
    MfmaI8,
    /// Matrix-FMA throughput, 8-bit float (fnuz encoding).
    MfmaF8,
    /// Matrix-FMA throughput, 16-bit brain-float.
    MfmaBf16,
    /// Matrix-FMA throughput, 16-bit float.
    MfmaF16,
    /// Matrix-FMA throughput, 32-bit float.
    MfmaF32,
    /// Matrix-FMA throughput, 64-bit float.
    MfmaF64,
}

/// All probe kinds, in reporting order.
pub const ALL_PROBES: [ProbeKind; 7] = [
    ProbeKind::LdsLatency,
    ProbeKind::MfmaI8,
    ProbeKind::MfmaF8,
    ProbeKind::MfmaBf16,
    ProbeKind::MfmaF16,
    ProbeKind::MfmaF32,
    ProbeKind::MfmaF64,
];

impl ProbeKind {
    /// Kernel name, for logs and reports.
    pub const fn kernel_name(self) -> &'static str {
        match self {
            ProbeKind::LdsLatency => "lds_latency",
            ProbeKind::MfmaI8 => "mfma_i8",
            ProbeKind::MfmaF8 => "mfma_f8",
            ProbeKind::MfmaBf16 => "mfma_bf16",
            ProbeKind::MfmaF16 => "mfma_f16",
            ProbeKind::MfmaF32 => "mfma_f32",
            ProbeKind::MfmaF64 => "mfma_f64",
        }
    }

    /// Applicability of this probe on an arbitrary family.
    pub const fn applicability_on(self, family: ArchFamily) -> Applicability {
        let supported = match self {
            ProbeKind::LdsLatency => true,
            ProbeKind::MfmaI8 => !family.has_fnuz_fp8(),
            ProbeKind::MfmaF8 => family.has_fnuz_fp8(),
            ProbeKind::MfmaBf16 => !family.has_fnuz_fp8(),
            ProbeKind::MfmaF16 => true,
            ProbeKind::MfmaF32 => true,
            ProbeKind::MfmaF64 => family.has_f64_mfma(),
        };
        if supported {
            Applicability::Supported
        } else {
            Applicability::NotApplicable
        }
    }

    /// Applicability on the build-time target family.
    pub const fn applicability(self) -> Applicability {
        self.applicability_on(ArchFamily::build_target())
    }

    /// Arithmetic operations one kernel iteration accounts for, per thread.
    ///
    /// For the matrix probes this is M×N×K×2 of the underlying instruction
    /// shape; the pointer-chase probe counts one scratch access per step.
    pub const fn ops_per_iteration(self) -> u64 {
        match self {
            ProbeKind::LdsLatency => 1,
            ProbeKind::MfmaI8 => 32 * 32 * 8 * 2,
            ProbeKind::MfmaF8 => 32 * 32 * 16 * 2,
            ProbeKind::MfmaBf16 => 32 * 32 * 4 * 2,
            ProbeKind::MfmaF16 => 32 * 32 * 8 * 2,
            ProbeKind::MfmaF32 => 32 * 32 * 2 * 2,
            ProbeKind::MfmaF64 => 16 * 16 * 4 * 2,
        }
    }
}
