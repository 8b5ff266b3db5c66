//! Real-data transform problems.

use core::fmt;

use crate::tensor::{IoDim, Tensor};

/// Transform kinds understood by the planner.
///
/// Half-complex layout for a length-`n` `R2hc` output: `O[k] = Re Y_k` for
/// `0 <= k <= n/2` and `O[n-k] = Im Y_k` for `0 < k < n/2`. The shifted kinds
/// store `Re Y_k` at `k` and `Im Y_k` at `n-1-k` for `k < n/2`, plus the real
/// middle coefficient at `(n-1)/2` when `n` is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdftKind {
    /// Real input, half-complex output, `e^{-2πi jk/n}`.
    R2hc,
    /// Half-complex input, real output; unnormalized inverse of `R2hc`.
    Hc2r,
    /// Real input, half-sample shifted output `e^{-2πi j(k+1/2)/n}`.
    R2hcII,
    /// Unnormalized inverse of `R2hcII`.
    Hc2rIII,
}

impl RdftKind {
    pub fn name(self) -> &'static str {
        match self {
            RdftKind::R2hc => "r2hc",
            RdftKind::Hc2r => "hc2r",
            RdftKind::R2hcII => "r2hcII",
            RdftKind::Hc2rIII => "hc2rIII",
        }
    }

    fn tag(self) -> u8 {
        match self {
            RdftKind::R2hc => 0,
            RdftKind::Hc2r => 1,
            RdftKind::R2hcII => 2,
            RdftKind::Hc2rIII => 3,
        }
    }
}

impl fmt::Display for RdftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Digest identifying a problem in the planner's memo table.
pub type ProblemKey = [u8; 32];

/// A real transform over `sz`, repeated over the loops of `vecsz`.
///
/// `input` and `output` are element offsets into the arena slice handed to
/// [`Plan::apply`](crate::plan::Plan::apply); equal offsets denote an
/// in-place transform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdftProblem {
    pub sz: Tensor,
    pub vecsz: Tensor,
    pub input: usize,
    pub output: usize,
    pub kind: RdftKind,
}

impl RdftProblem {
    pub fn new(sz: Tensor, vecsz: Tensor, input: usize, output: usize, kind: RdftKind) -> Self {
        Self {
            sz,
            vecsz,
            input,
            output,
            kind,
        }
    }

    /// In-place problem at offset `io`.
    pub fn one(sz: Tensor, vecsz: Tensor, io: usize, kind: RdftKind) -> Self {
        Self::new(sz, vecsz, io, io, kind)
    }

    pub fn is_inplace(&self) -> bool {
        self.input == self.output
    }

    /// Length of the single size dimension, `None` unless rank 1.
    pub fn n(&self) -> Option<usize> {
        match self.sz.dims.as_slice() {
            [d] => Some(d.n),
            _ => None,
        }
    }

    /// Canonical digest of the problem: kind, offsets and every loop of both
    /// tensors, little-endian.
    pub fn key(&self) -> ProblemKey {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[self.kind.tag()]);
        hasher.update(&(self.input as u64).to_le_bytes());
        hasher.update(&(self.output as u64).to_le_bytes());
        for t in [&self.sz, &self.vecsz] {
            hasher.update(&(t.rank() as u64).to_le_bytes());
            for &IoDim { n, is, os } in &t.dims {
                hasher.update(&(n as u64).to_le_bytes());
                hasher.update(&(is as u64).to_le_bytes());
                hasher.update(&(os as u64).to_le_bytes());
            }
        }
        *hasher.finalize().as_bytes()
    }
}
