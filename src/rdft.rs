//! Whole-buffer real transforms on top of the planner.
//!
//! [`RdftPlanner`] plans contiguous length-`n` transforms with the default
//! solver registry and hands out [`RealPlan`]s that own their buffers'
//! layout. Spectra use the half-complex layout; see [`halfcomplex_to_complex`]
//! for conversion to `n/2 + 1` complex bins.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::config::PlannerConfig;
use crate::num::{Complex, Float};
use crate::ops::Ops;
use crate::plan::{signature, Plan, RdftError};
use crate::planner::Planner;
use crate::problem::{RdftKind, RdftProblem};
use crate::tensor::Tensor;

/// Buffer arrangement a plan is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    InPlace,
    OutOfPlace,
}

pub struct RdftPlanner<T: Float> {
    planner: Planner<T>,
}

impl<T: Float> Default for RdftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RdftPlanner<T> {
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            planner: Planner::with_default_solvers(config),
        }
    }

    /// Forward transform of `n` reals into the half-complex layout.
    pub fn plan_r2hc(&mut self, n: usize, placement: Placement) -> Option<RealPlan<T>> {
        self.plan(RdftKind::R2hc, n, placement)
    }

    /// Unnormalized inverse of [`Self::plan_r2hc`]; the result is scaled by `n`.
    pub fn plan_hc2r(&mut self, n: usize, placement: Placement) -> Option<RealPlan<T>> {
        self.plan(RdftKind::Hc2r, n, placement)
    }

    fn plan(&mut self, kind: RdftKind, n: usize, placement: Placement) -> Option<RealPlan<T>> {
        if n == 0 {
            return None;
        }
        let output = match placement {
            Placement::InPlace => 0,
            Placement::OutOfPlace => n,
        };
        let p = RdftProblem::new(Tensor::rank1(n, 1, 1), Tensor::rank0(), 0, output, kind);
        let mut plan = self.planner.mkplan(&p)?;
        plan.awake(true);
        plan_log!("planned {} n={} as {}", kind, n, signature(&*plan));
        Some(RealPlan {
            plan,
            kind,
            n,
            placement,
        })
    }
}

/// A woken plan for one contiguous transform. Dropping it releases the
/// plan's tables.
pub struct RealPlan<T: Float> {
    plan: Box<dyn Plan<T>>,
    kind: RdftKind,
    n: usize,
    placement: Placement,
}

impl<T: Float> RealPlan<T> {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn kind(&self) -> RdftKind {
        self.kind
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn ops(&self) -> Ops {
        self.plan.ops()
    }

    pub fn signature(&self) -> String {
        signature(&*self.plan)
    }

    fn check_len(&self, len: usize) -> Result<(), RdftError> {
        if len == 0 {
            return Err(RdftError::EmptyInput);
        }
        if len != self.n {
            return Err(RdftError::MismatchedLengths);
        }
        Ok(())
    }

    /// Transform `input` into `output`. Plans that may destroy their input
    /// leave the clobbered values in `input`.
    pub fn execute(&self, input: &mut [T], output: &mut [T]) -> Result<(), RdftError> {
        self.check_len(input.len())?;
        self.check_len(output.len())?;
        let n = self.n;
        match self.placement {
            Placement::InPlace => {
                output.copy_from_slice(input);
                self.plan.apply(output, 0, 0)
            }
            Placement::OutOfPlace => {
                let mut arena = vec![T::zero(); 2 * n];
                arena[..n].copy_from_slice(input);
                self.plan.apply(&mut arena, 0, n)?;
                input.copy_from_slice(&arena[..n]);
                output.copy_from_slice(&arena[n..]);
                Ok(())
            }
        }
    }

    /// Transform `data` in place.
    pub fn execute_inplace(&self, data: &mut [T]) -> Result<(), RdftError> {
        self.check_len(data.len())?;
        let n = self.n;
        match self.placement {
            Placement::InPlace => self.plan.apply(data, 0, 0),
            Placement::OutOfPlace => {
                let mut arena = vec![T::zero(); 2 * n];
                arena[..n].copy_from_slice(data);
                self.plan.apply(&mut arena, 0, n)?;
                data.copy_from_slice(&arena[n..]);
                Ok(())
            }
        }
    }
}

impl<T: Float> Drop for RealPlan<T> {
    fn drop(&mut self) {
        self.plan.awake(false);
    }
}

impl<T: Float> core::fmt::Debug for RealPlan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RealPlan")
            .field("kind", &self.kind)
            .field("n", &self.n)
            .field("placement", &self.placement)
            .field("plan", &self.plan)
            .finish()
    }
}

/// Unpack a half-complex spectrum into its `n/2 + 1` non-redundant bins.
pub fn halfcomplex_to_complex<T: Float>(hc: &[T]) -> Vec<Complex<T>> {
    let n = hc.len();
    if n == 0 {
        return Vec::new();
    }
    (0..=n / 2)
        .map(|k| {
            let im = if k == 0 || 2 * k == n {
                T::zero()
            } else {
                hc[n - k]
            };
            Complex::new(hc[k], im)
        })
        .collect()
}

/// Pack `n/2 + 1` bins of a Hermitian spectrum into the half-complex layout
/// of a length-`n` transform. Imaginary parts of the DC and Nyquist bins are
/// ignored.
pub fn complex_to_halfcomplex<T: Float>(
    bins: &[Complex<T>],
    n: usize,
) -> Result<Vec<T>, RdftError> {
    if n == 0 {
        return Err(RdftError::EmptyInput);
    }
    if bins.len() != n / 2 + 1 {
        return Err(RdftError::MismatchedLengths);
    }
    let mut hc = vec![T::zero(); n];
    for (k, c) in bins.iter().enumerate() {
        hc[k] = c.re;
        if k > 0 && 2 * k < n {
            hc[n - k] = c.im;
        }
    }
    Ok(hc)
}
