//! Cooley-Tukey decomposition of real transforms.
//!
//! A length-`n` problem with `n = r·m` becomes a length-`m` sub-transform,
//! batched `r` times, plus a radix-`r` combining pass over the half-complex
//! data:
//!
//! * `R2hc` is solved by decimation in time: the sub-transform writes `r`
//!   interleaved partial spectra into the output, then the combining pass
//!   merges them in place.
//! * `Hc2r` is solved by decimation in frequency: the combining pass
//!   pre-merges the input in place, then the sub-transform produces the real
//!   output. The input is destroyed, so out-of-place `Hc2r` problems are only
//!   accepted when the planner allows it.
//!
//! The combining pass itself is injected through a [`MakeCombiner`] function.
//! [`build_boundary_pair`] is the shared helper combining kernels use for the
//! two frequency indices, `0` and `m/2`, whose symmetry differs from the
//! interior.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::config::PlannerConfig;
use crate::num::Float;
use crate::ops::Ops;
use crate::plan::{CombinePlan, NopPlan, Plan, RdftError};
use crate::planner::{Planner, Solver};
use crate::problem::{RdftKind, RdftProblem};
use crate::radix::{choose_radix, RadixPolicy};
use crate::tensor::Tensor;

/// Execution order of a composite plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Sub-transform first, then the combining pass on the output.
    Dit,
    /// Combining pass on the input first, then the sub-transform.
    Dif,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Dit => "dit",
            Order::Dif => "dif",
        })
    }
}

/// Arguments handed to a combining-plan factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombineRequest {
    pub kind: RdftKind,
    /// Radix of the pass.
    pub r: usize,
    /// Number of independent groups (co-size).
    pub m: usize,
    /// Stride between consecutive elements of the transformed dimension.
    pub s: usize,
    /// Vector length and stride of the batching loop.
    pub vl: usize,
    pub vs: usize,
    /// Offset of the buffer the pass will run on.
    pub io: usize,
}

/// Factory for combining passes. Must be stateless: the same request always
/// yields an equivalent plan, and `None` means the factory does not apply.
pub type MakeCombiner<T> =
    fn(&CombineRequest, &mut Planner<T>) -> Option<Box<dyn CombinePlan<T>>>;

/// Decide whether `p` may be split under `policy`, returning the radix.
///
/// Accepts rank-1 problems with at most one vector loop, of kind `R2hc`, or
/// of kind `Hc2r` when the problem is in place or the input may be
/// destroyed. The radix must leave a co-size of at least 2. When
/// `no_vector_recursion` is set, problems with a vector loop are refused.
pub fn feasible(p: &RdftProblem, policy: RadixPolicy, config: &PlannerConfig) -> Option<usize> {
    let n = p.n()?;
    if p.vecsz.rank() > 1 {
        return None;
    }
    let kind_ok = match p.kind {
        RdftKind::R2hc => true,
        RdftKind::Hc2r => p.is_inplace() || config.destroy_input,
        RdftKind::R2hcII | RdftKind::Hc2rIII => false,
    };
    if !kind_ok {
        return None;
    }
    let r = choose_radix(policy, n)?;
    if n <= r {
        return None;
    }
    if config.no_vector_recursion && p.vecsz.rank() > 0 {
        return None;
    }
    Some(r)
}

/// Cooley-Tukey solver for one radix policy and one combining-pass family.
pub struct CtSolver<T: Float> {
    policy: RadixPolicy,
    mkcldw: MakeCombiner<T>,
    name: String,
}

/// Package a radix policy and a combining-pass factory as a solver.
pub fn make_ct_solver<T: Float>(policy: RadixPolicy, mkcldw: MakeCombiner<T>) -> CtSolver<T> {
    CtSolver {
        policy,
        mkcldw,
        name: format!("rdft-ct-{policy}"),
    }
}

impl<T: Float> CtSolver<T> {
    pub fn policy(&self) -> RadixPolicy {
        self.policy
    }

    pub fn applicable(&self, p: &RdftProblem, config: &PlannerConfig) -> Option<usize> {
        feasible(p, self.policy, config)
    }
}

impl<T: Float> Solver<T> for CtSolver<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn mkplan(&self, p: &RdftProblem, plnr: &mut Planner<T>) -> Option<Box<dyn Plan<T>>> {
        // Planning may be speculative, so never rely on an earlier check.
        let r = self.applicable(p, plnr.config())?;
        let d = p.sz.dims[0];
        let m = d.n / r;
        let (vl, ivs, ovs) = p.vecsz.to_rank1();

        let (order, req, child) = match p.kind {
            RdftKind::R2hc => (
                Order::Dit,
                CombineRequest {
                    kind: RdftKind::R2hc,
                    r,
                    m,
                    s: d.os,
                    vl,
                    vs: ovs,
                    io: p.output,
                },
                RdftProblem::new(
                    Tensor::rank1(m, r * d.is, d.os),
                    Tensor::rank1(r, d.is, m * d.os).append(&p.vecsz),
                    p.input,
                    p.output,
                    p.kind,
                ),
            ),
            RdftKind::Hc2r => (
                Order::Dif,
                CombineRequest {
                    kind: RdftKind::Hc2r,
                    r,
                    m,
                    s: d.is,
                    vl,
                    vs: ivs,
                    io: p.input,
                },
                RdftProblem::new(
                    Tensor::rank1(m, d.is, r * d.os),
                    Tensor::rank1(r, m * d.is, d.os).append(&p.vecsz),
                    p.input,
                    p.output,
                    p.kind,
                ),
            ),
            RdftKind::R2hcII | RdftKind::Hc2rIII => {
                unreachable!("feasible() admits only r2hc and hc2r, got {}", p.kind)
            }
        };

        let Some(cldw) = (self.mkcldw)(&req, plnr) else {
            plan_log!("{}: no combining pass for r={} m={}", self.name, r, m);
            return None;
        };
        // A failure here drops `cldw` on the way out.
        let Some(cld) = plnr.mkplan(&child) else {
            plan_log!("{}: no sub-transform of size {}", self.name, m);
            return None;
        };

        Some(Box::new(CtPlan::new(order, r, cld, cldw)))
    }
}

/// A sub-transform and a combining pass run as one unit.
///
/// Dropping the plan releases the combining pass first, then the
/// sub-transform.
pub struct CtPlan<T: Float> {
    cldw: Box<dyn CombinePlan<T>>,
    cld: Box<dyn Plan<T>>,
    order: Order,
    r: usize,
    ops: Ops,
}

impl<T: Float> CtPlan<T> {
    /// Assemble a composite from already built children.
    pub fn new(
        order: Order,
        r: usize,
        cld: Box<dyn Plan<T>>,
        cldw: Box<dyn CombinePlan<T>>,
    ) -> Self {
        let ops = cld.ops() + cldw.ops();
        Self {
            cldw,
            cld,
            order,
            r,
            ops,
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn radix(&self) -> usize {
        self.r
    }
}

impl<T: Float> Plan<T> for CtPlan<T> {
    fn apply(&self, buf: &mut [T], input: usize, output: usize) -> Result<(), RdftError> {
        match self.order {
            Order::Dit => {
                self.cld.apply(buf, input, output)?;
                self.cldw.apply(buf, output)
            }
            Order::Dif => {
                self.cldw.apply(buf, input)?;
                self.cld.apply(buf, input, output)
            }
        }
    }

    fn awake(&mut self, awake: bool) {
        // Fixed order: sub-transform, then combining pass.
        self.cld.awake(awake);
        self.cldw.awake(awake);
    }

    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "(rdft-ct-{}/{}", self.order, self.r)?;
        self.cldw.print(out)?;
        self.cld.print(out)?;
        out.write_char(')')
    }

    fn ops(&self) -> Ops {
        self.ops
    }
}

/// The two boundary transforms of a radix-`r` combining pass.
pub struct EdgePair<T: Float> {
    /// Radix-`r` transform of frequency index 0.
    pub edge0: Box<dyn Plan<T>>,
    /// Shifted radix-`r` transform of frequency index `m/2`; a no-op when `m`
    /// is odd.
    pub edge_mid: Box<dyn Plan<T>>,
}

impl<T: Float> EdgePair<T> {
    pub fn awake(&mut self, awake: bool) {
        self.edge0.awake(awake);
        self.edge_mid.awake(awake);
    }

    pub fn ops(&self) -> Ops {
        self.edge0.ops() + self.edge_mid.ops()
    }
}

/// Plan the boundary transforms of a combining pass over `r` blocks of `m`
/// elements at stride `s`, in place at offset `io`.
///
/// `edge0` transforms the elements `io + j·m·s`, `j = 0..r`, with `kind`.
/// `edge_mid` transforms the elements `io + s·(m/2) + j·m·s` with the shifted
/// kind of the same family (`R2hcII` or `Hc2rIII`). Returns `None`, dropping
/// any partial result, when either plan cannot be built.
pub fn build_boundary_pair<T: Float>(
    kind: RdftKind,
    r: usize,
    m: usize,
    s: usize,
    io: usize,
    plnr: &mut Planner<T>,
) -> Option<EdgePair<T>> {
    let mid_kind = match kind {
        RdftKind::R2hc | RdftKind::R2hcII => RdftKind::R2hcII,
        RdftKind::Hc2r | RdftKind::Hc2rIII => RdftKind::Hc2rIII,
    };
    let radix = Tensor::rank1(r, m * s, m * s);

    let edge0 = plnr.mkplan(&RdftProblem::one(radix.clone(), Tensor::rank0(), io, kind))?;
    let edge_mid: Box<dyn Plan<T>> = if m % 2 == 1 {
        Box::new(NopPlan)
    } else {
        let imid = io + s * (m / 2);
        plnr.mkplan(&RdftProblem::one(radix, Tensor::rank0(), imid, mid_kind))?
    };
    Some(EdgePair { edge0, edge_mid })
}
