//! Vector-loop solver: peel the outermost vector loop off a problem and run
//! a plan for the remaining problem once per iteration.

use alloc::boxed::Box;
use core::fmt;

use crate::num::Float;
use crate::ops::Ops;
use crate::plan::{Plan, RdftError};
use crate::planner::{Planner, Solver};
use crate::problem::RdftProblem;

#[derive(Debug, Default, Clone, Copy)]
pub struct VrankSolver;

impl VrankSolver {
    fn applicable<T: Float>(p: &RdftProblem, plnr: &Planner<T>) -> bool {
        if p.vecsz.rank() == 0 {
            return false;
        }
        // In-place iterations only stay independent when no loop permutes data.
        if p.is_inplace() && !(p.sz.inplace_strides() && p.vecsz.inplace_strides()) {
            return false;
        }
        !(plnr.config().no_vector_recursion && p.vecsz.rank() > 1)
    }
}

impl<T: Float> Solver<T> for VrankSolver {
    fn name(&self) -> &str {
        "rdft-vrank"
    }

    fn mkplan(&self, p: &RdftProblem, plnr: &mut Planner<T>) -> Option<Box<dyn Plan<T>>> {
        if !Self::applicable(p, plnr) {
            return None;
        }
        let (d, rest) = p.vecsz.split_first()?;
        let child = RdftProblem::new(p.sz.clone(), rest, p.input, p.output, p.kind);
        let cld = plnr.mkplan(&child)?;
        let ops = cld.ops().scale(d.n) + Ops::new(0, 0, 0, d.n as u64);
        Some(Box::new(VrankPlan {
            vl: d.n,
            ivs: d.is,
            ovs: d.os,
            cld,
            ops,
        }))
    }
}

pub struct VrankPlan<T: Float> {
    vl: usize,
    ivs: usize,
    ovs: usize,
    cld: Box<dyn Plan<T>>,
    ops: Ops,
}

impl<T: Float> Plan<T> for VrankPlan<T> {
    fn apply(&self, buf: &mut [T], input: usize, output: usize) -> Result<(), RdftError> {
        for i in 0..self.vl {
            self.cld
                .apply(buf, input + i * self.ivs, output + i * self.ovs)?;
        }
        Ok(())
    }

    fn awake(&mut self, awake: bool) {
        self.cld.awake(awake);
    }

    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "(rdft-vrank-x{}", self.vl)?;
        self.cld.print(out)?;
        out.write_char(')')
    }

    fn ops(&self) -> Ops {
        self.ops
    }
}
