//! Cost-driven plan search.
//!
//! The [`Planner`] owns a registry of [`Solver`]s. Planning a problem asks
//! every solver for a candidate and keeps the one with the lowest operation
//! count. Solvers recurse into the planner for their sub-problems, so the
//! winning solver of every problem is memoized under the problem's digest:
//! later requests for the same problem go straight to that solver.

use alloc::boxed::Box;
use alloc::rc::Rc;

use hashbrown::HashMap;

use crate::config::PlannerConfig;
use crate::ct::make_ct_solver;
use crate::direct::{DirectSolver, NopSolver};
use crate::hc2hc::make_generic_combiner;
use crate::num::Float;
use crate::plan::Plan;
use crate::problem::{ProblemKey, RdftProblem};
use crate::radix::RadixPolicy;
use crate::vrank::VrankSolver;

/// A strategy that either refuses a problem or builds a plan for it.
///
/// Refusal (`None`) is the normal outcome for most solver/problem pairs and
/// must leave no partially built plan behind.
pub trait Solver<T: Float> {
    fn name(&self) -> &str;
    fn mkplan(&self, p: &RdftProblem, plnr: &mut Planner<T>) -> Option<Box<dyn Plan<T>>>;
}

/// Radix policies registered by [`Planner::with_default_solvers`].
pub const DEFAULT_RADIX_POLICIES: [RadixPolicy; 6] = [
    RadixPolicy::Fixed(2),
    RadixPolicy::Fixed(3),
    RadixPolicy::Fixed(4),
    RadixPolicy::Fixed(5),
    RadixPolicy::FirstDivisor,
    RadixPolicy::SqrtOf(1),
];

pub struct Planner<T: Float> {
    config: PlannerConfig,
    solvers: alloc::vec::Vec<Rc<dyn Solver<T>>>,
    /// Winning solver index per problem; `None` records that nothing applied.
    memo: HashMap<ProblemKey, Option<usize>>,
}

impl<T: Float> Planner<T> {
    /// Planner with an empty solver registry.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            solvers: alloc::vec::Vec::new(),
            memo: HashMap::new(),
        }
    }

    /// Planner with the direct, nop and vector-loop solvers plus one
    /// Cooley-Tukey solver per entry of [`DEFAULT_RADIX_POLICIES`], all using
    /// the generic combining pass.
    pub fn with_default_solvers(config: PlannerConfig) -> Self {
        let mut plnr = Self::new(config);
        plnr.register(Box::new(NopSolver));
        plnr.register(Box::new(DirectSolver));
        plnr.register(Box::new(VrankSolver));
        for policy in DEFAULT_RADIX_POLICIES {
            plnr.register(Box::new(make_ct_solver(policy, make_generic_combiner::<T>)));
        }
        plnr
    }

    pub fn register(&mut self, solver: Box<dyn Solver<T>>) {
        self.solvers.push(Rc::from(solver));
        // New candidates may beat earlier winners.
        self.memo.clear();
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn solver_count(&self) -> usize {
        self.solvers.len()
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Drop every memoized decision.
    pub fn forget(&mut self) {
        self.memo.clear();
    }

    /// Plan `p`, returning the cheapest candidate or `None` when no registered
    /// solver applies. The plan is returned asleep.
    pub fn mkplan(&mut self, p: &RdftProblem) -> Option<Box<dyn Plan<T>>> {
        let key = p.key();
        match self.memo.get(&key).copied() {
            Some(None) => return None,
            Some(Some(idx)) => {
                let solver = Rc::clone(&self.solvers[idx]);
                if let Some(plan) = solver.mkplan(p, self) {
                    plan_log!("memo hit: {} for {:?}", solver.name(), p.sz);
                    return Some(plan);
                }
                plan_log!("memoized solver {} refused, searching again", solver.name());
                self.memo.remove(&key);
            }
            None => {}
        }
        self.search(p, key)
    }

    fn search(&mut self, p: &RdftProblem, key: ProblemKey) -> Option<Box<dyn Plan<T>>> {
        let mut best: Option<(usize, u64, Box<dyn Plan<T>>)> = None;
        for idx in 0..self.solvers.len() {
            let solver = Rc::clone(&self.solvers[idx]);
            let Some(plan) = solver.mkplan(p, self) else {
                continue;
            };
            let cost = plan.ops().total();
            // Ties keep the earlier solver; the losing plan is dropped here.
            if best.as_ref().map_or(true, |(_, c, _)| cost < *c) {
                best = Some((idx, cost, plan));
            }
        }
        self.memo.insert(key, best.as_ref().map(|(idx, _, _)| *idx));
        match best {
            Some((idx, cost, plan)) => {
                plan_log!(
                    "{} wins {} sz={:?} vecsz={:?} cost={}",
                    self.solvers[idx].name(),
                    p.kind,
                    p.sz,
                    p.vecsz,
                    cost
                );
                Some(plan)
            }
            None => {
                plan_log!("no solver applies to {} sz={:?}", p.kind, p.sz);
                None
            }
        }
    }
}
