// Test intent: composite plans sequence their children, wake and release
// them in a fixed order, and leave nothing behind when planning fails.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use rdftplan::direct::DirectSolver;
use rdftplan::{
    make_ct_solver, signature, CombinePlan, CombineRequest, CtPlan, Ops, Order, Plan, Planner,
    PlannerConfig, RadixPolicy, RdftError, RdftKind, RdftProblem, Solver, Tensor,
};

type Log = Rc<RefCell<Vec<String>>>;

struct Child {
    log: Log,
}

impl Plan<f64> for Child {
    fn apply(&self, _: &mut [f64], input: usize, output: usize) -> Result<(), RdftError> {
        self.log.borrow_mut().push(format!("cld apply {input}->{output}"));
        Ok(())
    }
    fn awake(&mut self, awake: bool) {
        self.log.borrow_mut().push(format!("cld awake {awake}"));
    }
    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("(child)")
    }
    fn ops(&self) -> Ops {
        Ops::new(1, 2, 3, 4)
    }
}

impl Drop for Child {
    fn drop(&mut self) {
        self.log.borrow_mut().push("cld drop".into());
    }
}

struct Pass {
    log: Log,
}

impl CombinePlan<f64> for Pass {
    fn apply(&self, _: &mut [f64], io: usize) -> Result<(), RdftError> {
        self.log.borrow_mut().push(format!("cldw apply {io}"));
        Ok(())
    }
    fn awake(&mut self, awake: bool) {
        self.log.borrow_mut().push(format!("cldw awake {awake}"));
    }
    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("(pass)")
    }
    fn ops(&self) -> Ops {
        Ops::new(10, 20, 30, 40)
    }
}

impl Drop for Pass {
    fn drop(&mut self) {
        self.log.borrow_mut().push("cldw drop".into());
    }
}

fn composite(order: Order, log: &Log) -> CtPlan<f64> {
    CtPlan::new(
        order,
        4,
        Box::new(Child { log: Rc::clone(log) }),
        Box::new(Pass { log: Rc::clone(log) }),
    )
}

#[test]
fn dit_runs_child_then_pass_on_output() {
    let log = Log::default();
    let plan = composite(Order::Dit, &log);
    plan.apply(&mut [0.0; 4], 1, 2).unwrap();
    assert_eq!(*log.borrow(), ["cld apply 1->2", "cldw apply 2"]);
}

#[test]
fn dif_runs_pass_on_input_then_child() {
    let log = Log::default();
    let plan = composite(Order::Dif, &log);
    plan.apply(&mut [0.0; 4], 1, 2).unwrap();
    assert_eq!(*log.borrow(), ["cldw apply 1", "cld apply 1->2"]);
}

#[test]
fn awake_visits_child_first_and_drop_releases_pass_first() {
    let log = Log::default();
    let mut plan = composite(Order::Dit, &log);
    plan.awake(true);
    plan.awake(false);
    drop(plan);
    assert_eq!(
        *log.borrow(),
        [
            "cld awake true",
            "cldw awake true",
            "cld awake false",
            "cldw awake false",
            "cldw drop",
            "cld drop",
        ]
    );
}

#[test]
fn signature_and_cost_combine_children() {
    let log = Log::default();
    let dit = composite(Order::Dit, &log);
    let dif = composite(Order::Dif, &log);
    assert_eq!(signature::<f64>(&dit), "(rdft-ct-dit/4(pass)(child))");
    assert_eq!(signature::<f64>(&dif), "(rdft-ct-dif/4(pass)(child))");
    assert_eq!(dit.ops(), Ops::new(11, 22, 33, 44));
    assert_eq!(dit.radix(), 4);
    assert_eq!(dif.order(), Order::Dif);
}

thread_local! {
    static PASSES_ALIVE: Cell<isize> = const { Cell::new(0) };
    static LAST_REQUEST: RefCell<Option<CombineRequest>> = const { RefCell::new(None) };
}

struct Counted;

impl Counted {
    fn new() -> Self {
        PASSES_ALIVE.with(|c| c.set(c.get() + 1));
        Counted
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        PASSES_ALIVE.with(|c| c.set(c.get() - 1));
    }
}

impl CombinePlan<f64> for Counted {
    fn apply(&self, _: &mut [f64], _: usize) -> Result<(), RdftError> {
        Ok(())
    }
    fn awake(&mut self, _: bool) {}
    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("(counted)")
    }
    fn ops(&self) -> Ops {
        Ops::ZERO
    }
}

fn counted_pass(req: &CombineRequest, _: &mut Planner<f64>) -> Option<Box<dyn CombinePlan<f64>>> {
    LAST_REQUEST.with(|r| *r.borrow_mut() = Some(*req));
    Some(Box::new(Counted::new()))
}

fn no_pass(_: &CombineRequest, _: &mut Planner<f64>) -> Option<Box<dyn CombinePlan<f64>>> {
    None
}

#[test]
fn failed_child_releases_the_pass() {
    // No solver can plan the length-4 sub-transform.
    let mut plnr = Planner::<f64>::new(PlannerConfig::default());
    let solver = make_ct_solver(RadixPolicy::Fixed(2), counted_pass);
    let p = RdftProblem::new(Tensor::rank1(8, 1, 1), Tensor::rank0(), 0, 8, RdftKind::R2hc);
    assert!(solver.mkplan(&p, &mut plnr).is_none());
    assert_eq!(PASSES_ALIVE.with(Cell::get), 0);
}

#[test]
fn failed_pass_aborts_planning() {
    let mut plnr = Planner::<f64>::new(PlannerConfig::default());
    plnr.register(Box::new(DirectSolver));
    let solver = make_ct_solver(RadixPolicy::Fixed(2), no_pass);
    let p = RdftProblem::new(Tensor::rank1(8, 1, 1), Tensor::rank0(), 0, 8, RdftKind::R2hc);
    assert!(solver.mkplan(&p, &mut plnr).is_none());
}

#[test]
fn requests_describe_the_combining_buffer() {
    let mut plnr = Planner::<f64>::new(PlannerConfig::new().with_destroy_input(true));
    plnr.register(Box::new(DirectSolver));
    let solver = make_ct_solver(RadixPolicy::Fixed(3), counted_pass);

    // R2HC: pass over the output, stride os, vector stride ovs.
    let sz = Tensor::rank1(12, 2, 3);
    let vecsz = Tensor::rank1(5, 30, 40);
    let fwd = RdftProblem::new(sz.clone(), vecsz.clone(), 1, 100, RdftKind::R2hc);
    let plan = solver.mkplan(&fwd, &mut plnr).unwrap();
    assert_eq!(
        signature(&*plan),
        "(rdft-ct-dit/3(counted)(rdft-direct-r2hc-4-x15))"
    );
    let req = LAST_REQUEST.with(|r| *r.borrow()).unwrap();
    assert_eq!(
        req,
        CombineRequest {
            kind: RdftKind::R2hc,
            r: 3,
            m: 4,
            s: 3,
            vl: 5,
            vs: 40,
            io: 100,
        }
    );
    drop(plan);

    // HC2R: pass over the input, stride is, vector stride ivs.
    let inv = RdftProblem::new(sz, vecsz, 1, 100, RdftKind::Hc2r);
    let plan = solver.mkplan(&inv, &mut plnr).unwrap();
    assert!(signature(&*plan).starts_with("(rdft-ct-dif/3(counted)"));
    let req = LAST_REQUEST.with(|r| *r.borrow()).unwrap();
    assert_eq!(
        req,
        CombineRequest {
            kind: RdftKind::Hc2r,
            r: 3,
            m: 4,
            s: 2,
            vl: 5,
            vs: 30,
            io: 1,
        }
    );
    drop(plan);
    assert_eq!(PASSES_ALIVE.with(Cell::get), 0);
}

#[test]
fn solver_names_follow_policy() {
    let policies = [
        RadixPolicy::Fixed(4),
        RadixPolicy::FirstDivisor,
        RadixPolicy::SqrtOf(1),
    ];
    let names: Vec<String> = policies
        .into_iter()
        .map(|p| Solver::<f64>::name(&make_ct_solver(p, no_pass)).to_string())
        .collect();
    assert_eq!(names, ["rdft-ct-4", "rdft-ct-first", "rdft-ct-sqrt1"]);
}
