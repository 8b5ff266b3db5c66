// Test intent: decimation-in-frequency plans invert R2HC up to the factor n,
// consume their input, and respect the destroy-input flag.
use proptest::prelude::*;
use rdftplan::direct::DirectSolver;
use rdftplan::{
    make_ct_solver, make_generic_combiner, signature, Placement, Planner, PlannerConfig,
    RadixPolicy, RdftKind, RdftPlanner, RdftProblem, Solver, Tensor,
};

/// Real signal of length `n` whose half-complex spectrum is `hc`, scaled by `n`.
fn reference_hc2r(hc: &[f64]) -> Vec<f64> {
    let n = hc.len();
    (0..n)
        .map(|j| {
            let mut acc = hc[0];
            for k in 1..n.div_ceil(2) {
                let ang = 2.0 * std::f64::consts::PI * ((j * k) % n) as f64 / n as f64;
                acc += 2.0 * (hc[k] * ang.cos() - hc[n - k] * ang.sin());
            }
            if n % 2 == 0 {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                acc += sign * hc[n / 2];
            }
            acc
        })
        .collect()
}

fn assert_close(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len());
    for (i, (a, b)) in got.iter().zip(want).enumerate() {
        assert!((a - b).abs() < tol, "index {i}: {a} vs {b}");
    }
}

fn planner_with(policy: RadixPolicy, config: PlannerConfig) -> Planner<f64> {
    let mut plnr = Planner::new(config);
    plnr.register(Box::new(DirectSolver));
    plnr.register(Box::new(make_ct_solver(policy, make_generic_combiner::<f64>)));
    plnr
}

fn spectrum(n: usize) -> Vec<f64> {
    (0..n).map(|k| ((k * 5 + 3) % 7) as f64 - 3.0).collect()
}

#[test]
fn in_place_hc2r_uses_dif() {
    let hc = spectrum(15);
    let mut plnr = planner_with(RadixPolicy::Fixed(3), PlannerConfig::default());
    let p = RdftProblem::one(Tensor::rank1(15, 1, 1), Tensor::rank0(), 0, RdftKind::Hc2r);
    let mut plan = plnr.mkplan(&p).unwrap();
    assert!(signature(&*plan).starts_with("(rdft-ct-dif/3(hc2hc-generic-dif-3x5"));
    plan.awake(true);
    let mut buf = hc.clone();
    plan.apply(&mut buf, 0, 0).unwrap();
    assert_close(&buf, &reference_hc2r(&hc), 1e-9);
}

#[test]
fn even_cosize_runs_the_middle_edge() {
    // n = 12 = 2·6: the m/2 column goes through the shifted inverse.
    let hc = spectrum(12);
    let mut plnr = planner_with(RadixPolicy::Fixed(2), PlannerConfig::default());
    let p = RdftProblem::one(Tensor::rank1(12, 1, 1), Tensor::rank0(), 0, RdftKind::Hc2r);
    let mut plan = plnr.mkplan(&p).unwrap();
    let sig = signature(&*plan);
    assert!(sig.contains("(rdft-direct-hc2rIII-2)"), "{sig}");
    plan.awake(true);
    let mut buf = hc.clone();
    plan.apply(&mut buf, 0, 0).unwrap();
    assert_close(&buf, &reference_hc2r(&hc), 1e-9);
}

#[test]
fn out_of_place_requires_destroy_input() {
    let p = RdftProblem::new(Tensor::rank1(16, 1, 1), Tensor::rank0(), 0, 16, RdftKind::Hc2r);
    let solver = make_ct_solver(RadixPolicy::Fixed(2), make_generic_combiner::<f64>);

    let mut keep = planner_with(RadixPolicy::Fixed(2), PlannerConfig::default());
    assert!(solver.mkplan(&p, &mut keep).is_none());
    assert_eq!(signature(&*keep.mkplan(&p).unwrap()), "(rdft-direct-hc2r-16)");

    let mut clobber =
        planner_with(RadixPolicy::Fixed(2), PlannerConfig::new().with_destroy_input(true));
    let mut plan = solver.mkplan(&p, &mut clobber).unwrap();
    plan.awake(true);
    let hc = spectrum(16);
    let mut buf = hc.clone();
    buf.resize(32, 0.0);
    plan.apply(&mut buf, 0, 16).unwrap();
    assert_close(&buf[16..], &reference_hc2r(&hc), 1e-9);
    // The combining pass ran on the input.
    assert_ne!(&buf[..16], &hc[..]);
}

#[test]
fn convenience_plans_keep_input_without_permission() {
    let n = 20;
    let hc = spectrum(n);
    let mut planner = RdftPlanner::<f64>::new();
    let plan = planner.plan_hc2r(n, Placement::OutOfPlace).unwrap();
    let mut input = hc.clone();
    let mut out = vec![0.0; n];
    plan.execute(&mut input, &mut out).unwrap();
    assert_eq!(input, hc);
    assert_close(&out, &reference_hc2r(&hc), 1e-9);
}

proptest! {
    #[test]
    fn r2hc_then_hc2r_scales_by_n(
        x in (1usize..64).prop_flat_map(|n| prop::collection::vec(-5.0f64..5.0, n)),
    ) {
        let n = x.len();
        let mut planner = RdftPlanner::<f64>::new();
        let fwd = planner.plan_r2hc(n, Placement::InPlace).unwrap();
        let inv = planner.plan_hc2r(n, Placement::InPlace).unwrap();
        let mut data = x.clone();
        fwd.execute_inplace(&mut data).unwrap();
        inv.execute_inplace(&mut data).unwrap();
        for (got, want) in data.iter().zip(&x) {
            prop_assert!((got / n as f64 - want).abs() < 1e-9);
        }
    }

    #[test]
    fn destructive_out_of_place_matches_definition(n in 2usize..48) {
        let hc = spectrum(n);
        let cfg = PlannerConfig::new().with_destroy_input(true);
        let mut planner = RdftPlanner::<f64>::with_config(cfg);
        let plan = planner.plan_hc2r(n, Placement::OutOfPlace).unwrap();
        let mut input = hc.clone();
        let mut out = vec![0.0; n];
        plan.execute(&mut input, &mut out).unwrap();
        let want = reference_hc2r(&hc);
        for (a, b) in out.iter().zip(&want) {
            prop_assert!((a - b).abs() < 1e-8 * n as f64);
        }
    }

    #[test]
    fn out_of_place_split_needs_destroy_input_for_every_radix(n in 4usize..64) {
        let p = RdftProblem::new(Tensor::rank1(n, 1, 1), Tensor::rank0(), 0, n, RdftKind::Hc2r);
        for r in (2..n).filter(|r| n % r == 0) {
            let solver = make_ct_solver(RadixPolicy::Fixed(r), make_generic_combiner::<f64>);
            let mut keep = planner_with(RadixPolicy::Fixed(r), PlannerConfig::default());
            prop_assert!(solver.mkplan(&p, &mut keep).is_none(), "n={} r={}", n, r);
            let mut clobber =
                planner_with(RadixPolicy::Fixed(r), PlannerConfig::new().with_destroy_input(true));
            prop_assert!(solver.mkplan(&p, &mut clobber).is_some(), "n={} r={}", n, r);
        }
    }
}
