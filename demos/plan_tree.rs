//! Plans a real transform, prints the chosen plan tree and the spectrum.
//!
//! ```bash
//! RUST_LOG=rdftplan=debug cargo run --example plan_tree --features verbose-logging -- 15
//! ```
use rdftplan::{halfcomplex_to_complex, Placement, PlannerConfig, RdftPlanner};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let n: usize = std::env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(15);
    let config = match PlannerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("ignoring environment: {e}");
            PlannerConfig::default()
        }
    };

    let mut planner = RdftPlanner::<f64>::with_config(config);
    let Some(plan) = planner.plan_r2hc(n, Placement::OutOfPlace) else {
        eprintln!("no plan for n = {n}");
        std::process::exit(1);
    };
    log::info!("plan: {}", plan.signature());
    log::info!("ops: {:?} (total {})", plan.ops(), plan.ops().total());

    let mut input: Vec<f64> = (0..n).map(|j| (j as f64 * 0.5).cos() + 0.25).collect();
    let mut output = vec![0.0; n];
    if let Err(e) = plan.execute(&mut input, &mut output) {
        eprintln!("execution failed: {e}");
        std::process::exit(1);
    }
    for (k, bin) in halfcomplex_to_complex(&output).iter().enumerate() {
        println!("Y[{k:3}] = {:>12.6} {:+.6}i", bin.re, bin.im);
    }
}
