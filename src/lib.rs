//! # rdftplan - planned real-data DFTs for Rust
//!
//! A `no_std` (+ `alloc`) planner for one-dimensional real discrete Fourier
//! transforms. Problems are described by strided size and vector tensors over
//! a single buffer; a cost-driven [`Planner`] searches a registry of solvers
//! and returns the cheapest plan tree it can build.
//!
//! ## Transform kinds
//!
//! - `R2hc`: real input, half-complex output
//! - `Hc2r`: half-complex input, real output (unnormalized inverse)
//! - `R2hcII` / `Hc2rIII`: half-sample shifted variants used for the middle
//!   frequency of even co-sizes
//!
//! ## Solvers
//!
//! - **Cooley-Tukey** ([`ct`]): splits `n = r·m` into a batched length-`m`
//!   sub-transform and a radix-`r` combining pass, by decimation in time for
//!   `R2hc` and decimation in frequency for `Hc2r`
//! - **Direct** ([`direct`]): the O(n²) definition, for every kind
//! - **Vector loop** ([`vrank`]): peels a batching loop off a problem
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls and environment configuration
//! - `verbose-logging`: planner decisions are emitted through `log` at debug
//!   level under the `rdftplan` target
//!
//! ## Example
//!
//! ```
//! use rdftplan::{Placement, RdftPlanner};
//!
//! let mut planner = RdftPlanner::<f64>::new();
//! let plan = planner.plan_r2hc(15, Placement::InPlace).unwrap();
//! let mut data: Vec<f64> = (0..15).map(|i| i as f64).collect();
//! plan.execute_inplace(&mut data).unwrap();
//! assert!((data[0] - 105.0).abs() < 1e-9);
//! ```
//!
//! Run the demo with:
//! ```bash
//! cargo run --example plan_tree --features verbose-logging
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Debug-level trace of planner decisions.
///
/// Compiles to nothing unless the `verbose-logging` feature is enabled.
#[cfg(feature = "verbose-logging")]
macro_rules! plan_log {
    ($($arg:tt)*) => {
        log::debug!(target: "rdftplan", $($arg)*)
    };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! plan_log {
    ($($arg:tt)*) => {{
        if false {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Float trait and complex numbers
pub mod num;

/// Strided loop descriptors
pub mod tensor;

/// Transform problems and their memo keys
pub mod problem;

pub mod ops;

/// Plan and combining-pass traits, errors, and the no-op plan
pub mod plan;

/// Planner flags
pub mod config;

pub mod radix;

/// Solver registry and cost-driven search
pub mod planner;

/// Direct, copy, and no-op solvers
pub mod direct;

pub mod vrank;

/// Cooley-Tukey solver and boundary-pair builder
pub mod ct;

pub mod hc2hc;

/// Contiguous whole-buffer transforms
pub mod rdft;

pub use config::{ConfigError, PlannerConfig};
pub use ct::{
    build_boundary_pair, make_ct_solver, CombineRequest, CtPlan, CtSolver, EdgePair, MakeCombiner,
    Order,
};
pub use hc2hc::make_generic_combiner;
pub use num::{Complex, Complex32, Complex64, Float};
pub use ops::Ops;
pub use plan::{signature, CombinePlan, NopPlan, Plan, RdftError};
pub use planner::{Planner, Solver};
pub use problem::{RdftKind, RdftProblem};
pub use radix::RadixPolicy;
pub use rdft::{
    complex_to_halfcomplex, halfcomplex_to_complex, Placement, RdftPlanner, RealPlan,
};
pub use tensor::{IoDim, Tensor};
