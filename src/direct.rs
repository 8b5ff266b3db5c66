//! Elementary solvers: the O(n²) definition of every transform kind, the
//! rank-0 copy, and the no-op.
//!
//! The direct plan gathers the input of every vector iteration before it
//! writes any output, so it is correct for arbitrary overlap between the
//! input and output regions. It is the base case the Cooley-Tukey recursion
//! bottoms out in.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::num::{Complex, Float};
use crate::ops::Ops;
use crate::plan::{boxed, check_span, NopPlan, Plan, RdftError};
use crate::planner::{Planner, Solver};
use crate::problem::{RdftKind, RdftProblem};
use crate::tensor::Tensor;

/// Plans any rank-1 problem by evaluating the DFT definition, and rank-0
/// out-of-place problems as strided copies.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectSolver;

impl<T: Float> Solver<T> for DirectSolver {
    fn name(&self) -> &str {
        "rdft-direct"
    }

    fn mkplan(&self, p: &RdftProblem, _plnr: &mut Planner<T>) -> Option<Box<dyn Plan<T>>> {
        match p.sz.dims.as_slice() {
            [] if !p.is_inplace() => Some(boxed(DirectPlan::new(p.kind, 1, 0, 0, &p.vecsz, true))),
            [d] if d.n > 0 => Some(boxed(DirectPlan::new(p.kind, d.n, d.is, d.os, &p.vecsz, false))),
            _ => None,
        }
    }
}

/// Plans in-place rank-0 problems whose vector loops map every element onto
/// itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopSolver;

impl<T: Float> Solver<T> for NopSolver {
    fn name(&self) -> &str {
        "rdft-nop"
    }

    fn mkplan(&self, p: &RdftProblem, _plnr: &mut Planner<T>) -> Option<Box<dyn Plan<T>>> {
        (p.sz.rank() == 0 && p.is_inplace() && p.vecsz.inplace_strides())
            .then(|| boxed(NopPlan))
    }
}

pub struct DirectPlan<T: Float> {
    kind: RdftKind,
    n: usize,
    is: usize,
    os: usize,
    /// `(input, output)` offset of every vector iteration.
    loops: Vec<(usize, usize)>,
    span_in: usize,
    span_out: usize,
    rank0: bool,
    /// `e^{-iπt/n}` for `t = 0..2n`, present while awake.
    roots: Option<Vec<Complex<T>>>,
}

impl<T: Float> DirectPlan<T> {
    fn new(kind: RdftKind, n: usize, is: usize, os: usize, vecsz: &Tensor, rank0: bool) -> Self {
        let mut loops = Vec::with_capacity(vecsz.total());
        vecsz.for_each_offset(|i, o| loops.push((i, o)));
        let (vi, vo) = vecsz.max_offsets();
        Self {
            kind,
            n,
            is,
            os,
            loops,
            span_in: vi + (n - 1) * is,
            span_out: vo + (n - 1) * os,
            rank0,
            roots: None,
        }
    }

    fn transform(&self, roots: &[Complex<T>], x: &[T], y: &mut [T]) {
        let n = self.n;
        let two_n = 2 * n;
        match self.kind {
            RdftKind::R2hc => {
                for k in 0..=n / 2 {
                    let acc = forward_sum(roots, x, 2 * k, two_n);
                    y[k] = acc.re;
                    if k > 0 && k < n - k {
                        y[n - k] = acc.im;
                    }
                }
            }
            RdftKind::R2hcII => {
                for k in 0..n.div_ceil(2) {
                    let acc = forward_sum(roots, x, 2 * k + 1, two_n);
                    y[k] = acc.re;
                    if k < n - 1 - k {
                        y[n - 1 - k] = acc.im;
                    }
                }
            }
            RdftKind::Hc2r => {
                let spectrum = unpack_halfcomplex(x);
                for (j, out) in y.iter_mut().enumerate() {
                    *out = inverse_sum(roots, &spectrum, 2 * j, 0, two_n);
                }
            }
            RdftKind::Hc2rIII => {
                let spectrum = unpack_shifted(x);
                for (j, out) in y.iter_mut().enumerate() {
                    *out = inverse_sum(roots, &spectrum, 2 * j, j, two_n);
                }
            }
        }
    }
}

/// `Σ_j x_j e^{-iπ j·step/n}`.
fn forward_sum<T: Float>(roots: &[Complex<T>], x: &[T], step: usize, two_n: usize) -> Complex<T> {
    let mut acc = Complex::zero();
    let mut t = 0usize;
    for &xj in x {
        let w = roots[t];
        acc.re = xj.mul_add(w.re, acc.re);
        acc.im = xj.mul_add(w.im, acc.im);
        t = (t + step) % two_n;
    }
    acc
}

/// `Σ_k Re(Y_k e^{+iπ (k·step + offset)/n})`.
fn inverse_sum<T: Float>(
    roots: &[Complex<T>],
    spectrum: &[Complex<T>],
    step: usize,
    offset: usize,
    two_n: usize,
) -> T {
    let mut acc = T::zero();
    let mut t = offset % two_n;
    for y in spectrum {
        // Re(y · conj(w)) with w = e^{-iπt/n}.
        let w = roots[t];
        acc = y.re.mul_add(w.re, y.im.mul_add(w.im, acc));
        t = (t + step) % two_n;
    }
    acc
}

/// Full Hermitian spectrum from the `R2hc` layout.
pub(crate) fn unpack_halfcomplex<T: Float>(h: &[T]) -> Vec<Complex<T>> {
    let n = h.len();
    let mut y = vec![Complex::zero(); n];
    y[0] = Complex::new(h[0], T::zero());
    for k in 1..n.div_ceil(2) {
        let c = Complex::new(h[k], h[n - k]);
        y[k] = c;
        y[n - k] = c.conj();
    }
    if n % 2 == 0 && n > 0 {
        y[n / 2] = Complex::new(h[n / 2], T::zero());
    }
    y
}

/// Full spectrum `Y_{n-1-k} = conj Y_k` from the `R2hcII` layout.
pub(crate) fn unpack_shifted<T: Float>(h: &[T]) -> Vec<Complex<T>> {
    let n = h.len();
    let mut y = vec![Complex::zero(); n];
    for k in 0..n / 2 {
        let c = Complex::new(h[k], h[n - 1 - k]);
        y[k] = c;
        y[n - 1 - k] = c.conj();
    }
    if n % 2 == 1 {
        y[n / 2] = Complex::new(h[n / 2], T::zero());
    }
    y
}

impl<T: Float> Plan<T> for DirectPlan<T> {
    fn apply(&self, buf: &mut [T], input: usize, output: usize) -> Result<(), RdftError> {
        check_span(buf.len(), input, self.span_in)?;
        check_span(buf.len(), output, self.span_out)?;
        let n = self.n;
        if self.rank0 {
            let gathered: Vec<T> = self.loops.iter().map(|&(vi, _)| buf[input + vi]).collect();
            for (&(_, vo), v) in self.loops.iter().zip(gathered) {
                buf[output + vo] = v;
            }
            return Ok(());
        }
        let roots = self.roots.as_deref().ok_or(RdftError::Asleep)?;

        let mut gathered = Vec::with_capacity(self.loops.len() * n);
        for &(vi, _) in &self.loops {
            let base = input + vi;
            gathered.extend((0..n).map(|j| buf[base + j * self.is]));
        }
        let mut y = vec![T::zero(); n];
        for (x, &(_, vo)) in gathered.chunks_exact(n).zip(&self.loops) {
            self.transform(roots, x, &mut y);
            let base = output + vo;
            for (k, &v) in y.iter().enumerate() {
                buf[base + k * self.os] = v;
            }
        }
        Ok(())
    }

    fn awake(&mut self, awake: bool) {
        if !awake {
            self.roots = None;
        } else if self.roots.is_none() && !self.rank0 {
            let two_n = 2 * self.n;
            let step = -core::f64::consts::TAU / two_n as f64;
            self.roots = Some((0..two_n).map(|t| Complex::expi(step * t as f64)).collect());
        }
    }

    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        if self.rank0 {
            write!(out, "(rdft-rank0-copy-x{})", self.loops.len())
        } else if self.loops.len() > 1 {
            write!(out, "(rdft-direct-{}-{}-x{})", self.kind, self.n, self.loops.len())
        } else {
            write!(out, "(rdft-direct-{}-{})", self.kind, self.n)
        }
    }

    fn ops(&self) -> Ops {
        let vl = self.loops.len();
        if self.rank0 {
            return Ops::new(0, 0, 0, 1).scale(vl);
        }
        let n = self.n as u64;
        Ops::new(0, 0, 2 * n * n, n).scale(vl)
    }
}
