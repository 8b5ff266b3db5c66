//! Generic radix-`r` combining pass for half-complex data.
//!
//! The buffer holds `r` blocks of `m` elements at stride `s`; block `j`
//! starts at element `j·m`. Each block is a length-`m` half-complex spectrum
//! (after the sub-transform in decimation-in-time order, or before it in
//! decimation-in-frequency order). Frequency indices `0` and `m/2` are
//! handled by the boundary plans, every other pair `(k1, m-k1)` by a twiddled
//! length-`r` complex DFT evaluated from its definition.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::TAU;
use core::fmt;

use crate::ct::{build_boundary_pair, CombineRequest, EdgePair, Order};
use crate::num::{Complex, Float};
use crate::ops::Ops;
use crate::plan::{check_span, CombinePlan, RdftError};
use crate::planner::Planner;
use crate::problem::RdftKind;

/// [`MakeCombiner`](crate::ct::MakeCombiner) for any radix and co-size.
///
/// Handles `R2hc` requests in decimation-in-time order and `Hc2r` requests in
/// decimation-in-frequency order; the shifted kinds are refused.
pub fn make_generic_combiner<T: Float>(
    req: &CombineRequest,
    plnr: &mut Planner<T>,
) -> Option<Box<dyn CombinePlan<T>>> {
    let order = match req.kind {
        RdftKind::R2hc => Order::Dit,
        RdftKind::Hc2r => Order::Dif,
        RdftKind::R2hcII | RdftKind::Hc2rIII => return None,
    };
    if req.r < 2 || req.m < 2 {
        return None;
    }
    let edges = build_boundary_pair(req.kind, req.r, req.m, req.s, req.io, plnr)?;
    Some(Box::new(GenericCombiner::new(order, req, edges)))
}

struct Tables<T: Float> {
    /// `ω_n^{j·k1}` for interior `k1` and `j = 1..r`, row-major by `k1`.
    twiddles: Vec<Complex<T>>,
    /// `ω_r^t` for `t = 0..r`.
    roots: Vec<Complex<T>>,
}

pub struct GenericCombiner<T: Float> {
    edges: EdgePair<T>,
    order: Order,
    r: usize,
    m: usize,
    s: usize,
    vl: usize,
    vs: usize,
    tables: Option<Tables<T>>,
    ops: Ops,
}

impl<T: Float> GenericCombiner<T> {
    fn new(order: Order, req: &CombineRequest, edges: EdgePair<T>) -> Self {
        let r = req.r as u64;
        let columns = (req.m - 1) / 2;
        let per_column = Ops::new(2 * r * r, 2 * (r * r + r - 1), 2 * (r * r + r - 1), 4 * r);
        let ops = (edges.ops() + per_column.scale(columns)).scale(req.vl);
        Self {
            edges,
            order,
            r: req.r,
            m: req.m,
            s: req.s,
            vl: req.vl,
            vs: req.vs,
            tables: None,
            ops,
        }
    }

    fn columns(&self) -> usize {
        (self.m - 1) / 2
    }

    /// Element index of position `pos` of the length-`n` dimension.
    #[inline(always)]
    fn at(&self, base: usize, pos: usize) -> usize {
        base + pos * self.s
    }

    /// Twiddle, then DFT across blocks, writing `Y_{k1 + m·k2}` back into
    /// the half-complex output.
    fn dit_column(
        &self,
        buf: &mut [T],
        base: usize,
        k1: usize,
        t: &Tables<T>,
        a: &mut [Complex<T>],
        y: &mut [Complex<T>],
    ) {
        let (r, m) = (self.r, self.m);
        let n = r * m;
        let tw = &t.twiddles[(k1 - 1) * (r - 1)..k1 * (r - 1)];
        for (j, aj) in a.iter_mut().enumerate() {
            let c = Complex::new(
                buf[self.at(base, j * m + k1)],
                buf[self.at(base, j * m + m - k1)],
            );
            *aj = if j == 0 { c } else { c.mul(tw[j - 1]) };
        }
        for (k2, yk) in y.iter_mut().enumerate() {
            let mut acc = Complex::zero();
            for (j, aj) in a.iter().enumerate() {
                acc = acc + aj.mul(t.roots[(j * k2) % r]);
            }
            *yk = acc;
        }
        for (k2, yk) in y.iter().enumerate() {
            let k = k1 + m * k2;
            if 2 * k < n {
                buf[self.at(base, k)] = yk.re;
                buf[self.at(base, n - k)] = yk.im;
            } else {
                // Upper half: store the conjugate coefficient Y_{n-k}.
                buf[self.at(base, n - k)] = yk.re;
                buf[self.at(base, k)] = -yk.im;
            }
        }
    }

    /// Inverse of [`Self::dit_column`]: unpack `Y_{k1 + m·k2}`, inverse DFT
    /// across blocks, untwiddle, and store block `j`'s coefficient `k1`.
    fn dif_column(
        &self,
        buf: &mut [T],
        base: usize,
        k1: usize,
        t: &Tables<T>,
        a: &mut [Complex<T>],
        y: &mut [Complex<T>],
    ) {
        let (r, m) = (self.r, self.m);
        let n = r * m;
        let tw = &t.twiddles[(k1 - 1) * (r - 1)..k1 * (r - 1)];
        for (k2, ak) in a.iter_mut().enumerate() {
            let k = k1 + m * k2;
            *ak = if 2 * k < n {
                Complex::new(buf[self.at(base, k)], buf[self.at(base, n - k)])
            } else {
                Complex::new(buf[self.at(base, n - k)], -buf[self.at(base, k)])
            };
        }
        for (j, yj) in y.iter_mut().enumerate() {
            let mut acc = Complex::zero();
            for (k2, ak) in a.iter().enumerate() {
                acc = acc + ak.mul(t.roots[(j * k2) % r].conj());
            }
            *yj = if j == 0 { acc } else { acc.mul(tw[j - 1].conj()) };
        }
        for (j, yj) in y.iter().enumerate() {
            buf[self.at(base, j * m + k1)] = yj.re;
            buf[self.at(base, j * m + m - k1)] = yj.im;
        }
    }
}

impl<T: Float> CombinePlan<T> for GenericCombiner<T> {
    fn apply(&self, buf: &mut [T], io: usize) -> Result<(), RdftError> {
        if self.vl == 0 {
            return Ok(());
        }
        let n = self.r * self.m;
        check_span(buf.len(), io, (self.vl - 1) * self.vs + (n - 1) * self.s)?;
        let tables = self.tables.as_ref().ok_or(RdftError::Asleep)?;

        let mut a = vec![Complex::zero(); self.r];
        let mut y = vec![Complex::zero(); self.r];
        for v in 0..self.vl {
            let base = io + v * self.vs;
            // The boundary columns touch positions disjoint from the interior.
            self.edges.edge0.apply(buf, base, base)?;
            let mid = self.at(base, self.m / 2);
            self.edges.edge_mid.apply(buf, mid, mid)?;
            for k1 in 1..=self.columns() {
                match self.order {
                    Order::Dit => self.dit_column(buf, base, k1, tables, &mut a, &mut y),
                    Order::Dif => self.dif_column(buf, base, k1, tables, &mut a, &mut y),
                }
            }
        }
        Ok(())
    }

    fn awake(&mut self, awake: bool) {
        self.edges.awake(awake);
        if !awake {
            self.tables = None;
            return;
        }
        if self.tables.is_some() {
            return;
        }
        let (r, n) = (self.r, self.r * self.m);
        let mut twiddles = Vec::with_capacity(self.columns() * (r - 1));
        for k1 in 1..=self.columns() {
            for j in 1..r {
                let t = (j * k1) % n;
                twiddles.push(Complex::expi(-TAU * t as f64 / n as f64));
            }
        }
        let roots = (0..r)
            .map(|t| Complex::expi(-TAU * t as f64 / r as f64))
            .collect();
        self.tables = Some(Tables { twiddles, roots });
    }

    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "(hc2hc-generic-{}-{}x{}", self.order, self.r, self.m)?;
        if self.vl > 1 {
            write!(out, "-x{}", self.vl)?;
        }
        self.edges.edge0.print(out)?;
        self.edges.edge_mid.print(out)?;
        out.write_char(')')
    }

    fn ops(&self) -> Ops {
        self.ops
    }
}
