//! Operation counts used to compare candidate plans.

use core::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ops {
    pub add: u64,
    pub mul: u64,
    pub fma: u64,
    pub other: u64,
}

impl Ops {
    pub const ZERO: Ops = Ops {
        add: 0,
        mul: 0,
        fma: 0,
        other: 0,
    };

    pub const fn new(add: u64, mul: u64, fma: u64, other: u64) -> Self {
        Self {
            add,
            mul,
            fma,
            other,
        }
    }

    /// Counts for `k` repetitions of the same work.
    pub fn scale(self, k: usize) -> Self {
        let k = k as u64;
        Self {
            add: self.add.saturating_mul(k),
            mul: self.mul.saturating_mul(k),
            fma: self.fma.saturating_mul(k),
            other: self.other.saturating_mul(k),
        }
    }

    /// Scalar cost; a fused multiply-add counts as two flops.
    pub fn total(&self) -> u64 {
        self.add
            .saturating_add(self.mul)
            .saturating_add(self.fma.saturating_mul(2))
            .saturating_add(self.other)
    }
}

impl Add for Ops {
    type Output = Ops;
    fn add(self, rhs: Ops) -> Ops {
        Ops {
            add: self.add.saturating_add(rhs.add),
            mul: self.mul.saturating_add(rhs.mul),
            fma: self.fma.saturating_add(rhs.fma),
            other: self.other.saturating_add(rhs.other),
        }
    }
}

impl AddAssign for Ops {
    fn add_assign(&mut self, rhs: Ops) {
        *self = *self + rhs;
    }
}
