//! Strided size descriptors.
//!
//! A [`Tensor`] is an ordered list of [`IoDim`] loops. The first dimension is
//! the outermost loop. Rank 0 means "no looping" and acts as the neutral
//! element of [`Tensor::append`].

use alloc::vec::Vec;

/// One strided loop: `n` iterations, advancing the input by `is` and the
/// output by `os` elements per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoDim {
    pub n: usize,
    pub is: usize,
    pub os: usize,
}

impl IoDim {
    pub const fn new(n: usize, is: usize, os: usize) -> Self {
        Self { n, is, os }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Tensor {
    pub dims: Vec<IoDim>,
}

impl Tensor {
    pub fn rank0() -> Self {
        Self { dims: Vec::new() }
    }

    pub fn rank1(n: usize, is: usize, os: usize) -> Self {
        Self {
            dims: alloc::vec![IoDim::new(n, is, os)],
        }
    }

    pub fn from_dims(dims: Vec<IoDim>) -> Self {
        Self { dims }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Concatenate two descriptors into nested loops, `self` outermost.
    pub fn append(&self, inner: &Tensor) -> Tensor {
        let mut dims = Vec::with_capacity(self.dims.len() + inner.dims.len());
        dims.extend_from_slice(&self.dims);
        dims.extend_from_slice(&inner.dims);
        Tensor { dims }
    }

    /// Collapse a rank ≤ 1 descriptor into `(length, input_stride, output_stride)`.
    ///
    /// Rank 0 yields `(1, 0, 0)`.
    ///
    /// # Panics
    /// Panics if the rank exceeds one.
    pub fn to_rank1(&self) -> (usize, usize, usize) {
        match self.dims.as_slice() {
            [] => (1, 0, 0),
            [d] => (d.n, d.is, d.os),
            _ => panic!("tensor of rank {} cannot collapse to rank 1", self.rank()),
        }
    }

    /// Product of all loop lengths; 1 for rank 0.
    pub fn total(&self) -> usize {
        self.dims.iter().map(|d| d.n).product()
    }

    /// True when every loop advances input and output by the same stride,
    /// the precondition for looping over an in-place problem.
    pub fn inplace_strides(&self) -> bool {
        self.dims.iter().all(|d| d.is == d.os)
    }

    /// Split off the outermost loop.
    pub fn split_first(&self) -> Option<(IoDim, Tensor)> {
        let (first, rest) = self.dims.split_first()?;
        Some((*first, Tensor::from_dims(rest.to_vec())))
    }

    /// Largest `(input, output)` offsets reached by the loops.
    pub fn max_offsets(&self) -> (usize, usize) {
        self.dims.iter().fold((0, 0), |(i, o), d| {
            let span = d.n.saturating_sub(1);
            (i + span * d.is, o + span * d.os)
        })
    }

    /// Visit the `(input, output)` offset of every loop iteration in row-major
    /// order (the last dimension varies fastest).
    pub fn for_each_offset<F: FnMut(usize, usize)>(&self, mut f: F) {
        fn walk<F: FnMut(usize, usize)>(dims: &[IoDim], i: usize, o: usize, f: &mut F) {
            match dims.split_first() {
                None => f(i, o),
                Some((d, rest)) => {
                    for k in 0..d.n {
                        walk(rest, i + k * d.is, o + k * d.os, f);
                    }
                }
            }
        }
        walk(&self.dims, 0, 0, &mut f);
    }
}
