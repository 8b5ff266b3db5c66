//! Executable plan nodes.
//!
//! Every plan executes over one arena slice. Offsets passed to `apply` play
//! the role of buffer pointers: equal input and output offsets mean the plan
//! runs in place. Dropping a plan releases it and every child it owns.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::num::Float;
use crate::ops::Ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdftError {
    /// A plan holding per-execution tables ran before `awake(true)`.
    Asleep,
    /// The arena is too short for the offsets and strides of the plan.
    OutOfBounds,
    MismatchedLengths,
    EmptyInput,
}

impl fmt::Display for RdftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdftError::Asleep => f.write_str("plan applied before awake(true)"),
            RdftError::OutOfBounds => f.write_str("plan addresses elements past the buffer end"),
            RdftError::MismatchedLengths => f.write_str("buffer length does not match the plan"),
            RdftError::EmptyInput => f.write_str("empty input"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RdftError {}

/// A transform from the `input` offset to the `output` offset of `buf`.
pub trait Plan<T: Float> {
    fn apply(&self, buf: &mut [T], input: usize, output: usize) -> Result<(), RdftError>;
    /// Acquire (`true`) or release (`false`) per-execution resources.
    /// Repeated calls with the same flag are no-ops.
    fn awake(&mut self, awake: bool);
    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result;
    fn ops(&self) -> Ops;
}

/// A single-buffer combining pass, run in place at offset `io`.
pub trait CombinePlan<T: Float> {
    fn apply(&self, buf: &mut [T], io: usize) -> Result<(), RdftError>;
    fn awake(&mut self, awake: bool);
    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result;
    fn ops(&self) -> Ops;
}

impl<T: Float> fmt::Debug for dyn Plan<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<T: Float> fmt::Debug for dyn CombinePlan<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

/// Render the structural signature of a plan.
pub fn signature<T: Float>(plan: &dyn Plan<T>) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = plan.print(&mut s);
    s
}

/// Render the structural signature of a combining pass.
pub fn combine_signature<T: Float>(plan: &dyn CombinePlan<T>) -> String {
    let mut s = String::new();
    let _ = plan.print(&mut s);
    s
}

/// Zero-cost plan that leaves the buffer untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopPlan;

impl<T: Float> Plan<T> for NopPlan {
    fn apply(&self, _buf: &mut [T], _input: usize, _output: usize) -> Result<(), RdftError> {
        Ok(())
    }

    fn awake(&mut self, _awake: bool) {}

    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("(rdft-nop)")
    }

    fn ops(&self) -> Ops {
        Ops::ZERO
    }
}

/// Box a plan as a trait object.
pub(crate) fn boxed<T: Float, P: Plan<T> + 'static>(p: P) -> Box<dyn Plan<T>> {
    Box::new(p)
}

/// Check that `base + last` stays inside a buffer of `len` elements.
#[inline]
pub(crate) fn check_span(len: usize, base: usize, last: usize) -> Result<(), RdftError> {
    match base.checked_add(last) {
        Some(end) if end < len => Ok(()),
        _ => Err(RdftError::OutOfBounds),
    }
}
