//! Radix selection policies for Cooley-Tukey decompositions.

use core::fmt;

/// How a Cooley-Tukey solver picks its radix for a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadixPolicy {
    /// Always this radix; inapplicable when it does not divide `n`.
    Fixed(usize),
    /// Smallest prime factor of `n`.
    FirstDivisor,
    /// For `n = k·q²` pick `q`, splitting the transform into two square-ish
    /// halves.
    SqrtOf(usize),
}

impl fmt::Display for RadixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadixPolicy::Fixed(r) => write!(f, "{r}"),
            RadixPolicy::FirstDivisor => f.write_str("first"),
            RadixPolicy::SqrtOf(k) => write!(f, "sqrt{k}"),
        }
    }
}

/// Radix for a length-`n` transform under `policy`, or `None` when the policy
/// does not apply.
pub fn choose_radix(policy: RadixPolicy, n: usize) -> Option<usize> {
    match policy {
        RadixPolicy::Fixed(r) => (r > 1 && n % r == 0).then_some(r),
        RadixPolicy::FirstDivisor => first_divisor(n),
        RadixPolicy::SqrtOf(k) => {
            if k == 0 || n % k != 0 {
                return None;
            }
            let sq = n / k;
            let q = isqrt(sq);
            (q > 1 && q * q == sq).then_some(q)
        }
    }
}

/// Smallest factor `> 1` of `n`.
pub fn first_divisor(n: usize) -> Option<usize> {
    if n < 2 {
        return None;
    }
    if n % 2 == 0 {
        return Some(2);
    }
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return Some(i);
        }
        i += 2;
    }
    Some(n)
}

/// Integer square root, rounded down.
pub fn isqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    // Newton iteration from an upper bound.
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
