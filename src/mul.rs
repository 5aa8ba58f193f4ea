//! Schoolbook and Karatsuba multiplication over limb windows.
//!
//! Recursion operates on aliasing sub-slices of the operand windows, split
//! along limb boundaries from the least significant end; only the per-level
//! outputs and the middle term allocate. Operands must not be mutated while
//! a multiply is running.

use crate::buffer::{Limb, Limbs, BASE};
use crate::math::{large, small};
use crate::slice::Slice;

/// Recursion cutoff below which Karatsuba falls through to the grade-school
/// loop. Tuned on even mid-size operands; 40-50 limbs measured best.
pub const DEFAULT_KARATSUBA_THRESHOLD: usize = 40;

/// Fork depth after which parallel Karatsuba continues sequentially.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Minimum operand size, in limbs, for the `multiply` convenience to go
/// parallel. Below this the fork overhead outweighs the work.
pub(crate) const PARALLEL_CUTOFF_LIMBS: usize = 256;

/// Grade-school multiplication.
///
/// One row per limb of `x`, reduced modulo `BASE` as it goes. A row term is
/// at most `BASE - 1 + (BASE - 1)² + (BASE - 1) = BASE² - 1`, so the `u64`
/// accumulator cannot overflow.
pub(crate) fn long_mul(x: &[Limb], y: &[Limb]) -> Limbs {
    let mut out = vec![0; x.len() + y.len()];
    let y_digits = y.rview();
    for i in 0..x.len() {
        let xi = *x.rindex(i);
        if xi == 0 {
            continue;
        }
        let mut carry = 0;
        for j in 0..y.len() {
            let acc = *out.rindex(i + j) + xi * y_digits[j] + carry;
            *out.rindex_mut(i + j) = acc % BASE;
            carry = acc / BASE;
        }
        let mut pos = i + y.len();
        while carry > 0 {
            let acc = *out.rindex(pos) + carry;
            *out.rindex_mut(pos) = acc % BASE;
            carry = acc / BASE;
            pos += 1;
        }
    }
    let mut z = Limbs::from_vec(out);
    small::normalize(&mut z);
    z
}

/// Split a window `m` limbs from the least significant end.
///
/// Returns `(high, low)`; the high half is empty when the window is short,
/// which downstream treats as zero.
#[inline]
fn split(z: &[Limb], m: usize) -> (&[Limb], &[Limb]) {
    if z.len() <= m {
        (&[], z)
    } else {
        z.split_at(z.len() - m)
    }
}

/// z2·BASE^2m + z1·BASE^m + z0, accumulated into the z0 buffer.
fn assemble(z0: Limbs, z1: &Limbs, z2: &Limbs, m: usize) -> Limbs {
    let mut result = z0;
    if !z1.is_zero() {
        large::iadd(&mut result, z1.as_slice(), m);
    }
    if !z2.is_zero() {
        large::iadd(&mut result, z2.as_slice(), 2 * m);
    }
    small::normalize(&mut result);
    result
}

/// Karatsuba multiplication, sequential.
pub(crate) fn karatsuba_mul(x: &[Limb], y: &[Limb], threshold: usize) -> Limbs {
    let threshold = threshold.max(1);
    if x.is_empty() || y.is_empty() {
        return Limbs::zero();
    }
    if x.len().min(y.len()) <= threshold {
        return long_mul(x, y);
    }
    if 2 * x.len() < y.len() {
        return uneven_mul(x, y, threshold);
    }
    if 2 * y.len() < x.len() {
        return uneven_mul(y, x, threshold);
    }

    let m = (x.len().max(y.len()) + 1) / 2;
    let (xh, xl) = split(x, m);
    let (yh, yl) = split(y, m);
    let sum_x = large::add(xl, xh);
    let sum_y = large::add(yl, yh);

    let z0 = karatsuba_mul(xl, yl, threshold);
    let mut z1 = karatsuba_mul(sum_x.as_slice(), sum_y.as_slice(), threshold);
    let z2 = karatsuba_mul(xh, yh, threshold);

    // Scale the middle term down to the cross products:
    // (xl + xh)(yl + yh) - z2 - z0.
    large::isub(&mut z1, z2.as_slice());
    large::isub(&mut z1, z0.as_slice());

    assemble(z0, &z1, &z2, m)
}

/// Karatsuba multiplication where `y` is substantially longer than `x`.
///
/// Grade-school over `x`-sized chunks of `y`, with Karatsuba inside each
/// chunk product, so the split halves stay balanced.
fn uneven_mul(x: &[Limb], mut y: &[Limb], threshold: usize) -> Limbs {
    let mut result = Limbs::from_vec(vec![0; x.len() + y.len()]);
    let mut start = 0;
    while !y.is_empty() {
        let m = x.len().min(y.len());
        let (yh, yl) = split(y, m);
        let prod = karatsuba_mul(x, yl, threshold);
        large::iadd(&mut result, prod.as_slice(), start);
        y = yh;
        start += m;
    }
    small::normalize(&mut result);
    result
}

/// Karatsuba multiplication, forking the three sub-products onto the
/// current rayon pool until `depth` is exhausted.
///
/// The sub-products write into buffers of their own; the combining adds
/// stay in the parent frame, so task completion order cannot affect the
/// result. Must run inside the target pool (`ThreadPool::install`).
pub(crate) fn karatsuba_mul_par(
    x: &[Limb],
    y: &[Limb],
    threshold: usize,
    depth: usize,
) -> Limbs {
    let threshold = threshold.max(1);
    if x.is_empty() || y.is_empty() {
        return Limbs::zero();
    }
    if depth == 0 || x.len().min(y.len()) <= threshold {
        return karatsuba_mul(x, y, threshold);
    }
    if 2 * x.len() < y.len() {
        return uneven_mul(x, y, threshold);
    }
    if 2 * y.len() < x.len() {
        return uneven_mul(y, x, threshold);
    }

    let m = (x.len().max(y.len()) + 1) / 2;
    let (xh, xl) = split(x, m);
    let (yh, yl) = split(y, m);
    let sum_x = large::add(xl, xh);
    let sum_y = large::add(yl, yh);

    let (z0, (mut z1, z2)) = rayon::join(
        || karatsuba_mul_par(xl, yl, threshold, depth - 1),
        || {
            rayon::join(
                || karatsuba_mul_par(sum_x.as_slice(), sum_y.as_slice(), threshold, depth - 1),
                || karatsuba_mul_par(xh, yh, threshold, depth - 1),
            )
        },
    );

    large::isub(&mut z1, z2.as_slice());
    large::isub(&mut z1, z0.as_slice());

    assemble(z0, &z1, &z2, m)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Deterministic limb pattern, enough to exercise carry interplay.
    fn pattern(len: usize, seed: u64) -> Vec<Limb> {
        let mut state = seed | 1;
        (0..len)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                if i == 0 {
                    state % (BASE - 1) + 1
                } else {
                    state % BASE
                }
            })
            .collect()
    }

    #[test]
    fn long_mul_test() {
        // 999999999 * 999999999 = 999999998000000001.
        let z = long_mul(&[999_999_999], &[999_999_999]);
        assert_eq!(z.as_slice(), &[999_999_998, 1]);

        let z = long_mul(&[1, 0], &[1, 0]);
        assert_eq!(z.as_slice(), &[1, 0, 0]);

        let z = long_mul(&[0], &[5, 5]);
        assert_eq!(z.as_slice(), &[0]);
    }

    #[test]
    fn karatsuba_matches_long_mul_test() {
        for &(n, m) in &[(1, 1), (7, 5), (40, 40), (41, 41), (64, 64), (81, 64), (120, 7)] {
            let x = pattern(n, 3);
            let y = pattern(m, 5);
            let expected = long_mul(&x, &y);
            for &threshold in &[1, 2, 40] {
                let z = karatsuba_mul(&x, &y, threshold);
                assert_eq!(
                    z.as_slice(),
                    expected.as_slice(),
                    "n={} m={} threshold={}",
                    n,
                    m,
                    threshold
                );
            }
        }
    }

    #[test]
    fn karatsuba_threshold_boundary_test() {
        // Operand length exactly at the cutoff stays on the grade-school path.
        let x = pattern(40, 11);
        let y = pattern(40, 13);
        let z = karatsuba_mul(&x, &y, 40);
        assert_eq!(z.as_slice(), long_mul(&x, &y).as_slice());
    }

    #[test]
    fn uneven_operands_test() {
        let x = pattern(3, 17);
        let y = pattern(100, 19);
        let z = karatsuba_mul(&x, &y, 2);
        assert_eq!(z.as_slice(), long_mul(&x, &y).as_slice());

        // Symmetric in argument order.
        let z = karatsuba_mul(&y, &x, 2);
        assert_eq!(z.as_slice(), long_mul(&x, &y).as_slice());
    }

    #[test]
    fn parallel_matches_sequential_test() {
        let x = pattern(200, 23);
        let y = pattern(190, 29);
        let expected = karatsuba_mul(&x, &y, 10);
        for &depth in &[0, 1, 8] {
            let z = karatsuba_mul_par(&x, &y, 10, depth);
            assert_eq!(z.as_slice(), expected.as_slice(), "depth={}", depth);
        }
    }
}
