//! Building-blocks for arbitrary-precision decimal math.
//!
//! All algorithms work on big-endian limb windows; carry loops index from
//! the least significant end through the reverse-slice helpers. The layers
//! are, bottom up: `scalar` (limb-to-limb), `small` (value-to-limb), and
//! `large` (value-to-value).

use crate::buffer::{Limb, Limbs, BASE, DIGITS_PER_LIMB};
use crate::slice::Slice;
use core::cmp;

/// Powers of ten up to one full limb.
pub(crate) const POW10: [Limb; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Decimal width of a single limb value.
#[inline]
pub(crate) fn decimal_width(limb: Limb) -> u8 {
    debug_assert!(limb < BASE);
    let mut width = 1u8;
    while (width as usize) < DIGITS_PER_LIMB && limb >= POW10[width as usize] {
        width += 1;
    }
    width
}

// SCALAR
// ------

// Limb-to-limb operations with base-10⁹ reduction, the building blocks for
// everything below. Accumulators stay under `BASE²`, which fits the limb
// type, so none of these can overflow.

pub(crate) mod scalar {
    use super::*;

    /// Add two limbs and an incoming carry; returns the reduced limb and
    /// the outgoing carry.
    #[inline]
    pub fn adc(x: Limb, y: Limb, carry: bool) -> (Limb, bool) {
        debug_assert!(x < BASE && y < BASE);
        let acc = x + y + carry as Limb;
        if acc >= BASE {
            (acc - BASE, true)
        } else {
            (acc, false)
        }
    }

    /// Subtract a limb and an incoming borrow; returns the adjusted limb
    /// and the outgoing borrow.
    #[inline]
    pub fn sbb(x: Limb, y: Limb, borrow: bool) -> (Limb, bool) {
        debug_assert!(x < BASE && y < BASE);
        let rhs = y + borrow as Limb;
        if x >= rhs {
            (x - rhs, false)
        } else {
            (x + BASE - rhs, true)
        }
    }

    /// Multiply two limbs with an incoming carry; returns the (low, high)
    /// limbs of the product.
    #[inline]
    pub fn mul(x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
        debug_assert!(x < BASE && y < BASE && carry < BASE);
        let acc = x * y + carry;
        (acc % BASE, acc / BASE)
    }

    /// Divide the two-limb value `high·BASE + x` by `d`; returns the
    /// quotient limb and the remainder. Requires `high < d`.
    #[inline]
    pub fn div_rem(high: Limb, x: Limb, d: Limb) -> (Limb, Limb) {
        debug_assert!(d != 0 && high < d && x < BASE);
        let acc = high * BASE + x;
        (acc / d, acc % d)
    }
}

// SMALL
// -----

// Value-to-limb operations, modifying a big integer window in place from a
// single limb operand.

pub(crate) mod small {
    use super::*;

    /// Add a limb at position `start` from the least significant end,
    /// propagating the carry toward the front. Positions past the current
    /// window length are materialized as zero limbs first.
    pub fn iadd_at(x: &mut Limbs, y: Limb, start: usize) {
        debug_assert!(y < BASE);
        if start >= x.len() {
            if y == 0 {
                return;
            }
            x.grow_front(start - x.len());
            x.push_front(y);
            return;
        }

        let (value, mut carry) = scalar::adc(x.rget(start), y, false);
        x.rset(start, value);

        // Increment until the carry stops propagating.
        let mut pos = start + 1;
        while carry && pos < x.len() {
            let (value, c) = scalar::adc(x.rget(pos), 0, true);
            x.rset(pos, value);
            carry = c;
            pos += 1;
        }

        // The carry walked off the most significant end.
        if carry {
            x.push_front(1);
        }
    }

    /// Add a single limb to the value.
    #[inline]
    pub fn iadd(x: &mut Limbs, y: Limb) {
        iadd_at(x, y, 0);
    }

    /// Subtract a single limb from the value; the value must be >= `y`.
    pub fn isub(x: &mut Limbs, y: Limb) {
        debug_assert!(y < BASE);
        let (value, mut borrow) = scalar::sbb(x.rget(0), y, false);
        x.rset(0, value);

        let mut pos = 1;
        while borrow {
            debug_assert!(pos < x.len());
            let (value, b) = scalar::sbb(x.rget(pos), 0, true);
            x.rset(pos, value);
            borrow = b;
            pos += 1;
        }
        normalize(x);
    }

    /// Multiply the value by a single limb in place. A final carry prepends
    /// one limb.
    pub fn imul(x: &mut Limbs, y: Limb) {
        debug_assert!(y < BASE);
        if y == 1 {
            return;
        }
        let mut carry = 0;
        for i in 0..x.len() {
            let (value, c) = scalar::mul(x.rget(i), y, carry);
            x.rset(i, value);
            carry = c;
        }
        if carry > 0 {
            x.push_front(carry);
        }
        normalize(x);
    }

    /// Divide the value by a single nonzero divisor in place, walking from
    /// the most significant limb down; returns the remainder.
    pub fn idiv(x: &mut Limbs, d: Limb) -> Limb {
        debug_assert!(d != 0);
        let mut rem = 0;
        for i in (0..x.len()).rev() {
            let (q, r) = scalar::div_rem(rem, x.rget(i), d);
            x.rset(i, q);
            rem = r;
        }
        normalize(x);
        rem
    }

    /// Multiply by `10^n`: whole limbs append on the least significant
    /// side, the leftover factor multiplies through.
    pub fn imul_pow10(x: &mut Limbs, n: usize) {
        if x.is_zero() {
            return;
        }
        let digits = n % DIGITS_PER_LIMB;
        if digits > 0 {
            imul(x, POW10[digits]);
        }
        x.grow_back(n / DIGITS_PER_LIMB);
    }

    /// Divide by `10^n`, truncating; returns whether the division was
    /// exact. `n` must be smaller than the value's digit count.
    pub fn idiv_pow10(x: &mut Limbs, n: usize) -> bool {
        let limbs = n / DIGITS_PER_LIMB;
        let digits = n % DIGITS_PER_LIMB;
        let mut exact = true;
        if limbs > 0 {
            for i in 0..limbs {
                if x.rget(i) != 0 {
                    exact = false;
                    break;
                }
            }
            x.truncate_back(limbs);
        }
        if digits > 0 {
            exact &= idiv(x, POW10[digits]) == 0;
        }
        exact
    }

    /// Decompose a machine integer into at most three limbs, most
    /// significant first. Returns the array and the index of the first
    /// significant limb.
    #[inline]
    pub fn split_u64(x: u64) -> ([Limb; 3], usize) {
        let lo = x % BASE;
        let rest = x / BASE;
        let mid = rest % BASE;
        let hi = rest / BASE;
        let start = if hi != 0 {
            0
        } else if mid != 0 {
            1
        } else {
            2
        };
        ([hi, mid, lo], start)
    }

    /// Normalize the window by popping any leading zero limbs.
    #[inline]
    pub fn normalize(x: &mut Limbs) {
        x.trim_front();
    }
}

// LARGE
// -----

// Value-to-value operations over whole limb windows.

pub(crate) mod large {
    use super::*;

    /// Compare two canonical magnitudes: more limbs wins, equal lengths
    /// compare lexicographically since the limbs are big-endian.
    #[inline]
    pub fn compare(x: &[Limb], y: &[Limb]) -> cmp::Ordering {
        debug_assert!(x.len() == 1 || x[0] != 0);
        debug_assert!(y.len() == 1 || y[0] != 0);
        match x.len().cmp(&y.len()) {
            cmp::Ordering::Equal => x.cmp(y),
            ord => ord,
        }
    }

    /// x += y·BASE^shift, `shift` counted in limbs from the least
    /// significant end. `y` may carry leading zero limbs.
    pub fn iadd(x: &mut Limbs, y: &[Limb], shift: usize) {
        let needed = y.len() + shift;
        if needed > x.len() {
            x.grow_front(needed - x.len());
        }

        let mut carry = false;
        for i in 0..y.len() {
            let (value, c) = scalar::adc(x.rget(shift + i), *y.rindex(i), carry);
            x.rset(shift + i, value);
            carry = c;
        }

        // Overflow past the last added position.
        if carry {
            small::iadd_at(x, 1, needed);
        }
    }

    /// x -= y; the value must be numerically >= `y`. `y` may carry leading
    /// zero limbs and may be longer than `x`'s window.
    pub fn isub(x: &mut Limbs, y: &[Limb]) {
        let overlap = cmp::min(x.len(), y.len());
        let mut borrow = false;
        for i in 0..overlap {
            let (value, b) = scalar::sbb(x.rget(i), *y.rindex(i), borrow);
            x.rset(i, value);
            borrow = b;
        }
        if y.len() > x.len() {
            debug_assert!(!borrow && y[..y.len() - x.len()].iter().all(|&l| l == 0));
        }

        let mut pos = overlap;
        while borrow {
            debug_assert!(pos < x.len());
            let (value, b) = scalar::sbb(x.rget(pos), 0, true);
            x.rset(pos, value);
            borrow = b;
            pos += 1;
        }
        small::normalize(x);
    }

    /// Sum of two windows, allocated with one limb of carry headroom.
    pub fn add(x: &[Limb], y: &[Limb]) -> Limbs {
        let (long, short) = if x.len() >= y.len() { (x, y) } else { (y, x) };
        let mut z = Limbs::from_vec_with_headroom(long, 1);
        iadd(&mut z, short, 0);
        z
    }

    /// Difference of two windows; `x` must be numerically >= `y`.
    pub fn sub(x: &[Limb], y: &[Limb]) -> Limbs {
        let mut z = Limbs::from_vec(x.to_vec());
        isub(&mut z, y);
        z
    }
}

// TESTS
// -----
