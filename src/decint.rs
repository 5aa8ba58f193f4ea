//! The decimal big integer.

use crate::buffer::{Limb, Limbs, BASE, DIGITS_PER_LIMB};
use crate::digit::{digit_in_limb, Digits};
use crate::error::{Error, ErrorCode, Result};
use crate::math::{self, large, small};
use crate::mul::{self, DEFAULT_KARATSUBA_THRESHOLD, DEFAULT_MAX_DEPTH};
use crate::pool;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use rayon::ThreadPool;

/// An arbitrary-precision signed integer stored as base-10⁹ limbs.
///
/// The magnitude lives in a big-endian limb window, so conversion to and
/// from decimal text packs or unpacks nine digits per limb without any
/// base conversion, and the value doubles as a random-access digit
/// sequence through the [`Digits`] trait.
///
/// ```
/// use compint::DecInt;
///
/// # fn main() -> compint::Result<()> {
/// let a: DecInt = "123456789012345678901234567890".parse()?;
/// let b = DecInt::from(987_654_321u64);
/// assert_eq!((&a + &b).to_string(), "123456789012345678902222222211");
/// # Ok(())
/// # }
/// ```
///
/// Out-of-place operators allocate a fresh value; the `*Assign` operators,
/// [`increment`](DecInt::increment)/[`decrement`](DecInt::decrement) and
/// the single-limb [`mul_in_place`](DecInt::mul_in_place)/
/// [`div_in_place`](DecInt::div_in_place) mutate the receiver, reusing its
/// headroom where possible. Every public operation leaves the value in
/// canonical form: no leading zero limbs, and zero is non-negative.
pub struct DecInt {
    negative: bool,
    /// Decimal width of the most significant limb, `1..=9`.
    first_digits: u8,
    limbs: Limbs,
}

impl DecInt {
    /// The canonical zero.
    pub fn zero() -> DecInt {
        DecInt {
            negative: false,
            first_digits: 1,
            limbs: Limbs::zero(),
        }
    }

    /// Value of an unsigned machine integer.
    pub fn from_u64(value: u64) -> DecInt {
        let (arr, start) = small::split_u64(value);
        DecInt::from_sign_limbs(false, Limbs::from_vec_with_headroom(&arr[start..], 1))
    }

    /// Value of a signed machine integer.
    pub fn from_i64(value: i64) -> DecInt {
        let mut out = DecInt::from_u64(value.unsigned_abs());
        out.negative = value < 0;
        out
    }

    /// Value of an unsigned 128-bit integer.
    pub fn from_u128(value: u128) -> DecInt {
        if let Ok(narrow) = u64::try_from(value) {
            return DecInt::from_u64(narrow);
        }
        let mut digits = [0 as Limb; 5];
        let mut pos = digits.len();
        let mut v = value;
        while v > 0 {
            pos -= 1;
            digits[pos] = (v % BASE as u128) as Limb;
            v /= BASE as u128;
        }
        DecInt::from_sign_limbs(false, Limbs::from_vec_with_headroom(&digits[pos..], 1))
    }

    /// Value of a signed 128-bit integer.
    pub fn from_i128(value: i128) -> DecInt {
        let mut out = DecInt::from_u128(value.unsigned_abs());
        out.negative = value < 0;
        out
    }

    /// `mantissa · 10^exponent` without going through text.
    ///
    /// Fails with an `Overflow` error when the result would exceed the
    /// supported capacity.
    pub fn from_scientific(mantissa: i64, exponent: u32) -> Result<DecInt> {
        let mut out = DecInt::from_i64(mantissa);
        let digits = out.digit_count() + exponent as usize;
        crate::buffer::check_capacity(digits / DIGITS_PER_LIMB + 1)?;
        small::imul_pow10(&mut out.limbs, exponent as usize);
        out.canonicalize();
        Ok(out)
    }

    /// Whether the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_zero()
    }

    /// Whether the value is strictly negative. Zero is not negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// The absolute value.
    pub fn abs(&self) -> DecInt {
        let mut out = self.clone();
        out.negative = false;
        out
    }

    /// Number of decimal digits in the absolute value. Zero has one digit.
    #[inline]
    pub fn digit_count(&self) -> usize {
        (self.limbs.len() - 1) * DIGITS_PER_LIMB + self.first_digits as usize
    }

    /// Number of base-10⁹ limbs backing the value.
    #[inline]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Compare absolute values, ignoring signs.
    ///
    /// Digit counts order first; only equal-width magnitudes walk the
    /// limbs.
    pub fn cmp_magnitude(&self, other: &DecInt) -> Ordering {
        match self.digit_count().cmp(&other.digit_count()) {
            Ordering::Equal => large::compare(self.limbs.as_slice(), other.limbs.as_slice()),
            ord => ord,
        }
    }

    /// Add one in place.
    pub fn increment(&mut self) {
        *self += 1i64;
    }

    /// Subtract one in place.
    pub fn decrement(&mut self) {
        *self -= 1i64;
    }

    /// Multiply in place by a machine integer.
    ///
    /// Factors below 10⁹ run a single carry pass over the limbs; larger
    /// ones take the general multiply.
    pub fn mul_in_place(&mut self, factor: u32) {
        if self.is_zero() {
            return;
        }
        if factor == 0 {
            *self = DecInt::zero();
            return;
        }
        let factor = factor as Limb;
        if factor < BASE {
            small::imul(&mut self.limbs, factor);
        } else {
            let (arr, start) = small::split_u64(factor);
            self.limbs = mul::long_mul(self.limbs.as_slice(), &arr[start..]);
        }
        self.canonicalize();
    }

    /// Divide the magnitude in place by a machine integer, truncating
    /// toward zero; returns the remainder of the magnitude.
    ///
    /// Fails with an `Arithmetic` error on a zero divisor, leaving the
    /// value unchanged.
    pub fn div_in_place(&mut self, divisor: u32) -> Result<u32> {
        if divisor == 0 {
            return Err(Error::new(ErrorCode::DivisionByZero));
        }
        let rem = small::idiv(&mut self.limbs, divisor as Limb);
        self.canonicalize();
        Ok(rem as u32)
    }

    /// Product via grade-school multiplication.
    pub fn multiply_simple(&self, other: &DecInt) -> DecInt {
        self.multiply_with(other, mul::long_mul)
    }

    /// Product via sequential Karatsuba multiplication, recursing until
    /// either operand is at most `threshold` limbs.
    pub fn multiply_karatsuba(&self, other: &DecInt, threshold: usize) -> DecInt {
        self.multiply_with(other, |x, y| mul::karatsuba_mul(x, y, threshold))
    }

    /// Product via Karatsuba multiplication forking onto `pool`.
    ///
    /// Each level submits its three sub-products as independent tasks
    /// until `depth` levels have forked; deeper levels run sequentially.
    /// The operands are only read, and `pool` must outlive the call,
    /// which the borrow guarantees.
    pub fn parallel_multiply_karatsuba(
        &self,
        other: &DecInt,
        threshold: usize,
        depth: usize,
        pool: &ThreadPool,
    ) -> DecInt {
        self.multiply_with(other, |x, y| {
            pool.install(|| mul::karatsuba_mul_par(x, y, threshold, depth))
        })
    }

    /// Product with an automatically chosen strategy: parallel Karatsuba
    /// on the installed default pool (see
    /// [`set_default_pool`](crate::set_default_pool)) when both operands
    /// are large, sequential Karatsuba otherwise.
    pub fn multiply(&self, other: &DecInt) -> DecInt {
        if self.limb_count().min(other.limb_count()) >= mul::PARALLEL_CUTOFF_LIMBS {
            if let Some(pool) = pool::default_pool() {
                return self.parallel_multiply_karatsuba(
                    other,
                    DEFAULT_KARATSUBA_THRESHOLD,
                    DEFAULT_MAX_DEPTH,
                    &pool,
                );
            }
        }
        self.multiply_karatsuba(other, DEFAULT_KARATSUBA_THRESHOLD)
    }

    /// `self` raised to `exp` by repeated squaring. `pow(0, 0)` is one.
    pub fn pow(&self, exp: u32) -> DecInt {
        self.pow_with(exp, |a, b| a.multiply(b))
    }

    /// `self` raised to `exp`, with every squaring step running the
    /// parallel multiply on `pool`.
    pub fn parallel_pow(&self, exp: u32, pool: &ThreadPool) -> DecInt {
        self.pow_with(exp, |a, b| {
            a.parallel_multiply_karatsuba(b, DEFAULT_KARATSUBA_THRESHOLD, DEFAULT_MAX_DEPTH, pool)
        })
    }

    fn pow_with(&self, exp: u32, multiply: impl Fn(&DecInt, &DecInt) -> DecInt) -> DecInt {
        if exp == 0 {
            return DecInt::from_u64(1);
        }
        if self.is_zero() {
            return DecInt::zero();
        }
        let mut result = DecInt::from_u64(1);
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = multiply(&result, &base);
            }
            e >>= 1;
            if e > 0 {
                base = multiply(&base, &base);
            }
        }
        result
    }

    fn multiply_with(
        &self,
        other: &DecInt,
        multiply: impl FnOnce(&[Limb], &[Limb]) -> Limbs,
    ) -> DecInt {
        if self.is_zero() || other.is_zero() {
            return DecInt::zero();
        }
        let limbs = multiply(self.limbs.as_slice(), other.limbs.as_slice());
        DecInt::from_sign_limbs(self.negative != other.negative, limbs)
    }

    /// Signed addition of a magnitude window into the receiver; the core
    /// of every additive entry point. Same signs add magnitudes; opposite
    /// signs subtract the smaller magnitude from the larger, which also
    /// decides the result sign.
    fn signed_add_assign(&mut self, rhs_negative: bool, rhs: &[Limb]) {
        if rhs.len() == 1 && rhs[0] == 0 {
            return;
        }
        if self.negative == rhs_negative {
            large::iadd(&mut self.limbs, rhs, 0);
        } else {
            match large::compare(self.limbs.as_slice(), rhs) {
                Ordering::Greater => large::isub(&mut self.limbs, rhs),
                Ordering::Less => {
                    self.limbs = large::sub(rhs, self.limbs.as_slice());
                    self.negative = rhs_negative;
                }
                Ordering::Equal => {
                    self.limbs = Limbs::zero();
                }
            }
        }
        self.canonicalize();
    }

    /// Restore canonical form after a mutation: trim leading zeros, force
    /// zero non-negative, recompute the leading limb width.
    fn canonicalize(&mut self) {
        small::normalize(&mut self.limbs);
        if self.limbs.is_zero() {
            self.negative = false;
        }
        self.first_digits = math::decimal_width(self.limbs.first());
    }

    fn clone_with_headroom(&self, front: usize) -> DecInt {
        DecInt {
            negative: self.negative,
            first_digits: self.first_digits,
            limbs: Limbs::from_vec_with_headroom(self.limbs.as_slice(), front),
        }
    }

    pub(crate) fn from_sign_limbs(negative: bool, limbs: Limbs) -> DecInt {
        let mut out = DecInt {
            negative,
            first_digits: 1,
            limbs,
        };
        out.canonicalize();
        out
    }

    pub(crate) fn limbs(&self) -> &Limbs {
        &self.limbs
    }

    fn magnitude_u128(&self) -> Option<u128> {
        if self.limb_count() > 5 {
            return None;
        }
        let mut acc: u128 = 0;
        for &limb in self.limbs.as_slice() {
            acc = acc.checked_mul(BASE as u128)?.checked_add(limb as u128)?;
        }
        Some(acc)
    }
}

impl Clone for DecInt {
    /// Deep copy; the backing array is never shared between two values.
    fn clone(&self) -> DecInt {
        DecInt {
            negative: self.negative,
            first_digits: self.first_digits,
            limbs: self.limbs.clone(),
        }
    }
}

impl Default for DecInt {
    fn default() -> DecInt {
        DecInt::zero()
    }
}

impl PartialEq for DecInt {
    fn eq(&self, other: &DecInt) -> bool {
        self.negative == other.negative && self.limbs == other.limbs
    }
}

impl Eq for DecInt {}

impl Hash for DecInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.limbs.as_slice().hash(state);
    }
}

impl Ord for DecInt {
    fn cmp(&self, other: &DecInt) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for DecInt {
    fn partial_cmp(&self, other: &DecInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Debug for DecInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DecInt")
            .field("negative", &self.negative)
            .field("first_digits", &self.first_digits)
            .field("limbs", &self.limbs)
            .finish()
    }
}

impl Digits for DecInt {
    fn len(&self) -> usize {
        self.digit_count()
    }

    fn byte_at(&self, index: usize) -> Result<u8> {
        let len = self.digit_count();
        if index >= len {
            return Err(Error::digit_index(index, len));
        }
        let first = self.first_digits as usize;
        let (limb_index, power) = if index < first {
            (0, first - 1 - index)
        } else {
            let rest = index - first;
            (
                1 + rest / DIGITS_PER_LIMB,
                DIGITS_PER_LIMB - 1 - rest % DIGITS_PER_LIMB,
            )
        };
        let limb = self.limbs.as_slice()[limb_index];
        Ok(b'0' + digit_in_limb(limb, power))
    }
}

// CONVERSIONS
// -----------

macro_rules! impl_from_unsigned {
    ($($ty:ty)*) => {$(
        impl From<$ty> for DecInt {
            fn from(value: $ty) -> DecInt {
                DecInt::from_u64(value as u64)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($ty:ty)*) => {$(
        impl From<$ty> for DecInt {
            fn from(value: $ty) -> DecInt {
                DecInt::from_i64(value as i64)
            }
        }
    )*};
}

impl_from_unsigned!(u8 u16 u32 u64 usize);
impl_from_signed!(i8 i16 i32 i64 isize);

impl From<u128> for DecInt {
    fn from(value: u128) -> DecInt {
        DecInt::from_u128(value)
    }
}

impl From<i128> for DecInt {
    fn from(value: i128) -> DecInt {
        DecInt::from_i128(value)
    }
}

impl TryFrom<&DecInt> for u128 {
    type Error = Error;

    fn try_from(value: &DecInt) -> Result<u128> {
        if value.negative {
            return Err(Error::new(ErrorCode::ValueOutOfRange));
        }
        value
            .magnitude_u128()
            .ok_or_else(|| Error::new(ErrorCode::ValueOutOfRange))
    }
}

impl TryFrom<&DecInt> for u64 {
    type Error = Error;

    fn try_from(value: &DecInt) -> Result<u64> {
        u128::try_from(value)?
            .try_into()
            .map_err(|_| Error::new(ErrorCode::ValueOutOfRange))
    }
}

impl TryFrom<&DecInt> for i128 {
    type Error = Error;

    fn try_from(value: &DecInt) -> Result<i128> {
        let magnitude = value
            .magnitude_u128()
            .ok_or_else(|| Error::new(ErrorCode::ValueOutOfRange))?;
        if value.negative {
            if magnitude > i128::MIN.unsigned_abs() {
                return Err(Error::new(ErrorCode::ValueOutOfRange));
            }
            Ok(magnitude.wrapping_neg() as i128)
        } else {
            i128::try_from(magnitude).map_err(|_| Error::new(ErrorCode::ValueOutOfRange))
        }
    }
}

impl TryFrom<&DecInt> for i64 {
    type Error = Error;

    fn try_from(value: &DecInt) -> Result<i64> {
        i128::try_from(value)?
            .try_into()
            .map_err(|_| Error::new(ErrorCode::ValueOutOfRange))
    }
}

// OPERATORS
// ---------

impl AddAssign<&DecInt> for DecInt {
    fn add_assign(&mut self, rhs: &DecInt) {
        self.signed_add_assign(rhs.negative, rhs.limbs.as_slice());
    }
}

impl AddAssign<DecInt> for DecInt {
    fn add_assign(&mut self, rhs: DecInt) {
        *self += &rhs;
    }
}

impl SubAssign<&DecInt> for DecInt {
    fn sub_assign(&mut self, rhs: &DecInt) {
        self.signed_add_assign(!rhs.negative, rhs.limbs.as_slice());
    }
}

impl SubAssign<DecInt> for DecInt {
    fn sub_assign(&mut self, rhs: DecInt) {
        *self -= &rhs;
    }
}

impl AddAssign<i64> for DecInt {
    /// Primitive overload of the in-place add; the operand decomposes into
    /// at most three limbs on the stack, so nothing allocates unless the
    /// result itself grows.
    fn add_assign(&mut self, rhs: i64) {
        let (arr, start) = small::split_u64(rhs.unsigned_abs());
        self.signed_add_assign(rhs < 0, &arr[start..]);
    }
}

impl SubAssign<i64> for DecInt {
    fn sub_assign(&mut self, rhs: i64) {
        let (arr, start) = small::split_u64(rhs.unsigned_abs());
        self.signed_add_assign(rhs >= 0, &arr[start..]);
    }
}

impl Add<&DecInt> for &DecInt {
    type Output = DecInt;

    fn add(self, rhs: &DecInt) -> DecInt {
        let mut out = self.clone_with_headroom(1);
        out += rhs;
        out
    }
}

impl Sub<&DecInt> for &DecInt {
    type Output = DecInt;

    fn sub(self, rhs: &DecInt) -> DecInt {
        let mut out = self.clone_with_headroom(1);
        out -= rhs;
        out
    }
}

impl Mul<&DecInt> for &DecInt {
    type Output = DecInt;

    fn mul(self, rhs: &DecInt) -> DecInt {
        self.multiply(rhs)
    }
}

impl Mul<u32> for &DecInt {
    type Output = DecInt;

    fn mul(self, rhs: u32) -> DecInt {
        let mut out = self.clone_with_headroom(1);
        out.mul_in_place(rhs);
        out
    }
}

macro_rules! forward_val_binop {
    ($(impl $imp:ident, $method:ident;)*) => {$(
        impl $imp<DecInt> for DecInt {
            type Output = DecInt;
            fn $method(self, rhs: DecInt) -> DecInt {
                $imp::$method(&self, &rhs)
            }
        }

        impl $imp<&DecInt> for DecInt {
            type Output = DecInt;
            fn $method(self, rhs: &DecInt) -> DecInt {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<DecInt> for &DecInt {
            type Output = DecInt;
            fn $method(self, rhs: DecInt) -> DecInt {
                $imp::$method(self, &rhs)
            }
        }
    )*};
}

forward_val_binop! {
    impl Add, add;
    impl Sub, sub;
    impl Mul, mul;
}

impl Neg for DecInt {
    type Output = DecInt;

    fn neg(mut self) -> DecInt {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}

impl Neg for &DecInt {
    type Output = DecInt;

    fn neg(self) -> DecInt {
        -self.clone()
    }
}

// SERDE
// -----

#[cfg(feature = "serde")]
impl serde::Serialize for DecInt {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DecInt {
    fn deserialize<D>(deserializer: D) -> core::result::Result<DecInt, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DecIntVisitor;

        impl serde::de::Visitor<'_> for DecIntVisitor {
            type Value = DecInt;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal integer string")
            }

            fn visit_str<E>(self, text: &str) -> core::result::Result<DecInt, E>
            where
                E: serde::de::Error,
            {
                text.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(DecIntVisitor)
    }
}
