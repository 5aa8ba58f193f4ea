//! Rendering a [`DecInt`] as decimal text.
//!
//! The leading limb prints bare; every later limb prints zero-padded to
//! nine digits, so the output is a straight concatenation with no base
//! conversion. Buffers are sized up front from the digit count.

use crate::buffer::DIGITS_PER_LIMB;
use crate::decint::DecInt;
use crate::math::small;
use core::fmt::{self, Display};

const ZERO_PAD: &str = "00000000";

impl Display for DecInt {
    /// Canonical decimal form: `-` for negative, no plus sign, no leading
    /// zeros except the single character `0`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let mut buf = itoa::Buffer::new();
        let limbs = self.limbs().as_slice();
        f.write_str(buf.format(limbs[0]))?;
        for &limb in &limbs[1..] {
            let digits = buf.format(limb);
            f.write_str(&ZERO_PAD[..DIGITS_PER_LIMB - digits.len()])?;
            f.write_str(digits)?;
        }
        Ok(())
    }
}

impl DecInt {
    /// Append the decimal form to `out` as ASCII bytes.
    ///
    /// Reserves the exact rendered size once, which keeps repeated dumps
    /// of large values allocation-tight.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        out.reserve(self.digit_count() + self.is_negative() as usize);
        if self.is_negative() {
            out.push(b'-');
        }
        let mut buf = itoa::Buffer::new();
        let limbs = self.limbs().as_slice();
        out.extend_from_slice(buf.format(limbs[0]).as_bytes());
        for &limb in &limbs[1..] {
            let digits = buf.format(limb).as_bytes();
            out.extend_from_slice(&ZERO_PAD.as_bytes()[..DIGITS_PER_LIMB - digits.len()]);
            out.extend_from_slice(digits);
        }
    }

    /// The decimal form as ASCII bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }

    /// The `mantissa e exponent` shorthand with trailing zeros folded into
    /// the exponent: `5000` renders as `"5e3"`. Values without trailing
    /// zeros (and zero itself) render plainly.
    pub fn to_scientific_string(&self) -> String {
        if self.is_zero() {
            return String::from("0");
        }

        let mut trailing = 0;
        let mut index = 0;
        while self.limbs().rget(index) == 0 {
            trailing += DIGITS_PER_LIMB;
            index += 1;
        }
        let mut lowest = self.limbs().rget(index);
        while lowest % 10 == 0 {
            trailing += 1;
            lowest /= 10;
        }
        if trailing == 0 {
            return self.to_string();
        }

        let mut mantissa = self.limbs().clone();
        small::idiv_pow10(&mut mantissa, trailing);
        let mantissa = DecInt::from_sign_limbs(self.is_negative(), mantissa);
        format!("{}e{}", mantissa, trailing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) -> String {
        text.parse::<DecInt>().expect(text).to_string()
    }

    #[test]
    fn interior_padding_test() {
        // Limbs below nine digits must render zero-padded.
        assert_eq!(round_trip("1000000001"), "1000000001");
        assert_eq!(round_trip("5000000000000000001"), "5000000000000000001");
        assert_eq!(round_trip("1000000000000000000"), "1000000000000000000");
        assert_eq!(round_trip("-90000000180000000027"), "-90000000180000000027");
    }

    #[test]
    fn write_bytes_test() {
        let v: DecInt = "-1234567890123".parse().expect("valid");
        assert_eq!(v.to_bytes(), b"-1234567890123");

        let mut out = b"x=".to_vec();
        v.write_bytes(&mut out);
        assert_eq!(out, b"x=-1234567890123");

        assert_eq!(DecInt::zero().to_bytes(), b"0");
    }

    #[test]
    fn scientific_string_test() {
        let scientific = |text: &str| text.parse::<DecInt>().expect(text).to_scientific_string();
        assert_eq!(scientific("0"), "0");
        assert_eq!(scientific("123"), "123");
        assert_eq!(scientific("5000"), "5e3");
        assert_eq!(scientific("-5000"), "-5e3");
        assert_eq!(scientific("120000000000"), "12e10");
        assert_eq!(scientific("1000000000000000000"), "1e18");

        // Round-trips through the parser.
        let v: DecInt = "123000000000000000000000".parse().expect("valid");
        let back: DecInt = v.to_scientific_string().parse().expect("valid");
        assert_eq!(v, back);
    }
}
