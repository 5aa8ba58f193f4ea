//! Parsing decimal text into a [`DecInt`].
//!
//! The accepted grammar is an optional sign, one or more ASCII digits, and
//! an optional `e`/`E` exponent with its own optional sign. Digits pack
//! right to left in groups of nine per limb, so no base conversion happens;
//! a positive exponent appends zero digits, a negative one divides and must
//! be exact unless fractional input is explicitly allowed.

use crate::buffer::{Limb, Limbs, DIGITS_PER_LIMB, MAX_LIMBS};
use crate::decint::DecInt;
use crate::error::{Error, ErrorCode, Result};
use crate::math::small;
use core::str::FromStr;
use memchr::memchr2;

/// Largest digit count a parsed value may reach, exponent included.
const MAX_DIGITS: u64 = MAX_LIMBS as u64 * DIGITS_PER_LIMB as u64;

/// Exponent magnitudes saturate here during accumulation; anything this
/// large is already past every digit-count check downstream, and another
/// `* 10 + 9` step cannot overflow from below it.
const EXPONENT_SATURATION: i64 = 1_000_000_000_000_000;

/// Options controlling how decimal text becomes a [`DecInt`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    allow_fractional: bool,
}

impl ParseOptions {
    /// The default options: fractional input is rejected.
    pub fn new() -> ParseOptions {
        ParseOptions {
            allow_fractional: false,
        }
    }

    /// Truncate, rather than reject, input whose negative exponent drops
    /// nonzero digits (`"125e-1"` becomes `12`).
    pub fn allow_fractional(mut self, allow: bool) -> ParseOptions {
        self.allow_fractional = allow;
        self
    }
}

impl DecInt {
    /// Parse decimal text with explicit [`ParseOptions`].
    ///
    /// The plain form is available through [`FromStr`]:
    ///
    /// ```
    /// use compint::{DecInt, ParseOptions};
    ///
    /// # fn main() -> compint::Result<()> {
    /// let v: DecInt = "31e2".parse()?;
    /// assert_eq!(v.to_string(), "3100");
    ///
    /// assert!("315e-1".parse::<DecInt>().is_err());
    /// let truncated = DecInt::parse_with("315e-1", ParseOptions::new().allow_fractional(true))?;
    /// assert_eq!(truncated.to_string(), "31");
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_with(text: &str, options: ParseOptions) -> Result<DecInt> {
        parse(text.as_bytes(), options)
    }
}

impl FromStr for DecInt {
    type Err = Error;

    fn from_str(text: &str) -> Result<DecInt> {
        parse(text.as_bytes(), ParseOptions::new())
    }
}

fn parse(bytes: &[u8], options: ParseOptions) -> Result<DecInt> {
    if bytes.is_empty() {
        return Err(Error::parse(ErrorCode::EmptyNumber, 0));
    }

    let mut start = 0;
    let negative = match bytes[0] {
        b'+' => {
            start = 1;
            false
        }
        b'-' => {
            start = 1;
            true
        }
        _ => false,
    };

    let (mantissa, exponent, exponent_at) = match memchr2(b'e', b'E', bytes) {
        Some(at) => (&bytes[start..at], parse_exponent(bytes, at + 1)?, at),
        None => (&bytes[start..], 0, bytes.len()),
    };
    if mantissa.is_empty() {
        return Err(Error::parse(ErrorCode::EmptyNumber, start));
    }
    for (i, &byte) in mantissa.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(Error::parse(ErrorCode::InvalidDigit(byte), start + i));
        }
    }

    // Leading zeros contribute nothing; an all-zero mantissa is zero no
    // matter what the exponent says.
    let digits = match mantissa.iter().position(|&b| b != b'0') {
        Some(first_nonzero) => &mantissa[first_nonzero..],
        None => return Ok(DecInt::zero()),
    };

    // Keeping the total digit count addressable also makes the usize casts
    // below lossless on 32-bit targets.
    let max_digits = MAX_DIGITS.min(usize::MAX as u64);
    if exponent > 0 && digits.len() as u64 + exponent as u64 > max_digits {
        return Err(Error::parse(ErrorCode::ExponentOutOfRange, exponent_at));
    }

    let mut limbs = Limbs::from_vec(pack_digits(digits));
    if exponent > 0 {
        small::imul_pow10(&mut limbs, exponent as usize);
    } else if exponent < 0 {
        let shift = exponent.unsigned_abs();
        if shift >= digits.len() as u64 {
            // Every digit shifts out, and the mantissa is known nonzero.
            if !options.allow_fractional {
                return Err(Error::parse(ErrorCode::FractionalNumber, exponent_at));
            }
            return Ok(DecInt::zero());
        }
        if !small::idiv_pow10(&mut limbs, shift as usize) && !options.allow_fractional {
            return Err(Error::parse(ErrorCode::FractionalNumber, exponent_at));
        }
    }

    Ok(DecInt::from_sign_limbs(negative, limbs))
}

/// Pack ASCII digits right to left in groups of nine; the leftmost limb
/// takes the leftover `1..=9` digits.
fn pack_digits(digits: &[u8]) -> Vec<Limb> {
    let count = (digits.len() + DIGITS_PER_LIMB - 1) / DIGITS_PER_LIMB;
    let first_width = digits.len() - (count - 1) * DIGITS_PER_LIMB;
    let mut limbs = Vec::with_capacity(count);
    limbs.push(pack_group(&digits[..first_width]));
    let mut cursor = first_width;
    while cursor < digits.len() {
        limbs.push(pack_group(&digits[cursor..cursor + DIGITS_PER_LIMB]));
        cursor += DIGITS_PER_LIMB;
    }
    limbs
}

#[inline]
fn pack_group(digits: &[u8]) -> Limb {
    let mut value = 0;
    for &byte in digits {
        value = value * 10 + (byte - b'0') as Limb;
    }
    value
}

/// Parse the signed exponent after the marker, saturating magnitudes that
/// no value could survive.
fn parse_exponent(bytes: &[u8], start: usize) -> Result<i64> {
    let mut pos = start;
    let mut negative = false;
    if let Some(&byte) = bytes.get(pos) {
        if byte == b'+' || byte == b'-' {
            negative = byte == b'-';
            pos += 1;
        }
    }
    if pos == bytes.len() {
        return Err(Error::parse(ErrorCode::EmptyExponent, start - 1));
    }

    let mut value: i64 = 0;
    for (i, &byte) in bytes[pos..].iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(Error::parse(ErrorCode::InvalidDigit(byte), pos + i));
        }
        if value < EXPONENT_SATURATION {
            value = value * 10 + (byte - b'0') as i64;
        }
    }
    Ok(if negative { -value } else { value })
}
