//! Arbitrary-precision integers optimized for decimal text exchange.
//!
//! Programs that shuttle big numbers through text — REPLs, file pipelines,
//! data formats — spend much of their time converting between digits and
//! binary limbs. This crate stores the digits in (near-)decimal form
//! instead, making the text boundary O(n) with no base conversion, while
//! keeping arithmetic competitive through Karatsuba multiplication with an
//! optional work-stealing parallel variant. Two sibling types are offered:
//!
//! - [`DecInt`]: signed, base-10⁹ limbs. The workhorse: fast parse/format
//!   *and* fast arithmetic.
//! - [`AsciiInt`]: signed, one digit per byte over any base in `2..=256`.
//!   Trivial text round-trips, slower arithmetic.
//!
//! # Working with values
//!
//! ```
//! use compint::{DecInt, Digits};
//!
//! # fn main() -> compint::Result<()> {
//! let a: DecInt = "589034583485345".parse()?;
//! let b: DecInt = "58903457894375873489578943534".parse()?;
//!
//! let product = &a * &b;
//! assert_eq!(
//!     product.to_string(),
//!     "34696173786660249457940746168929928671509230",
//! );
//!
//! // A value is also a random-access digit sequence.
//! assert_eq!(product.len(), 44);
//! assert_eq!(product.char_at(0)?, '3');
//! # Ok(())
//! # }
//! ```
//!
//! In-place operations reuse the receiver's buffer and its headroom:
//!
//! ```
//! use compint::DecInt;
//!
//! let mut counter: DecInt = "999999999999999999".parse().unwrap();
//! counter.increment();
//! assert_eq!(counter.to_string(), "1000000000000000000");
//! counter += 41i64;
//! assert_eq!(counter.to_string(), "1000000000000000041");
//! ```
//!
//! # Parallel multiplication
//!
//! The parallel engine borrows a caller-owned [`rayon`] pool, either per
//! call or installed once as the process default:
//!
//! ```
//! use compint::{set_default_pool, DecInt};
//! use std::sync::Arc;
//!
//! # fn main() -> compint::Result<()> {
//! let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().expect("pool"));
//!
//! let a = DecInt::from(7u32).pow(50_000);
//! let b = DecInt::from(3u32).pow(60_000);
//! let direct = a.parallel_multiply_karatsuba(&b, 40, 8, &pool);
//!
//! set_default_pool(pool);
//! // `multiply` (and the `*` operator) now go parallel for large operands.
//! assert_eq!(a.multiply(&b), direct);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Fallible operations return [`Result`]; an [`Error`] classifies into
//! parse, index, overflow, arithmetic and state categories. Operations
//! that fail leave their receiver unchanged.

#![deny(missing_docs)]

#[doc(inline)]
pub use crate::ascii::AsciiInt;
#[doc(inline)]
pub use crate::decint::DecInt;
#[doc(inline)]
pub use crate::digit::Digits;
#[doc(inline)]
pub use crate::error::{Category, Error, ErrorCode, Result};
#[doc(inline)]
pub use crate::mul::{DEFAULT_KARATSUBA_THRESHOLD, DEFAULT_MAX_DEPTH};
#[doc(inline)]
pub use crate::parse::ParseOptions;
#[doc(inline)]
pub use crate::pool::{clear_default_pool, set_default_pool};

mod ascii;
mod buffer;
mod decint;
mod digit;
pub mod error;
mod math;
mod mul;
mod parse;
mod pool;
mod slice;
mod write;
