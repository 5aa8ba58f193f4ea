//! End-to-end coverage of the decimal big integer: text round-trips,
//! algebraic laws across the additive and multiplicative engines, and the
//! digit-access view.

use compint::{DecInt, Digits};

fn dec(text: &str) -> DecInt {
    text.parse().unwrap_or_else(|e| panic!("{}: {:?}", text, e))
}

/// A spread of magnitudes and signs wide enough to hit every carry shape.
fn sample_values() -> Vec<DecInt> {
    [
        "0",
        "1",
        "-1",
        "9",
        "999999999",
        "1000000000",
        "-1000000001",
        "123456789012345678",
        "-999999999999999999999999999",
        "5",
        "1000000000000000000000000000000000000",
    ]
    .iter()
    .map(|s| dec(s))
    .collect()
}

#[test]
fn parse_format_round_trip() {
    let mut texts = vec![
        "0".to_string(),
        "-1".to_string(),
        "905".to_string(),
        "123456789".repeat(40),
        format!("-{}", "987654321".repeat(11)),
        format!("1{}", "0".repeat(1000)),
    ];
    texts.push(format!("10{}1", "0".repeat(98)));
    for text in texts {
        assert_eq!(dec(&text).to_string(), text);
    }
}

#[test]
fn additive_identities() {
    let zero = DecInt::zero();
    let one = DecInt::from(1u32);
    for v in sample_values() {
        assert_eq!(&v + &zero, v, "v + 0");
        assert_eq!(&v * &one, v, "v * 1");
        assert_eq!(&v - &v, zero, "v - v");
        assert_eq!(&v * &zero, zero, "v * 0");
    }
}

#[test]
fn commutativity_and_associativity() {
    let values = sample_values();
    for a in &values {
        for b in &values {
            assert_eq!(a + b, b + a);
            assert_eq!(a.multiply_simple(b), b.multiply_simple(a));
        }
    }
    let (a, b, c) = (&values[7], &values[8], &values[10]);
    assert_eq!((a + b) + c, a + (b + c));
    assert_eq!((a * b) * c, a * (b * c));
}

#[test]
fn distributivity() {
    let values = sample_values();
    for a in &values {
        for b in &values {
            for c in [&values[2], &values[5], &values[7]] {
                assert_eq!((a + b) * c, &(a * c) + &(b * c));
            }
        }
    }
}

#[test]
fn subtraction_is_negated_addition() {
    let values = sample_values();
    for a in &values {
        for b in &values {
            assert_eq!(a - b, a + &(-b));
        }
    }
}

#[test]
fn sign_combinations() {
    assert_eq!((dec("100") - dec("1")).to_string(), "99");
    assert_eq!((dec("1") - dec("100")).to_string(), "-99");
    assert_eq!((dec("-100") + dec("1")).to_string(), "-99");
    assert_eq!((dec("-100") - dec("1")).to_string(), "-101");
    assert_eq!((dec("-100") - dec("-1")).to_string(), "-99");
    assert_eq!((dec("100") + dec("-100")).to_string(), "0");
}

#[test]
fn wildly_different_lengths() {
    let big = dec(&"123456789".repeat(50));
    let small = dec("7");
    let sum = &big + &small;
    assert_eq!(sum.digit_count(), big.digit_count());
    assert_eq!(&sum - &small, big);

    let product = &big * &small;
    assert_eq!(product, big.multiply_simple(&small));
    let back = {
        let mut p = product.clone();
        p.div_in_place(7).expect("nonzero divisor");
        p
    };
    assert_eq!(back, big);
}

#[test]
fn in_place_matches_out_of_place() {
    let values = sample_values();
    for a in &values {
        for b in &values {
            let mut x = a.clone();
            x += b;
            assert_eq!(x, a + b, "add {} {}", a, b);

            let mut x = a.clone();
            x -= b;
            assert_eq!(x, a - b, "sub {} {}", a, b);
        }
        let mut x = a.clone();
        x.mul_in_place(123_456);
        assert_eq!(x, a * 123_456u32);

        let mut x = a.clone();
        x += 987_654_321_987i64;
        let mut y = a.clone();
        y += &DecInt::from(987_654_321_987i64);
        assert_eq!(x, y);
    }
}

#[test]
fn primitive_overloads_at_extrema() {
    let mut v = DecInt::zero();
    v += i64::MAX;
    assert_eq!(v.to_string(), "9223372036854775807");
    v += i64::MAX;
    assert_eq!(v.to_string(), "18446744073709551614");
    v -= i64::MIN;
    assert_eq!(v.to_string(), "27670116110564327422");
    v -= i64::MAX;
    v -= i64::MAX;
    v -= i64::MAX;
    assert_eq!(v.to_string(), "1");
    v -= 2i64;
    assert_eq!(v.to_string(), "-1");
}

#[test]
fn simple_and_karatsuba_agree() {
    let a = dec(&"123456789".repeat(30));
    let b = dec(&"987654321".repeat(25));
    let expected = a.multiply_simple(&b);
    assert_eq!(expected.digit_count(), 495);
    let text = expected.to_string();
    assert!(text.starts_with("12193263135650053159"));
    assert!(text.ends_with("69347203169112635269"));

    for threshold in [1, 2, 30, 40] {
        assert_eq!(a.multiply_karatsuba(&b, threshold), expected);
        assert_eq!(b.multiply_karatsuba(&a, threshold), expected);
    }

    // Operand length exactly at the threshold.
    let at = dec(&"9".repeat(9 * 40));
    assert_eq!(at.limb_count(), 40);
    assert_eq!(at.multiply_karatsuba(&at, 40), at.multiply_simple(&at));
}

#[test]
fn known_product() {
    let a = dec("589034583485345");
    let b = dec("58903457894375873489578943534");
    assert_eq!(
        (&a * &b).to_string(),
        "34696173786660249457940746168929928671509230"
    );
}

#[test]
fn long_operand_strategies_agree() {
    let a = dec(&"5".repeat(10_000));
    let b = dec(&"6".repeat(100));
    let simple = a.multiply_simple(&b);
    let karatsuba = a.multiply_karatsuba(&b, 40);
    assert_eq!(simple, karatsuba);

    let text = simple.to_string();
    assert_eq!(text.len(), 10_100);
    assert!(text.starts_with("370370370370370370370370370370"));
    assert!(text.ends_with("629629629629629629629629629630"));
}

#[test]
fn increment_carries_through_long_run() {
    let mut v = dec(&"1".repeat(100_000));
    v.increment();
    let expected = format!("{}2", "1".repeat(99_999));
    assert_eq!(v.to_string(), expected);

    // And the inverse borrow chain.
    let mut v = dec(&format!("1{}", "0".repeat(100_000)));
    v.decrement();
    assert_eq!(v.to_string(), "9".repeat(100_000));
}

#[test]
fn pow_matches_known_values() {
    assert_eq!(DecInt::from(2u32).pow(64).to_string(), "18446744073709551616");

    let p = DecInt::from(7u32).pow(50);
    assert_eq!(p.digit_count(), 43);
    assert!(p.to_string().starts_with("17984650426474121466"));

    let p = DecInt::from(3u32).pow(1000);
    assert_eq!(p.digit_count(), 478);
    let text = p.to_string();
    assert!(text.starts_with("132207081948"));
    assert!(text.ends_with("902855220001"));
}

#[test]
fn digit_view_matches_rendering() {
    for v in sample_values() {
        let rendered = v.abs().to_string();
        assert_eq!(v.len(), rendered.len(), "{}", v);
        for (i, expected) in rendered.bytes().enumerate() {
            assert_eq!(v.byte_at(i).expect("in range"), expected, "{} at {}", v, i);
        }
        let err = v.byte_at(rendered.len()).unwrap_err();
        assert!(err.is_index());
    }
}

#[test]
fn digit_view_known_sequence() {
    let v = dec("1234567890123456789");
    assert_eq!(v.len(), 19);
    let expected = b"1234567890123456789";
    for (i, &byte) in expected.iter().enumerate() {
        assert_eq!(v.byte_at(i).expect("in range"), byte);
    }
}

#[test]
fn scientific_boundary_exponents() {
    for exponent in [8usize, 9, 10, 17, 18, 19, 27] {
        let v = dec(&format!("3e{}", exponent));
        assert_eq!(v.to_string(), format!("3{}", "0".repeat(exponent)));
        assert_eq!(v.digit_count(), exponent + 1);
    }
    assert_eq!(DecInt::from_scientific(3, 18).expect("in range"), dec("3e18"));
}

#[test]
fn copies_do_not_share_storage() {
    let original = dec(&"123456789".repeat(10));
    let mut copy = original.clone();
    copy.increment();
    assert_ne!(copy, original);
    assert_eq!(original, dec(&"123456789".repeat(10)));
}

#[test]
fn comparisons_and_hash_agree() {
    use std::collections::HashSet;

    let a = dec("12345678901234567890");
    let b = &a - &DecInt::from(1u32) + DecInt::from(1u32);
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));

    assert!(dec("-2") < dec("-1"));
    assert!(dec("-1") < dec("0"));
    assert!(dec("10000000000") > dec("9999999999"));
    assert_eq!(dec("0").cmp(&DecInt::zero()), std::cmp::Ordering::Equal);
}
