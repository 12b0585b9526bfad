// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

#[test]
fn test_from_decimal_scales_to_cents() {
    assert_eq!(Money::from_decimal(dec!(100)).unwrap().cents(), 10_000);
    assert_eq!(Money::from_decimal(dec!(12.5)).unwrap().cents(), 1_250);
    assert_eq!(Money::from_decimal(dec!(0.01)).unwrap().cents(), 1);
    assert_eq!(Money::from_decimal(dec!(-30.25)).unwrap().cents(), -3_025);
}

#[test]
fn test_from_decimal_accepts_trailing_zeros_beyond_scale() {
    let money: Money = Money::from_decimal(dec!(7.5000)).unwrap();
    assert_eq!(money.cents(), 750);
}

#[test]
fn test_from_decimal_rejects_sub_cent_precision() {
    let result: Result<Money, DomainError> = Money::from_decimal(dec!(1.005));
    assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
}

#[test]
fn test_from_decimal_rejects_out_of_range_values() {
    let result: Result<Money, DomainError> = Money::from_decimal(Decimal::MAX);
    assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
}

#[test]
fn test_display_uses_two_decimal_places() {
    assert_eq!(Money::from_cents(10_000).to_string(), "100.00");
    assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    assert_eq!(Money::ZERO.to_string(), "0.00");
}

#[test]
fn test_from_str_parses_and_validates() {
    assert_eq!(Money::from_str(" 42.10 ").unwrap(), Money::from_cents(4_210));
    assert!(matches!(
        Money::from_str("abc"),
        Err(DomainError::InvalidAmount(_))
    ));
    assert!(matches!(
        Money::from_str("0.001"),
        Err(DomainError::InvalidAmount(_))
    ));
}

#[test]
fn test_checked_arithmetic_detects_overflow() {
    let max: Money = Money::from_cents(i64::MAX);
    assert!(max.checked_add(Money::from_cents(1)).is_none());
    assert!(Money::from_cents(i64::MIN).checked_neg().is_none());
    assert_eq!(
        Money::from_cents(500).checked_sub(Money::from_cents(700)),
        Some(Money::from_cents(-200))
    );
}

#[test]
fn test_checked_sum() {
    let amounts = vec![
        Money::from_cents(100),
        Money::from_cents(250),
        Money::from_cents(-50),
    ];
    assert_eq!(Money::checked_sum(amounts), Some(Money::from_cents(300)));
    assert_eq!(Money::checked_sum(Vec::new()), Some(Money::ZERO));
    assert_eq!(
        Money::checked_sum(vec![Money::from_cents(i64::MAX), Money::from_cents(1)]),
        None
    );
}

#[test]
fn test_sign_predicates() {
    assert!(Money::from_cents(1).is_positive());
    assert!(!Money::ZERO.is_positive());
    assert!(Money::ZERO.is_zero());
    assert!(Money::from_cents(-1).is_negative());
}

#[test]
fn test_decimal_conversions() {
    let parsed: Money = Money::try_from(dec!(99.99)).unwrap();
    assert_eq!(parsed.cents(), 9_999);
    assert_eq!(Decimal::from(parsed), dec!(99.99));
    assert_eq!(Money::from_cents(12_345).to_decimal().to_string(), "123.45");
}
