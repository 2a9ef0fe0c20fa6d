//! Integration tests resolving deal records from fixtures.
//!
//! These tests run the full path a listing page takes: decode upstream
//! records, convert them to engine inputs, resolve and summarize.

#![allow(clippy::unwrap_used)]

use dealfinder_core::{DealRecord, Money, RecordError, resolve_breakdown};
use dealfinder_integration_tests::deal_cases;

// =============================================================================
// Fixture Resolution
// =============================================================================

#[test]
fn test_fixture_prices() {
    let cases = deal_cases().unwrap();
    assert!(!cases.is_empty());

    for case in &cases {
        let quote = case.deal.resolve().unwrap();
        assert_eq!(
            quote.final_price,
            Money::new(case.expected),
            "{} should resolve to {}",
            case.deal.title,
            case.expected
        );
    }
}

#[test]
fn test_fixture_savings_match_breakdown() {
    for case in deal_cases().unwrap() {
        let inputs = case.deal.price_inputs().unwrap();
        let breakdown = resolve_breakdown(&inputs).unwrap();
        let quote = case.deal.resolve().unwrap();

        assert_eq!(quote.final_price, breakdown.final_price);
        assert_eq!(
            quote.savings.minor(),
            quote.base_price.minor() - quote.final_price.minor(),
            "{}",
            case.deal.title
        );
    }
}

#[test]
fn test_json_and_yaml_records_agree() {
    let json = r#"{
        "title": "Wireless earbuds",
        "price": 1000,
        "coupon": { "code": "SAVE10", "discount": "10%" },
        "discounts": [{ "retailer": "Acme", "discount": "10%" }]
    }"#;
    let from_json: DealRecord = serde_json::from_str(json).unwrap();
    let from_yaml = deal_cases().unwrap().into_iter().next().unwrap().deal;

    assert_eq!(from_json, from_yaml);
    assert_eq!(from_json.resolve().unwrap().final_price, Money::new(810));
}

// =============================================================================
// Malformed Records
// =============================================================================

#[test]
fn test_malformed_record_is_rejected() {
    let yaml = r#"
title: Bad discount
price: 1000
discounts:
  - discount: "10%"
  - discount: "half off"
"#;
    let deal: DealRecord = serde_yaml::from_str(yaml).unwrap();
    let err = deal.resolve().unwrap_err();
    assert!(matches!(err, RecordError::Discount { index: 1, .. }));
}

#[test]
fn test_malformed_record_without_price_still_rejected() {
    // Record conversion parses every string even when the price is missing.
    let deal = DealRecord {
        title: "No price".to_string(),
        coupon: Some(dealfinder_core::CouponRecord {
            code: None,
            discount: Some("abc".to_string()),
        }),
        ..DealRecord::default()
    };
    assert!(matches!(deal.resolve(), Err(RecordError::Coupon(_))));
}
