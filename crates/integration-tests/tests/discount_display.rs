//! Integration tests for compound discount display.

use dealfinder_core::{CompoundDiscount, CurrencyCode, CurrencyFormatter};

#[test]
fn test_percentage_and_flat() {
    let formatter = CurrencyFormatter::new(CurrencyCode::USD);
    assert_eq!(formatter.format_compound_discount("10%+5"), "$5.00 + 10%");
}

#[test]
fn test_longest_rendering_first() {
    let formatter = CurrencyFormatter::new(CurrencyCode::USD);
    assert_eq!(
        formatter.format_compound_discount("2 + 12.5% + 250"),
        "$250.00 + $2.00 + 12.5%"
    );
}

#[test]
fn test_one_formatter_many_calls() {
    let formatter = CurrencyFormatter::new(CurrencyCode::EUR);
    let rendered: Vec<String> = ["5", "10%", "1000+5%"]
        .iter()
        .map(|d| formatter.format_compound_discount(d))
        .collect();
    assert_eq!(rendered, ["€5.00", "10%", "€1,000.00 + 5%"]);
}

#[test]
fn test_display_tokens_match_parsed_tokens() {
    // The formatter and the parser agree on how many instruments a string holds.
    let formatter = CurrencyFormatter::new(CurrencyCode::USD);
    for input in ["10%+5", "5", "1%+2%+3", "7.5% + 20"] {
        let parsed = CompoundDiscount::parse(input).unwrap_or_default();
        let rendered = formatter.format_compound_discount(input);
        assert_eq!(rendered.split(" + ").count(), parsed.len(), "{input}");
    }
}
