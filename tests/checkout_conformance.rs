//! Checkout totals for the six-item and the full A-Z price tables.

use testresult::TestResult;

use checkout_engine::prelude::*;

fn assert_totals(catalog: &Catalog, cases: &[(&str, u64)]) -> TestResult {
    let checkout = Checkout::new(catalog);

    for &(skus, expected) in cases {
        assert_eq!(checkout.total_skus(skus)?, expected, "total of {skus:?}");
    }

    Ok(())
}

#[test]
fn empty_basket_totals_zero() -> TestResult {
    let catalog = Fixture::from_set("basic")?;

    assert_eq!(Checkout::new(&catalog).total_skus("")?, 0);

    Ok(())
}

#[test]
fn unknown_items_fail_the_checkout() -> TestResult {
    let catalog = Fixture::from_set("basic")?;
    let checkout = Checkout::new(&catalog);

    for (skus, position) in [("X", 0), ("AX", 1), ("ABCDX", 4)] {
        assert_eq!(
            checkout.total_skus(skus),
            Err(CheckoutError::Basket(BasketError::UnknownItem {
                code: "X".to_string(),
                position,
            })),
            "checkout of {skus:?}"
        );
    }

    Ok(())
}

#[test]
fn items_without_offers_sum_unit_prices() -> TestResult {
    let catalog = Fixture::from_set("basic")?;

    assert_totals(&catalog, &[("A", 50), ("AA", 100), ("AB", 80)])
}

#[test]
fn bulk_offers_prefer_the_largest_bundle() -> TestResult {
    let catalog = Fixture::from_set("basic")?;

    assert_totals(
        &catalog,
        &[
            ("AAA", 130),
            ("AAAA", 180),
            ("AAAAA", 200),
            ("AAAAAA", 250),
            ("AAAAAAAAAA", 400),
            ("AAAAAAAAAAA", 450),
            ("AAAAAAAAAAAAA", 530),
        ],
    )
}

#[test]
fn free_items_come_off_before_bulk_pricing() -> TestResult {
    let catalog = Fixture::from_set("basic")?;

    assert_totals(&catalog, &[("EEB", 80), ("EEEEBB", 160), ("EEBB", 110)])
}

#[test]
fn self_referential_free_items() -> TestResult {
    let catalog = Fixture::from_set("basic")?;

    assert_totals(
        &catalog,
        &[("F", 10), ("FF", 20), ("FFF", 20), ("FFFF", 30), ("FFFFFF", 40)],
    )
}

#[test]
fn free_items_and_bulk_offers_combine() -> TestResult {
    let catalog = Fixture::from_set("basic")?;

    assert_totals(&catalog, &[("EEBBB", 125), ("EEEEBBB", 190)])
}

#[test]
fn full_table_bulk_offers() -> TestResult {
    let catalog = Fixture::from_set("standard")?;

    assert_totals(
        &catalog,
        &[
            ("HHHHHHHHH", 85),
            ("HHHHHHHHHH", 80),
            ("HHHHHHHHHHHHHHH", 125),
            ("KK", 120),
            ("KKK", 190),
            ("PPPPP", 200),
            ("QQQ", 80),
            ("VV", 90),
            ("VVV", 130),
            ("VVVVV", 220),
        ],
    )
}

#[test]
fn full_table_free_items() -> TestResult {
    let catalog = Fixture::from_set("standard")?;

    assert_totals(
        &catalog,
        &[
            ("NNNM", 120),
            ("RRRQ", 150),
            ("RRRQQQ", 210),
            ("UUU", 120),
            ("UUUU", 120),
            ("UUUUUUUU", 240),
        ],
    )
}

#[test]
fn full_table_group_offer() -> TestResult {
    let catalog = Fixture::from_set("standard")?;

    assert_totals(
        &catalog,
        &[
            ("STX", 45),
            ("SSS", 45),
            ("ZZZZ", 66),
            ("STXYZ", 86),
            ("ZZZZZZ", 90),
            ("SZ", 41),
        ],
    )
}

#[test]
fn full_table_every_item_once() -> TestResult {
    let catalog = Fixture::from_set("standard")?;

    assert_totals(&catalog, &[("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 841)])
}
