//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    basket::Basket,
    catalog::Catalog,
    engines::{free_items::FreeItemApplication, group_discounts::GroupDiscounts},
    items::ItemKey,
    offers::OfferKey,
    pricing::{BulkPricing, PricingError, add, total_price},
};

/// Errors that can occur when presenting a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount is too large to be shown as money.
    #[error("Amount {0} is out of range for display")]
    AmountOutOfRange(u64),

    /// The scanned items are worth more at unit prices than fits in `u64`.
    #[error("Face value of the basket is out of range")]
    FaceValueOutOfRange,

    /// The receipt refers to an item missing from the catalog it is shown with.
    #[error("Missing item {0:?}")]
    MissingItem(ItemKey),

    /// The receipt refers to an offer missing from the catalog it is shown with.
    #[error("Missing offer {0:?}")]
    MissingOffer(OfferKey),

    /// Writing the receipt failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Breakdown of one checkout: what every stage did and what it cost.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Currency every amount is expressed in
    currency: &'static Currency,

    /// Price of the scanned basket at unit prices, if it fits in `u64`
    subtotal: Option<u64>,

    /// Free-item offers that fired
    free_items: SmallVec<[FreeItemApplication; 4]>,

    /// Group offers that fired
    groups: GroupDiscounts,

    /// Bulk pricing of what was left
    bulk: BulkPricing,

    /// Amount due
    total: u64,
}

impl Receipt {
    /// Assemble a receipt from the results of each stage.
    ///
    /// `scanned` is the basket as it was before any offer touched it. Its face value
    /// may overflow even when the discounted total does not; the receipt then has no
    /// subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total cannot be calculated.
    pub fn new(
        catalog: &Catalog,
        scanned: &Basket,
        free_items: SmallVec<[FreeItemApplication; 4]>,
        groups: GroupDiscounts,
        bulk: BulkPricing,
    ) -> Result<Self, PricingError> {
        let subtotal = total_price(catalog, scanned).ok();
        let total = add(groups.subtotal, bulk.subtotal)?;

        Ok(Self {
            currency: catalog.currency(),
            subtotal,
            free_items,
            groups,
            bulk,
            total,
        })
    }

    /// Currency every amount is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Price of the scanned items at unit prices, in minor units.
    ///
    /// `None` when the face value does not fit in `u64`.
    pub fn subtotal(&self) -> Option<u64> {
        self.subtotal
    }

    /// Amount due, in minor units.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Amount saved against unit prices, in minor units.
    ///
    /// Zero when a catalog prices a bundle above the face value of its units, and
    /// `None` when there is no subtotal.
    pub fn savings(&self) -> Option<u64> {
        self.subtotal.map(|subtotal| subtotal.saturating_sub(self.total))
    }

    /// Free-item offers that fired, in the order they were applied.
    pub fn free_items(&self) -> &[FreeItemApplication] {
        &self.free_items
    }

    /// Group offers that fired and their subtotal.
    pub fn group_discounts(&self) -> &GroupDiscounts {
        &self.groups
    }

    /// Bulk pricing of the units left after the free-item and group stages.
    pub fn bulk_pricing(&self) -> &BulkPricing {
        &self.bulk
    }

    /// Subtotal as money.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::FaceValueOutOfRange`] if there is no subtotal, or
    /// [`ReceiptError::AmountOutOfRange`] if it does not fit in `i64`.
    pub fn subtotal_money(&self) -> Result<Money<'static, Currency>, ReceiptError> {
        self.money(self.subtotal.ok_or(ReceiptError::FaceValueOutOfRange)?)
    }

    /// Total as money.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::AmountOutOfRange`] if the amount does not fit in `i64`.
    pub fn total_money(&self) -> Result<Money<'static, Currency>, ReceiptError> {
        self.money(self.total)
    }

    /// Savings as money.
    ///
    /// # Errors
    ///
    /// See [`Receipt::subtotal_money`].
    pub fn savings_money(&self) -> Result<Money<'static, Currency>, ReceiptError> {
        self.money(self.savings().ok_or(ReceiptError::FaceValueOutOfRange)?)
    }

    fn money(&self, minor_units: u64) -> Result<Money<'static, Currency>, ReceiptError> {
        let minor_units = i64::try_from(minor_units)
            .map_err(|_err| ReceiptError::AmountOutOfRange(minor_units))?;

        Ok(Money::from_minor(minor_units, self.currency))
    }

    /// Write the receipt as a table followed by its totals.
    ///
    /// `catalog` must be the catalog the receipt was produced with. Subtotal and
    /// savings are left out when the face value is out of range.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an item or offer cannot be found in `catalog`,
    /// an amount cannot be shown as money, or writing fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalog: &Catalog,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Units", "Offer", "Price"]);

        self.append_free_item_rows(&mut builder, catalog)?;
        self.append_group_rows(&mut builder, catalog)?;
        self.append_bulk_rows(&mut builder, catalog)?;

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(1..2), Alignment::right());
        table.modify(Columns::new(3..4), Alignment::right());

        writeln!(out, "{table}")?;

        if self.subtotal.is_some() {
            writeln!(out, " Subtotal: {}", self.subtotal_money()?)?;
            writeln!(out, " Savings:  {}", self.savings_money()?)?;
        }

        writeln!(out, " Total:    {}", self.total_money()?)?;

        Ok(())
    }

    fn append_free_item_rows(
        &self,
        builder: &mut Builder,
        catalog: &Catalog,
    ) -> Result<(), ReceiptError> {
        for application in &self.free_items {
            builder.push_record([
                code_of(catalog, application.target)?,
                application.units_freed.to_string(),
                offer_text(catalog, application.offer)?,
                self.money(0)?.to_string(),
            ]);
        }

        Ok(())
    }

    fn append_group_rows(
        &self,
        builder: &mut Builder,
        catalog: &Catalog,
    ) -> Result<(), ReceiptError> {
        for application in &self.groups.applications {
            let members = application
                .drained
                .iter()
                .map(|(item, units)| -> Result<String, ReceiptError> {
                    Ok(format!("{}×{units}", code_of(catalog, *item)?))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let units = application
                .drained
                .iter()
                .fold(0_u64, |total, (_, units)| total.saturating_add(*units));

            builder.push_record([
                members.join(" "),
                units.to_string(),
                offer_text(catalog, application.offer)?,
                self.money(application.price)?.to_string(),
            ]);
        }

        Ok(())
    }

    fn append_bulk_rows(
        &self,
        builder: &mut Builder,
        catalog: &Catalog,
    ) -> Result<(), ReceiptError> {
        for line in &self.bulk.lines {
            let code = code_of(catalog, line.item)?;

            for bundle in &line.bundles {
                builder.push_record([
                    code.clone(),
                    bundle.quantity.saturating_mul(bundle.times).to_string(),
                    offer_text(catalog, bundle.offer)?,
                    self.money(bundle.price)?.to_string(),
                ]);
            }

            if line.full_price_units > 0 {
                let unit_price = catalog
                    .item(line.item)
                    .ok_or(ReceiptError::MissingItem(line.item))?
                    .unit_price();

                let price = line
                    .full_price_units
                    .checked_mul(unit_price)
                    .ok_or(ReceiptError::AmountOutOfRange(u64::MAX))?;

                builder.push_record([
                    code,
                    line.full_price_units.to_string(),
                    String::new(),
                    self.money(price)?.to_string(),
                ]);
            }
        }

        Ok(())
    }
}

fn code_of(catalog: &Catalog, item: ItemKey) -> Result<String, ReceiptError> {
    catalog
        .code(item)
        .map(ToString::to_string)
        .ok_or(ReceiptError::MissingItem(item))
}

fn offer_text(catalog: &Catalog, offer: OfferKey) -> Result<String, ReceiptError> {
    catalog
        .definition(offer)
        .map(|definition| definition.to_string())
        .ok_or(ReceiptError::MissingOffer(offer))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::checkout::Checkout;

    use super::*;

    fn catalog() -> TestResult<Catalog> {
        let mut builder = Catalog::builder(GBP);

        builder
            .item("A", 50)?
            .item("B", 30)?
            .item("E", 40)?
            .item("S", 20)?
            .item("T", 20)?
            .item("X", 17)?
            .offers_from_str("3A for 130, 5A for 200")?
            .offers_from_str("2E get one B free")?
            .offers_from_str("buy any 3 of (S,T,X) for 45")?;

        Ok(builder.build()?)
    }

    #[test]
    fn totals_and_savings_follow_the_stages() -> TestResult {
        let catalog = catalog()?;
        let receipt = Checkout::new(&catalog).receipt_skus("AAAAEEBSTX")?;

        // 4A = 180, 2E = 80, B free, S+T+X = 45
        assert_eq!(receipt.total(), 305);
        assert_eq!(receipt.subtotal(), Some(200 + 80 + 30 + 57));
        assert_eq!(receipt.savings(), Some(62));
        assert_eq!(receipt.free_items().len(), 1);
        assert_eq!(receipt.group_discounts().subtotal, 45);
        assert_eq!(receipt.bulk_pricing().subtotal, 260);

        Ok(())
    }

    #[test]
    fn amounts_convert_to_money() -> TestResult {
        let catalog = catalog()?;
        let receipt = Checkout::new(&catalog).receipt_skus("AAA")?;

        assert_eq!(receipt.total_money()?, Money::from_minor(130, GBP));
        assert_eq!(receipt.subtotal_money()?, Money::from_minor(150, GBP));
        assert_eq!(receipt.savings_money()?, Money::from_minor(20, GBP));
        assert_eq!(receipt.currency(), GBP);

        Ok(())
    }

    #[test]
    fn empty_receipt_is_all_zero() -> TestResult {
        let catalog = catalog()?;
        let receipt = Checkout::new(&catalog).receipt_skus("")?;

        assert_eq!(receipt.total(), 0);
        assert_eq!(receipt.subtotal(), Some(0));
        assert_eq!(receipt.savings(), Some(0));
        assert!(receipt.bulk_pricing().lines.is_empty());

        Ok(())
    }

    #[test]
    fn write_to_lists_offers_and_totals() -> TestResult {
        let catalog = catalog()?;
        let receipt = Checkout::new(&catalog).receipt_skus("AAAAEEBSTX")?;

        let mut out = Vec::new();
        receipt.write_to(&mut out, &catalog)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("3A for 130"), "bulk offer row:\n{text}");
        assert!(text.contains("2E get one B free"), "free-item row:\n{text}");
        assert!(text.contains("buy any 3 of (S,T,X) for 45"), "group row:\n{text}");
        assert!(text.contains("S×1 T×1 X×1"), "group members:\n{text}");
        assert!(text.contains("Subtotal"), "summary:\n{text}");
        assert!(text.contains("Total"), "summary:\n{text}");

        Ok(())
    }

    #[test]
    fn write_to_rejects_a_foreign_catalog() -> TestResult {
        let catalog = catalog()?;
        let receipt = Checkout::new(&catalog).receipt_skus("A")?;

        let other = Catalog::builder(GBP).build()?;

        let result = receipt.write_to(Vec::<u8>::new(), &other);

        assert!(
            matches!(result, Err(ReceiptError::MissingItem(_))),
            "expected a missing item, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn face_value_overflow_leaves_out_the_subtotal() -> TestResult {
        let mut builder = Catalog::builder(GBP);

        builder
            .item("A", u64::MAX / 4 + 1)?
            .offers_from_str("4A for 10")?;

        let catalog = builder.build()?;
        let receipt = Checkout::new(&catalog).receipt_skus("AAAA")?;

        assert_eq!(receipt.total(), 10);
        assert_eq!(receipt.subtotal(), None);
        assert_eq!(receipt.savings(), None);
        assert_eq!(receipt.total_money()?, Money::from_minor(10, GBP));
        assert!(matches!(
            receipt.subtotal_money(),
            Err(ReceiptError::FaceValueOutOfRange)
        ));

        let mut out = Vec::new();
        receipt.write_to(&mut out, &catalog)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("4A for 10"), "bulk offer row:\n{text}");
        assert!(!text.contains("Subtotal"), "no subtotal line:\n{text}");
        assert!(text.contains("Total"), "summary:\n{text}");

        Ok(())
    }
}
