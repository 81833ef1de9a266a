//! Pricing
//!
//! Prices whatever is left in a basket once the free-item and group stages have
//! run, applying bulk bundles largest first and charging leftovers at unit price.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use crate::{basket::Basket, catalog::Catalog, items::ItemKey, offers::OfferKey};

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PricingError {
    /// A subtotal does not fit in `u64` minor units.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// The basket holds an item the catalog does not know.
    #[error("item {0:?} is not in the catalog")]
    MissingItem(ItemKey),
}

/// `quantity × price`, checked.
pub(crate) fn multiply(quantity: u64, price: u64) -> Result<u64, PricingError> {
    quantity.checked_mul(price).ok_or(PricingError::Overflow)
}

/// `a + b`, checked.
pub(crate) fn add(a: u64, b: u64) -> Result<u64, PricingError> {
    a.checked_add(b).ok_or(PricingError::Overflow)
}

/// Calculates the price of the basket at unit prices, ignoring every offer.
///
/// # Errors
///
/// - [`PricingError::MissingItem`]: the basket holds an item not in `catalog`.
/// - [`PricingError::Overflow`]: the total does not fit in `u64`.
pub fn total_price(catalog: &Catalog, basket: &Basket) -> Result<u64, PricingError> {
    basket.iter().try_fold(0, |total, (item, count)| {
        let unit_price = catalog
            .item(item)
            .ok_or(PricingError::MissingItem(item))?
            .unit_price();

        add(total, multiply(count, unit_price)?)
    })
}

/// Bundles of one bulk offer used on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleUse {
    /// Bulk offer that was applied
    pub offer: OfferKey,

    /// Units per bundle
    pub quantity: u64,

    /// Number of complete bundles
    pub times: u64,

    /// Price of all these bundles together
    pub price: u64,
}

/// One item's remaining units after the offer engines, with their price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Item on this line
    pub item: ItemKey,

    /// Units priced on this line
    pub quantity: u64,

    /// Bulk bundles used, largest first
    pub bundles: SmallVec<[BundleUse; 2]>,

    /// Units left over after bundling, charged at unit price
    pub full_price_units: u64,

    /// Price of the line
    pub price: u64,
}

/// Result of bulk pricing a basket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkPricing {
    /// Sum of all line prices
    pub subtotal: u64,

    /// One line per item with a positive count
    pub lines: Vec<PricedLine>,
}

/// Prices remaining basket units using bulk bundle offers.
#[derive(Debug, Clone, Copy)]
pub struct BulkPriceCalculator<'c> {
    catalog: &'c Catalog,
}

impl<'c> BulkPriceCalculator<'c> {
    /// Create a calculator over `catalog`.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Price every item left in the basket.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if an item is missing from the catalog or a
    /// subtotal overflows.
    pub fn price(&self, basket: &Basket) -> Result<BulkPricing, PricingError> {
        let mut pricing = BulkPricing::default();

        for (item, count) in basket.iter() {
            let line = self.price_line(item, count)?;

            pricing.subtotal = add(pricing.subtotal, line.price)?;
            pricing.lines.push(line);
        }

        Ok(pricing)
    }

    /// Price `count` units of one item: largest bundles first, leftovers at unit price.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the item is missing from the catalog or the
    /// line price overflows.
    pub fn price_line(&self, item: ItemKey, count: u64) -> Result<PricedLine, PricingError> {
        let unit_price = self
            .catalog
            .item(item)
            .ok_or(PricingError::MissingItem(item))?
            .unit_price();

        let mut remaining = count;
        let mut price = 0;
        let mut bundles = SmallVec::new();

        for (offer, bulk) in self.catalog.bulk_offers(item) {
            let (times, leftover) = bulk.bundles_in(remaining);

            if times == 0 {
                continue;
            }

            let bundle_price = multiply(times, bulk.price())?;

            trace!(
                ?item,
                bundle = bulk.quantity(),
                times,
                bundle_price,
                "applied bulk bundles"
            );

            price = add(price, bundle_price)?;
            remaining = leftover;

            bundles.push(BundleUse {
                offer,
                quantity: bulk.quantity(),
                times,
                price: bundle_price,
            });
        }

        price = add(price, multiply(remaining, unit_price)?)?;

        Ok(PricedLine {
            item,
            quantity: count,
            bundles,
            full_price_units: remaining,
            price,
        })
    }
}
