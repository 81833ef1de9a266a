//! Checkout
//!
//! Runs one basket through the pricing pipeline. Every call works on its own copy of
//! the basket, so a single [`Checkout`] can serve any number of callers at once.

use thiserror::Error;
use tracing::{Span, debug};

use smallvec::SmallVec;

use crate::{
    basket::{Basket, BasketError},
    catalog::Catalog,
    engines::{
        free_items::{FreeItemApplication, FreeItemEngine},
        group_discounts::{GroupDiscountEngine, GroupDiscounts},
    },
    pricing::{BulkPriceCalculator, BulkPricing, PricingError, add},
    receipt::Receipt,
};

/// Errors that can occur while checking out a basket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The scanned items could not be turned into a basket.
    #[error(transparent)]
    Basket(#[from] BasketError),

    /// Pricing the basket failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Pipeline stages, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Items are being scanned into the basket
    Building,

    /// Free-item offers have removed their free units
    FreeItemsApplied,

    /// Group offers have bundled their units
    GroupDiscountsApplied,

    /// Remaining units have been priced
    Priced,

    /// The total has been returned
    Done,
}

impl CheckoutStage {
    /// The stage that follows this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Building => Some(Self::FreeItemsApplied),
            Self::FreeItemsApplied => Some(Self::GroupDiscountsApplied),
            Self::GroupDiscountsApplied => Some(Self::Priced),
            Self::Priced => Some(Self::Done),
            Self::Done => None,
        }
    }
}

#[derive(Debug)]
struct StageTracker {
    stage: CheckoutStage,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            stage: CheckoutStage::Building,
        }
    }

    fn advance(&mut self, to: CheckoutStage) {
        debug_assert_eq!(
            self.stage.next(),
            Some(to),
            "checkout stages must run in order"
        );

        debug!(from = ?self.stage, ?to, "checkout stage");

        self.stage = to;
    }
}

/// Output of every stage of one run.
#[derive(Debug)]
struct Priced {
    scanned: Basket,
    free_items: SmallVec<[FreeItemApplication; 4]>,
    groups: GroupDiscounts,
    bulk: BulkPricing,
    total: u64,
}

/// Computes basket totals against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Checkout<'c> {
    catalog: &'c Catalog,
}

impl<'c> Checkout<'c> {
    /// Create a checkout over `catalog`.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Catalog this checkout prices against.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Total price of `items`, in minor units.
    ///
    /// An empty sequence totals zero.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Basket`]: an item code is not in the catalog. No partial
    ///   total is produced.
    /// - [`CheckoutError::Pricing`]: the total does not fit in `u64`. The face value
    ///   of the items at unit prices may exceed `u64` as long as the total does not.
    pub fn total<I, S>(&self, items: I) -> Result<u64, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.run(items)?.total)
    }

    /// Total price of a string of single-character item codes, ignoring whitespace.
    ///
    /// # Errors
    ///
    /// See [`Checkout::total`].
    pub fn total_skus(&self, skus: &str) -> Result<u64, CheckoutError> {
        self.total(sku_codes(skus))
    }

    /// Price `items` and keep the breakdown of every stage.
    ///
    /// # Errors
    ///
    /// See [`Checkout::total`].
    pub fn receipt<I, S>(&self, items: I) -> Result<Receipt, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let priced = self.run(items)?;

        let receipt = Receipt::new(
            self.catalog,
            &priced.scanned,
            priced.free_items,
            priced.groups,
            priced.bulk,
        )?;

        debug_assert_eq!(receipt.total(), priced.total, "receipt total must match stages");

        Ok(receipt)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(units = tracing::field::Empty))]
    fn run<I, S>(&self, items: I) -> Result<Priced, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stage = StageTracker::new();
        let mut basket = Basket::scan(self.catalog, items)?;

        Span::current().record("units", basket.len());

        let scanned = basket.clone();

        let free_items = FreeItemEngine::new(self.catalog).apply(&mut basket);
        stage.advance(CheckoutStage::FreeItemsApplied);

        let groups = GroupDiscountEngine::new(self.catalog).apply(&mut basket)?;
        stage.advance(CheckoutStage::GroupDiscountsApplied);

        let bulk = BulkPriceCalculator::new(self.catalog).price(&basket)?;
        stage.advance(CheckoutStage::Priced);

        let total = add(groups.subtotal, bulk.subtotal)?;
        stage.advance(CheckoutStage::Done);

        debug!(total, "checkout complete");

        Ok(Priced {
            scanned,
            free_items,
            groups,
            bulk,
            total,
        })
    }

    /// Receipt for a string of single-character item codes, ignoring whitespace.
    ///
    /// # Errors
    ///
    /// See [`Checkout::total`].
    pub fn receipt_skus(&self, skus: &str) -> Result<Receipt, CheckoutError> {
        self.receipt(sku_codes(skus))
    }
}

/// Split a string of single-character item codes, skipping whitespace.
pub fn sku_codes(skus: &str) -> impl Iterator<Item = String> + '_ {
    skus.chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
}
