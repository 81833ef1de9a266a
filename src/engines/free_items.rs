//! Free Item Engine

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{basket::Basket, catalog::Catalog, items::ItemKey, offers::OfferKey};

/// A free-item offer that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeItemApplication {
    /// Offer that fired
    pub offer: OfferKey,

    /// Item given away
    pub target: ItemKey,

    /// Number of times the offer fired
    pub fires: u64,

    /// Units actually taken out of the basket
    pub units_freed: u64,
}

/// Applies free-item offers by removing the free units from the basket.
///
/// Offers run in catalog declaration order. Each offer sees the counts left by the
/// ones before it, so two offers targeting the same item cannot free the same unit.
#[derive(Debug, Clone, Copy)]
pub struct FreeItemEngine<'c> {
    catalog: &'c Catalog,
}

impl<'c> FreeItemEngine<'c> {
    /// Create an engine over `catalog`.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Apply every free-item offer to `basket`.
    pub fn apply(&self, basket: &mut Basket) -> SmallVec<[FreeItemApplication; 4]> {
        let mut applications = SmallVec::new();

        for (key, offer) in self.catalog.free_item_offers() {
            let trigger_count = basket.count(offer.trigger());

            if trigger_count < offer.trigger_quantity() {
                trace!(offer = ?key, trigger_count, "free-item trigger not met");
                continue;
            }

            if basket.count(offer.target()) < offer.target_quantity() {
                trace!(offer = ?key, "free-item target not in basket");
                continue;
            }

            let fires = offer.fires(trigger_count);

            if fires == 0 {
                continue;
            }

            let units_freed = basket.remove(
                offer.target(),
                fires.saturating_mul(offer.target_quantity()),
            );

            debug!(offer = ?key, fires, units_freed, "free-item offer fired");

            applications.push(FreeItemApplication {
                offer: key,
                target: offer.target(),
                fires,
                units_freed,
            });
        }

        applications
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn apply(catalog: &Catalog, codes: &str) -> TestResult<(Basket, Vec<FreeItemApplication>)> {
        let mut basket = Basket::scan(catalog, codes.chars().map(String::from))?;
        let applications = FreeItemEngine::new(catalog).apply(&mut basket);

        Ok((basket, applications.into_vec()))
    }

    fn count(catalog: &Catalog, basket: &Basket, code: &str) -> TestResult<u64> {
        Ok(basket.count(catalog.item_key(code).ok_or("missing item")?))
    }

    #[test]
    fn cross_item_offer_frees_target_units() -> TestResult {
        let mut builder = Catalog::builder(GBP);
        builder
            .item("E", 40)?
            .item("B", 30)?
            .free_item_offer("E", 2, "B", 1)?;
        let catalog = builder.build()?;

        let (basket, applications) = apply(&catalog, "EEEEBBB")?;

        assert_eq!(count(&catalog, &basket, "E")?, 4);
        assert_eq!(count(&catalog, &basket, "B")?, 1);
        assert_eq!(applications.len(), 1);
        assert_eq!(applications.first().map(|app| app.fires), Some(2));
        assert_eq!(applications.first().map(|app| app.units_freed), Some(2));

        Ok(())
    }

    #[test]
    fn freed_units_are_clamped_to_what_is_present() -> TestResult {
        let mut builder = Catalog::builder(GBP);
        builder
            .item("E", 40)?
            .item("B", 30)?
            .free_item_offer("E", 2, "B", 1)?;
        let catalog = builder.build()?;

        let (basket, applications) = apply(&catalog, "EEEEEEB")?;

        assert_eq!(count(&catalog, &basket, "B")?, 0);
        assert_eq!(applications.first().map(|app| app.fires), Some(3));
        assert_eq!(applications.first().map(|app| app.units_freed), Some(1));

        Ok(())
    }

    #[test]
    fn offer_skips_without_target_in_basket() -> TestResult {
        let mut builder = Catalog::builder(GBP);
        builder
            .item("E", 40)?
            .item("B", 30)?
            .free_item_offer("E", 2, "B", 1)?;
        let catalog = builder.build()?;

        let (basket, applications) = apply(&catalog, "EE")?;

        assert_eq!(count(&catalog, &basket, "E")?, 2);
        assert!(applications.is_empty());

        Ok(())
    }

    #[test]
    fn self_referential_offer_draws_from_one_pool() -> TestResult {
        let mut builder = Catalog::builder(GBP);
        builder.item("F", 10)?.free_item_offer("F", 2, "F", 1)?;
        let catalog = builder.build()?;

        for (codes, remaining) in [("F", 1), ("FF", 2), ("FFF", 2), ("FFFF", 3), ("FFFFFF", 4)] {
            let (basket, _) = apply(&catalog, codes)?;

            assert_eq!(count(&catalog, &basket, "F")?, remaining, "basket {codes}");
        }

        Ok(())
    }

    #[test]
    fn later_offers_see_earlier_reductions() -> TestResult {
        let mut builder = Catalog::builder(GBP);
        builder
            .item("E", 40)?
            .item("N", 40)?
            .item("B", 30)?
            .free_item_offer("E", 2, "B", 1)?
            .free_item_offer("N", 1, "B", 2)?;
        let catalog = builder.build()?;

        let (basket, applications) = apply(&catalog, "EENBB")?;

        // E frees one B; the single B left is below N's target quantity of two.
        assert_eq!(count(&catalog, &basket, "B")?, 1);
        assert_eq!(applications.len(), 1);

        Ok(())
    }
}
