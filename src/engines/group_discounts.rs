//! Group Discount Engine

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    basket::Basket,
    catalog::Catalog,
    items::ItemKey,
    offers::OfferKey,
    pricing::{PricingError, add, multiply},
};

/// A group offer that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupApplication {
    /// Offer that fired
    pub offer: OfferKey,

    /// Number of bundles formed
    pub fires: u64,

    /// Price of all bundles together
    pub price: u64,

    /// Units taken from each member item, in drain order
    pub drained: SmallVec<[(ItemKey, u64); 5]>,
}

/// Result of applying every group offer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDiscounts {
    /// Sum of all bundle prices
    pub subtotal: u64,

    /// Offers that fired, in application order
    pub applications: SmallVec<[GroupApplication; 2]>,
}

/// Applies any-N-from-a-set offers, removing bundled units from the basket.
#[derive(Debug, Clone, Copy)]
pub struct GroupDiscountEngine<'c> {
    catalog: &'c Catalog,
}

impl<'c> GroupDiscountEngine<'c> {
    /// Create an engine over `catalog`.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Apply every group offer to `basket`.
    ///
    /// Offers run in the catalog's group order. Each one pools the current counts of
    /// its members, forms as many bundles as the pool allows, and drains the bundled
    /// units member by member in ascending code order.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the bundle subtotal overflows.
    pub fn apply(&self, basket: &mut Basket) -> Result<GroupDiscounts, PricingError> {
        let mut discounts = GroupDiscounts::default();

        for (key, offer) in self.catalog.group_offers() {
            let pool = offer
                .members()
                .iter()
                .try_fold(0, |pool, member| add(pool, basket.count(*member)))?;

            if pool < offer.quantity() {
                continue;
            }

            let fires = pool / offer.quantity();
            let price = multiply(fires, offer.price())?;

            // fires × quantity never exceeds the pool, so this cannot overflow.
            let mut outstanding = fires * offer.quantity();
            let mut drained = SmallVec::new();

            for &member in offer.members() {
                if outstanding == 0 {
                    break;
                }

                let taken = basket.remove(member, outstanding);

                if taken > 0 {
                    drained.push((member, taken));
                    outstanding -= taken;
                }
            }

            debug!(offer = ?key, pool, fires, price, "group offer fired");

            discounts.subtotal = add(discounts.subtotal, price)?;
            discounts.applications.push(GroupApplication {
                offer: key,
                fires,
                price,
                drained,
            });
        }

        Ok(discounts)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn catalog() -> TestResult<Catalog> {
        let mut builder = Catalog::builder(GBP);

        builder
            .item("S", 20)?
            .item("T", 20)?
            .item("X", 17)?
            .item("Y", 20)?
            .item("Z", 21)?
            .item("A", 50)?
            .offers_from_str("buy any 3 of (S,T,X,Y,Z) for 45")?;

        Ok(builder.build()?)
    }

    fn remaining(catalog: &Catalog, basket: &Basket) -> String {
        basket
            .iter()
            .filter_map(|(item, count)| {
                let code = catalog.code(item)?;
                let units = usize::try_from(count).ok()?;

                Some(code.as_str().repeat(units))
            })
            .collect()
    }

    #[test]
    fn pool_spans_member_codes() -> TestResult {
        let catalog = catalog()?;
        let mut basket = Basket::scan(&catalog, ["S", "Z", "S"])?;

        let discounts = GroupDiscountEngine::new(&catalog).apply(&mut basket)?;

        assert_eq!(discounts.subtotal, 45);
        assert_eq!(discounts.applications.len(), 1);
        assert!(basket.is_empty());

        Ok(())
    }

    #[test]
    fn below_threshold_leaves_basket_untouched() -> TestResult {
        let catalog = catalog()?;
        let mut basket = Basket::scan(&catalog, ["S", "Z", "A"])?;

        let discounts = GroupDiscountEngine::new(&catalog).apply(&mut basket)?;

        assert_eq!(discounts, GroupDiscounts::default());
        assert_eq!(remaining(&catalog, &basket), "SZA");

        Ok(())
    }

    #[test]
    fn members_drain_in_code_order() -> TestResult {
        let catalog = catalog()?;
        let mut basket = Basket::scan(&catalog, ["Z", "Y", "X", "T", "S", "Z", "A"])?;

        let discounts = GroupDiscountEngine::new(&catalog).apply(&mut basket)?;

        let application = discounts.applications.first().ok_or("no application")?;

        let drained: Vec<(&str, u64)> = application
            .drained
            .iter()
            .filter_map(|(item, units)| Some((catalog.code(*item)?.as_str(), *units)))
            .collect();

        assert_eq!(application.fires, 2);
        assert_eq!(discounts.subtotal, 90);
        assert_eq!(
            drained,
            vec![("S", 1), ("T", 1), ("X", 1), ("Y", 1), ("Z", 2)]
        );
        assert_eq!(remaining(&catalog, &basket), "A");

        Ok(())
    }

    #[test]
    fn leftover_units_stay_in_basket() -> TestResult {
        let catalog = catalog()?;
        let mut basket = Basket::scan(&catalog, ["Z", "Z", "Z", "Z", "X"])?;

        let discounts = GroupDiscountEngine::new(&catalog).apply(&mut basket)?;

        assert_eq!(discounts.subtotal, 45);
        // X sorts before Z, so it is bundled first and two Z remain.
        assert_eq!(remaining(&catalog, &basket), "ZZ");

        Ok(())
    }

    #[test]
    fn overlapping_groups_apply_in_member_order() -> TestResult {
        let mut builder = Catalog::builder(GBP);

        builder
            .item("A", 10)?
            .item("B", 10)?
            .item("C", 10)?
            .group_offer(&["B", "C"], 2, 12)?
            .group_offer(&["A", "B"], 2, 15)?;

        let catalog = builder.build()?;
        let mut basket = Basket::scan(&catalog, ["A", "B", "B", "C"])?;

        let discounts = GroupDiscountEngine::new(&catalog).apply(&mut basket)?;

        // (A,B) goes first and takes A and one B; (B,C) then bundles the rest.
        assert_eq!(discounts.subtotal, 27);
        assert_eq!(discounts.applications.len(), 2);
        assert!(basket.is_empty());

        Ok(())
    }
}
