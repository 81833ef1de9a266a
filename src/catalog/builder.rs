//! Catalog Builder

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    catalog::{Catalog, CatalogError, definition::OfferDefinition, grammar::parse_offers},
    items::{Item, ItemCode, ItemKey},
    offers::{
        Offer, OfferKey, bulk::BulkOffer, free_item::FreeItemOffer, group::GroupOffer,
    },
};

/// Collects items and offers, then validates them into a [`Catalog`].
///
/// Offers may name items that are declared later; references are only resolved
/// by [`CatalogBuilder::build`].
#[derive(Debug)]
pub struct CatalogBuilder {
    currency: &'static Currency,
    items: Vec<(ItemCode, u64)>,
    known: FxHashSet<ItemCode>,
    offers: Vec<OfferDefinition>,
}

impl CatalogBuilder {
    /// Create an empty builder for a catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            known: FxHashSet::default(),
            offers: Vec::new(),
        }
    }

    /// Add an item with its unit price in minor units.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidCode`]: the code is not a valid item code.
    /// - [`CatalogError::ZeroPrice`]: the unit price is zero.
    /// - [`CatalogError::DuplicateItem`]: the code was already added.
    pub fn item(&mut self, code: &str, unit_price: u64) -> Result<&mut Self, CatalogError> {
        let code = ItemCode::new(code)?;

        if unit_price == 0 {
            return Err(CatalogError::ZeroPrice(code));
        }

        if !self.known.insert(code.clone()) {
            return Err(CatalogError::DuplicateItem(code));
        }

        self.items.push((code, unit_price));

        Ok(self)
    }

    /// Add an offer. Identical group offers are only kept once, since price tables
    /// repeat them on every member row.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the offer quantities or members are invalid.
    pub fn offer(&mut self, definition: OfferDefinition) -> Result<&mut Self, CatalogError> {
        let definition = definition.normalized();

        definition.validate()?;

        if definition.is_group() && self.offers.contains(&definition) {
            return Ok(self);
        }

        self.offers.push(definition);

        Ok(self)
    }

    /// Add `quantity` units of `code` for `price`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the code is invalid or `quantity` is below 2.
    pub fn bulk_offer(
        &mut self,
        code: &str,
        quantity: u64,
        price: u64,
    ) -> Result<&mut Self, CatalogError> {
        self.offer(OfferDefinition::Bulk {
            code: ItemCode::new(code)?,
            quantity,
            price,
        })
    }

    /// Add "buy `trigger_quantity` of `trigger`, get `target_quantity` of `target` free".
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if either code is invalid or a quantity is zero.
    pub fn free_item_offer(
        &mut self,
        trigger: &str,
        trigger_quantity: u64,
        target: &str,
        target_quantity: u64,
    ) -> Result<&mut Self, CatalogError> {
        self.offer(OfferDefinition::FreeItem {
            trigger: ItemCode::new(trigger)?,
            trigger_quantity,
            target: ItemCode::new(target)?,
            target_quantity,
        })
    }

    /// Add "any `quantity` of `members` for `price`".
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a code is invalid, `members` is empty or
    /// `quantity` is zero.
    pub fn group_offer(
        &mut self,
        members: &[&str],
        quantity: u64,
        price: u64,
    ) -> Result<&mut Self, CatalogError> {
        let members = members
            .iter()
            .map(|member| ItemCode::new(*member))
            .collect::<Result<Vec<_>, _>>()?;

        self.offer(OfferDefinition::Group {
            members,
            quantity,
            price,
        })
    }

    /// Add every offer in a price table cell such as `3A for 130, 5A for 200`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the text does not match the offer grammar.
    pub fn offers_from_str(&mut self, text: &str) -> Result<&mut Self, CatalogError> {
        for definition in parse_offers(text)? {
            self.offer(definition)?;
        }

        Ok(self)
    }

    /// Resolve every offer against the declared items and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if an offer names an item that was
    /// never added.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut items = SlotMap::with_key();
        let mut codes = FxHashMap::default();

        for (code, unit_price) in self.items {
            let key = items.insert(Item::new(code.clone(), unit_price));

            codes.insert(code, key);
        }

        let resolve = |code: &ItemCode| -> Result<ItemKey, CatalogError> {
            codes
                .get(code)
                .copied()
                .ok_or_else(|| CatalogError::UnknownItem(code.clone()))
        };

        let mut offers = SlotMap::with_key();
        let mut declared = Vec::with_capacity(self.offers.len());
        let mut groups: Vec<(Vec<ItemCode>, u64, u64, OfferKey)> = Vec::new();

        for definition in self.offers {
            let key = match definition {
                OfferDefinition::Bulk {
                    code,
                    quantity,
                    price,
                } => offers.insert(Offer::Bulk(BulkOffer::new(resolve(&code)?, quantity, price))),
                OfferDefinition::FreeItem {
                    trigger,
                    trigger_quantity,
                    target,
                    target_quantity,
                } => offers.insert(Offer::FreeItem(FreeItemOffer::new(
                    resolve(&trigger)?,
                    trigger_quantity,
                    resolve(&target)?,
                    target_quantity,
                ))),
                OfferDefinition::Group {
                    members,
                    quantity,
                    price,
                } => {
                    // Members arrive sorted by code, which is also the drain order.
                    let keys = members
                        .iter()
                        .map(resolve)
                        .collect::<Result<SmallVec<[ItemKey; 5]>, _>>()?;

                    let key = offers.insert(Offer::Group(GroupOffer::new(keys, quantity, price)));

                    groups.push((members, quantity, price, key));

                    key
                }
            };

            declared.push(key);
        }

        groups.sort();

        let group_order = groups.into_iter().map(|(.., key)| key).collect();

        Ok(Catalog::from_parts(
            self.currency,
            items,
            codes,
            offers,
            declared,
            group_order,
        ))
    }
}
