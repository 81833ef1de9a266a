//! Catalog
//!
//! The immutable registry of items and offers consulted at checkout. A catalog can
//! only be produced by [`CatalogBuilder::build`], which rejects any offer that refers
//! to an unknown item, so checkout never meets a malformed catalog.

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SecondaryMap, SlotMap};
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{
    items::{Item, ItemCode, ItemKey},
    offers::{
        Offer, OfferKey, bulk::BulkOffer, free_item::FreeItemOffer, group::GroupOffer,
    },
};

pub mod builder;
pub mod definition;
pub mod grammar;

pub use builder::CatalogBuilder;
pub use definition::OfferDefinition;

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Item code is empty, not alphanumeric, or starts with a digit.
    #[error("Invalid item code: {0:?}")]
    InvalidCode(String),

    /// The same item code was declared twice.
    #[error("Duplicate item: {0}")]
    DuplicateItem(ItemCode),

    /// Items must have a positive unit price.
    #[error("Item {0} has a zero unit price")]
    ZeroPrice(ItemCode),

    /// An offer refers to an item the catalog does not contain.
    #[error("Offer refers to unknown item {0}")]
    UnknownItem(ItemCode),

    /// Offer text does not match the grammar, or its quantities are invalid.
    #[error("Invalid offer: {0}")]
    InvalidOffer(String),

    /// Group offer without members.
    #[error("Group offer has no members: {0}")]
    EmptyGroup(String),
}

/// Catalog of items and offers.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Currency every price is expressed in
    currency: &'static Currency,

    /// Items and their code lookup
    items: SlotMap<ItemKey, Item>,
    codes: FxHashMap<ItemCode, ItemKey>,

    /// Offers, plus the order they were declared in
    offers: SlotMap<OfferKey, Offer>,
    declared: Vec<OfferKey>,

    /// Bulk offers per item, largest bundle first
    bulk_offers: SecondaryMap<ItemKey, SmallVec<[OfferKey; 2]>>,

    /// Group offers in application order
    group_order: Vec<OfferKey>,
}

impl Catalog {
    /// Start building a catalog priced in `currency`.
    #[must_use]
    pub fn builder(currency: &'static Currency) -> CatalogBuilder {
        CatalogBuilder::new(currency)
    }

    pub(crate) fn from_parts(
        currency: &'static Currency,
        items: SlotMap<ItemKey, Item>,
        codes: FxHashMap<ItemCode, ItemKey>,
        offers: SlotMap<OfferKey, Offer>,
        declared: Vec<OfferKey>,
        group_order: Vec<OfferKey>,
    ) -> Self {
        let mut bulk_offers: SecondaryMap<ItemKey, SmallVec<[OfferKey; 2]>> = SecondaryMap::new();

        for &key in &declared {
            let Some(bulk) = offers.get(key).and_then(Offer::as_bulk) else {
                continue;
            };

            match bulk_offers.get_mut(bulk.item()) {
                Some(keys) => keys.push(key),
                None => {
                    bulk_offers.insert(bulk.item(), smallvec![key]);
                }
            }
        }

        // Stable sort: equal bundle sizes keep declaration order.
        for keys in bulk_offers.values_mut() {
            keys.sort_by_key(|key| {
                Reverse(
                    offers
                        .get(*key)
                        .and_then(Offer::as_bulk)
                        .map_or(0, BulkOffer::quantity),
                )
            });
        }

        Self {
            currency,
            items,
            codes,
            offers,
            declared,
            bulk_offers,
            group_order,
        }
    }

    /// Currency every price is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Look up an item key by code.
    pub fn item_key(&self, code: &str) -> Option<ItemKey> {
        self.codes.get(code).copied()
    }

    /// Get an item by key.
    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key)
    }

    /// Get an item's code by key.
    pub fn code(&self, key: ItemKey) -> Option<&ItemCode> {
        self.items.get(key).map(Item::code)
    }

    /// Iterate over the items in declaration order.
    pub fn items(&self) -> impl Iterator<Item = (ItemKey, &Item)> {
        self.items.iter()
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an offer by key.
    pub fn offer(&self, key: OfferKey) -> Option<&Offer> {
        self.offers.get(key)
    }

    /// Iterate over all offers in declaration order.
    pub fn offers(&self) -> impl Iterator<Item = (OfferKey, &Offer)> {
        self.declared
            .iter()
            .filter_map(|&key| self.offer(key).map(|offer| (key, offer)))
    }

    /// Free-item offers in declaration order.
    pub fn free_item_offers(&self) -> impl Iterator<Item = (OfferKey, &FreeItemOffer)> {
        self.offers()
            .filter_map(|(key, offer)| offer.as_free_item().map(|free_item| (key, free_item)))
    }

    /// Group offers in application order: by ascending member codes, then bundle
    /// size, then bundle price. Declaration order has no influence.
    pub fn group_offers(&self) -> impl Iterator<Item = (OfferKey, &GroupOffer)> {
        self.group_order
            .iter()
            .filter_map(|&key| self.offer(key).and_then(Offer::as_group).map(|group| (key, group)))
    }

    /// Bulk offers for `item`, largest bundle first.
    pub fn bulk_offers(&self, item: ItemKey) -> impl Iterator<Item = (OfferKey, &BulkOffer)> {
        self.bulk_offers
            .get(item)
            .into_iter()
            .flatten()
            .filter_map(|&key| self.offer(key).and_then(Offer::as_bulk).map(|bulk| (key, bulk)))
    }

    /// Describe an offer using item codes, in price table wording.
    pub fn definition(&self, key: OfferKey) -> Option<OfferDefinition> {
        let definition = match self.offer(key)? {
            Offer::Bulk(bulk) => OfferDefinition::Bulk {
                code: self.code(bulk.item())?.clone(),
                quantity: bulk.quantity(),
                price: bulk.price(),
            },
            Offer::FreeItem(free_item) => OfferDefinition::FreeItem {
                trigger: self.code(free_item.trigger())?.clone(),
                trigger_quantity: free_item.trigger_quantity(),
                target: self.code(free_item.target())?.clone(),
                target_quantity: free_item.target_quantity(),
            },
            Offer::Group(group) => OfferDefinition::Group {
                members: group
                    .members()
                    .iter()
                    .map(|member| self.code(*member).cloned())
                    .collect::<Option<Vec<_>>>()?,
                quantity: group.quantity(),
                price: group.price(),
            },
        };

        Some(definition)
    }
}
