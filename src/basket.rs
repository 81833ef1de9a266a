//! Basket

use slotmap::SecondaryMap;
use thiserror::Error;

use crate::{catalog::Catalog, items::ItemKey};

/// Errors related to basket construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasketError {
    /// A scanned code has no catalog item.
    #[error("Item {code:?} at position {position} is not in the catalog")]
    UnknownItem {
        /// The code as scanned
        code: String,

        /// Zero-based position of the code in the scanned sequence
        position: usize,
    },
}

/// Unit counts per catalog item, used as working state for one checkout.
#[derive(Debug, Clone, Default)]
pub struct Basket {
    counts: SecondaryMap<ItemKey, u64>,
}

impl Basket {
    /// Create an empty basket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a basket by scanning item codes against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::UnknownItem`] for the first code the catalog does not
    /// contain. No basket is produced in that case, however many codes were valid.
    pub fn scan<I, S>(catalog: &Catalog, codes: I) -> Result<Self, BasketError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut basket = Self::new();

        for (position, code) in codes.into_iter().enumerate() {
            let code = code.as_ref();

            let item = catalog
                .item_key(code)
                .ok_or_else(|| BasketError::UnknownItem {
                    code: code.to_string(),
                    position,
                })?;

            basket.add(item, 1);
        }

        Ok(basket)
    }

    /// Add `quantity` units of `item`.
    pub fn add(&mut self, item: ItemKey, quantity: u64) {
        match self.counts.get_mut(item) {
            Some(count) => *count = count.saturating_add(quantity),
            None => {
                self.counts.insert(item, quantity);
            }
        }
    }

    /// Remove up to `quantity` units of `item`, never going below zero.
    ///
    /// Returns the number of units actually removed.
    pub fn remove(&mut self, item: ItemKey, quantity: u64) -> u64 {
        let Some(count) = self.counts.get_mut(item) else {
            return 0;
        };

        let removed = quantity.min(*count);

        *count -= removed;

        removed
    }

    /// Units of `item` in the basket.
    pub fn count(&self, item: ItemKey) -> u64 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    /// Iterate over items with a positive count.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, u64)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(item, count)| (item, *count))
    }

    /// Total number of units in the basket.
    pub fn len(&self) -> u64 {
        self.counts.values().fold(0, |acc, count| acc.saturating_add(*count))
    }

    /// Check if the basket holds no units.
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|count| *count == 0)
    }
}
