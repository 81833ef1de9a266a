//! Bulk Offers

use crate::items::ItemKey;

/// "N units of X for a fixed bundle price", e.g. `3A for 130`.
///
/// Complete bundles replace per-unit pricing; leftover units fall through to the
/// next smaller bundle or the unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOffer {
    item: ItemKey,
    quantity: u64,
    price: u64,
}

impl BulkOffer {
    /// Create a new bulk offer. `quantity` must be at least 2, which the catalog
    /// builder checks before constructing one.
    pub(crate) fn new(item: ItemKey, quantity: u64, price: u64) -> Self {
        debug_assert!(quantity > 1, "bulk bundles need at least two units");

        Self {
            item,
            quantity,
            price,
        }
    }

    /// Item the bundle is made of.
    pub fn item(&self) -> ItemKey {
        self.item
    }

    /// Units per bundle.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Price of one complete bundle.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Split `count` units into complete bundles and leftover units.
    pub fn bundles_in(&self, count: u64) -> (u64, u64) {
        (count / self.quantity, count % self.quantity)
    }
}
