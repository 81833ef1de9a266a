//! Group Offers

use smallvec::SmallVec;

use crate::items::ItemKey;

/// "Any N units from a set of interchangeable items for a fixed price", e.g.
/// `buy any 3 of (S,T,X,Y,Z) for 45`.
///
/// Members are held in drain order: the catalog sorts them by ascending item code,
/// and units are taken from the first member before the next one is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOffer {
    members: SmallVec<[ItemKey; 5]>,
    quantity: u64,
    price: u64,
}

impl GroupOffer {
    /// Create a new group offer. `members` must be non-empty, de-duplicated and in
    /// drain order; `quantity` must be at least 1.
    pub(crate) fn new(members: SmallVec<[ItemKey; 5]>, quantity: u64, price: u64) -> Self {
        debug_assert!(!members.is_empty(), "group offers need members");
        debug_assert!(quantity > 0, "group threshold must be positive");

        Self {
            members,
            quantity,
            price,
        }
    }

    /// Member items, in drain order.
    pub fn members(&self) -> &[ItemKey] {
        &self.members
    }

    /// Units drawn from the pool per bundle.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Price of one bundle.
    pub fn price(&self) -> u64 {
        self.price
    }
}
