//! Offers
//!
//! Every offer in a catalog is one variant of [`Offer`]. Each pricing stage picks out
//! the variant it handles with [`Offer::as_bulk`], [`Offer::as_free_item`] or
//! [`Offer::as_group`] and ignores the rest.

use slotmap::new_key_type;

use crate::offers::{bulk::BulkOffer, free_item::FreeItemOffer, group::GroupOffer};

pub mod bulk;
pub mod free_item;
pub mod group;

new_key_type! {
    /// Offer Key
    pub struct OfferKey;
}

/// Offer enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// N units of one item for a fixed bundle price
    Bulk(BulkOffer),

    /// Buying N units of one item grants M units of another (or the same) item free
    FreeItem(FreeItemOffer),

    /// Any N units drawn from a set of items for a fixed bundle price
    Group(GroupOffer),
}

impl Offer {
    /// Return the bulk offer, if this is one.
    pub fn as_bulk(&self) -> Option<&BulkOffer> {
        match self {
            Offer::Bulk(bulk) => Some(bulk),
            Offer::FreeItem(_) | Offer::Group(_) => None,
        }
    }

    /// Return the free-item offer, if this is one.
    pub fn as_free_item(&self) -> Option<&FreeItemOffer> {
        match self {
            Offer::FreeItem(free_item) => Some(free_item),
            Offer::Bulk(_) | Offer::Group(_) => None,
        }
    }

    /// Return the group offer, if this is one.
    pub fn as_group(&self) -> Option<&GroupOffer> {
        match self {
            Offer::Group(group) => Some(group),
            Offer::Bulk(_) | Offer::FreeItem(_) => None,
        }
    }

}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;
    use smallvec::smallvec;

    use crate::items::ItemKey;

    use super::*;

    fn keys() -> (ItemKey, ItemKey) {
        let mut items = SlotMap::<ItemKey, ()>::with_key();

        (items.insert(()), items.insert(()))
    }

    #[test]
    fn variant_accessors_select_only_their_kind() {
        let (a, b) = keys();

        let bulk = Offer::Bulk(BulkOffer::new(a, 3, 130));
        let free_item = Offer::FreeItem(FreeItemOffer::new(a, 2, b, 1));
        let group = Offer::Group(GroupOffer::new(smallvec![a, b], 3, 45));

        assert!(bulk.as_bulk().is_some());
        assert!(bulk.as_free_item().is_none());
        assert!(bulk.as_group().is_none());

        assert!(free_item.as_free_item().is_some());
        assert!(free_item.as_bulk().is_none());
        assert!(free_item.as_group().is_none());

        assert!(group.as_group().is_some());
        assert!(group.as_bulk().is_none());
        assert!(group.as_free_item().is_none());
    }

}
