//! Free Item Offers

use crate::items::ItemKey;

/// "Buying N units of X grants M units of Y at no charge", e.g. `2E get one B free`.
///
/// The trigger and target may be the same item, in which case the paid and the
/// free units come out of one pool (`2F get one F free` needs three F per cycle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeItemOffer {
    trigger: ItemKey,
    trigger_quantity: u64,
    target: ItemKey,
    target_quantity: u64,
}

impl FreeItemOffer {
    /// Create a new free-item offer. Both quantities must be at least 1.
    pub(crate) fn new(
        trigger: ItemKey,
        trigger_quantity: u64,
        target: ItemKey,
        target_quantity: u64,
    ) -> Self {
        debug_assert!(
            trigger_quantity > 0 && target_quantity > 0,
            "free-item quantities must be positive"
        );

        Self {
            trigger,
            trigger_quantity,
            target,
            target_quantity,
        }
    }

    /// Item that must be bought.
    pub fn trigger(&self) -> ItemKey {
        self.trigger
    }

    /// Units of the trigger item needed per firing.
    pub fn trigger_quantity(&self) -> u64 {
        self.trigger_quantity
    }

    /// Item given away.
    pub fn target(&self) -> ItemKey {
        self.target
    }

    /// Units of the target item given away per firing.
    pub fn target_quantity(&self) -> u64 {
        self.target_quantity
    }

    /// True when the offer gives away units of its own trigger item.
    pub fn is_self_referential(&self) -> bool {
        self.trigger == self.target
    }

    /// Number of times the offer fires for `trigger_count` units of the trigger item.
    pub fn fires(&self, trigger_count: u64) -> u64 {
        let cycle = if self.is_self_referential() {
            self.trigger_quantity.saturating_add(self.target_quantity)
        } else {
            self.trigger_quantity
        };

        trigger_count / cycle
    }
}
