//! Checkout engine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    catalog::{Catalog, CatalogBuilder, CatalogError, OfferDefinition},
    checkout::{Checkout, CheckoutError, CheckoutStage, sku_codes},
    engines::{
        free_items::{FreeItemApplication, FreeItemEngine},
        group_discounts::{GroupApplication, GroupDiscountEngine, GroupDiscounts},
    },
    fixtures::{Fixture, FixtureError, load_catalog, parse_catalog},
    items::{Item, ItemCode, ItemKey},
    offers::{
        Offer, OfferKey, bulk::BulkOffer, free_item::FreeItemOffer, group::GroupOffer,
    },
    pricing::{BulkPriceCalculator, BulkPricing, PricedLine, PricingError},
    receipt::{Receipt, ReceiptError},
};
