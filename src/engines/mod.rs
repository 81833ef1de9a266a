//! Offer Engines
//!
//! Stages that run before bulk pricing and change the basket in place.

pub mod free_items;
pub mod group_discounts;
