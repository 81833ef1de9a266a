//! Checkout Engine
//!
//! Prices a basket of scanned items against a catalog of unit prices and offers:
//! bulk bundles (`3A for 130`), free items (`2E get one B free`) and groups
//! (`buy any 3 of (S,T,X,Y,Z) for 45`).
//!
//! ```
//! use checkout_engine::prelude::*;
//! use rusty_money::iso::GBP;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Catalog::builder(GBP);
//!
//! builder
//!     .item("A", 50)?
//!     .item("B", 30)?
//!     .offers_from_str("3A for 130")?;
//!
//! let catalog = builder.build()?;
//!
//! assert_eq!(Checkout::new(&catalog).total_skus("AAAB")?, 160);
//! # Ok(())
//! # }
//! ```

pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod engines;
pub mod fixtures;
pub mod items;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod receipt;
