//! Items

use std::{borrow::Borrow, fmt, str::FromStr};

use slotmap::new_key_type;

use crate::catalog::CatalogError;

new_key_type! {
    /// Item Key
    pub struct ItemKey;
}

/// Identifier of a product type, e.g. `A` or `SKU42`.
///
/// Codes are non-empty ASCII alphanumerics that start with a letter, so the
/// quantity prefix of offer text such as `10H for 80` never merges into the code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemCode(String);

impl ItemCode {
    /// Create a validated item code.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidCode`] if the code is empty, contains anything
    /// other than ASCII letters and digits, or starts with a digit.
    pub fn new(code: impl Into<String>) -> Result<Self, CatalogError> {
        let code = code.into();
        let mut chars = code.chars();

        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric());

        if valid {
            Ok(Self(code))
        } else {
            Err(CatalogError::InvalidCode(code))
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemCode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for ItemCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A catalog entry: a product code and its unit price in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    code: ItemCode,
    unit_price: u64,
}

impl Item {
    /// Creates a new item with the given code and unit price.
    #[must_use]
    pub fn new(code: ItemCode, unit_price: u64) -> Self {
        Self { code, unit_price }
    }

    /// Returns the code of the item
    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    /// Returns the unit price of the item
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Price of `quantity` units at the unit price, or `None` on overflow.
    pub fn price_of(&self, quantity: u64) -> Option<u64> {
        self.unit_price.checked_mul(quantity)
    }
}
