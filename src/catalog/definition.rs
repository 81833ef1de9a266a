//! Offer Definitions
//!
//! Offers as written in a price table, naming items by code. The catalog builder
//! resolves them into [`Offer`](crate::offers::Offer)s keyed by [`ItemKey`](crate::items::ItemKey).

use std::fmt;

use crate::{catalog::CatalogError, items::ItemCode};

/// An offer that names its items by code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OfferDefinition {
    /// `3A for 130`
    Bulk {
        /// Item the bundle is made of
        code: ItemCode,
        /// Units per bundle
        quantity: u64,
        /// Bundle price
        price: u64,
    },

    /// `2E get one B free`
    FreeItem {
        /// Item that must be bought
        trigger: ItemCode,
        /// Units of the trigger needed per firing
        trigger_quantity: u64,
        /// Item given away
        target: ItemCode,
        /// Units given away per firing
        target_quantity: u64,
    },

    /// `buy any 3 of (S,T,X,Y,Z) for 45`
    Group {
        /// Member item codes
        members: Vec<ItemCode>,
        /// Units per bundle
        quantity: u64,
        /// Bundle price
        price: u64,
    },
}

impl OfferDefinition {
    /// Check quantities and member lists.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidOffer`]: a bulk bundle of fewer than two units, or a
    ///   zero free-item or group quantity.
    /// - [`CatalogError::EmptyGroup`]: a group offer with no members.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let valid = match self {
            OfferDefinition::Bulk { quantity, .. } => *quantity > 1,
            OfferDefinition::FreeItem {
                trigger_quantity,
                target_quantity,
                ..
            } => *trigger_quantity > 0 && *target_quantity > 0,
            OfferDefinition::Group {
                members, quantity, ..
            } => {
                if members.is_empty() {
                    return Err(CatalogError::EmptyGroup(self.to_string()));
                }

                *quantity > 0
            }
        };

        if valid {
            Ok(())
        } else {
            Err(CatalogError::InvalidOffer(self.to_string()))
        }
    }

    /// Sort and de-duplicate group members; other variants are returned unchanged.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let OfferDefinition::Group { members, .. } = &mut self {
            members.sort();
            members.dedup();
        }

        self
    }

    /// Return whether this is a group offer.
    pub fn is_group(&self) -> bool {
        matches!(self, OfferDefinition::Group { .. })
    }
}

impl fmt::Display for OfferDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferDefinition::Bulk {
                code,
                quantity,
                price,
            } => write!(f, "{quantity}{code} for {price}"),
            OfferDefinition::FreeItem {
                trigger,
                trigger_quantity,
                target,
                target_quantity,
            } => {
                write!(f, "{trigger_quantity}{trigger} get ")?;

                match number_word(*target_quantity) {
                    Some(word) => f.write_str(word)?,
                    None => write!(f, "{target_quantity}")?,
                }

                write!(f, " {target} free")
            }
            OfferDefinition::Group {
                members,
                quantity,
                price,
            } => {
                write!(f, "buy any {quantity} of (")?;

                for (idx, member) in members.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }

                    write!(f, "{member}")?;
                }

                write!(f, ") for {price}")
            }
        }
    }
}

const NUMBER_WORDS: [&str; 10] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// English word for 1 to 10.
pub(crate) fn number_word(n: u64) -> Option<&'static str> {
    let idx = usize::try_from(n.checked_sub(1)?).ok()?;

    NUMBER_WORDS.get(idx).copied()
}

/// Value of an English number word from one to ten.
pub(crate) fn word_number(word: &str) -> Option<u64> {
    NUMBER_WORDS
        .iter()
        .zip(1..)
        .find_map(|(candidate, n)| candidate.eq_ignore_ascii_case(word).then_some(n))
}
